use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::api::AppError;

#[derive(sqlx::FromRow, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelTicket {
    pub ticket_id: i64,
    pub seat_number: Option<String>,
    pub price: Option<f64>,
    pub status: Option<String>,
    pub passenger_id: Option<i64>,
    pub booking_date: Option<String>,
    pub flight_id: Option<i64>,
}

impl ModelTicket {
    /// Every ticket, no filter, no limit
    pub async fn get_all(db: &SqlitePool) -> Result<Vec<Self>, AppError> {
        let query = r"
SELECT
    TicketID AS ticket_id,
    SeatNumber AS seat_number,
    Price AS price,
    Status AS status,
    PassengerID AS passenger_id,
    CAST(BookingDate AS TEXT) AS booking_date,
    FlightID AS flight_id
FROM
    Tickets
ORDER BY
    TicketID";
        Ok(sqlx::query_as::<_, Self>(query).fetch_all(db).await?)
    }
}
