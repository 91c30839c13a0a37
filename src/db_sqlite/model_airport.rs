use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::api::AppError;

/// An airport, with the city and country it belongs to
#[derive(sqlx::FromRow, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelAirport {
    pub airport_id: i64,
    pub airport_name: String,
    pub iata_code: Option<String>,
    pub city_id: Option<i64>,
    pub city_name: Option<String>,
    pub country_id: Option<i64>,
    pub country_name: Option<String>,
}

impl ModelAirport {
    pub async fn get(db: &SqlitePool, airport_id: i64) -> Result<Option<Self>, AppError> {
        let query = r"
SELECT
    ap.AirportID AS airport_id,
    ap.AirportName AS airport_name,
    ap.IATA_Code AS iata_code,
    ci.CityID AS city_id,
    ci.Name AS city_name,
    co.CountryID AS country_id,
    co.Name AS country_name
FROM
    Airports ap
LEFT JOIN City ci ON ci.CityID = ap.CityID
LEFT JOIN Country co ON co.CountryID = ci.CountryID
WHERE
    ap.AirportID = ?";
        Ok(sqlx::query_as::<_, Self>(query)
            .bind(airport_id)
            .fetch_optional(db)
            .await?)
    }
}
