use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::api::AppError;

#[derive(sqlx::FromRow, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelAirline {
    pub airline_id: i64,
    pub name: String,
    pub iata_code: Option<String>,
    pub contact_info: Option<String>,
}

const SELECT_AIRLINE: &str = r"
SELECT
    AirlineID AS airline_id,
    Name AS name,
    IATA_Code AS iata_code,
    ContactInfo AS contact_info
FROM
    Airlines";

impl ModelAirline {
    pub async fn get(db: &SqlitePool, airline_id: i64) -> Result<Option<Self>, AppError> {
        let query = format!("{SELECT_AIRLINE}\nWHERE\n    AirlineID = ?");
        Ok(sqlx::query_as::<_, Self>(&query)
            .bind(airline_id)
            .fetch_optional(db)
            .await?)
    }

    pub async fn get_all(db: &SqlitePool) -> Result<Vec<Self>, AppError> {
        let query = format!("{SELECT_AIRLINE}\nORDER BY\n    Name");
        Ok(sqlx::query_as::<_, Self>(&query).fetch_all(db).await?)
    }
}

// Run tests with
//
// cargo watch -q -c -w src/ -x 'test model_airline '
#[cfg(test)]
#[expect(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{S, api::tests::test_setup, db_sqlite::tests::seed};

    #[tokio::test]
    async fn model_airline_get_known() {
        let test_setup = test_setup().await;
        let seeded = seed(&test_setup.sqlite).await;

        let result = ModelAirline::get(&test_setup.sqlite, seeded.aeroflot).await;

        assert!(result.is_ok());
        let result = result.unwrap().unwrap();
        assert_eq!(
            result,
            ModelAirline {
                airline_id: seeded.aeroflot,
                name: S!("Aeroflot"),
                iata_code: Some(S!("SU")),
                contact_info: Some(S!("+7 495 223 55 55")),
            }
        );
    }

    #[tokio::test]
    async fn model_airline_get_unknown() {
        let test_setup = test_setup().await;
        seed(&test_setup.sqlite).await;

        let result = ModelAirline::get(&test_setup.sqlite, 9999).await;

        assert!(result.is_ok());
        assert!(result.unwrap().is_none());
    }

    #[tokio::test]
    async fn model_airline_get_all_ordered_by_name() {
        let test_setup = test_setup().await;
        let seeded = seed(&test_setup.sqlite).await;

        let result = ModelAirline::get_all(&test_setup.sqlite).await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].airline_id, seeded.aeroflot);
        assert_eq!(result[1].airline_id, seeded.air_france);
        assert!(result[1].contact_info.is_none());
    }
}
