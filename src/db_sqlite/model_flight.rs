use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::api::AppError;

/// Dates are returned as stored, rows are inserted outside the application and nothing enforces a format
#[derive(sqlx::FromRow, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelFlight {
    pub flight_id: i64,
    pub airline_id: Option<i64>,
    pub departure_date: Option<String>,
    pub arrival_date: Option<String>,
    pub origin_airport_id: Option<i64>,
    pub destination_airport_id: Option<i64>,
    pub price: Option<f64>,
}

/// The fixed menu of flight lookups.
///
/// City and Country ids are both compared against the origin and destination *airport* ids,
/// no join through Airports -> City -> Country is made.
/// A date matches a flight if either the departure or the arrival falls on that calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightFilter {
    Airline(i64),
    Date(NaiveDate),
    City(i64),
    Country(i64),
    AirlineCity { airline_id: i64, city_id: i64 },
    AirlineCountry { airline_id: i64, country_id: i64 },
    CityDate { city_id: i64, date: NaiveDate },
}

const AIRLINE: &str = "AirlineID = ?";
const DATE: &str = "(date(DepartureDate) = ? OR date(ArrivalDate) = ?)";
const AIRPORT: &str = "(OriginAirportID = ? OR DestinationAirportID = ?)";

impl FlightFilter {
    fn predicate(&self) -> String {
        match self {
            Self::Airline(_) => AIRLINE.to_owned(),
            Self::Date(_) => DATE.to_owned(),
            Self::City(_) | Self::Country(_) => AIRPORT.to_owned(),
            Self::AirlineCity { .. } | Self::AirlineCountry { .. } => {
                format!("{AIRLINE} AND {AIRPORT}")
            }
            Self::CityDate { .. } => format!("{AIRPORT} AND {DATE}"),
        }
    }
}

const SELECT_FLIGHT: &str = r"
SELECT
    FlightID AS flight_id,
    AirlineID AS airline_id,
    CAST(DepartureDate AS TEXT) AS departure_date,
    CAST(ArrivalDate AS TEXT) AS arrival_date,
    OriginAirportID AS origin_airport_id,
    DestinationAirportID AS destination_airport_id,
    Price AS price
FROM
    Flights";

impl ModelFlight {
    /// Every matching flight, no limit, ordered by flight_id
    pub async fn get(db: &SqlitePool, filter: &FlightFilter) -> Result<Vec<Self>, AppError> {
        let query = format!(
            "{SELECT_FLIGHT}\nWHERE\n    {}\nORDER BY\n    FlightID",
            filter.predicate()
        );
        let query = sqlx::query_as::<_, Self>(&query);
        let query = match *filter {
            FlightFilter::Airline(airline_id) => query.bind(airline_id),
            FlightFilter::Date(date) => query.bind(date).bind(date),
            FlightFilter::City(id) | FlightFilter::Country(id) => query.bind(id).bind(id),
            FlightFilter::AirlineCity {
                airline_id,
                city_id: id,
            }
            | FlightFilter::AirlineCountry {
                airline_id,
                country_id: id,
            } => query.bind(airline_id).bind(id).bind(id),
            FlightFilter::CityDate { city_id, date } => {
                query.bind(city_id).bind(city_id).bind(date).bind(date)
            }
        };
        Ok(query.fetch_all(db).await?)
    }
}

// Run tests with
//
// cargo watch -q -c -w src/ -x 'test model_flight '
#[cfg(test)]
#[expect(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{
        S,
        api::tests::test_setup,
        db_sqlite::tests::{date, seed},
    };

    async fn ids(db: &SqlitePool, filter: FlightFilter) -> Vec<i64> {
        ModelFlight::get(db, &filter)
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.flight_id)
            .collect()
    }

    #[test]
    fn model_flight_predicate() {
        assert_eq!(FlightFilter::Airline(1).predicate(), "AirlineID = ?");
        assert_eq!(
            FlightFilter::Country(1).predicate(),
            "(OriginAirportID = ? OR DestinationAirportID = ?)"
        );
        assert_eq!(
            FlightFilter::CityDate {
                city_id: 1,
                date: date("2025-06-01")
            }
            .predicate(),
            "(OriginAirportID = ? OR DestinationAirportID = ?) AND (date(DepartureDate) = ? OR date(ArrivalDate) = ?)"
        );
    }

    #[tokio::test]
    async fn model_flight_get_by_airline() {
        let test_setup = test_setup().await;
        let db = &test_setup.sqlite;
        let s = seed(db).await;

        let result = ModelFlight::get(db, &FlightFilter::Airline(s.aeroflot))
            .await
            .unwrap();
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|i| i.airline_id == Some(s.aeroflot)));

        let result = ids(db, FlightFilter::Airline(s.aeroflot)).await;
        assert_eq!(result, [s.svo_cdg, s.svo_ory]);

        let result = ids(db, FlightFilter::Airline(s.air_france)).await;
        assert_eq!(result, [s.cdg_svo, s.ory_cdg]);

        let result = ids(db, FlightFilter::Airline(9999)).await;
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn model_flight_get_full_row() {
        let test_setup = test_setup().await;
        let db = &test_setup.sqlite;
        let s = seed(db).await;

        let result = ModelFlight::get(db, &FlightFilter::Airline(s.air_france))
            .await
            .unwrap();

        assert_eq!(
            result[0],
            ModelFlight {
                flight_id: s.cdg_svo,
                airline_id: Some(s.air_france),
                departure_date: Some(S!("2025-06-01 14:00:00")),
                arrival_date: Some(S!("2025-06-01 18:00:00")),
                origin_airport_id: Some(s.cdg),
                destination_airport_id: Some(s.svo),
                price: Some(280.5),
            }
        );
    }

    #[tokio::test]
    async fn model_flight_get_by_date() {
        let test_setup = test_setup().await;
        let db = &test_setup.sqlite;
        let s = seed(db).await;

        let result = ids(db, FlightFilter::Date(date("2025-06-01"))).await;
        assert_eq!(result, [s.svo_cdg, s.cdg_svo]);

        // departs on the 3rd
        let result = ids(db, FlightFilter::Date(date("2025-06-03"))).await;
        assert_eq!(result, [s.ory_cdg]);

        // arrives on the 4th
        let result = ids(db, FlightFilter::Date(date("2025-06-04"))).await;
        assert_eq!(result, [s.ory_cdg]);

        let result = ids(db, FlightFilter::Date(date("2024-01-01"))).await;
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn model_flight_get_by_city() {
        let test_setup = test_setup().await;
        let db = &test_setup.sqlite;
        let s = seed(db).await;

        let result = ids(db, FlightFilter::City(s.svo)).await;
        assert_eq!(result, [s.svo_cdg, s.cdg_svo, s.svo_ory]);

        let result = ids(db, FlightFilter::City(s.ory)).await;
        assert_eq!(result, [s.svo_ory, s.ory_cdg]);
    }

    #[tokio::test]
    async fn model_flight_get_by_country_matches_airport_id() {
        let test_setup = test_setup().await;
        let db = &test_setup.sqlite;
        let s = seed(db).await;

        // the given id is compared with airport ids, so this is every flight touching CDG
        let result = ids(db, FlightFilter::Country(s.cdg)).await;
        assert_eq!(result, [s.svo_cdg, s.cdg_svo, s.ory_cdg]);
        assert_eq!(result, ids(db, FlightFilter::City(s.cdg)).await);
    }

    #[tokio::test]
    async fn model_flight_get_by_airline_and_city() {
        let test_setup = test_setup().await;
        let db = &test_setup.sqlite;
        let s = seed(db).await;

        let filter = |airline_id, city_id| FlightFilter::AirlineCity {
            airline_id,
            city_id,
        };

        assert_eq!(ids(db, filter(s.aeroflot, s.cdg)).await, [s.svo_cdg]);
        assert_eq!(ids(db, filter(s.air_france, s.svo)).await, [s.cdg_svo]);
        assert!(ids(db, filter(s.air_france, 9999)).await.is_empty());
    }

    #[tokio::test]
    async fn model_flight_get_by_airline_and_country() {
        let test_setup = test_setup().await;
        let db = &test_setup.sqlite;
        let s = seed(db).await;

        let filter = |airline_id, country_id| FlightFilter::AirlineCountry {
            airline_id,
            country_id,
        };

        assert_eq!(ids(db, filter(s.air_france, s.ory)).await, [s.ory_cdg]);
        assert_eq!(ids(db, filter(s.aeroflot, s.ory)).await, [s.svo_ory]);
    }

    #[tokio::test]
    async fn model_flight_get_by_city_and_date() {
        let test_setup = test_setup().await;
        let db = &test_setup.sqlite;
        let s = seed(db).await;

        let filter = |city_id, day| FlightFilter::CityDate {
            city_id,
            date: date(day),
        };

        assert_eq!(
            ids(db, filter(s.cdg, "2025-06-01")).await,
            [s.svo_cdg, s.cdg_svo]
        );
        assert_eq!(ids(db, filter(s.svo, "2025-06-02")).await, [s.svo_ory]);

        // ORY departure is on the 3rd, so both the airport and the date have to match
        assert!(ids(db, filter(s.ory, "2025-06-01")).await.is_empty());
    }

    #[tokio::test]
    async fn model_flight_get_date_only_row() {
        let test_setup = test_setup().await;
        let db = &test_setup.sqlite;
        let s = seed(db).await;

        let flight_id = sqlx::query(
            "INSERT INTO Flights (AirlineID, DepartureDate, ArrivalDate, OriginAirportID, DestinationAirportID, Price) VALUES (?, '2025-07-01', NULL, ?, ?, 120.0)",
        )
        .bind(s.aeroflot)
        .bind(s.svo)
        .bind(s.ory)
        .execute(db)
        .await
        .unwrap()
        .last_insert_rowid();

        let result = ModelFlight::get(db, &FlightFilter::Date(date("2025-07-01")))
            .await
            .unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].flight_id, flight_id);
        assert_eq!(result[0].departure_date.as_deref(), Some("2025-07-01"));
        assert!(result[0].arrival_date.is_none());

        // the odd row sits alongside well formed ones
        let result = ids(db, FlightFilter::Airline(s.aeroflot)).await;
        assert_eq!(result, [s.svo_cdg, s.svo_ory, flight_id]);
    }
}
