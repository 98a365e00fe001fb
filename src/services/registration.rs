use super::validation::validate_registration_body;
use crate::db::{ClientRepository, ClientTrip, NewClient, TripRepository};
use crate::errors::{Error, RuleViolation};
use crate::utils::deserialize_optional_timestamp;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use serde::Deserialize;
use serde_json::Value;

/// Body of a request registering a new client to a trip
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegisterClientRequest {
    pub id_trip: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub telephone: String,
    /// National ID of the new client
    pub pesel: String,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub payment_date: Option<NaiveDateTime>,
}

/// Rows created by a successful registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
    pub id_client: i32,
    pub id_trip: i32,
}

/// Turns a raw body into a request, checking its shape first
///
/// The trip is always taken from the body's `IdTrip`.
pub fn parse_registration(body: Value) -> Result<RegisterClientRequest, Error> {
    validate_registration_body(&body)?;

    let request: RegisterClientRequest = serde_json::from_value(body)
        .map_err(|e| Error::InvalidInput(format!("Invalid request body: {}", e)))?;

    Ok(request)
}

/// Creates a client and registers it to a trip in one transaction
///
/// Checks run in order and the first failure wins:
/// 1. no client holds the national ID
/// 2. no registration belongs to a client holding the national ID
/// 3. the trip exists
/// 4. the trip has not started at `now`
///
/// Check 2 cannot fail once check 1 has passed; both are kept.
/// Nothing is written unless every check passes.
pub fn register_client(
    conn: &mut SqliteConnection,
    request: &RegisterClientRequest,
    now: NaiveDateTime,
) -> Result<Registration, Error> {
    conn.transaction::<_, Error, _>(|conn| {
        {
            let mut clients = ClientRepository::new(conn);
            if clients.exists_by_pesel(&request.pesel)? {
                return Err(RuleViolation::ClientAlreadyExists.into());
            }
            if clients.assigned_by_pesel(&request.pesel)? {
                return Err(RuleViolation::ClientAlreadyAssigned.into());
            }
        }

        let trip = TripRepository::new(conn)
            .find_trip(request.id_trip)?
            .ok_or_else(|| Error::NotFound("Trip not found".to_string()))?;

        if trip.date_from < now {
            return Err(RuleViolation::TripAlreadyStarted.into());
        }

        let mut clients = ClientRepository::new(conn);
        let id_client = clients.insert_client(&NewClient {
            first_name: &request.first_name,
            last_name: &request.last_name,
            email: &request.email,
            telephone: &request.telephone,
            pesel: &request.pesel,
        })?;

        clients.insert_client_trip(&ClientTrip {
            id_client,
            id_trip: trip.id_trip,
            registered_at: now,
            payment_date: request.payment_date,
        })?;

        Ok(Registration {
            id_client,
            id_trip: trip.id_trip,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::seed::{seed_reference_data, ReferenceData, TripSeed};
    use crate::db::testing::temp_database;
    use chrono::NaiveDate;
    use serde_json::json;

    fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn now() -> NaiveDateTime {
        day(2026, 10, 16)
    }

    fn seed(conn: &mut SqliteConnection, starts: &[NaiveDateTime]) -> Vec<i32> {
        let trips = starts
            .iter()
            .enumerate()
            .map(|(i, start)| TripSeed {
                name: format!("Trip {}", i),
                description: String::new(),
                date_from: *start,
                date_to: *start + chrono::Duration::days(3),
                max_people: 8,
                countries: vec!["Poland".to_string()],
            })
            .collect();
        seed_reference_data(conn, &ReferenceData { trips }).unwrap()
    }

    fn request(id_trip: i32, pesel: &str) -> RegisterClientRequest {
        RegisterClientRequest {
            id_trip,
            first_name: "Anna".to_string(),
            last_name: "Nowak".to_string(),
            email: "anna@example.com".to_string(),
            telephone: "600000000".to_string(),
            pesel: pesel.to_string(),
            payment_date: None,
        }
    }

    fn client_count(conn: &mut SqliteConnection) -> i64 {
        use crate::schema::client;
        client::table.count().get_result(conn).unwrap()
    }

    #[test]
    fn registers_client_and_link_together() {
        let (_dir, database) = temp_database();
        let mut conn = database.get_conn().unwrap();
        let trips = seed(&mut conn, &[day(2030, 1, 1)]);

        let mut req = request(trips[0], "90010112345");
        req.payment_date = Some(day(2026, 10, 1));
        let registration = register_client(&mut conn, &req, now()).unwrap();
        assert_eq!(registration.id_trip, trips[0]);

        let mut clients = ClientRepository::new(&mut conn);
        let stored = clients.find_by_pesel("90010112345").unwrap().unwrap();
        assert_eq!(stored.id_client, registration.id_client);
        assert_eq!(stored.email, "anna@example.com");

        let links = clients.registrations_of(registration.id_client).unwrap();
        assert_eq!(
            links,
            vec![ClientTrip {
                id_client: registration.id_client,
                id_trip: trips[0],
                registered_at: now(),
                payment_date: Some(day(2026, 10, 1)),
            }]
        );
    }

    #[test]
    fn existing_national_id_is_refused_first() {
        let (_dir, database) = temp_database();
        let mut conn = database.get_conn().unwrap();
        let trips = seed(&mut conn, &[day(2030, 1, 1)]);

        register_client(&mut conn, &request(trips[0], "1"), now()).unwrap();
        // unknown trip would be a 404, but the duplicate check comes first
        let err = register_client(&mut conn, &request(9999, "1"), now()).unwrap_err();
        assert!(matches!(
            err,
            Error::Rejected(RuleViolation::ClientAlreadyExists)
        ));
        assert_eq!(client_count(&mut conn), 1);
    }

    #[test]
    fn unknown_trip_is_not_found() {
        let (_dir, database) = temp_database();
        let mut conn = database.get_conn().unwrap();
        seed(&mut conn, &[day(2030, 1, 1)]);

        let err = register_client(&mut conn, &request(9999, "2"), now()).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(client_count(&mut conn), 0);
    }

    #[test]
    fn started_trip_is_refused() {
        let (_dir, database) = temp_database();
        let mut conn = database.get_conn().unwrap();
        let trips = seed(&mut conn, &[day(2020, 6, 1), now()]);

        let err = register_client(&mut conn, &request(trips[0], "3"), now()).unwrap_err();
        assert!(matches!(
            err,
            Error::Rejected(RuleViolation::TripAlreadyStarted)
        ));
        assert_eq!(client_count(&mut conn), 0);

        // a trip starting exactly now has not started yet
        register_client(&mut conn, &request(trips[1], "3"), now()).unwrap();
        assert_eq!(client_count(&mut conn), 1);
    }

    #[test]
    fn failed_link_insert_rolls_back_the_client() {
        let (_dir, database) = temp_database();
        let mut conn = database.get_conn().unwrap();
        let trips = seed(&mut conn, &[day(2030, 1, 1)]);

        // the client insert succeeds, the link insert aborts
        use diesel::connection::SimpleConnection;
        conn.batch_execute(
            "CREATE TRIGGER refuse_links BEFORE INSERT ON client_trip \
             BEGIN SELECT RAISE(ABORT, 'refused'); END;",
        )
        .unwrap();

        let err = register_client(&mut conn, &request(trips[0], "4"), now());
        assert!(matches!(err, Err(Error::DieselError(_))));
        assert_eq!(client_count(&mut conn), 0);
    }

    #[test]
    fn parse_checks_shape_then_payment_date() {
        let body = json!({
            "IdTrip": 7,
            "FirstName": "Anna",
            "LastName": "Nowak",
            "Email": "anna@example.com",
            "Telephone": "600000000",
            "Pesel": "90010112345",
            "PaymentDate": "2026-11-01"
        });

        let parsed = parse_registration(body.clone()).unwrap();
        assert_eq!(parsed.id_trip, 7);
        assert_eq!(parsed.payment_date, Some(day(2026, 11, 1)));

        let mut missing = body.clone();
        missing.as_object_mut().unwrap().remove("Pesel");
        assert!(matches!(
            parse_registration(missing),
            Err(Error::InvalidInput(_))
        ));

        let mut bad_date = body;
        bad_date["PaymentDate"] = json!("someday");
        assert!(matches!(
            parse_registration(bad_date),
            Err(Error::InvalidInput(_))
        ));
    }
}
