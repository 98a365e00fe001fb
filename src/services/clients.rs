use crate::db::{Client, ClientRepository};
use crate::errors::{Error, RuleViolation};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

/// Deletes a client that has no trip registrations and returns its last state
///
/// # Errors
///
/// * `Error::NotFound` if no client has this identity
/// * `RuleViolation::ClientHasTrips` if any registration references the client
pub fn delete_client(conn: &mut SqliteConnection, id_client: i32) -> Result<Client, Error> {
    conn.transaction::<_, Error, _>(|conn| {
        let mut repo = ClientRepository::new(conn);

        let client = repo
            .find_client(id_client)?
            .ok_or_else(|| Error::NotFound(format!("Client {} not found", id_client)))?;

        if repo.has_trips(id_client)? {
            return Err(RuleViolation::ClientHasTrips.into());
        }

        repo.delete_client(id_client)?;
        Ok(client)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::seed::{seed_reference_data, ReferenceData, TripSeed};
    use crate::db::testing::temp_database;
    use crate::db::{ClientTrip, NewClient};
    use chrono::NaiveDate;

    fn new_client(pesel: &str) -> NewClient<'_> {
        NewClient {
            first_name: "Jan",
            last_name: "Kowalski",
            email: "jan@example.com",
            telephone: "123456789",
            pesel,
        }
    }

    #[test]
    fn deletes_client_without_trips() {
        let (_dir, database) = temp_database();
        let mut conn = database.get_conn().unwrap();
        let id = ClientRepository::new(&mut conn)
            .insert_client(&new_client("80010100000"))
            .unwrap();

        let deleted = delete_client(&mut conn, id).unwrap();
        assert_eq!(deleted.id_client, id);
        assert_eq!(deleted.pesel, "80010100000");

        let again = delete_client(&mut conn, id).unwrap_err();
        assert!(matches!(again, Error::NotFound(_)));
        assert!(ClientRepository::new(&mut conn)
            .find_client(id)
            .unwrap()
            .is_none());
    }

    #[test]
    fn unknown_client_is_not_found() {
        let (_dir, database) = temp_database();
        let mut conn = database.get_conn().unwrap();
        assert!(matches!(
            delete_client(&mut conn, 42),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn client_with_trips_is_kept() {
        let (_dir, database) = temp_database();
        let mut conn = database.get_conn().unwrap();
        let start = NaiveDate::from_ymd_opt(2030, 5, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let trips = seed_reference_data(
            &mut conn,
            &ReferenceData {
                trips: vec![TripSeed {
                    name: "Lisbon".to_string(),
                    description: String::new(),
                    date_from: start,
                    date_to: start,
                    max_people: 4,
                    countries: vec![],
                }],
            },
        )
        .unwrap();

        let mut repo = ClientRepository::new(&mut conn);
        let id = repo.insert_client(&new_client("80010100001")).unwrap();
        repo.insert_client_trip(&ClientTrip {
            id_client: id,
            id_trip: trips[0],
            registered_at: start,
            payment_date: Some(start),
        })
        .unwrap();

        let err = delete_client(&mut conn, id).unwrap_err();
        assert!(matches!(err, Error::Rejected(RuleViolation::ClientHasTrips)));
        assert!(ClientRepository::new(&mut conn)
            .find_client(id)
            .unwrap()
            .is_some());
    }

    #[test]
    fn deleted_client_serializes_with_wire_names() {
        let client = Client {
            id_client: 3,
            first_name: "Jan".to_string(),
            last_name: "Kowalski".to_string(),
            email: "jan@example.com".to_string(),
            telephone: "123".to_string(),
            pesel: "1".to_string(),
        };
        let json = serde_json::to_value(&client).unwrap();
        assert_eq!(json["IdClient"], 3);
        assert_eq!(json["FirstName"], "Jan");
        assert_eq!(json["Pesel"], "1");
    }
}
