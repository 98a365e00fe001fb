#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use tempfile::TempDir;
use tripdesk::db::seed::{seed_reference_data, ReferenceData, TripSeed};
use tripdesk::db::Database;

pub struct TestServer {
    pub base_url: String,
    pub database: Database,
    handle: tokio::task::JoinHandle<()>,
    _dir: TempDir,
}

impl TestServer {
    /// Serves the production router on an ephemeral port over a fresh database
    pub async fn spawn(trips: Vec<TripSeed>) -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = dir.path().join("api.db");
        let database = Database::new(path.to_str().unwrap()).expect("failed to open database");

        let data = ReferenceData { trips };
        database
            .run(move |conn| seed_reference_data(conn, &data))
            .await
            .expect("failed to seed trips");

        let app = tripdesk::api::routes::app(database.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            database,
            handle,
            _dir: dir,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

pub fn trip(name: &str, start: NaiveDateTime, countries: &[&str]) -> TripSeed {
    TripSeed {
        name: name.to_string(),
        description: format!("{} description", name),
        date_from: start,
        date_to: start + chrono::Duration::days(7),
        max_people: 20,
        countries: countries.iter().map(|c| c.to_string()).collect(),
    }
}

pub fn registration_body(id_trip: i32, pesel: &str) -> serde_json::Value {
    serde_json::json!({
        "IdTrip": id_trip,
        "FirstName": "Anna",
        "LastName": "Nowak",
        "Email": "anna@example.com",
        "Telephone": "+48 600 000 000",
        "Pesel": pesel,
        "PaymentDate": null
    })
}
