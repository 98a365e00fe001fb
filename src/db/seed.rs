//! Loading of trip and country reference data from a YAML file

use crate::db::{CountryTrip, NewTrip, TripRepository};
use crate::errors::Error;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::{debug, info};

/// Reference data file contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceData {
    #[serde(default)]
    pub trips: Vec<TripSeed>,
}

/// One trip together with the names of the countries it visits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripSeed {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub date_from: NaiveDateTime,
    pub date_to: NaiveDateTime,
    pub max_people: i32,
    #[serde(default)]
    pub countries: Vec<String>,
}

/// Loads reference data from a YAML file
///
/// # Arguments
///
/// * `file_path` - Path to the YAML seed file
///
/// # Returns
///
/// * `Result<ReferenceData, Box<dyn std::error::Error>>` - The parsed data, or an error if loading/parsing fails
pub fn load_reference_data(file_path: &str) -> Result<ReferenceData, Box<dyn std::error::Error>> {
    let yaml_str = fs::read_to_string(file_path)?;
    let data: ReferenceData = serde_yaml::from_str(&yaml_str)?;
    info!("Loaded {} trips from {}", data.trips.len(), file_path);
    Ok(data)
}

/// Inserts every trip of `data` in one transaction and returns their identities
///
/// Countries are matched by name and created when missing. A trip with the
/// same name and start date as a stored one is reused, so seeding the same
/// data again leaves the store unchanged. The returned identities follow the
/// order of `data.trips` and include reused trips.
pub fn seed_reference_data(
    conn: &mut SqliteConnection,
    data: &ReferenceData,
) -> Result<Vec<i32>, Error> {
    conn.transaction::<_, Error, _>(|conn| {
        let mut repo = TripRepository::new(conn);
        let mut seeded = Vec::with_capacity(data.trips.len());

        for seed in &data.trips {
            let id_trip = match repo.find_trip_by_name_and_start(&seed.name, seed.date_from)? {
                Some(existing) => {
                    debug!("Trip {} already present as {}", seed.name, existing.id_trip);
                    existing.id_trip
                }
                None => repo.insert_trip(&NewTrip {
                    name: &seed.name,
                    description: &seed.description,
                    date_from: seed.date_from,
                    date_to: seed.date_to,
                    max_people: seed.max_people,
                })?,
            };

            for country_name in &seed.countries {
                let id_country = repo.find_or_insert_country(country_name)?;
                let linked = repo.link_country(&CountryTrip {
                    id_country,
                    id_trip,
                })?;
                if !linked {
                    debug!("Trip {} already visits {}", seed.name, country_name);
                }
            }
            seeded.push(id_trip);
        }

        Ok(seeded)
    })
}
