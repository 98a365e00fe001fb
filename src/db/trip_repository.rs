use crate::db::models::{Country, CountryTrip, NewTrip, Trip};
use crate::errors::Error;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

/// Repository for trip and country reference data
pub struct TripRepository<'a> {
    /// Database connection
    pub conn: &'a mut SqliteConnection,
}

impl<'a> TripRepository<'a> {
    /// Creates a new TripRepository instance
    ///
    /// # Arguments
    ///
    /// * `conn` - Mutable reference to SQLite database connection
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        TripRepository { conn }
    }

    /// Counts every trip in the store
    pub fn count_trips(&mut self) -> Result<i64, Error> {
        use crate::schema::trip::dsl::*;
        Ok(trip.count().get_result(self.conn)?)
    }

    /// Loads one window of trips, most recent start date first
    ///
    /// Trips sharing a start date are ordered by identity so that
    /// consecutive windows never overlap.
    ///
    /// # Arguments
    ///
    /// * `offset` - Number of trips to skip
    /// * `limit` - Maximum number of trips to return
    ///
    /// # Errors
    ///
    /// Returns an Error if database operations fail
    pub fn list_page(&mut self, offset: i64, limit: i64) -> Result<Vec<Trip>, Error> {
        use crate::schema::trip::dsl::*;
        let found = trip
            .order((date_from.desc(), id_trip.asc()))
            .offset(offset)
            .limit(limit)
            .select(Trip::as_select())
            .load(self.conn)?;
        Ok(found)
    }

    /// Retrieves a single trip by its identity
    pub fn find_trip(&mut self, trip_id: i32) -> Result<Option<Trip>, Error> {
        use crate::schema::trip::dsl::*;
        let found = trip
            .find(trip_id)
            .select(Trip::as_select())
            .first(self.conn)
            .optional()?;
        Ok(found)
    }

    /// Looks up a trip by its name and start date
    pub fn find_trip_by_name_and_start(
        &mut self,
        trip_name: &str,
        start: chrono::NaiveDateTime,
    ) -> Result<Option<Trip>, Error> {
        use crate::schema::trip::dsl::*;
        let found = trip
            .filter(name.eq(trip_name))
            .filter(date_from.eq(start))
            .order(id_trip.asc())
            .select(Trip::as_select())
            .first(self.conn)
            .optional()?;
        Ok(found)
    }

    /// Returns `(id_trip, country name)` pairs for the given trips
    ///
    /// # Arguments
    ///
    /// * `trip_ids` - Trips to look up
    ///
    /// # Returns
    ///
    /// Pairs ordered by trip, then by country identity
    pub fn country_names_for(&mut self, trip_ids: &[i32]) -> Result<Vec<(i32, String)>, Error> {
        use crate::schema::{country, country_trip};
        let rows = country_trip::table
            .inner_join(country::table)
            .filter(country_trip::id_trip.eq_any(trip_ids.to_vec()))
            .order((country_trip::id_trip.asc(), country::id_country.asc()))
            .select((country_trip::id_trip, country::name))
            .load::<(i32, String)>(self.conn)?;
        Ok(rows)
    }

    /// Returns `(id_trip, first name, last name)` for every client registered to the given trips
    ///
    /// Rows are ordered by trip, then by registration time.
    pub fn client_names_for(
        &mut self,
        trip_ids: &[i32],
    ) -> Result<Vec<(i32, String, String)>, Error> {
        use crate::schema::{client, client_trip};
        let rows = client_trip::table
            .inner_join(client::table)
            .filter(client_trip::id_trip.eq_any(trip_ids.to_vec()))
            .order((
                client_trip::id_trip.asc(),
                client_trip::registered_at.asc(),
                client::id_client.asc(),
            ))
            .select((client_trip::id_trip, client::first_name, client::last_name))
            .load::<(i32, String, String)>(self.conn)?;
        Ok(rows)
    }

    /// Inserts a trip and returns its identity
    pub fn insert_trip(&mut self, new_trip: &NewTrip<'_>) -> Result<i32, Error> {
        use crate::schema::trip;
        let id = diesel::insert_into(trip::table)
            .values(new_trip)
            .returning(trip::id_trip)
            .get_result(self.conn)?;
        Ok(id)
    }

    /// Returns the identity of the country with this name, inserting it when missing
    pub fn find_or_insert_country(&mut self, country_name: &str) -> Result<i32, Error> {
        use crate::schema::country;
        let existing = country::table
            .filter(country::name.eq(country_name))
            .select(Country::as_select())
            .first(self.conn)
            .optional()?;

        if let Some(found) = existing {
            return Ok(found.id_country);
        }

        let id = diesel::insert_into(country::table)
            .values(country::name.eq(country_name))
            .returning(country::id_country)
            .get_result(self.conn)?;
        Ok(id)
    }

    /// Links a country to a trip; returns false when the link already existed
    pub fn link_country(&mut self, link: &CountryTrip) -> Result<bool, Error> {
        use crate::schema::country_trip;
        let inserted = diesel::insert_or_ignore_into(country_trip::table)
            .values(link)
            .execute(self.conn)?;
        Ok(inserted > 0)
    }
}
