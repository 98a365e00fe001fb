use crate::db::models::{Client, ClientTrip, NewClient};
use crate::errors::Error;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

/// Repository for clients and their trip registrations
pub struct ClientRepository<'a> {
    /// Database connection
    pub conn: &'a mut SqliteConnection,
}

impl<'a> ClientRepository<'a> {
    /// Creates a new ClientRepository instance
    ///
    /// # Arguments
    ///
    /// * `conn` - Mutable reference to SQLite database connection
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        ClientRepository { conn }
    }

    /// Retrieves a single client by its identity
    ///
    /// # Returns
    ///
    /// `None` when no client has this identity
    pub fn find_client(&mut self, client_id: i32) -> Result<Option<Client>, Error> {
        use crate::schema::client::dsl::*;
        let found = client
            .find(client_id)
            .select(Client::as_select())
            .first(self.conn)
            .optional()?;
        Ok(found)
    }

    /// Tells whether any registration references this client
    pub fn has_trips(&mut self, client_id: i32) -> Result<bool, Error> {
        use crate::schema::client_trip::dsl::*;
        let found = diesel::select(exists(client_trip.filter(id_client.eq(client_id))))
            .get_result(self.conn)?;
        Ok(found)
    }

    /// Deletes a client row and returns the number of rows removed
    pub fn delete_client(&mut self, client_id: i32) -> Result<usize, Error> {
        use crate::schema::client::dsl::*;
        Ok(diesel::delete(client.find(client_id)).execute(self.conn)?)
    }

    /// Tells whether a client with this national ID exists
    pub fn exists_by_pesel(&mut self, national_id: &str) -> Result<bool, Error> {
        use crate::schema::client::dsl::*;
        let found = diesel::select(exists(client.filter(pesel.eq(national_id))))
            .get_result(self.conn)?;
        Ok(found)
    }

    /// Tells whether a client with this national ID is registered to any trip
    pub fn assigned_by_pesel(&mut self, national_id: &str) -> Result<bool, Error> {
        use crate::schema::{client, client_trip};
        let found = diesel::select(exists(
            client_trip::table
                .inner_join(client::table)
                .filter(client::pesel.eq(national_id)),
        ))
        .get_result(self.conn)?;
        Ok(found)
    }

    /// Inserts a client and returns its identity
    ///
    /// # Errors
    ///
    /// Returns an Error if database operations fail
    pub fn insert_client(&mut self, new_client: &NewClient<'_>) -> Result<i32, Error> {
        use crate::schema::client;
        let id = diesel::insert_into(client::table)
            .values(new_client)
            .returning(client::id_client)
            .get_result(self.conn)?;
        Ok(id)
    }

    pub fn insert_client_trip(&mut self, registration: &ClientTrip) -> Result<(), Error> {
        use crate::schema::client_trip;
        diesel::insert_into(client_trip::table)
            .values(registration)
            .execute(self.conn)?;
        Ok(())
    }

    /// Loads every registration of a client
    #[cfg(test)]
    pub fn registrations_of(&mut self, client_id: i32) -> Result<Vec<ClientTrip>, Error> {
        use crate::schema::client_trip::dsl::*;
        let found = client_trip
            .filter(id_client.eq(client_id))
            .order(registered_at.asc())
            .select(ClientTrip::as_select())
            .load(self.conn)?;
        Ok(found)
    }

    /// Retrieves the client holding this national ID, if any
    #[cfg(test)]
    pub fn find_by_pesel(&mut self, national_id: &str) -> Result<Option<Client>, Error> {
        use crate::schema::client::dsl::*;
        let found = client
            .filter(pesel.eq(national_id))
            .order(id_client.asc())
            .select(Client::as_select())
            .first(self.conn)
            .optional()?;
        Ok(found)
    }
}
