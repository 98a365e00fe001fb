use crate::schema::{client, client_trip, country, country_trip, trip};
use chrono::NaiveDateTime;
use diesel::{Identifiable, Insertable, Queryable, Selectable};
use serde::Serialize;

/// Represents a client in the database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = client, primary_key(id_client))]
#[serde(rename_all = "PascalCase")]
pub struct Client {
    /// Database identity of the client
    pub id_client: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub telephone: String,
    /// National ID, used as a natural key for duplicate detection
    pub pesel: String,
}

/// Values for a client row about to be inserted
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = client)]
pub struct NewClient<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub telephone: &'a str,
    pub pesel: &'a str,
}

/// Represents a trip in the database
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = trip, primary_key(id_trip))]
pub struct Trip {
    pub id_trip: i32,
    pub name: String,
    pub description: String,
    /// Start of the trip, naive UTC
    pub date_from: NaiveDateTime,
    /// End of the trip, naive UTC
    pub date_to: NaiveDateTime,
    pub max_people: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = trip)]
pub struct NewTrip<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub date_from: NaiveDateTime,
    pub date_to: NaiveDateTime,
    pub max_people: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = country, primary_key(id_country))]
pub struct Country {
    pub id_country: i32,
    pub name: String,
}

/// Link row between a country and a trip
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Insertable)]
#[diesel(table_name = country_trip)]
pub struct CountryTrip {
    pub id_country: i32,
    pub id_trip: i32,
}

/// Registration of a client to a trip
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = client_trip)]
pub struct ClientTrip {
    pub id_client: i32,
    pub id_trip: i32,
    /// When the registration was accepted
    pub registered_at: NaiveDateTime,
    /// Optional date the client paid for the trip
    pub payment_date: Option<NaiveDateTime>,
}
