//! Records served by the upstream directory.
//!
//! Field names follow the JSON the upstream serves; everything is owned and
//! immutable once decoded.

use serde::Deserialize;

/// Numeric identity assigned by the upstream.
pub type UserId = u64;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub company: Company,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
    #[serde(default)]
    pub geo: Geo,
}

/// Coordinates are strings upstream and are kept that way.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    pub catch_phrase: String,
    pub bs: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub title: String,
    pub body: String,
}

impl Address {
    /// One-line postal form: "street, suite, city zipcode".
    pub fn one_line(&self) -> String {
        format!("{}, {}, {} {}", self.street, self.suite, self.city, self.zipcode)
    }
}
