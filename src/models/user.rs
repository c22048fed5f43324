use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Role held by a signed-in user for the lifetime of the session.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum UserRole {
    Admin,
    Manager,
    Staff,
    /// Stock clerk. Older identity records call this role `estoquista`.
    #[serde(alias = "estoquista")]
    #[strum(to_string = "operator", serialize = "estoquista")]
    Operator,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}
