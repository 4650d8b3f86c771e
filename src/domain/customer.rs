//! Customer domain entity and related types.
//!
//! One canonical entity backs both the storefront account and the admin
//! "customer"/"user" surfaces; the `is_admin` flag splits the listings.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Customer domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub gender: String,
    pub profile: Option<String>,
    /// Always-present admin flag. Admin gating checks this field and
    /// nothing else.
    pub is_admin: bool,
}

impl Customer {
    pub fn is_admin(&self) -> bool {
        self.is_admin
    }
}

/// Customer response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CustomerResponse {
    /// Unique customer identifier
    #[schema(example = 42)]
    pub id: i32,
    /// Display name
    #[schema(example = "John Doe")]
    pub name: String,
    /// E-mail address
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Gender
    #[schema(example = "male")]
    pub gender: String,
    /// Profile text
    pub profile: Option<String>,
    /// Admin flag
    pub is_admin: bool,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            email: customer.email,
            gender: customer.gender,
            profile: customer.profile,
            is_admin: customer.is_admin,
        }
    }
}

/// Fields accepted when an admin creates an account
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateCustomer {
    pub name: String,
    pub email: String,
    /// Plain-text password, hashed before storage
    pub password: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

/// Fields accepted when an admin updates an account.
///
/// Only provided fields are mutated; a provided password is re-hashed.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateCustomer {
    pub name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub profile: Option<String>,
    pub password: Option<String>,
    pub is_admin: Option<bool>,
}
