//! User types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::require_text;
use crate::error::{CadenzaError, Result};

pub type UserId = i64;

/// A registered listener
///
/// Passwords are stored and compared as given; the field is never serialized
/// and `Debug` output redacts it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub date_of_birth: Option<NaiveDate>,
    pub country: Option<String>,
}

/// Data for registering a new user
#[derive(Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub date_of_birth: Option<NaiveDate>,
    pub country: Option<String>,
}

impl CreateUser {
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            password: password.into(),
            date_of_birth: None,
            country: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_text("full_name", &self.full_name)?;
        validate_email(&self.email)?;
        require_text("password", &self.password)
    }
}

/// Partial update of a user, as done by the admin editor or the profile page
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub country: Option<String>,
}

impl UpdateUser {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.date_of_birth.is_none()
            && self.country.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.full_name {
            require_text("full_name", name)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(password) = &self.password {
            require_text("password", password)?;
        }
        Ok(())
    }
}

fn validate_email(email: &str) -> Result<()> {
    require_text("email", email)?;
    if !email.contains('@') {
        return Err(CadenzaError::invalid_input(format!(
            "email '{email}' is missing '@'"
        )));
    }
    Ok(())
}

const REDACTED: &str = "<redacted>";

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("password", &REDACTED)
            .field("date_of_birth", &self.date_of_birth)
            .field("country", &self.country)
            .finish()
    }
}

impl fmt::Debug for CreateUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUser")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("password", &REDACTED)
            .field("date_of_birth", &self.date_of_birth)
            .field("country", &self.country)
            .finish()
    }
}

impl fmt::Debug for UpdateUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateUser")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| REDACTED))
            .field("date_of_birth", &self.date_of_birth)
            .field("country", &self.country)
            .finish()
    }
}
