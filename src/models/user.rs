//! User registration request/response models

use chrono::{DateTime, FixedOffset};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{sea_orm_active_enums::Status, users};
use crate::models::required_text;

const MAX_EMAIL_LENGTH: usize = 255;
const MAX_DISPLAY_NAME_LENGTH: usize = 100;

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").unwrap();
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    pub email: String,
    pub display_name: String,
}

/// Registration input after validation; email is lower-cased
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub display_name: String,
}

impl RegisterUserRequest {
    pub fn validate(&self) -> Result<NewUser, String> {
        let email = required_text("email", &self.email, MAX_EMAIL_LENGTH)?.to_lowercase();
        if !EMAIL_RE.is_match(&email) {
            return Err(format!("Invalid email address: '{}'", email));
        }
        let display_name = required_text("displayName", &self.display_name, MAX_DISPLAY_NAME_LENGTH)?;
        Ok(NewUser {
            email,
            display_name,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub status: Status,
    pub created_at: DateTime<FixedOffset>,
}

impl From<users::Model> for UserResponse {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            display_name: model.display_name,
            status: model.status,
            created_at: model.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, name: &str) -> RegisterUserRequest {
        RegisterUserRequest {
            email: email.to_string(),
            display_name: name.to_string(),
        }
    }

    #[test]
    fn test_valid_registration_lowercases_email() {
        let user = request("Ana.Lopez@Example.COM", " Ana ").validate().unwrap();
        assert_eq!(user.email, "ana.lopez@example.com");
        assert_eq!(user.display_name, "Ana");
    }

    #[test]
    fn test_invalid_email_rejected() {
        for email in ["no-at-sign", "a@b", "@example.com", "a b@example.com"] {
            assert!(request(email, "Ana").validate().is_err(), "{} should be rejected", email);
        }
    }

    #[test]
    fn test_blank_display_name_rejected() {
        assert!(request("ana@example.com", "  ").validate().is_err());
    }
}
