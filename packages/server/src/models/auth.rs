use common::sanitize::sanitize_text;
use common::validation::{Fields, Schema, Text};
use serde::Serialize;

use crate::store::User;

const NAME: Text = Text::any()
    .min(2, "Name must be at least 2 characters")
    .max(100, "Name must be less than 100 characters");
const EMAIL: Text = Text::any().email("Invalid email address");
const PASSWORD: Text = Text::any()
    .min(8, "Password must be at least 8 characters")
    .max(128, "Password must be at most 128 characters");

/// Request body for user registration.
#[derive(Debug, PartialEq, utoipa::ToSchema)]
pub struct RegisterRequest {
    /// Display name (2-100 characters).
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Password (8-128 characters).
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
    /// Avatar URL.
    pub image: Option<String>,
}

impl Schema for RegisterRequest {
    fn parse(f: &mut Fields<'_>) -> Option<Self> {
        let name = f.text("name", NAME);
        let email = f.text("email", EMAIL);
        let password = f.text("password", PASSWORD);
        let image = f.optional_text("image", Text::any().url("Invalid image URL"));
        Some(Self {
            name: sanitize_text(&name?),
            email: email?.trim().to_lowercase(),
            password: password?,
            image: image?,
        })
    }
}

/// Request body for user login.
#[derive(Debug, utoipa::ToSchema)]
pub struct LoginRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
}

impl Schema for LoginRequest {
    fn parse(f: &mut Fields<'_>) -> Option<Self> {
        let email = f.text("email", Text::any().min(1, "Email must not be empty"));
        let password = f.text("password", Text::any().min(1, "Password must not be empty"));
        Some(Self {
            email: email?.trim().to_lowercase(),
            password: password?,
        })
    }
}

/// Successful login response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    /// Session token, also set as the session cookie.
    pub token: String,
    pub user: User,
}
