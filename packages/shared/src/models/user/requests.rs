use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::{
    is_valid_login, login_format, require, Validate, ValidationErrors, LOGIN_FORMAT_MESSAGE,
};

pub const DEFAULT_FIRST_NAME: &str = "John";
pub const DEFAULT_LAST_NAME: &str = "Doe";

/// Body of a create request. Names fall back to their defaults when absent or null.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserCreateDto {
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl UserCreateDto {
    pub fn new(login: &str) -> Self {
        UserCreateDto {
            login: Some(login.to_string()),
            ..Default::default()
        }
    }

    pub fn first_name(&self) -> &str {
        self.first_name.as_deref().unwrap_or(DEFAULT_FIRST_NAME)
    }

    pub fn last_name(&self) -> &str {
        self.last_name.as_deref().unwrap_or(DEFAULT_LAST_NAME)
    }
}

impl Validate for UserCreateDto {
    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "Login", self.login.as_deref());
        // Unlike the update shape, an empty login also fails the format rule here.
        if !is_valid_login(self.login.as_deref().unwrap_or_default()) {
            errors.add("Login", LOGIN_FORMAT_MESSAGE);
        }
        errors
    }
}

/// Body of a full update, and the shape a patch document is applied to.
/// `id` is always overwritten with the route value before use.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateDto {
    #[serde(default)]
    pub id: Uuid,
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl UserUpdateDto {
    pub fn new(login: &str, first_name: &str, last_name: &str) -> Self {
        UserUpdateDto {
            id: Uuid::nil(),
            login: Some(login.to_string()),
            first_name: Some(first_name.to_string()),
            last_name: Some(last_name.to_string()),
        }
    }
}

impl Validate for UserUpdateDto {
    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "Login", self.login.as_deref());
        login_format(&mut errors, "Login", self.login.as_deref());
        require(&mut errors, "FirstName", self.first_name.as_deref());
        require(&mut errors, "LastName", self.last_name.as_deref());
        errors
    }
}
