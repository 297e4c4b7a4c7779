//! Field-level validation.
//!
//! Every rule for a shape runs and records its failures in a [`ValidationErrors`] map keyed by
//! property name, so callers always report the full set of problems at once.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// Letters of any script and decimal digits. Other numerics (superscripts, fractions,
    /// roman numerals) and combining marks are rejected.
    static ref LOGIN_REGEX: Regex =
        Regex::new(r"^[\p{L}\p{Nd}]+$").expect("login pattern compiles");
}

pub const LOGIN_FORMAT_MESSAGE: &str = "login must contain only letters or digits";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(transparent)]
#[error("validation failed for {} field(s)", .0.len())]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) -> &mut Self {
        self.0.entry(field.into()).or_default().push(message.into());
        self
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `Ok(())` when nothing was recorded, otherwise the collected errors.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// A shape that can check itself against its declared field rules.
pub trait Validate {
    fn validate(&self) -> ValidationErrors;
}

pub fn is_valid_login(login: &str) -> bool {
    LOGIN_REGEX.is_match(login)
}

/// Records the standard "required" message when the value is missing or blank.
pub fn require(errors: &mut ValidationErrors, field: &str, value: Option<&str>) {
    if value.map_or(true, |v| v.trim().is_empty()) {
        errors.add(field, format!("The {} field is required.", field));
    }
}

/// Records the login format message when a present, non-empty login has other characters
/// than letters and digits. Absence is left to [`require`].
pub fn login_format(errors: &mut ValidationErrors, field: &str, value: Option<&str>) {
    if let Some(login) = value.filter(|v| !v.is_empty()) {
        if !is_valid_login(login) {
            errors.add(field, LOGIN_FORMAT_MESSAGE);
        }
    }
}
