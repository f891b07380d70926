//! Form validation run before any request leaves the browser.
//!
//! The password rule is the classic lookahead pattern
//! `^(?=.*[a-z])(?=.*[A-Z])(?=.*\d)(?=.*[@$!%*?&])[A-Za-z\d@$!%*?&]{8,}$`.
//! The `regex` crate has no lookaround, so each lookahead is its own check.
//! Digit classes are spelled `[0-9]` because `\d` is Unicode-aware here.

use regex::Regex;
use std::sync::LazyLock;

use super::error::ValidationError;
use super::models::{LoginRequest, NewContact, RegisterRequest, StartTripRequest};
use super::settings::PHONE_COUNTRY_CODE;

#[allow(clippy::expect_used)] // literal patterns
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s]+$").expect("name pattern"));

#[allow(clippy::expect_used)]
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

#[allow(clippy::expect_used)]
static PASSWORD_CHARSET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9@$!%*?&]{8,}$").expect("password pattern"));

#[allow(clippy::expect_used)]
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern"));

const PASSWORD_SPECIALS: &str = "@$!%*?&";

pub fn is_valid_name(name: &str) -> bool {
    NAME_RE.is_match(name)
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_strong_password(password: &str) -> bool {
    PASSWORD_CHARSET_RE.is_match(password)
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// Signup checks run in order name, email, password; the first failure wins.
/// Name and email are trimmed, the password is taken verbatim.
pub fn signup_form(
    name: &str,
    email: &str,
    password: &str,
) -> Result<RegisterRequest, ValidationError> {
    let name = name.trim();
    let email = email.trim();

    if !is_valid_name(name) {
        return Err(ValidationError::InvalidUsername);
    }
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    if !is_strong_password(password) {
        return Err(ValidationError::WeakPassword);
    }

    Ok(RegisterRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    })
}

/// Login only checks shape: accounts predating the password rule must still
/// be able to sign in, so the strength rule is not applied here.
pub fn login_form(email: &str, password: &str) -> Result<LoginRequest, ValidationError> {
    let email = email.trim();
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    if password.is_empty() {
        return Err(ValidationError::MissingPassword);
    }
    Ok(LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    })
}

/// Contact checks run in order name, phone, email. The phone goes out with
/// the country code prepended; an empty email is allowed.
pub fn contact_form(name: &str, phone: &str, email: &str) -> Result<NewContact, ValidationError> {
    let name = name.trim();
    let phone = phone.trim();
    let email = email.trim();

    if !is_valid_name(name) {
        return Err(ValidationError::InvalidContactName);
    }
    if !is_valid_phone(phone) {
        return Err(ValidationError::InvalidPhone);
    }
    if !email.is_empty() && !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(NewContact {
        name: name.to_string(),
        phone: format!("{PHONE_COUNTRY_CODE}{phone}"),
        email: email.to_string(),
    })
}

pub fn trip_form(destination: &str, interval_minutes: &str) -> Result<StartTripRequest, ValidationError> {
    let destination = destination.trim();
    if destination.is_empty() {
        return Err(ValidationError::MissingDestination);
    }
    let interval_minutes = interval_minutes
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|m| *m > 0)
        .ok_or(ValidationError::InvalidInterval)?;

    Ok(StartTripRequest {
        destination: destination.to_string(),
        interval_minutes,
    })
}
