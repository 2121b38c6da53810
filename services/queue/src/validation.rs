//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

/// Validate a display name
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name is required".to_string());
    }

    if name.len() > 80 {
        return Err("Name must be at most 80 characters long".to_string());
    }

    Ok(())
}

/// Validate an email address
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 120 {
        return Err("Email must be at most 120 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate a free-text field such as a description or location
pub fn validate_text(label: &str, value: &str) -> Result<(), String> {
    if value.len() > 200 {
        return Err(format!("{} must be at most 200 characters long", label));
    }

    Ok(())
}

/// Validate a payment amount
pub fn validate_payment(payment: f64) -> Result<(), String> {
    if !payment.is_finite() {
        return Err("Payment must be a finite amount".to_string());
    }

    if payment < 0.0 {
        return Err("Payment must not be negative".to_string());
    }

    Ok(())
}
