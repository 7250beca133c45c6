//! Input validation utilities
//!
//! Field-level checks run before every write. Messages are user facing and
//! surfaced verbatim in 422 responses.

use regex::Regex;
use std::sync::OnceLock;

/// Validate username
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username is required".to_string());
    }

    if username.len() < 4 {
        return Err("Username must be at least 4 characters long".to_string());
    }

    if username.len() > 32 {
        return Err("Username must be at most 32 characters long".to_string());
    }

    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = USERNAME_REGEX
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("Failed to compile username regex"));

    if !regex.is_match(username) {
        return Err("Username can only contain letters, numbers, and underscores".to_string());
    }

    Ok(())
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() < 10 {
        return Err("Email must be at least 10 characters long".to_string());
    }

    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
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

/// Validate password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    if password.len() < 8 {
        return Err("Password must be at least 8 characters long".to_string());
    }

    if password.len() > 128 {
        return Err("Password must be at most 128 characters long".to_string());
    }

    Ok(())
}

/// Validate activity title
pub fn validate_title(title: &str) -> Result<(), String> {
    if title.len() < 3 {
        return Err("Title must be at least 3 characters long".to_string());
    }

    Ok(())
}

/// Validate activity type
pub fn validate_activity_type(activity_type: &str) -> Result<(), String> {
    if activity_type.is_empty() {
        return Err("Activity type is required".to_string());
    }

    Ok(())
}

/// Validate activity description
pub fn validate_description(description: &str) -> Result<(), String> {
    if description.len() < 10 {
        return Err("Description must be at least 10 characters long".to_string());
    }

    Ok(())
}

/// Validate a location name
pub fn validate_location_name(location_name: &str) -> Result<(), String> {
    if location_name.len() < 3 {
        return Err("Location name must be at least 3 characters long".to_string());
    }

    Ok(())
}

/// Validate geographic coordinates
pub fn validate_coordinates(latitude: Option<f64>, longitude: Option<f64>) -> Result<(), String> {
    if let Some(lat) = latitude {
        if !(-90.0..=90.0).contains(&lat) {
            return Err("Latitude must be between -90 and 90".to_string());
        }
    }

    if let Some(lon) = longitude {
        if !(-180.0..=180.0).contains(&lon) {
            return Err("Longitude must be between -180 and 180".to_string());
        }
    }

    Ok(())
}

/// Validate comment content
pub fn validate_comment_content(content: &str) -> Result<(), String> {
    if content.len() < 10 {
        return Err("Comment must be at least 10 characters long".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(validate_username("abcd").is_ok());
        assert!(validate_username("user_123").is_ok());

        assert!(validate_username("").is_err());
        assert!(validate_username("abc").is_err());
        assert!(validate_username("has spaces").is_err());
        assert!(validate_username(&"a".repeat(33)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("a@b.co").is_err()); // under 10 chars
        assert!(validate_email("not-an-email-address").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("hunter22!").is_ok());

        assert!(validate_password("").is_err());
        assert!(validate_password("short").is_err());
        assert!(validate_password(&"p".repeat(129)).is_err());
    }

    #[test]
    fn test_validate_activity_fields() {
        assert!(validate_title("Sunset walk").is_ok());
        assert!(validate_title("ab").is_err());

        assert!(validate_activity_type("Stargazing").is_ok());
        assert!(validate_activity_type("").is_err());

        assert!(validate_description("A long enough description").is_ok());
        assert!(validate_description("too short").is_err());

        assert!(validate_location_name("Yosemite").is_ok());
        assert!(validate_location_name("ab").is_err());
    }

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_coordinates(None, None).is_ok());
        assert!(validate_coordinates(Some(37.8651), Some(-119.5383)).is_ok());

        assert!(validate_coordinates(Some(91.0), None).is_err());
        assert!(validate_coordinates(None, Some(-181.0)).is_err());
    }

    #[test]
    fn test_validate_comment_content() {
        assert!(validate_comment_content("What a beautiful spot!").is_ok());
        assert!(validate_comment_content("nice").is_err());
    }
}
