//! Validation utilities for farmer input
//!
//! Includes India-specific checks for phone numbers and field locations.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{DomainError, DomainResult};
use crate::models::WeatherSnapshot;
use crate::types::GpsCoordinates;

// ============================================================================
// Field Registration Validations
// ============================================================================

/// A crop cannot be registered with a sowing date after today
pub fn validate_sowing_date(sowing_date: NaiveDate, today: NaiveDate) -> DomainResult<()> {
    if sowing_date > today {
        return Err(DomainError::SowingDateInFuture(sowing_date));
    }
    Ok(())
}

/// Validate a field nickname (optional, at most 40 characters)
pub fn validate_nickname(nickname: &str) -> Result<(), &'static str> {
    if nickname.trim().chars().count() > 40 {
        return Err("Nickname must be at most 40 characters");
    }
    if nickname.chars().any(|c| c.is_control()) {
        return Err("Nickname cannot contain control characters");
    }
    Ok(())
}

// ============================================================================
// Forecast Validations
// ============================================================================

pub fn validate_precipitation_chance(chance: u8) -> Result<(), &'static str> {
    if chance > 100 {
        return Err("Precipitation chance must be between 0 and 100");
    }
    Ok(())
}

/// Validate a forecast pushed by a client or provider before it is stored
pub fn validate_weather_snapshot(snapshot: &WeatherSnapshot) -> Result<(), &'static str> {
    for day in &snapshot.days {
        validate_precipitation_chance(day.precipitation_chance)?;
        if !(-60..=60).contains(&day.temperature_celsius) {
            return Err("Temperature out of plausible range");
        }
        if day.date.trim().is_empty() {
            return Err("Forecast day is missing a date");
        }
    }
    Ok(())
}

// ============================================================================
// Settings Validations
// ============================================================================

/// Base font size in px
pub fn validate_font_size(size: u8) -> Result<(), &'static str> {
    if !(12..=20).contains(&size) {
        return Err("Font size must be between 12 and 20");
    }
    Ok(())
}

/// Validate a reminder time in "HH:MM" 24-hour form
pub fn validate_reminder_time(time: &str) -> Result<(), &'static str> {
    chrono::NaiveTime::parse_from_str(time, "%H:%M")
        .map(|_| ())
        .map_err(|_| "Reminder time must be HH:MM")
}

// ============================================================================
// India-Specific Validations
// ============================================================================

/// Validate Indian mobile number format
/// Accepts: 9876543210, 98765-43210, +91 98765 43210, 09876543210
pub fn validate_indian_phone(phone: &str) -> Result<(), &'static str> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    let local = match digits.len() {
        10 => digits.as_str(),
        11 if digits.starts_with('0') => &digits[1..],
        12 if digits.starts_with("91") => &digits[2..],
        _ => return Err("Invalid Indian phone number format"),
    };

    // Mobile numbers start with 6, 7, 8 or 9
    match local.chars().next() {
        Some('6'..='9') => Ok(()),
        _ => Err("Invalid Indian phone number format"),
    }
}

/// Validate that a point falls within India's bounding box
pub fn validate_coordinates(point: &GpsCoordinates) -> Result<(), &'static str> {
    let min_lat = Decimal::new(64, 1);
    let max_lat = Decimal::new(375, 1);
    let min_lng = Decimal::new(681, 1);
    let max_lng = Decimal::new(975, 1);

    if point.latitude < min_lat || point.latitude > max_lat {
        return Err("Latitude outside India");
    }
    if point.longitude < min_lng || point.longitude > max_lng {
        return Err("Longitude outside India");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{WeatherCondition, WeatherDay};

    // ========================================================================
    // Field Registration Tests
    // ========================================================================

    #[test]
    fn test_validate_sowing_date() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert!(validate_sowing_date(today, today).is_ok());
        assert!(validate_sowing_date(today.pred_opt().unwrap(), today).is_ok());
        assert!(matches!(
            validate_sowing_date(today.succ_opt().unwrap(), today),
            Err(DomainError::SowingDateInFuture(_))
        ));
    }

    #[test]
    fn test_validate_nickname() {
        assert!(validate_nickname("").is_ok());
        assert!(validate_nickname("North Plot").is_ok());
        assert!(validate_nickname("उत्तर खेत").is_ok());
        assert!(validate_nickname(&"a".repeat(41)).is_err());
        assert!(validate_nickname("bad\nname").is_err());
    }

    // ========================================================================
    // Forecast Tests
    // ========================================================================

    #[test]
    fn test_validate_weather_snapshot() {
        let day = |temp, chance| WeatherDay {
            date: "18/10/2026".to_string(),
            temperature_celsius: temp,
            condition: WeatherCondition::Sunny,
            precipitation_chance: chance,
        };
        assert!(validate_weather_snapshot(&WeatherSnapshot::default()).is_ok());
        assert!(validate_weather_snapshot(&WeatherSnapshot::new(vec![day(33, 40)])).is_ok());
        assert!(validate_weather_snapshot(&WeatherSnapshot::new(vec![day(33, 101)])).is_err());
        assert!(validate_weather_snapshot(&WeatherSnapshot::new(vec![day(90, 10)])).is_err());
    }

    // ========================================================================
    // Settings Tests
    // ========================================================================

    #[test]
    fn test_validate_font_size() {
        assert!(validate_font_size(12).is_ok());
        assert!(validate_font_size(20).is_ok());
        assert!(validate_font_size(11).is_err());
        assert!(validate_font_size(21).is_err());
    }

    #[test]
    fn test_validate_reminder_time() {
        assert!(validate_reminder_time("08:00").is_ok());
        assert!(validate_reminder_time("23:59").is_ok());
        assert!(validate_reminder_time("24:00").is_err());
        assert!(validate_reminder_time("8am").is_err());
    }

    // ========================================================================
    // India-Specific Tests
    // ========================================================================

    #[test]
    fn test_validate_indian_phone_valid() {
        assert!(validate_indian_phone("9876543210").is_ok());
        assert!(validate_indian_phone("98765-43210").is_ok());
        assert!(validate_indian_phone("+91 98765 43210").is_ok());
        assert!(validate_indian_phone("09876543210").is_ok());
    }

    #[test]
    fn test_validate_indian_phone_invalid() {
        assert!(validate_indian_phone("12345").is_err());
        assert!(validate_indian_phone("1234567890").is_err());
        assert!(validate_indian_phone("abcdefghij").is_err());
    }

    #[test]
    fn test_validate_coordinates() {
        let pune = GpsCoordinates::from_f64(18.52, 73.85).unwrap();
        let london = GpsCoordinates::from_f64(51.5, -0.12).unwrap();
        assert!(validate_coordinates(&pune).is_ok());
        assert!(validate_coordinates(&london).is_err());
    }
}
