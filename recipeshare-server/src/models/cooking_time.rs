//! Cooking time in `HH:MM:SS` form
//!
//! Stored as a Postgres `INTERVAL`; bound as text and cast in SQL.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// Hours 0-999, minutes and seconds 00-59
static DURATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,3}):([0-5]\d):([0-5]\d)$").expect("invalid duration regex"));

/// Validated cooking time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookingTime {
    hours: u32,
    minutes: u32,
    seconds: u32,
}

impl CookingTime {
    /// Parse `HH:MM:SS`.
    ///
    /// # Example
    /// ```
    /// use recipeshare_server::models::CookingTime;
    ///
    /// let t = CookingTime::parse("00:30:00").unwrap();
    /// assert_eq!(t.to_string(), "00:30:00");
    /// assert!(CookingTime::parse("30 minutes").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::Empty {
                field: "CookingTime",
            });
        }

        let caps = DURATION_RE
            .captures(s)
            .ok_or(ValidationError::InvalidFormat {
                field: "CookingTime",
                reason: "expected HH:MM:SS",
            })?;

        // The regex guarantees 1-3 / 2 / 2 ASCII digits
        let part = |i: usize| caps[i].parse::<u32>().unwrap_or(0);

        Ok(Self {
            hours: part(1),
            minutes: part(2),
            seconds: part(3),
        })
    }
}

impl fmt::Display for CookingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}
