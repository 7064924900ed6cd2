//! Validated free-text fields

use serde::Serialize;

use super::ValidationError;

const MAX_RECIPE_NAME_LEN: usize = 100;
const MAX_CUISINE_LEN: usize = 50;
const MAX_USER_NAME_LEN: usize = 50;
const MAX_INSTRUCTION_LEN: usize = 2000;

/// Trim, then reject empty or over-long input.
fn bounded(field: &'static str, s: &str, max: usize) -> Result<String, ValidationError> {
    let trimmed = s.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }

    Ok(trimmed.to_owned())
}

/// Validated recipe name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeName(String);

impl RecipeName {
    /// # Example
    /// ```
    /// use recipeshare_server::models::RecipeName;
    ///
    /// assert!(RecipeName::new("Pasta Verde").is_ok());
    /// assert!(RecipeName::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        bounded("RecipeName", s, MAX_RECIPE_NAME_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated cuisine name (e.g. "Italian")
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cuisine(String);

impl Cuisine {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        bounded("Cuisine", s, MAX_CUISINE_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated user name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserName(String);

impl UserName {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        bounded("UserName", s, MAX_USER_NAME_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One step's instruction text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instruction(String);

impl Instruction {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        bounded("steps", s, MAX_INSTRUCTION_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_whitespace() {
        let name = RecipeName::new("  Pasta Verde  ").unwrap();
        assert_eq!(name.as_str(), "Pasta Verde");
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(
            Cuisine::new("").unwrap_err(),
            ValidationError::Empty { field: "Cuisine" }
        );
        assert!(UserName::new(" \t ").is_err());
    }

    #[test]
    fn max_length_counts_chars() {
        // 50 multi-byte chars fit even though they exceed 50 bytes
        let name = "é".repeat(50);
        assert!(UserName::new(&name).is_ok());

        let name = "é".repeat(51);
        assert!(matches!(
            UserName::new(&name).unwrap_err(),
            ValidationError::TooLong { max: 50, .. }
        ));
    }
}
