use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A short code identifying a mapping.
///
/// Codes are 1-32 ASCII alphanumeric characters. Generated codes use the
/// same alphabet, so every code the store hands out also passes
/// [`ShortCode::new`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortCode(String);

pub const MIN_LENGTH: usize = 1;
pub const MAX_LENGTH: usize = 32;

impl ShortCode {
    /// Creates a new `ShortCode` after validating the input.
    pub fn new(code: impl Into<String>) -> Result<Self, CoreError> {
        let code = code.into();
        Self::validate(&code)?;
        Ok(Self(code))
    }

    /// Creates a `ShortCode` without validation.
    ///
    /// Use this only for codes produced by trusted internal sources
    /// (the generator, rows read back from storage).
    pub fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Generates the full shortened URL based on the provided base URL.
    ///
    /// An empty base yields a root-relative link such as `/abc123`.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.0)
    }

    /// Returns the short code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    fn validate(code: &str) -> Result<(), CoreError> {
        if code.len() < MIN_LENGTH || code.len() > MAX_LENGTH {
            return Err(CoreError::InvalidShortCode(format!(
                "length must be between {} and {}, got {}",
                MIN_LENGTH,
                MAX_LENGTH,
                code.len()
            )));
        }

        if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CoreError::InvalidShortCode(format!(
                "must contain only alphanumeric characters: '{}'",
                code
            )));
        }

        Ok(())
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ShortCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_codes() {
        assert!(ShortCode::new("a").is_ok());
        assert!(ShortCode::new("aB3xY9").is_ok());
        assert!(ShortCode::new("Z".repeat(32)).is_ok());
    }

    #[test]
    fn empty_is_rejected() {
        assert!(ShortCode::new("").is_err());
    }

    #[test]
    fn too_long() {
        assert!(ShortCode::new("a".repeat(33)).is_err());
    }

    #[test]
    fn invalid_characters() {
        assert!(ShortCode::new("abc def").is_err());
        assert!(ShortCode::new("abc-def").is_err());
        assert!(ShortCode::new("abc_def").is_err());
        assert!(ShortCode::new("abc/def").is_err());
        assert!(ShortCode::new("favicon.ico").is_err());
    }

    #[test]
    fn display_matches_input() {
        let code = ShortCode::new("Qx7kP2").unwrap();
        assert_eq!(code.to_string(), "Qx7kP2");
    }

    #[test]
    fn to_url_with_base() {
        let code = ShortCode::new("abc123").unwrap();
        assert_eq!(code.to_url("https://hop.example"), "https://hop.example/abc123");
        assert_eq!(code.to_url("https://hop.example/"), "https://hop.example/abc123");
    }

    #[test]
    fn to_url_without_base_is_relative() {
        let code = ShortCode::new("abc123").unwrap();
        assert_eq!(code.to_url(""), "/abc123");
    }
}
