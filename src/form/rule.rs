use regex::Regex;
use std::fmt;

pub const DEFAULT_USERNAME_PATTERN: &str = r"^[A-Za-z0-9_]{4,20}$";
pub const DEFAULT_USERNAME_REQUIREMENT: &str =
    "Username must be 4 to 20 characters long and contain only letters, digits or underscores.";

/// Matches passwords that are rejected: too short, digits only, or letters only.
pub const DEFAULT_PASSWORD_REJECT_PATTERN: &str = r"^.{0,7}$|^[0-9]*$|^[A-Za-z]*$";
pub const DEFAULT_PASSWORD_REQUIREMENT: &str =
    "Password must be at least 8 characters long and mix letters with digits or symbols.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Polarity {
    MatchRequired,
    MatchForbidden,
}

/// Pattern-based acceptance rule for a field value.
#[derive(Clone)]
pub struct ValidationRule {
    pattern: Regex,
    polarity: Polarity,
    requirement: String,
}

impl ValidationRule {
    /// A value is acceptable only if `pattern` matches it.
    ///
    /// # Errors
    /// Returns an error if `pattern` is not a valid regular expression.
    pub fn match_required(pattern: &str) -> Result<Self, regex::Error> {
        Self::build(pattern, Polarity::MatchRequired)
    }

    /// A value is acceptable only if `pattern` does not match it.
    ///
    /// # Errors
    /// Returns an error if `pattern` is not a valid regular expression.
    pub fn match_forbidden(pattern: &str) -> Result<Self, regex::Error> {
        Self::build(pattern, Polarity::MatchForbidden)
    }

    fn build(pattern: &str, polarity: Polarity) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            polarity,
            requirement: String::new(),
        })
    }

    /// Sets the message shown when a value is rejected.
    #[must_use]
    pub fn with_requirement(mut self, requirement: impl Into<String>) -> Self {
        self.requirement = requirement.into();
        self
    }

    /// Default username rule.
    ///
    /// # Errors
    /// Returns an error if the default pattern fails to compile.
    pub fn username() -> Result<Self, regex::Error> {
        Ok(Self::match_required(DEFAULT_USERNAME_PATTERN)?
            .with_requirement(DEFAULT_USERNAME_REQUIREMENT))
    }

    /// Default password rule.
    ///
    /// # Errors
    /// Returns an error if the default pattern fails to compile.
    pub fn password() -> Result<Self, regex::Error> {
        Ok(Self::match_forbidden(DEFAULT_PASSWORD_REJECT_PATTERN)?
            .with_requirement(DEFAULT_PASSWORD_REQUIREMENT))
    }

    #[must_use]
    pub fn is_acceptable(&self, value: &str) -> bool {
        let matched = self.pattern.is_match(value);
        match self.polarity {
            Polarity::MatchRequired => matched,
            Polarity::MatchForbidden => !matched,
        }
    }

    #[must_use]
    pub fn requirement(&self) -> &str {
        &self.requirement
    }
}

impl fmt::Debug for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRule")
            .field("pattern", &self.pattern.as_str())
            .field("polarity", &self.polarity)
            .finish_non_exhaustive()
    }
}
