//! Field validation for the login form. Every text field carries its own
//! [`ValidationRule`]; typing performs a neutral reset and leaving the field
//! evaluates the rule. Validation is local feedback only and never blocks a
//! submission by itself.

mod rule;

pub use rule::{
    DEFAULT_PASSWORD_REJECT_PATTERN, DEFAULT_PASSWORD_REQUIREMENT, DEFAULT_USERNAME_PATTERN,
    DEFAULT_USERNAME_REQUIREMENT, ValidationRule,
};

use crate::ui::{FieldId, Ui};
use std::fmt;
use tracing::debug;

/// Validity of a field as last decorated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validity {
    #[default]
    Untouched,
    Valid,
    Invalid,
}

impl Validity {
    const fn as_decoration(self) -> Option<bool> {
        match self {
            Self::Untouched => None,
            Self::Valid => Some(true),
            Self::Invalid => Some(false),
        }
    }
}

/// A single-line text input with a validity state.
#[derive(Clone)]
pub struct Field {
    id: FieldId,
    value: String,
    validity: Validity,
    rule: ValidationRule,
}

impl Field {
    #[must_use]
    pub fn new(id: FieldId, rule: ValidationRule) -> Self {
        Self {
            id,
            value: String::new(),
            validity: Validity::Untouched,
            rule,
        }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub const fn validity(&self) -> Validity {
        self.validity
    }

    #[must_use]
    pub const fn rule(&self) -> &ValidationRule {
        &self.rule
    }

    /// Input handler: stores the new value and clears any error decoration.
    pub fn on_change(&mut self, value: impl Into<String>, ui: &dyn Ui) {
        self.value = value.into();
        self.reset(ui);
    }

    /// Neutral reset. Calling it repeatedly leaves the same state.
    pub fn reset(&mut self, ui: &dyn Ui) {
        self.set(Validity::Untouched, ui);
    }

    /// Blur handler: evaluates the rule and shows the requirement message
    /// when the value is rejected.
    pub fn on_blur(&mut self, ui: &dyn Ui) -> Validity {
        if self.rule.is_acceptable(&self.value) {
            self.set(Validity::Valid, ui);
        } else {
            self.set(Validity::Invalid, ui);
            ui.show_error(self.rule.requirement());
        }
        self.validity
    }

    /// Decorates the field without showing a message.
    pub fn mark(&mut self, valid: bool, ui: &dyn Ui) {
        let validity = if valid {
            Validity::Valid
        } else {
            Validity::Invalid
        };
        self.set(validity, ui);
    }

    fn set(&mut self, validity: Validity, ui: &dyn Ui) {
        debug!(field = %self.id, ?validity, "field decorated");
        self.validity = validity;
        ui.set_valid(self.id, validity.as_decoration());
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value: &dyn fmt::Debug = if self.id.is_sensitive() {
            &"***"
        } else {
            &self.value
        };
        f.debug_struct("Field")
            .field("id", &self.id)
            .field("value", value)
            .field("validity", &self.validity)
            .field("rule", &self.rule)
            .finish()
    }
}

/// The login form's field handles, passed to the page controller.
#[derive(Debug, Clone)]
pub struct FormContext {
    pub username: Field,
    pub password: Field,
}

impl FormContext {
    #[must_use]
    pub fn new(username_rule: ValidationRule, password_rule: ValidationRule) -> Self {
        Self {
            username: Field::new(FieldId::Username, username_rule),
            password: Field::new(FieldId::Password, password_rule),
        }
    }

    /// Form with the default username and password rules.
    ///
    /// # Errors
    /// Returns an error if a default pattern fails to compile.
    pub fn with_default_rules() -> Result<Self, regex::Error> {
        Ok(Self::new(
            ValidationRule::username()?,
            ValidationRule::password()?,
        ))
    }

    pub fn field_mut(&mut self, id: FieldId) -> &mut Field {
        match id {
            FieldId::Username => &mut self.username,
            FieldId::Password => &mut self.password,
        }
    }
}
