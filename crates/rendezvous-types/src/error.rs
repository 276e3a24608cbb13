//! Error types for the `rendezvous-types` crate.
//!
//! Validation happens once, at construction. Anything holding a value type
//! from this crate is holding a value that already passed these checks.

use crate::fields::EventDate;

/// A value failed validation while being constructed or deserialized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// A scalar did not satisfy its field constraint.
    #[error("invalid {field} {value:?}: {constraint}")]
    Invalid {
        /// Field label, e.g. `"name"` or `"phone"`.
        field: &'static str,
        /// The rejected raw input.
        value: String,
        /// Description of the accepted format.
        constraint: &'static str,
    },

    /// An event's end date precedes its start date.
    #[error("event ends on {to} before it starts on {from}")]
    EndBeforeStart {
        /// Start date.
        from: EventDate,
        /// End date.
        to: EventDate,
    },
}

impl FieldError {
    /// Build a [`FieldError::Invalid`] for a rejected raw value.
    pub fn invalid(
        field: &'static str,
        value: impl Into<String>,
        constraint: &'static str,
    ) -> Self {
        Self::Invalid {
            field,
            value: value.into(),
            constraint,
        }
    }
}
