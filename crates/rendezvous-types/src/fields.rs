//! Validated scalar fields shared by every entity.
//!
//! Each type is an immutable newtype that can only be obtained through its
//! `parse` constructor (or `TryFrom`), so holding one means holding a value
//! that satisfied its constraint. Deserialization runs the same checks, which
//! keeps malformed JSON from ever reaching the planner.
//!
//! | Type | Accepted values |
//! |------|-----------------|
//! | [`Name`] | letters, digits and spaces, not starting with a space |
//! | [`Phone`] | at least 3 ASCII digits |
//! | [`Email`] | `local@domain` (see [`Email`]) |
//! | [`Address`] | any text not starting with whitespace |
//! | [`Description`] | any text not starting with whitespace |
//! | [`Note`] | any non-blank text |
//! | [`Capacity`] | positive integer |
//! | [`EventDate`] | calendar date formatted `YYYY-MM-DD` |

use core::fmt;
use core::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::FieldError;

/// Textual format of [`EventDate`] values (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[allow(clippy::expect_used)]
static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{L}\p{N}][\p{L}\p{N} ]*$").expect("name pattern is a valid literal")
});

#[allow(clippy::expect_used)]
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3,}$").expect("phone pattern is a valid literal"));

#[allow(clippy::expect_used)]
static EMAIL_LOCAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{L}\p{N}]+([+_.\-][\p{L}\p{N}]+)*$")
        .expect("email local-part pattern is a valid literal")
});

#[allow(clippy::expect_used)]
static EMAIL_LABEL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{L}\p{N}]+(-[\p{L}\p{N}]+)*$")
        .expect("email domain-label pattern is a valid literal")
});

/// Generates a validated newtype around [`String`] with standard derives.
///
/// The generated type serializes as a plain string and re-validates when
/// deserialized.
macro_rules! define_text_field {
    (
        $(#[$meta:meta])*
        $name:ident,
        field = $field:literal,
        constraint = $constraint:literal,
        validate = $validate:path $(,)?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Field label used in validation errors.
            pub const FIELD: &'static str = $field;

            /// Description of the accepted format.
            pub const CONSTRAINT: &'static str = $constraint;

            /// Validate and wrap a raw value.
            ///
            /// # Errors
            ///
            /// Returns [`FieldError::Invalid`] if the value violates the
            /// field constraint.
            pub fn parse(value: impl Into<String>) -> Result<Self, FieldError> {
                let value = value.into();
                if $validate(&value) {
                    Ok(Self(value))
                } else {
                    Err(FieldError::invalid(Self::FIELD, value, Self::CONSTRAINT))
                }
            }

            /// Borrow the validated text.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = FieldError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = FieldError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

fn is_valid_name(value: &str) -> bool {
    NAME_PATTERN.is_match(value)
}

fn is_valid_phone(value: &str) -> bool {
    PHONE_PATTERN.is_match(value)
}

fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if !EMAIL_LOCAL_PATTERN.is_match(local) {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    let last_is_long_enough = labels
        .last()
        .is_some_and(|last| last.chars().count() >= 2);
    last_is_long_enough && labels.iter().all(|label| EMAIL_LABEL_PATTERN.is_match(label))
}

fn is_leading_non_whitespace(value: &str) -> bool {
    value.chars().next().is_some_and(|c| !c.is_whitespace())
}

fn is_non_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

define_text_field! {
    /// Display name of a person, venue, vendor, or event.
    ///
    /// Names are the identity key of every named entity: two entities of the
    /// same kind with equal names (exact, case-sensitive) are the same entity.
    Name,
    field = "name",
    constraint = "names contain only letters, digits and spaces, and must not be blank",
    validate = is_valid_name,
}

define_text_field! {
    /// Contact phone number.
    Phone,
    field = "phone",
    constraint = "phone numbers contain only digits and are at least 3 digits long",
    validate = is_valid_phone,
}

define_text_field! {
    /// Contact email address of the form `local@domain`.
    ///
    /// The local part is letters and digits, optionally separated by single
    /// `+`, `_`, `.` or `-` characters. The domain is one or more
    /// dot-separated labels of letters and digits (hyphens allowed inside a
    /// label); the last label is at least 2 characters long.
    Email,
    field = "email",
    constraint = "emails are local@domain with an alphanumeric local part and domain labels",
    validate = is_valid_email,
}

define_text_field! {
    /// Street address of a venue.
    Address,
    field = "address",
    constraint = "addresses can take any value but must not be blank",
    validate = is_leading_non_whitespace,
}

define_text_field! {
    /// Free-text description of an event.
    Description,
    field = "description",
    constraint = "descriptions can take any value but must not be blank",
    validate = is_leading_non_whitespace,
}

define_text_field! {
    /// Optional remark attached to an event.
    Note,
    field = "note",
    constraint = "notes must not be blank",
    validate = is_non_blank,
}

// ---------------------------------------------------------------------------
// Capacity
// ---------------------------------------------------------------------------

/// Maximum number of attendees a venue holds. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Capacity(u32);

impl Capacity {
    /// Field label used in validation errors.
    pub const FIELD: &'static str = "capacity";

    /// Description of the accepted format.
    pub const CONSTRAINT: &'static str = "capacity must be a positive whole number";

    /// Wrap a capacity value.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::Invalid`] if `value` is zero.
    pub fn new(value: u32) -> Result<Self, FieldError> {
        if value == 0 {
            return Err(FieldError::invalid(Self::FIELD, "0", Self::CONSTRAINT));
        }
        Ok(Self(value))
    }

    /// Parse a capacity from decimal text.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::Invalid`] if the text is not a positive integer.
    pub fn parse(value: &str) -> Result<Self, FieldError> {
        if !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(FieldError::invalid(Self::FIELD, value, Self::CONSTRAINT));
        }
        value
            .parse::<u32>()
            .map_err(|_parse| FieldError::invalid(Self::FIELD, value, Self::CONSTRAINT))
            .and_then(Self::new)
    }

    /// Return the inner value.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Capacity {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<u32> for Capacity {
    type Error = FieldError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Capacity> for u32 {
    fn from(value: Capacity) -> Self {
        value.0
    }
}

// ---------------------------------------------------------------------------
// EventDate
// ---------------------------------------------------------------------------

/// A calendar date in the fixed [`DATE_FORMAT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EventDate(NaiveDate);

impl EventDate {
    /// Field label used in validation errors.
    pub const FIELD: &'static str = "date";

    /// Description of the accepted format.
    pub const CONSTRAINT: &'static str = "dates are valid calendar dates formatted YYYY-MM-DD";

    /// Parse a date in [`DATE_FORMAT`].
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::Invalid`] if the text is not a real calendar
    /// date in the expected format.
    pub fn parse(value: &str) -> Result<Self, FieldError> {
        NaiveDate::parse_from_str(value, DATE_FORMAT)
            .map(Self)
            .map_err(|_parse| FieldError::invalid(Self::FIELD, value, Self::CONSTRAINT))
    }

}

impl From<NaiveDate> for EventDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for EventDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for EventDate {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for EventDate {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EventDate> for String {
    fn from(value: EventDate) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_accept_letters_digits_and_inner_spaces() {
        assert!(Name::parse("Alice").is_ok());
        assert!(Name::parse("Hall A 2").is_ok());
        assert!(Name::parse("Zoë").is_ok());
    }

    #[test]
    fn names_reject_blank_leading_space_and_symbols() {
        assert!(Name::parse("").is_err());
        assert!(Name::parse(" Alice").is_err());
        assert!(Name::parse("Alice*").is_err());
        assert!(Name::parse("   ").is_err());
    }

    #[test]
    fn names_are_case_sensitive() {
        assert_ne!(Name::parse("alice").ok(), Name::parse("Alice").ok());
    }

    #[test]
    fn phones_need_three_digits() {
        assert!(Phone::parse("111").is_ok());
        assert!(Phone::parse("91234567").is_ok());
        assert!(Phone::parse("12").is_err());
        assert!(Phone::parse("12a4").is_err());
        assert!(Phone::parse("+6512345").is_err());
    }

    #[test]
    fn emails_follow_local_at_domain() {
        for good in ["a@x.com", "alice.tan@example.com", "a+b_c-d@sub-domain.example.org", "x@ab"] {
            assert!(Email::parse(good).is_ok(), "{good} should be valid");
        }
        for bad in [
            "",
            "alice",
            "@example.com",
            "alice@",
            ".alice@example.com",
            "alice.@example.com",
            "alice@example.c",
            "alice@-example.com",
            "alice@example..com",
            "a@b@c.com",
        ] {
            assert!(Email::parse(bad).is_err(), "{bad} should be invalid");
        }
    }

    #[test]
    fn address_and_description_reject_leading_whitespace() {
        assert!(Address::parse("1 Main St, #02-01").is_ok());
        assert!(Address::parse(" 1 Main St").is_err());
        assert!(Description::parse("Annual dinner!").is_ok());
        assert!(Description::parse("").is_err());
    }

    #[test]
    fn notes_reject_blank() {
        assert!(Note::parse("bring cake").is_ok());
        assert!(Note::parse("  ").is_err());
    }

    #[test]
    fn capacity_must_be_positive() {
        assert_eq!(Capacity::parse("100").ok().map(Capacity::get), Some(100));
        assert!(Capacity::parse("0").is_err());
        assert!(Capacity::parse("-3").is_err());
        assert!(Capacity::parse("+3").is_err());
        assert!(Capacity::parse("ten").is_err());
        assert!(Capacity::parse("99999999999").is_err());
    }

    #[test]
    fn dates_use_fixed_format() {
        let date = EventDate::parse("2024-02-29");
        assert!(date.is_ok());
        assert_eq!(date.ok().map(|d| d.to_string()).as_deref(), Some("2024-02-29"));
        assert!(EventDate::parse("2023-02-29").is_err());
        assert!(EventDate::parse("29-02-2024").is_err());
        assert!(EventDate::parse("2024/02/29").is_err());
    }

    #[test]
    fn dates_order_chronologically() {
        let earlier = EventDate::parse("2024-01-31").ok();
        let later = EventDate::parse("2024-02-01").ok();
        assert!(earlier < later);
    }

    #[test]
    fn invalid_values_rejected_on_deserialize() {
        let name: Result<Name, _> = serde_json::from_str("\" leading\"");
        assert!(name.is_err());
        let capacity: Result<Capacity, _> = serde_json::from_str("0");
        assert!(capacity.is_err());
        let date: Result<EventDate, _> = serde_json::from_str("\"2024-13-01\"");
        assert!(date.is_err());
    }

    #[test]
    fn field_error_names_the_field() {
        let err = Phone::parse("x").err();
        assert!(matches!(err, Some(FieldError::Invalid { field: "phone", .. })));
    }
}
