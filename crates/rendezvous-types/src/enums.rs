//! Enumeration types for the planner.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FieldError;

// ---------------------------------------------------------------------------
// RSVP status
// ---------------------------------------------------------------------------

/// Attendance answer recorded for one person at one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RsvpStatus {
    /// The person confirmed they are coming.
    ConfirmComing,
    /// The person confirmed they are not coming.
    ConfirmNotComing,
    /// No answer yet.
    ToBeConfirmed,
}

impl RsvpStatus {
    /// All statuses in display order.
    pub const ALL: [Self; 3] = [Self::ConfirmComing, Self::ConfirmNotComing, Self::ToBeConfirmed];

    /// Short code accepted on input (`CC`, `CCN`, `TBC`).
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfirmComing => "CC",
            Self::ConfirmNotComing => "CCN",
            Self::ToBeConfirmed => "TBC",
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::ConfirmComing => "Confirm Coming",
            Self::ConfirmNotComing => "Confirm Not Coming",
            Self::ToBeConfirmed => "To Be Confirmed",
        }
    }
}

impl fmt::Display for RsvpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RsvpStatus {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| FieldError::invalid("rsvp status", s, "one of CC, CCN, TBC"))
    }
}

// ---------------------------------------------------------------------------
// Entity kinds
// ---------------------------------------------------------------------------

/// The five kinds of entity the planner tracks.
///
/// Carried by errors so a failure names which collection it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// A [`Person`](crate::Person).
    Person,
    /// A [`Venue`](crate::Venue).
    Venue,
    /// A [`Vendor`](crate::Vendor).
    Vendor,
    /// An [`Event`](crate::Event).
    Event,
    /// An [`Rsvp`](crate::Rsvp).
    Rsvp,
}

impl EntityKind {
    /// Lowercase noun used in messages.
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Venue => "venue",
            Self::Vendor => "vendor",
            Self::Event => "event",
            Self::Rsvp => "rsvp",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_parse_case_insensitively() {
        assert_eq!("cc".parse::<RsvpStatus>().ok(), Some(RsvpStatus::ConfirmComing));
        assert_eq!("CCN".parse::<RsvpStatus>().ok(), Some(RsvpStatus::ConfirmNotComing));
        assert_eq!("tbc".parse::<RsvpStatus>().ok(), Some(RsvpStatus::ToBeConfirmed));
    }

    #[test]
    fn unknown_status_code_rejected() {
        let result = "maybe".parse::<RsvpStatus>();
        assert!(matches!(result, Err(FieldError::Invalid { field: "rsvp status", .. })));
    }

    #[test]
    fn status_serializes_as_variant_name() {
        let json = serde_json::to_string(&RsvpStatus::ConfirmNotComing).ok();
        assert_eq!(json.as_deref(), Some("\"ConfirmNotComing\""));
    }

    #[test]
    fn kind_display_is_lowercase() {
        assert_eq!(EntityKind::Vendor.to_string(), "vendor");
    }
}
