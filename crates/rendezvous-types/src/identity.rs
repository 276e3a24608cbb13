//! Identity versus structural equality.
//!
//! Every entity has two distinct notions of "equal":
//!
//! - **Identity** ([`Identity::is_same`]): the two values denote the same
//!   real-world thing. Collections use it to reject duplicates and the
//!   planner uses it to find cascade targets after an edit.
//! - **Structural equality** (`PartialEq`): every field matches. Removal uses
//!   it so that a caller holding an outdated copy cannot delete the live
//!   record by accident.
//!
//! The two are never folded into one operator.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::enums::EntityKind;
use crate::fields::Name;

/// An entity with an identity key distinct from full equality.
pub trait Identity {
    /// The key two entities must share to be "the same".
    type Key: Clone + Ord + fmt::Debug + fmt::Display;

    /// Which kind of entity this is.
    const KIND: EntityKind;

    /// Derive the identity key.
    fn key(&self) -> Self::Key;

    /// Whether `other` has the same identity as `self`.
    fn is_same(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

/// An entity identified by its [`Name`].
pub trait Named {
    /// The entity's name.
    fn name(&self) -> &Name;
}

/// Identity key of an RSVP: the (event, person) pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RsvpKey {
    /// Name of the event.
    pub event: Name,
    /// Name of the person.
    pub person: Name,
}

impl fmt::Display for RsvpKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.person, self.event)
    }
}
