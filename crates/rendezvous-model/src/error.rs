//! Error types for the `rendezvous-model` crate.
//!
//! Every public operation returns [`ModelError`]. All variants are
//! recoverable results for the caller; none of them is fatal. The one
//! exception in spirit is [`ModelError::CascadeFault`], which signals that
//! the entity graph was already inconsistent before the operation began.

use rendezvous_types::{EntityKind, FieldError, Identity, Name};

/// Errors that can occur while mutating or querying the planner.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// An entity with the same identity is already present.
    #[error("duplicate {kind}: {key}")]
    DuplicateEntity {
        /// Collection the collision happened in.
        kind: EntityKind,
        /// Identity key of the rejected entity.
        key: String,
    },

    /// The entity was not found in its collection.
    #[error("{kind} not found: {key}")]
    EntityNotFound {
        /// Collection that was searched.
        kind: EntityKind,
        /// Identity key that was looked up.
        key: String,
    },

    /// A value failed field validation.
    #[error(transparent)]
    InvalidField(#[from] FieldError),

    /// An index did not resolve against the current filtered view.
    #[error("{kind} index {index} is out of range for a list of {len}")]
    IndexOutOfRange {
        /// Which filtered view was indexed.
        kind: EntityKind,
        /// The zero-based index requested.
        index: usize,
        /// Number of entries visible in the view.
        len: usize,
    },

    /// The person is not on the event's roster, so cannot RSVP.
    #[error("{person} is not on the roster of {event}")]
    InvalidRsvp {
        /// The event answered for.
        event: Name,
        /// The person answering.
        person: Name,
    },

    /// A snapshot references an entity missing from its own collection.
    #[error("{owner_kind} {owner} references unknown {target_kind} {target}")]
    DanglingReference {
        /// Kind of the entity holding the reference.
        owner_kind: EntityKind,
        /// Identity key of the holder.
        owner: String,
        /// Kind of the referenced entity.
        target_kind: EntityKind,
        /// Identity key of the missing entity.
        target: String,
    },

    /// A derived mutation failed partway through a cascade.
    ///
    /// Earlier steps of the same cascade are not rolled back.
    #[error("cascade after {trigger} failed: {source}")]
    CascadeFault {
        /// The primitive mutation that started the cascade.
        trigger: &'static str,
        /// The step that failed.
        source: Box<ModelError>,
    },
}

impl ModelError {
    /// [`ModelError::DuplicateEntity`] for `entity`.
    pub fn duplicate<T: Identity>(entity: &T) -> Self {
        Self::DuplicateEntity {
            kind: T::KIND,
            key: entity.key().to_string(),
        }
    }

    /// [`ModelError::EntityNotFound`] for `entity`.
    pub fn not_found<T: Identity>(entity: &T) -> Self {
        Self::EntityNotFound {
            kind: T::KIND,
            key: entity.key().to_string(),
        }
    }

    /// [`ModelError::DanglingReference`] from `owner` to `target`.
    pub fn dangling<O: Identity, T: Identity>(owner: &O, target: &T) -> Self {
        Self::DanglingReference {
            owner_kind: O::KIND,
            owner: owner.key().to_string(),
            target_kind: T::KIND,
            target: target.key().to_string(),
        }
    }
}
