//! Ordered, duplicate-free collection keyed by entity identity.
//!
//! [`UniqueList`] holds one kind of entity in insertion order and refuses to
//! hold two entities with the same [`Identity::key`]. Lookups for
//! add/replace go by identity; [`UniqueList::remove`] goes by full equality
//! so a caller holding an outdated copy cannot delete the live record.

use std::collections::BTreeSet;

use rendezvous_types::Identity;

use crate::error::ModelError;

/// An insertion-ordered list of entities with unique identities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueList<T> {
    items: Vec<T>,
}

impl<T> UniqueList<T> {
    /// Create an empty list.
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Read-only view of the entries in order.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Iterate over the entries in order.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list holds no entries.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entry at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }
}

impl<T: Identity + PartialEq> UniqueList<T> {
    /// Whether any entry has the same identity as `candidate`.
    pub fn contains(&self, candidate: &T) -> bool {
        self.items.iter().any(|item| item.is_same(candidate))
    }

    /// Entry whose identity key equals `key`.
    pub fn find(&self, key: &T::Key) -> Option<&T> {
        self.items.iter().find(|item| item.key() == *key)
    }

    /// The live entry sharing `entity`'s identity.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EntityNotFound`] if no entry matches.
    pub fn resolve(&self, entity: &T) -> Result<&T, ModelError> {
        self.items
            .iter()
            .find(|item| item.is_same(entity))
            .ok_or_else(|| ModelError::not_found(entity))
    }

    /// Append `entity`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateEntity`] if an entry with the same
    /// identity is already present.
    pub fn add(&mut self, entity: T) -> Result<(), ModelError> {
        if self.contains(&entity) {
            return Err(ModelError::duplicate(&entity));
        }
        self.items.push(entity);
        Ok(())
    }

    /// Overwrite the entry identified by `target` with `replacement`,
    /// keeping its position.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EntityNotFound`] if `target` is absent, or
    /// [`ModelError::DuplicateEntity`] if `replacement` would collide with a
    /// different entry.
    pub fn replace(&mut self, target: &T, replacement: T) -> Result<(), ModelError> {
        let index = self
            .items
            .iter()
            .position(|item| item.is_same(target))
            .ok_or_else(|| ModelError::not_found(target))?;
        if !target.is_same(&replacement) && self.contains(&replacement) {
            return Err(ModelError::duplicate(&replacement));
        }
        if let Some(slot) = self.items.get_mut(index) {
            *slot = replacement;
        }
        Ok(())
    }

    /// Remove the entry fully equal to `entity` and return it.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EntityNotFound`] if no entry is equal in every
    /// field, even when one shares the identity.
    pub fn remove(&mut self, entity: &T) -> Result<T, ModelError> {
        let index = self
            .items
            .iter()
            .position(|item| item == entity)
            .ok_or_else(|| ModelError::not_found(entity))?;
        Ok(self.items.remove(index))
    }

    /// Replace every entry at once.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateEntity`] if `items` holds two entries
    /// with the same identity. The list is untouched on error.
    pub fn replace_all(&mut self, items: Vec<T>) -> Result<(), ModelError> {
        ensure_unique(&items)?;
        self.items = items;
        Ok(())
    }

    /// Insert `entity`, overwriting in place any entry with the same
    /// identity. Returns the overwritten entry.
    pub fn upsert(&mut self, entity: T) -> Option<T> {
        match self.items.iter_mut().find(|item| item.is_same(&entity)) {
            Some(slot) => Some(core::mem::replace(slot, entity)),
            None => {
                self.items.push(entity);
                None
            }
        }
    }
}

impl<T> Default for UniqueList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a UniqueList<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Check that no two entries of `items` share an identity.
///
/// # Errors
///
/// Returns [`ModelError::DuplicateEntity`] naming the first repeated entry.
pub fn ensure_unique<T: Identity>(items: &[T]) -> Result<(), ModelError> {
    let mut seen = BTreeSet::new();
    for item in items {
        if !seen.insert(item.key()) {
            return Err(ModelError::duplicate(item));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rendezvous_types::{Email, EntityKind, FieldError, Name, Person, Phone};

    use super::*;

    fn person(name: &str, phone: &str) -> Result<Person, FieldError> {
        Ok(Person::new(
            Name::parse(name)?,
            Phone::parse(phone)?,
            Email::parse("someone@example.com")?,
        ))
    }

    fn names(list: &UniqueList<Person>) -> Vec<String> {
        list.iter().map(|p| p.key().to_string()).collect()
    }

    #[test]
    fn add_preserves_insertion_order() -> Result<(), ModelError> {
        let mut list = UniqueList::new();
        list.add(person("Bob", "222")?)?;
        list.add(person("Alice", "111")?)?;
        assert_eq!(names(&list), ["Bob", "Alice"]);
        Ok(())
    }

    #[test]
    fn add_rejects_same_identity() -> Result<(), ModelError> {
        let mut list = UniqueList::new();
        list.add(person("Alice", "111")?)?;
        let result = list.add(person("Alice", "999")?);
        assert!(matches!(
            result,
            Err(ModelError::DuplicateEntity { kind: EntityKind::Person, .. })
        ));
        assert_eq!(list.len(), 1);
        Ok(())
    }

    #[test]
    fn contains_uses_identity() -> Result<(), ModelError> {
        let mut list = UniqueList::new();
        list.add(person("Alice", "111")?)?;
        assert!(list.contains(&person("Alice", "999")?));
        assert!(!list.contains(&person("Bob", "111")?));
        Ok(())
    }

    #[test]
    fn replace_keeps_position() -> Result<(), ModelError> {
        let mut list = UniqueList::new();
        let alice = person("Alice", "111")?;
        list.add(alice.clone())?;
        list.add(person("Bob", "222")?)?;
        list.replace(&alice, person("Alicia", "111")?)?;
        assert_eq!(names(&list), ["Alicia", "Bob"]);
        Ok(())
    }

    #[test]
    fn replace_with_same_identity_allowed() -> Result<(), ModelError> {
        let mut list = UniqueList::new();
        let alice = person("Alice", "111")?;
        list.add(alice.clone())?;
        list.replace(&alice, person("Alice", "333")?)?;
        assert_eq!(list.get(0).map(|p| p.phone().as_str()), Some("333"));
        Ok(())
    }

    #[test]
    fn replace_rejects_collision_with_other_entry() -> Result<(), ModelError> {
        let mut list = UniqueList::new();
        let alice = person("Alice", "111")?;
        list.add(alice.clone())?;
        list.add(person("Bob", "222")?)?;
        let result = list.replace(&alice, person("Bob", "333")?);
        assert!(matches!(result, Err(ModelError::DuplicateEntity { .. })));
        assert_eq!(names(&list), ["Alice", "Bob"]);
        Ok(())
    }

    #[test]
    fn replace_missing_target_fails() -> Result<(), ModelError> {
        let mut list: UniqueList<Person> = UniqueList::new();
        let result = list.replace(&person("Ghost", "111")?, person("Ghost", "222")?);
        assert!(matches!(result, Err(ModelError::EntityNotFound { .. })));
        Ok(())
    }

    #[test]
    fn remove_requires_full_equality() -> Result<(), ModelError> {
        let mut list = UniqueList::new();
        let alice = person("Alice", "111")?;
        list.add(alice.clone())?;

        let stale = person("Alice", "999")?;
        assert!(matches!(list.remove(&stale), Err(ModelError::EntityNotFound { .. })));
        assert_eq!(list.len(), 1);

        assert_eq!(list.remove(&alice)?, alice);
        assert!(list.is_empty());
        Ok(())
    }

    #[test]
    fn replace_all_is_all_or_nothing() -> Result<(), ModelError> {
        let mut list = UniqueList::new();
        list.add(person("Alice", "111")?)?;

        let clash = vec![person("Bob", "222")?, person("Bob", "333")?];
        assert!(matches!(list.replace_all(clash), Err(ModelError::DuplicateEntity { .. })));
        assert_eq!(names(&list), ["Alice"]);

        list.replace_all(vec![person("Carol", "444")?, person("Dan", "555")?])?;
        assert_eq!(names(&list), ["Carol", "Dan"]);
        Ok(())
    }

    #[test]
    fn upsert_overwrites_in_place() -> Result<(), ModelError> {
        let mut list = UniqueList::new();
        list.add(person("Alice", "111")?)?;
        list.add(person("Bob", "222")?)?;

        let previous = list.upsert(person("Alice", "999")?);
        assert_eq!(previous.map(|p| p.phone().as_str().to_owned()).as_deref(), Some("111"));
        assert_eq!(names(&list), ["Alice", "Bob"]);

        assert!(list.upsert(person("Carol", "333")?).is_none());
        assert_eq!(list.len(), 3);
        Ok(())
    }
}
