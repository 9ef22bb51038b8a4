//! One in-memory table of records, keyed by store id.

use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::domain::foundation::{DomainError, ErrorCode, Record, RecordKey, StoreId};

/// Rows of one record type in id order, plus the id sequence.
pub(super) struct Table<T: Record> {
    rows: BTreeMap<T::Id, T>,
    last_id: i64,
}

impl<T: Record> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T: Record> Table<T> {
    pub fn get(&self, id: T::Id) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    pub fn contains(&self, id: T::Id) -> bool {
        self.rows.contains_key(&id)
    }

    pub fn find_by_key(&self, key: RecordKey) -> Option<T> {
        self.rows.values().find(|row| row.key() == key).cloned()
    }

    /// Rows matching `predicate`, in id order.
    pub fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows.values().filter(|&row| predicate(row)).cloned().collect()
    }

    pub fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = (&T::Id, &T)> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Checks constraints and uniqueness for a record about to be inserted.
    pub fn check_insert(&self, record: &T) -> Result<(), DomainError> {
        if let Some(id) = record.id() {
            return Err(rejected::<T>(DomainError::new(
                ErrorCode::AlreadyPersisted,
                format!("{} {} is already persisted", T::ENTITY, id),
            )));
        }
        self.check_constraints(record)
    }

    /// Checks constraints and uniqueness for a record about to be updated,
    /// returning its id.
    pub fn check_update(&self, record: &T) -> Result<T::Id, DomainError> {
        let id = record.id().ok_or_else(|| {
            rejected::<T>(DomainError::new(
                ErrorCode::NotPersisted,
                format!("{} has not been persisted", T::ENTITY),
            ))
        })?;
        if !self.rows.contains_key(&id) {
            return Err(DomainError::not_found(T::ENTITY, id));
        }
        self.check_constraints(record)?;
        Ok(id)
    }

    fn check_constraints(&self, record: &T) -> Result<(), DomainError> {
        record
            .validate()
            .map_err(|violations| rejected::<T>(violations.into()))?;
        for unique in record.unique_keys() {
            let taken = self
                .rows
                .values()
                .filter(|row| row.key() != record.key())
                .any(|row| row.unique_keys().contains(&unique));
            if taken {
                return Err(rejected::<T>(
                    DomainError::new(
                        ErrorCode::UniqueViolation,
                        format!(
                            "{} with {} '{}' already exists",
                            T::ENTITY,
                            unique.constraint,
                            unique.value
                        ),
                    )
                    .with_detail("entity", T::ENTITY)
                    .with_detail("constraint", unique.constraint),
                ));
            }
        }
        Ok(())
    }

    /// Allocates the next id.
    pub fn next_id(&mut self) -> Result<T::Id, DomainError> {
        let id = T::Id::from_raw(self.last_id + 1)?;
        self.last_id += 1;
        Ok(id)
    }

    /// Validates, assigns an id, and stores a copy.
    pub fn insert(&mut self, record: &mut T) -> Result<T::Id, DomainError> {
        self.check_insert(record)?;
        let id = self.next_id()?;
        record.assign_id(id);
        self.rows.insert(id, record.clone());
        debug!(entity = T::ENTITY, %id, "record inserted");
        Ok(id)
    }

    /// Validates and replaces the stored copy.
    pub fn update(&mut self, record: &T) -> Result<(), DomainError> {
        let id = self.check_update(record)?;
        self.rows.insert(id, record.clone());
        debug!(entity = T::ENTITY, %id, "record updated");
        Ok(())
    }

    /// Stores a child record without checks, assigning an id if it has none.
    /// The parent is responsible for having validated it.
    pub fn put(&mut self, record: &mut T) -> Result<T::Id, DomainError> {
        let id = match record.id() {
            Some(id) => id,
            None => {
                let id = self.next_id()?;
                record.assign_id(id);
                id
            }
        };
        self.rows.insert(id, record.clone());
        Ok(id)
    }

    pub fn remove(&mut self, id: T::Id) -> Result<T, DomainError> {
        let row = self
            .rows
            .remove(&id)
            .ok_or_else(|| DomainError::not_found(T::ENTITY, id))?;
        debug!(entity = T::ENTITY, %id, "record deleted");
        Ok(row)
    }

    /// Removes every row matching `predicate`, returning how many went.
    pub fn remove_where(&mut self, predicate: impl Fn(&T) -> bool) -> usize {
        let before = self.rows.len();
        self.rows.retain(|_, row| !predicate(&*row));
        before - self.rows.len()
    }

    /// Applies `change` to every row matching `predicate`.
    pub fn modify_where(&mut self, predicate: impl Fn(&T) -> bool, change: impl Fn(&mut T)) {
        for row in self.rows.values_mut().filter(|row| predicate(&**row)) {
            change(row);
        }
    }
}

fn rejected<T: Record>(err: DomainError) -> DomainError {
    warn!(entity = T::ENTITY, error = %err, "write rejected");
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reference::Organisation;

    #[test]
    fn insert_assigns_sequential_ids() {
        let mut table = Table::<Organisation>::default();
        let mut first = Organisation::new("ILRI");
        let mut second = Organisation::new("CIMMYT");

        let a = table.insert(&mut first).unwrap();
        let b = table.insert(&mut second).unwrap();

        assert_eq!(a.raw(), 1);
        assert_eq!(b.raw(), 2);
        assert_eq!(first.id(), Some(a));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn insert_rejects_persisted_and_invalid_records() {
        let mut table = Table::<Organisation>::default();
        let mut organisation = Organisation::new("ILRI");
        table.insert(&mut organisation).unwrap();

        let err = table.insert(&mut organisation).unwrap_err();
        assert_eq!(err.code, ErrorCode::AlreadyPersisted);

        let mut blank = Organisation::new("");
        let err = table.insert(&mut blank).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(blank.id().is_none());
    }

    #[test]
    fn update_requires_known_row() {
        let mut table = Table::<Organisation>::default();
        let organisation = Organisation::new("ILRI");
        assert_eq!(
            table.update(&organisation).unwrap_err().code,
            ErrorCode::NotPersisted
        );
    }
}
