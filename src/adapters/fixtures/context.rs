//! Named references shared between fixtures.

use std::collections::HashMap;

use crate::domain::foundation::RecordKey;

use super::FixtureError;

/// References added by earlier fixtures, looked up by later ones.
#[derive(Debug, Clone, Default)]
pub struct FixtureContext {
    references: HashMap<String, RecordKey>,
}

impl FixtureContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes `key` under `name`.
    ///
    /// # Errors
    ///
    /// - `DuplicateReference` if the name is taken
    pub fn add_reference(
        &mut self,
        name: impl Into<String>,
        key: RecordKey,
    ) -> Result<(), FixtureError> {
        let name = name.into();
        if self.references.contains_key(&name) {
            return Err(FixtureError::DuplicateReference(name));
        }
        self.references.insert(name, key);
        Ok(())
    }

    /// Looks up a reference added by an earlier fixture.
    ///
    /// # Errors
    ///
    /// - `MissingReference` if no fixture added it
    pub fn get_reference(&self, name: &str) -> Result<RecordKey, FixtureError> {
        self.references
            .get(name)
            .copied()
            .ok_or_else(|| FixtureError::MissingReference(name.to_string()))
    }

    pub fn has_reference(&self, name: &str) -> bool {
        self.references.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn references_are_set_once_and_looked_up_by_name() {
        let mut context = FixtureContext::new();
        let key = RecordKey::new();
        context.add_reference("project", key).unwrap();

        assert_eq!(context.get_reference("project").unwrap(), key);
        assert!(matches!(
            context.add_reference("project", RecordKey::new()),
            Err(FixtureError::DuplicateReference(name)) if name == "project"
        ));
        assert!(matches!(
            context.get_reference("organisation"),
            Err(FixtureError::MissingReference(_))
        ));
    }
}
