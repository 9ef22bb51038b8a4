//! Fixture registration, dependency ordering, and execution.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use tracing::{debug, info};

use super::{FixtureContext, FixtureError, Repositories};

/// A named unit of sample data.
///
/// Fixtures publish the keys of what they create through the context so
/// fixtures that depend on them can link to those records.
#[async_trait]
pub trait Fixture: Send + Sync {
    /// Unique name other fixtures depend on.
    fn name(&self) -> &'static str;

    /// Fixtures that must run first.
    fn dependencies(&self) -> &'static [&'static str] {
        &[]
    }

    /// Groups this fixture belongs to.
    fn groups(&self) -> &'static [&'static str] {
        &[]
    }

    async fn load(
        &self,
        repositories: &Repositories,
        context: &mut FixtureContext,
    ) -> Result<(), FixtureError>;
}

/// Runs registered fixtures so that every fixture follows its dependencies.
#[derive(Default)]
pub struct FixtureLoader {
    fixtures: Vec<Box<dyn Fixture>>,
}

impl FixtureLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a fixture.
    ///
    /// # Errors
    ///
    /// - `DuplicateFixture` if a fixture with the same name is registered
    pub fn add(&mut self, fixture: impl Fixture + 'static) -> Result<&mut Self, FixtureError> {
        if self.position(fixture.name()).is_some() {
            return Err(FixtureError::DuplicateFixture(fixture.name().to_string()));
        }
        self.fixtures.push(Box::new(fixture));
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.fixtures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }

    /// Names of the fixtures `load` would run, in run order.
    ///
    /// With a group, only fixtures in that group run, plus everything they
    /// depend on. Among fixtures whose dependencies are met, registration
    /// order wins.
    ///
    /// # Errors
    ///
    /// - `UnknownDependency` if a fixture names an unregistered dependency
    /// - `Cycle` if dependencies are circular
    pub fn ordered(&self, group: Option<&str>) -> Result<Vec<&'static str>, FixtureError> {
        Ok(self
            .order(group)?
            .into_iter()
            .map(|index| self.fixtures[index].name())
            .collect())
    }

    /// Runs the selected fixtures in dependency order.
    ///
    /// Returns the context holding every reference the fixtures added.
    pub async fn load(
        &self,
        repositories: &Repositories,
        group: Option<&str>,
    ) -> Result<FixtureContext, FixtureError> {
        let order = self.order(group)?;
        let mut context = FixtureContext::new();
        for index in order {
            let fixture = &self.fixtures[index];
            info!(fixture = fixture.name(), "loading fixture");
            fixture.load(repositories, &mut context).await?;
        }
        debug!(references = context.len(), "fixtures loaded");
        Ok(context)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.fixtures.iter().position(|f| f.name() == name)
    }

    fn dependency_indices(&self, index: usize) -> Result<Vec<usize>, FixtureError> {
        let fixture = &self.fixtures[index];
        fixture
            .dependencies()
            .iter()
            .map(|dependency| {
                self.position(dependency)
                    .ok_or_else(|| FixtureError::UnknownDependency {
                        fixture: fixture.name().to_string(),
                        dependency: dependency.to_string(),
                    })
            })
            .collect()
    }

    fn selected(&self, group: Option<&str>) -> Result<BTreeSet<usize>, FixtureError> {
        let mut pending: Vec<usize> = (0..self.fixtures.len())
            .filter(|&index| match group {
                Some(group) => self.fixtures[index].groups().iter().any(|g| *g == group),
                None => true,
            })
            .collect();
        let mut selected = BTreeSet::new();
        while let Some(index) = pending.pop() {
            if selected.insert(index) {
                pending.extend(self.dependency_indices(index)?);
            }
        }
        Ok(selected)
    }

    fn order(&self, group: Option<&str>) -> Result<Vec<usize>, FixtureError> {
        let selected = self.selected(group)?;
        let mut remaining: HashMap<usize, Vec<usize>> = HashMap::new();
        for &index in &selected {
            remaining.insert(index, self.dependency_indices(index)?);
        }

        let mut order = Vec::with_capacity(selected.len());
        while !remaining.is_empty() {
            let ready = selected
                .iter()
                .copied()
                .find(|index| {
                    remaining
                        .get(index)
                        .is_some_and(|deps| deps.iter().all(|dep| !remaining.contains_key(dep)))
                });
            match ready {
                Some(index) => {
                    remaining.remove(&index);
                    order.push(index);
                }
                None => {
                    let mut names: Vec<String> = remaining
                        .keys()
                        .map(|&index| self.fixtures[index].name().to_string())
                        .collect();
                    names.sort();
                    return Err(FixtureError::Cycle(names));
                }
            }
        }
        Ok(order)
    }
}
