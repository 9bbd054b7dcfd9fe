use std::fmt;

use crate::component::{CatalogueEntry, Component};
use crate::error::{DomainError, Result};

/// Stable handle of a catalogue entry.
/// Entries are never removed, so a handle stays valid for the whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(usize);

impl ComponentId {
    /// 1-based position shown to the user
    pub fn position(self) -> usize {
        self.0 + 1
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.position())
    }
}

/// Append-only list of every component created in a session
#[derive(Debug, Clone, Default)]
pub struct ComponentCatalogue {
    components: Vec<Component>,
}

impl ComponentCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, component: Component) -> ComponentId {
        self.components.push(component);
        ComponentId(self.components.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn get(&self, id: ComponentId) -> Result<&Component> {
        self.components
            .get(id.0)
            .ok_or(DomainError::InvalidSelection { index: id.position(), len: self.len() })
    }

    /// Turn 1-based user indices into handles, keeping their order.
    /// Nothing is resolved unless every index is in `[1, len]`.
    pub fn resolve(&self, positions: &[usize]) -> Result<Vec<ComponentId>> {
        positions
            .iter()
            .map(|&index| match index {
                i if (1..=self.len()).contains(&i) => Ok(ComponentId(i - 1)),
                _ => Err(DomainError::InvalidSelection { index, len: self.len() }),
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ComponentId, &Component)> {
        self.components.iter().enumerate().map(|(i, c)| (ComponentId(i), c))
    }

    /// Numbered lines as shown when picking components
    pub fn entries(&self) -> impl Iterator<Item = CatalogueEntry<'_>> {
        self.iter().map(|(id, c)| c.catalogue_entry(id.position()))
    }
}
