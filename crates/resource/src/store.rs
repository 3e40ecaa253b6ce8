//! In-memory snapshot of a collection.

use core_types::{Resource, ResourceId};
use std::collections::HashSet;

use crate::{ClientError, Result};

/// Records from the last successful fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceStore<R> {
    records: Vec<R>,
}

impl<R> Default for ResourceStore<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<R: Resource> ResourceStore<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole snapshot.
    ///
    /// A snapshot with a repeated id is rejected and the store is left as it was.
    pub fn replace(&mut self, records: Vec<R>) -> Result<()> {
        let mut seen = HashSet::with_capacity(records.len());
        if let Some(dup) = records.iter().map(R::id).find(|id| !seen.insert(*id)) {
            return Err(ClientError::DuplicateId(dup));
        }
        self.records = records;
        Ok(())
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: ResourceId) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn contains(&self, id: ResourceId) -> bool {
        self.get(id).is_some()
    }
}
