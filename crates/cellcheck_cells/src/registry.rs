//! The gate descriptor registry.
//!
//! A registry is built once per harness run and then only read. The harness
//! holds it by shared reference for the whole run, so no gate can be added
//! after verification starts.

use std::collections::HashMap;

use cellcheck_common::GateFilter;

use crate::descriptor::GateDescriptor;
use crate::error::CellError;
use crate::library::standard_cells;

/// An ordered catalog of gate descriptors keyed by unique name.
#[derive(Clone, Debug, Default)]
pub struct GateRegistry {
    gates: Vec<GateDescriptor>,
    by_name: HashMap<String, usize>,
}

impl GateRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the standard cell library.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for descriptor in standard_cells() {
            registry.insert(descriptor);
        }
        registry
    }

    /// Registers a descriptor. Fails if the name is already taken.
    pub fn register(&mut self, descriptor: GateDescriptor) -> Result<(), CellError> {
        if self.by_name.contains_key(descriptor.name()) {
            return Err(CellError::DuplicateGate(descriptor.name().to_string()));
        }
        self.insert(descriptor);
        Ok(())
    }

    fn insert(&mut self, descriptor: GateDescriptor) {
        self.by_name
            .insert(descriptor.name().to_string(), self.gates.len());
        self.gates.push(descriptor);
    }

    /// Looks up a descriptor by exact name.
    pub fn lookup(&self, name: &str) -> Result<&GateDescriptor, CellError> {
        self.by_name
            .get(name)
            .map(|&i| &self.gates[i])
            .ok_or_else(|| CellError::UnknownGate(name.to_string()))
    }

    /// Iterates over all descriptors in registration order.
    ///
    /// Each call starts a fresh pass over the same sequence.
    pub fn all(&self) -> std::slice::Iter<'_, GateDescriptor> {
        self.gates.iter()
    }

    /// Returns the descriptors admitted by `filter`, in registration order.
    ///
    /// Every name in an explicit filter must be registered.
    pub fn select(&self, filter: &GateFilter) -> Result<Vec<&GateDescriptor>, CellError> {
        if let Some(names) = filter.names() {
            for name in names {
                self.lookup(name)?;
            }
        }
        Ok(self.all().filter(|d| filter.admits(d.name())).collect())
    }

    /// Number of registered descriptors.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }
}
