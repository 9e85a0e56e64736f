//! An in-memory engine that records declarations instead of provisioning
//! them.
//!
//! Useful both as the test double for everything built on
//! [`ResourceEngine`] and for inspecting the resource plan a fleet would
//! declare without touching a cloud account.

use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use crate::engine::{ResourceEngine, ResourceHandle, ResourceKind, ResourceProperties};
use crate::errors::{EngineError, EngineResult};

#[cfg(test)]
#[path = "recording_tests.rs"]
mod tests;

/// One recorded declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclaredResource {
    pub handle: ResourceHandle,
    pub properties: ResourceProperties,

    /// Handle id of the parent, when one was given.
    pub parent: Option<String>,
}

/// A [`ResourceEngine`] that appends every declaration to an in-memory list
/// and hands back sequential handles.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    resources: Mutex<Vec<DeclaredResource>>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// All declarations, in declaration order.
    pub fn declarations(&self) -> Vec<DeclaredResource> {
        self.lock().clone()
    }

    /// The declarations of one kind, in declaration order.
    pub fn of_kind(&self, kind: ResourceKind) -> Vec<DeclaredResource> {
        self.lock()
            .iter()
            .filter(|r| r.handle.kind == kind)
            .cloned()
            .collect()
    }

    /// Looks a declaration up by its caller-chosen name.
    pub fn find(&self, name: &str) -> Option<DeclaredResource> {
        self.lock().iter().find(|r| r.handle.name == name).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<DeclaredResource>> {
        // A poisoned lock only means a test thread panicked mid-record; the
        // recorded list itself is still usable.
        self.resources
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ResourceEngine for RecordingEngine {
    async fn declare(
        &self,
        kind: ResourceKind,
        name: &str,
        properties: ResourceProperties,
        parent: Option<&ResourceHandle>,
    ) -> EngineResult<ResourceHandle> {
        if properties.kind() != kind {
            return Err(EngineError::PropertyMismatch {
                kind: kind.to_string(),
                name: name.to_string(),
            });
        }

        let mut resources = self.lock();
        let handle = ResourceHandle {
            id: format!("{}::{}::{}", kind, name, resources.len()),
            kind,
            name: name.to_string(),
        };
        debug!(kind = %kind, name, "recorded declaration");
        resources.push(DeclaredResource {
            handle: handle.clone(),
            properties,
            parent: parent.map(|p| p.id.clone()),
        });
        Ok(handle)
    }
}
