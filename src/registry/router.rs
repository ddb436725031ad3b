//! Source fallback routing with per-run endpoint blacklisting
//!
//! The router owns one reader per distinct endpoint, created lazily on first
//! use and reused for every gem that shares the endpoint. An endpoint that
//! fails at the transport level is marked unavailable for the remainder of
//! the run; later lookups skip it without attempting a request. An endpoint
//! that answers but lacks data for a particular gem stays available, since
//! mirrors can carry incomplete data per package.

use crate::domain::Dependency;
use crate::error::RegistryError;
use crate::registry::{ReaderFactory, RegistryMetadata, RegistryReader};
use std::collections::HashMap;

/// Per-endpoint cache entry
enum EndpointSlot {
    /// Reader is open and the endpoint has not failed
    Ready(Box<dyn RegistryReader>),
    /// Transport failure seen; never queried again this run
    Unavailable,
}

/// Routes gem lookups across registry endpoints with fallback
pub struct SourceRouter {
    factory: Box<dyn ReaderFactory>,
    slots: HashMap<String, EndpointSlot>,
}

impl SourceRouter {
    /// Create a router; readers are opened through the factory on demand
    pub fn new(factory: Box<dyn ReaderFactory>) -> Self {
        Self {
            factory,
            slots: HashMap::new(),
        }
    }

    /// Returns true unless the endpoint has been marked unavailable
    /// (untried endpoints count as available)
    pub fn is_available(&self, endpoint: &str) -> bool {
        !matches!(self.slots.get(endpoint), Some(EndpointSlot::Unavailable))
    }

    /// Resolve registry metadata for a dependency
    ///
    /// Endpoints are tried in the dependency's declared order; the first one
    /// yielding usable data wins. Transport failures blacklist the endpoint;
    /// missing package data does not. When every endpoint is unavailable or
    /// has no usable data, returns `AllSourcesFailed`.
    pub async fn resolve(&mut self, dependency: &Dependency) -> Result<RegistryMetadata, RegistryError> {
        for endpoint in &dependency.sources {
            if !self.is_available(endpoint) {
                continue;
            }

            if !self.slots.contains_key(endpoint) {
                let slot = match self.factory.open(endpoint) {
                    Ok(reader) => EndpointSlot::Ready(reader),
                    Err(_) => EndpointSlot::Unavailable,
                };
                self.slots.insert(endpoint.clone(), slot);
            }

            let reader = match self.slots.get(endpoint) {
                Some(EndpointSlot::Ready(reader)) => reader.as_ref(),
                _ => continue,
            };

            match Self::fetch(reader, &dependency.name, endpoint).await {
                Ok(metadata) => return Ok(metadata),
                Err(RegistryError::SourceUnavailable { .. }) => {
                    self.slots
                        .insert(endpoint.clone(), EndpointSlot::Unavailable);
                }
                Err(RegistryError::NoUsableData { .. }) => {}
                Err(other) => return Err(other),
            }
        }

        Err(RegistryError::all_sources_failed(&dependency.name))
    }

    /// Fetch both documents and assemble metadata
    ///
    /// A null latest-version field means the endpoint mirrors nothing useful
    /// for this gem even though it is reachable.
    async fn fetch(
        reader: &dyn RegistryReader,
        gem: &str,
        endpoint: &str,
    ) -> Result<RegistryMetadata, RegistryError> {
        let document = reader.gem_info(gem).await?;
        let history = reader.version_history(gem).await?;
        let latest = document
            .version
            .ok_or_else(|| RegistryError::no_usable_data(gem, endpoint))?;
        Ok(RegistryMetadata { latest, history })
    }
}
