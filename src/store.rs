/// Persistence of the mapping registry.
///
/// `MappingStore` owns no cached copy: every mutating call re-reads the
/// registry before writing it back. There is no locking, so concurrent writers
/// race and the last write wins.

use crate::config::STORAGE_KEY;
use crate::error::Result;
use crate::mapping::DomainMapping;
use crate::registry::{MappingRegistry, Upserted};
use serde_json::Value;

/// Key/value persistence area (chrome.storage.local in the extension)
#[allow(async_fn_in_trait)]
pub trait StorageArea {
    async fn get(&self, key: &str) -> Result<Option<Value>>;
    async fn set(&self, key: &str, value: Value) -> Result<()>;
}

pub struct MappingStore<S> {
    area: S,
}

impl<S: StorageArea> MappingStore<S> {
    pub fn new(area: S) -> Self {
        MappingStore { area }
    }

    /// Persisted registry, or the default one (written back) on first run
    pub async fn load(&self) -> Result<MappingRegistry> {
        match self.area.get(STORAGE_KEY).await? {
            Some(value) if !value.is_null() => Ok(serde_json::from_value(value)?),
            _ => {
                let registry = MappingRegistry::with_defaults();
                self.save(&registry).await?;
                log::info!("Default domain mappings initialized");
                Ok(registry)
            }
        }
    }

    /// Overwrite the persisted registry
    pub async fn save(&self, registry: &MappingRegistry) -> Result<()> {
        let value = serde_json::to_value(registry)?;
        self.area.set(STORAGE_KEY, value).await
    }

    pub async fn upsert(&self, mapping: DomainMapping) -> Result<MappingRegistry> {
        let mut registry = self.load().await?;
        let outcome = registry.upsert(mapping);
        self.save(&registry).await?;
        log::debug!("Upsert {:?}, registry now has {} mappings", outcome, registry.len());
        Ok(registry)
    }

    pub async fn remove(&self, source_domain: &str) -> Result<MappingRegistry> {
        let mut registry = self.load().await?;
        if registry.remove(source_domain) {
            self.save(&registry).await?;
        } else {
            log::debug!("No mapping for {} to remove", source_domain);
        }
        Ok(registry)
    }

    /// Overwrite the mapping at `index`; out-of-range indexes leave storage untouched
    pub async fn replace_at(&self, index: usize, mapping: DomainMapping) -> Result<MappingRegistry> {
        let mut registry = self.load().await?;
        if registry.replace_at(index, mapping) {
            self.save(&registry).await?;
        } else {
            log::warn!("Edit index {} is out of range ({} mappings)", index, registry.len());
        }
        Ok(registry)
    }
}
