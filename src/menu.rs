/// Context-menu synchronisation with the mapping registry

use crate::config;
use crate::error::{Error, Result};
use crate::registry::MappingRegistry;
use serde::Serialize;
use std::cell::Cell;

/// Identity of one menu entry: a (source, target) pair.
///
/// Encoded as a JSON array so hostnames may contain any character,
/// `_` included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuId {
    pub source_domain: String,
    pub target_domain: String,
}

impl MenuId {
    pub fn new(source_domain: impl Into<String>, target_domain: impl Into<String>) -> MenuId {
        MenuId {
            source_domain: source_domain.into(),
            target_domain: target_domain.into(),
        }
    }

    pub fn encode(&self) -> String {
        serde_json::json!([self.source_domain, self.target_domain]).to_string()
    }

    /// Parse an encoded id.
    ///
    /// Also accepts the older `source_target` form, split on the first `_`,
    /// so entries created by previous builds still resolve.
    pub fn decode(id: &str) -> Result<MenuId> {
        if let Ok([source, target]) = serde_json::from_str::<[String; 2]>(id) {
            return Self::non_empty(source, target, id);
        }

        match id.split_once('_') {
            Some((source, target)) => Self::non_empty(source.to_string(), target.to_string(), id),
            None => Err(Error::UnknownMenuId(id.to_string())),
        }
    }

    fn non_empty(source: String, target: String, id: &str) -> Result<MenuId> {
        if source.is_empty() || target.is_empty() {
            return Err(Error::UnknownMenuId(id.to_string()));
        }
        Ok(MenuId::new(source, target))
    }
}

/// Properties passed to chrome.contextMenus.create
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntry {
    pub id: String,
    pub title: String,
    pub contexts: Vec<String>,
    pub document_url_patterns: Vec<String>,
}

/// One entry per (mapping, target), in registry then target order
pub fn plan_entries(registry: &MappingRegistry) -> Vec<MenuEntry> {
    registry
        .iter()
        .flat_map(|mapping| {
            mapping.target_domains.iter().map(move |target| MenuEntry {
                id: MenuId::new(&mapping.source_domain, target).encode(),
                title: config::menu_title(target),
                contexts: config::MENU_CONTEXTS.iter().map(|c| c.to_string()).collect(),
                document_url_patterns: vec![config::document_url_pattern(&mapping.source_domain)],
            })
        })
        .collect()
}

/// Native right-click menu (chrome.contextMenus in the extension)
#[allow(async_fn_in_trait)]
pub trait ContextMenus {
    async fn remove_all(&self) -> Result<()>;
    async fn create(&self, entry: &MenuEntry) -> Result<()>;
}

/// Replace every menu entry with those planned from `registry`.
///
/// A failing entry is logged and skipped; the rest are still created.
/// Returns the number of entries created.
pub async fn rebuild<M: ContextMenus>(menus: &M, registry: &MappingRegistry) -> Result<usize> {
    rebuild_unless_superseded(menus, registry, || false).await
}

async fn rebuild_unless_superseded<M, F>(
    menus: &M,
    registry: &MappingRegistry,
    superseded: F,
) -> Result<usize>
where
    M: ContextMenus,
    F: Fn() -> bool,
{
    if superseded() {
        return Ok(0);
    }
    menus.remove_all().await?;

    let mut created = 0;
    for entry in plan_entries(registry) {
        if superseded() {
            log::debug!("Menu rebuild superseded after {} entries", created);
            return Ok(created);
        }
        match menus.create(&entry).await {
            Ok(()) => created += 1,
            Err(e) => log::error!("Skipping menu entry {}: {}", entry.id, e),
        }
    }

    log::info!("Context menu rebuilt with {} entries", created);
    Ok(created)
}

/// Orders overlapping rebuilds.
///
/// Each rebuild takes a generation from `begin`. A rebuild stops creating
/// entries as soon as a newer generation has begun, so entries from an older
/// registry never outlive the newer rebuild's `remove_all`.
#[derive(Debug, Default)]
pub struct MenuSync {
    generation: Cell<u64>,
}

impl MenuSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> u64 {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.get() == generation
    }

    pub async fn rebuild<M: ContextMenus>(
        &self,
        generation: u64,
        menus: &M,
        registry: &MappingRegistry,
    ) -> Result<usize> {
        rebuild_unless_superseded(menus, registry, || !self.is_current(generation)).await
    }
}
