/// Background service worker: keeps the context menu in step with storage
/// and turns menu clicks into new tabs.

use crate::chrome::{self, ChromeMenus, ChromeStorage, ChromeTabs};
use crate::config::STORAGE_KEY;
use crate::dispatch::handle_click;
use crate::menu::MenuSync;
use crate::store::MappingStore;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;

pub fn start() {
    log::info!("Domain Bridge background started");

    let menu_sync = Rc::new(MenuSync::new());

    // Loading also writes the default registry on first run
    spawn_local(sync_menus(Rc::clone(&menu_sync), menu_sync.begin()));

    chrome::on_storage_changed(STORAGE_KEY, move || {
        log::info!("Domain mappings updated, recreating context menus");
        spawn_local(sync_menus(Rc::clone(&menu_sync), menu_sync.begin()));
    });

    chrome::on_menu_clicked(|menu_id, tab_url| {
        spawn_local(async move {
            if let Err(e) = handle_click(&ChromeTabs, &menu_id, tab_url.as_deref()).await {
                log::warn!("Menu click {} ignored: {}", menu_id, e);
            }
        });
    });
}

/// Load the registry and rebuild the menu, unless a later sync has begun
async fn sync_menus(menu_sync: Rc<MenuSync>, generation: u64) {
    let store = MappingStore::new(ChromeStorage);

    let registry = match store.load().await {
        Ok(registry) => registry,
        Err(e) => {
            log::error!("Failed to load domain mappings: {}", e);
            return;
        }
    };

    if !menu_sync.is_current(generation) {
        return;
    }
    if let Err(e) = menu_sync.rebuild(generation, &ChromeMenus, &registry).await {
        log::error!("Failed to create context menus: {}", e);
    }
}
