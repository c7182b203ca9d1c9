/// Bridge to the chrome.* extension APIs

use crate::dispatch::TabOpener;
use crate::error::{self, Error};
use crate::menu::{ContextMenus, MenuEntry};
use crate::store::StorageArea;
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

// Import JS bridge functions
#[wasm_bindgen(module = "/js/chrome_bridge.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(key: &str, value: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn removeAllMenus() -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn createMenu(properties: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn openTab(url: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn getActiveTabUrl() -> Result<JsValue, JsValue>;

    fn onStorageChanged(key: &str, callback: &Closure<dyn FnMut()>);

    fn onMenuClicked(callback: &Closure<dyn FnMut(String, JsValue)>);
}

fn js_error(e: JsValue) -> String {
    if let Some(err) = e.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

/// Plain JS objects rather than `Map`s, which chrome.* APIs cannot take
fn to_js<T: Serialize + ?Sized>(value: &T) -> error::Result<JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| Error::Serialization(e.to_string()))
}

/// chrome.storage.local
pub struct ChromeStorage;

impl StorageArea for ChromeStorage {
    async fn get(&self, key: &str) -> error::Result<Option<Value>> {
        let value_js = getStorage(key)
            .await
            .map_err(|e| Error::Storage(js_error(e)))?;

        if value_js.is_null() || value_js.is_undefined() {
            return Ok(None);
        }

        serde_wasm_bindgen::from_value(value_js)
            .map(Some)
            .map_err(|e| Error::Serialization(e.to_string()))
    }

    async fn set(&self, key: &str, value: Value) -> error::Result<()> {
        setStorage(key, to_js(&value)?)
            .await
            .map_err(|e| Error::Storage(js_error(e)))
    }
}

/// chrome.contextMenus
pub struct ChromeMenus;

impl ContextMenus for ChromeMenus {
    async fn remove_all(&self) -> error::Result<()> {
        removeAllMenus().await.map_err(|e| Error::MenuCreation {
            id: "*".to_string(),
            reason: js_error(e),
        })
    }

    async fn create(&self, entry: &MenuEntry) -> error::Result<()> {
        createMenu(to_js(entry)?)
            .await
            .map_err(|e| Error::MenuCreation {
                id: entry.id.clone(),
                reason: js_error(e),
            })
    }
}

/// chrome.tabs
pub struct ChromeTabs;

impl TabOpener for ChromeTabs {
    async fn open(&self, url: &str) -> error::Result<()> {
        openTab(url)
            .await
            .map_err(|e| Error::OpenTab(js_error(e)))
    }
}

/// URL of the active tab in the current window
pub async fn active_tab_url() -> Option<String> {
    match getActiveTabUrl().await {
        Ok(url) => url.as_string(),
        Err(e) => {
            log::warn!("Failed to query active tab: {}", js_error(e));
            None
        }
    }
}

/// Call `handler` whenever `key` changes in chrome.storage.local.
/// The listener stays registered for the life of the page.
pub fn on_storage_changed(key: &str, handler: impl FnMut() + 'static) {
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
    onStorageChanged(key, &callback);
    callback.forget();
}

/// Call `handler` with the menu item id and the tab URL (if any) on every menu click
pub fn on_menu_clicked(mut handler: impl FnMut(String, Option<String>) + 'static) {
    let callback = Closure::wrap(Box::new(move |menu_id: String, tab_url: JsValue| {
        handler(menu_id, tab_url.as_string());
    }) as Box<dyn FnMut(String, JsValue)>);
    onMenuClicked(&callback);
    callback.forget();
}
