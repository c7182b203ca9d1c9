//! Checks on the packaged extension files that load the wasm module

use serde_json::Value;

const MANIFEST: &str = include_str!("../extension/manifest.json");
const BACKGROUND_JS: &str = include_str!("../extension/background.js");
const BRIDGE_JS: &str = include_str!("../js/chrome_bridge.js");

fn manifest() -> Value {
    serde_json::from_str(MANIFEST).unwrap()
}

#[test]
fn test_background_has_no_top_level_await() {
    // Module service workers fail to register when evaluation is async
    let top_level_await = BACKGROUND_JS
        .lines()
        .filter(|line| !line.starts_with(' ') && !line.starts_with("//"))
        .any(|line| line.contains("await"));

    assert!(!top_level_await);
    assert!(BACKGROUND_JS.contains("start_background()"));
}

#[test]
fn test_background_is_module_service_worker() {
    let manifest = manifest();

    assert_eq!(manifest["background"]["service_worker"], "background.js");
    assert_eq!(manifest["background"]["type"], "module");
}

#[test]
fn test_bridge_registers_listeners_at_load() {
    // Listener registration must not wait for the exported functions to be called
    let start = BRIDGE_JS.find("if (isServiceWorker) {").unwrap();
    let end = BRIDGE_JS.find("export function onStorageChanged").unwrap();
    let top_level = &BRIDGE_JS[start..end];

    assert!(top_level.contains("chrome.contextMenus.onClicked.addListener"));
    assert!(top_level.contains("chrome.storage.onChanged.addListener"));
}

#[test]
fn test_content_script_can_load_wasm_package() {
    let manifest = manifest();
    let resources = manifest["web_accessible_resources"].as_array().unwrap();

    let exposes_pkg = resources.iter().any(|entry| {
        let paths = entry["resources"].as_array().unwrap();
        let matches = entry["matches"].as_array().unwrap();
        paths.iter().any(|p| p == "pkg/*") && matches.iter().any(|m| m == "<all_urls>")
    });

    assert!(exposes_pkg);
    assert_eq!(manifest["content_scripts"][0]["js"][0], "content.js");
}

#[test]
fn test_manifest_permissions() {
    let manifest = manifest();
    let permissions: Vec<&str> = manifest["permissions"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();

    assert_eq!(permissions, vec!["storage", "contextMenus", "tabs", "activeTab"]);
}
