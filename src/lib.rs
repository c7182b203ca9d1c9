/// Domain Bridge - Chrome Extension for redirecting a page to a related site
/// Built with Rust + WASM + Yew

mod background;
mod chrome;
mod config;
mod content;
pub mod dispatch;
pub mod error;
pub mod mapping;
pub mod menu;
pub mod registry;
pub mod rewrite;
pub mod store;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export the rewriter for JavaScript access
#[wasm_bindgen]
pub fn rewrite_url(page_url: &str, source_domain: &str, target_domain: &str) -> Option<String> {
    rewrite::rewrite(page_url, source_domain, target_domain)
}

// Register menu and storage listeners in the service worker
#[wasm_bindgen]
pub fn start_background() {
    background::start();
}

// Start the Yew app for the settings popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}

#[wasm_bindgen]
pub fn start_content() {
    content::start();
}
