/// Content script: reports the hostname of the page it runs on

pub fn start() {
    log::info!("Domain Bridge content script loaded");

    let Some(window) = web_sys::window() else {
        return;
    };

    match window.location().hostname() {
        Ok(hostname) => log::info!("Current domain: {}", hostname),
        Err(e) => log::warn!("Could not read page hostname: {:?}", e),
    }
}
