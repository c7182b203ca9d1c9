/// Menu click handling: menu id → rewritten URL → new tab

use crate::error::{Error, Result};
use crate::menu::MenuId;
use crate::rewrite::rewrite;
use url::Url;

/// Opens URLs in new browser tabs (chrome.tabs in the extension)
#[allow(async_fn_in_trait)]
pub trait TabOpener {
    async fn open(&self, url: &str) -> Result<()>;
}

/// Work out where a click on `menu_item_id` should go.
///
/// Stages: parse the menu id, require a tab URL, rewrite it. The host must
/// still match the entry's source, which guards against entries left over
/// from an older registry.
pub fn resolve_click(menu_item_id: &str, tab_url: Option<&str>) -> Result<String> {
    let id = MenuId::decode(menu_item_id)?;

    let tab_url = tab_url
        .filter(|u| !u.is_empty())
        .ok_or(Error::MissingTabUrl)?;

    Url::parse(tab_url).map_err(|e| Error::MalformedUrl {
        url: tab_url.to_string(),
        reason: e.to_string(),
    })?;

    rewrite(tab_url, &id.source_domain, &id.target_domain).ok_or_else(|| Error::HostMismatch {
        url: tab_url.to_string(),
        source_domain: id.source_domain.clone(),
    })
}

/// Resolve a click and open the result; nothing is opened on failure
pub async fn handle_click<T: TabOpener>(
    tabs: &T,
    menu_item_id: &str,
    tab_url: Option<&str>,
) -> Result<String> {
    let new_url = resolve_click(menu_item_id, tab_url)?;
    log::debug!("Menu {} redirects to {}", menu_item_id, new_url);
    tabs.open(&new_url).await?;
    Ok(new_url)
}
