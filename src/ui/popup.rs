/// Popup settings page: add, edit and delete domain mappings

use crate::chrome::{self, ChromeStorage};
use crate::mapping::DomainMapping;
use crate::registry::MappingRegistry;
use crate::rewrite::host_of;
use crate::store::MappingStore;
use crate::ui::components::{MappingCard, TargetInput};
use patternfly_yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Clone, PartialEq)]
enum PopupState {
    Loading,
    Idle,
    Saving,
}

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(|| PopupState::Loading);
    let registry = use_state(MappingRegistry::new);
    let current_host = use_state(|| None::<String>);
    let source_input = use_state(String::new);
    let target_inputs = use_state(|| vec![String::new()]);
    let editing = use_state(|| None::<usize>); // registry index being edited

    // Load mappings and the active tab's host on mount
    {
        let state = state.clone();
        let registry = registry.clone();
        let current_host = current_host.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                let host = chrome::active_tab_url().await.and_then(|url| host_of(&url));
                current_host.set(host);

                match MappingStore::new(ChromeStorage).load().await {
                    Ok(loaded) => registry.set(loaded),
                    Err(e) => log::error!("Failed to load mappings: {}", e),
                }
                state.set(PopupState::Idle);
            });
            || ()
        });
    }

    let reset_form = {
        let source_input = source_input.clone();
        let target_inputs = target_inputs.clone();
        let editing = editing.clone();
        move || {
            source_input.set(String::new());
            target_inputs.set(vec![String::new()]);
            editing.set(None);
        }
    };

    let on_source_input = {
        let source_input = source_input.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                source_input.set(input.value());
            }
        })
    };

    let on_target_input = {
        let target_inputs = target_inputs.clone();
        Callback::from(move |(index, value): (usize, String)| {
            let mut targets = (*target_inputs).clone();
            if let Some(slot) = targets.get_mut(index) {
                *slot = value;
            }
            target_inputs.set(targets);
        })
    };

    let on_add_target = {
        let target_inputs = target_inputs.clone();
        Callback::from(move |_| {
            let mut targets = (*target_inputs).clone();
            targets.push(String::new());
            target_inputs.set(targets);
        })
    };

    let on_remove_target = {
        let target_inputs = target_inputs.clone();
        Callback::from(move |index: usize| {
            let mut targets = (*target_inputs).clone();
            if targets.len() > 1 && index < targets.len() {
                targets.remove(index);
            }
            target_inputs.set(targets);
        })
    };

    // Add (merging into an existing source) or overwrite the edited mapping
    let on_submit = {
        let state = state.clone();
        let registry = registry.clone();
        let source_input = source_input.clone();
        let target_inputs = target_inputs.clone();
        let editing = editing.clone();
        let reset_form = reset_form.clone();

        Callback::from(move |_| {
            let mapping = match DomainMapping::from_input(&*source_input, &*target_inputs) {
                Ok(mapping) => mapping,
                Err(e) => {
                    show_alert(&e.to_string());
                    return;
                }
            };

            let edit_index = *editing;
            let state = state.clone();
            let registry = registry.clone();
            let reset_form = reset_form.clone();
            state.set(PopupState::Saving);

            spawn_local(async move {
                let store = MappingStore::new(ChromeStorage);
                let result = match edit_index {
                    Some(index) => store.replace_at(index, mapping).await,
                    None => store.upsert(mapping).await,
                };

                match result {
                    Ok(updated) => registry.set(updated),
                    Err(e) => log::error!("Failed to save mapping: {}", e),
                }
                reset_form();
                state.set(PopupState::Idle);
            });
        })
    };

    let on_edit = {
        let registry = registry.clone();
        let source_input = source_input.clone();
        let target_inputs = target_inputs.clone();
        let editing = editing.clone();

        Callback::from(move |index: usize| {
            if let Some(mapping) = registry.mappings.get(index) {
                source_input.set(mapping.source_domain.clone());
                target_inputs.set(mapping.target_domains.clone());
                editing.set(Some(index));
            }
        })
    };

    let on_delete = {
        let registry = registry.clone();
        let reset_form = reset_form.clone();

        Callback::from(move |source_domain: String| {
            if !confirm(&format!("Delete the mapping for {}?", source_domain)) {
                return;
            }

            let registry = registry.clone();
            reset_form();
            spawn_local(async move {
                match MappingStore::new(ChromeStorage).remove(&source_domain).await {
                    Ok(updated) => registry.set(updated),
                    Err(e) => log::error!("Failed to delete mapping for {}: {}", source_domain, e),
                }
            });
        })
    };

    let on_cancel = {
        let reset_form = reset_form.clone();
        Callback::from(move |_| reset_form())
    };

    let is_busy = !matches!(*state, PopupState::Idle);
    let is_editing = editing.is_some();
    let removable = target_inputs.len() > 1;
    let ordered = registry.ordered_for_host(current_host.as_deref());

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"Domain Bridge"}</h1>
            <p class="popup-subtitle">
                {"Map a site to related sites and switch between them from the right-click menu."}
            </p>

            if *state == PopupState::Loading {
                <div class="loading-text-center">
                    <Spinner />
                </div>
            }

            // Mapping form
            <div class="form-card">
                <h2 class="section-title">
                    {if is_editing { "Edit domain mapping" } else { "Add domain mapping" }}
                </h2>

                <label class="field-label">{"Source domain:"}</label>
                <input
                    type="text"
                    placeholder="e.g. github.com"
                    value={(*source_input).clone()}
                    oninput={on_source_input}
                    class="domain-input"
                />

                <label class="field-label">{"Target domains:"}</label>
                {for target_inputs.iter().enumerate().map(|(index, value)| html! {
                    <TargetInput
                        key={index.to_string()}
                        index={index}
                        value={value.clone()}
                        removable={removable}
                        on_input={on_target_input.clone()}
                        on_remove={on_remove_target.clone()}
                    />
                })}
                <Button onclick={on_add_target} variant={ButtonVariant::Secondary} block={true}>
                    {"+ Add target domain"}
                </Button>

                <div class="form-actions">
                    <Button onclick={on_submit} disabled={is_busy}>
                        {if is_editing { "Update" } else { "Add" }}
                    </Button>
                    if is_editing {
                        <Button onclick={on_cancel} variant={ButtonVariant::Secondary}>
                            {"Cancel"}
                        </Button>
                    }
                </div>
            </div>

            // Current mappings
            <div class="mappings-card">
                <h2 class="section-title">{"Current domain mappings"}</h2>
                if ordered.is_empty() {
                    <p class="empty-state">{"No domain mappings configured."}</p>
                } else {
                    <div class="mappings-list">
                        {for ordered.into_iter().map(|(index, mapping)| {
                            let is_current = current_host
                                .as_deref()
                                .is_some_and(|host| mapping.source_domain.eq_ignore_ascii_case(host));

                            html! {
                                <MappingCard
                                    key={mapping.source_domain.clone()}
                                    mapping={mapping.clone()}
                                    index={index}
                                    is_current={is_current}
                                    on_edit={on_edit.clone()}
                                    on_delete={on_delete.clone()}
                                />
                            }
                        })}
                    </div>
                }
            </div>

            <p class="footer-popup">
                {format!("Domain Bridge v{}", env!("CARGO_PKG_VERSION"))}
            </p>
        </div>
    }
}

// Helper functions

fn show_alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|window| window.confirm_with_message(message).ok())
        .unwrap_or(false)
}
