/// Reusable UI components for the settings popup

use crate::mapping::DomainMapping;
use patternfly_yew::prelude::*;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct MappingCardProps {
    pub mapping: DomainMapping,
    /// Position in the registry, not in the rendered list
    pub index: usize,
    #[prop_or(false)]
    pub is_current: bool,
    pub on_edit: Callback<usize>,
    pub on_delete: Callback<String>,
}

#[function_component(MappingCard)]
pub fn mapping_card(props: &MappingCardProps) -> Html {
    let mapping = &props.mapping;
    let class = if props.is_current {
        "mapping-card mapping-card-current"
    } else {
        "mapping-card"
    };

    html! {
        <div class={class}>
            <div class="mapping-source">{&mapping.source_domain}</div>
            <div class="mapping-targets">
                {for mapping.target_domains.iter().map(|target| html! {
                    <span key={target.clone()} class="mapping-target">{target}</span>
                })}
            </div>
            <div class="mapping-actions">
                <Button
                    onclick={props.on_edit.reform({
                        let index = props.index;
                        move |_| index
                    })}
                    size={ButtonSize::Small}
                >
                    {"Edit"}
                </Button>
                <Button
                    onclick={props.on_delete.reform({
                        let source = mapping.source_domain.clone();
                        move |_| source.clone()
                    })}
                    variant={ButtonVariant::Danger}
                    size={ButtonSize::Small}
                >
                    {"Delete"}
                </Button>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TargetInputProps {
    pub index: usize,
    pub value: String,
    /// Only shown while more than one target input exists
    #[prop_or(false)]
    pub removable: bool,
    pub on_input: Callback<(usize, String)>,
    pub on_remove: Callback<usize>,
}

#[function_component(TargetInput)]
pub fn target_input(props: &TargetInputProps) -> Html {
    let oninput = {
        let index = props.index;
        let on_input = props.on_input.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                on_input.emit((index, input.value()));
            }
        })
    };

    html! {
        <div class="target-input-row">
            <input
                type="text"
                placeholder="e.g. deepwiki.com"
                value={props.value.clone()}
                oninput={oninput}
                class="domain-input"
            />
            if props.removable {
                <Button
                    onclick={props.on_remove.reform({
                        let index = props.index;
                        move |_| index
                    })}
                    variant={ButtonVariant::Secondary}
                    size={ButtonSize::Small}
                >
                    {"✗"}
                </Button>
            }
        </div>
    }
}
