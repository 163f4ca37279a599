use crowdfunding::format::{chf_format, major_units};
use crowdfunding::selection::{reduce, Reduction, DEFAULT_ACTIVE_INDEX};
use crowdfunding::{
    Package, PackageCampaign, QueryState, SelectionEvent, SelectionParams, SelectionState,
};
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, Field};
use crate::hooks::{use_packages, use_translator};

/// Package selector wired to the campaign data source.
#[component]
pub fn CampaignPackages(on_select: EventHandler<SelectionParams>) -> Element {
    let packages = use_packages();

    rsx! {
        PackageSelector { query: packages(), on_select }
    }
}

/// Accordion of pledge packages.
///
/// Hovering a package opens it for reading, clicking one with configurable
/// options selects it, clicking one without emits the selection right away.
#[component]
pub fn PackageSelector(
    query: QueryState<PackageCampaign>,
    on_select: EventHandler<SelectionParams>,
    #[props(default = Some(DEFAULT_ACTIVE_INDEX))] initially_active: Option<usize>,
) -> Element {
    let t = use_translator();
    let mut selection = use_signal(move || SelectionState::new(initially_active));

    let packages: Vec<Package> = query
        .data()
        .map(|campaign| campaign.packages.clone())
        .unwrap_or_default();

    let dispatch = {
        let packages = packages.clone();
        use_callback(move |event: SelectionEvent| {
            let Reduction { state, emit } = reduce(&selection.peek(), &packages, event);
            // mouseover bubbles on every pointer move
            if *selection.peek() != state {
                selection.set(state);
            }
            if let Some(params) = emit {
                on_select.call(params);
            }
        })
    };

    match query {
        QueryState::Loading => {
            let loading = t.t("query/loading", &[]);
            return rsx! { p { class: "placeholder", "{loading}" } };
        }
        QueryState::Error(message) => {
            return rsx! { p { class: "error", "{message}" } };
        }
        QueryState::Ready(_) => {}
    }

    let state = selection.read().clone();
    let can_confirm = state.can_confirm(&packages);

    rsx! {
        div { class: "packages",
            for (index, package) in packages.into_iter().enumerate() {
                {
                    let key = package.id.clone();
                    rsx! {
                        PackageRow {
                            key: "{key}",
                            package,
                            index,
                            selection: state.clone(),
                            can_confirm,
                            dispatch,
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn PackageRow(
    package: Package,
    index: usize,
    selection: SelectionState,
    can_confirm: bool,
    dispatch: Callback<SelectionEvent>,
) -> Element {
    let t = use_translator();

    let is_selected = selection.is_selected(index);
    let expanded = selection.is_expanded(index);
    let price = package.base_price();
    let price_label = if price > 0 { chf_format(price) } else { String::new() };
    let title = t.t(&format!("package/{}/title", package.name), &[]);
    let description = t.t(&format!("package/{}/description", package.name), &[]);

    let fields: Vec<(String, String, String)> = package
        .configurable_options()
        .map(|option| {
            let label = match &option.reward {
                Some(reward) => {
                    t.t_or(&format!("option/{}/label", reward.name()), reward.name())
                }
                None => option.id.clone(),
            };
            let value = selection
                .quantity(&option.id)
                .map(|quantity| quantity.to_string())
                .unwrap_or_default();
            (option.id.clone(), label, value)
        })
        .collect();

    let amount_label = t.t("package/amount/label", &[]);
    let amount_value = selection
        .amount
        .filter(|_| is_selected)
        .map(major_units)
        .unwrap_or_default();
    let continue_label = t.t("package/continue", &[]);

    rsx! {
        div {
            class: "package",
            style: if is_selected { "cursor: default;" } else { "cursor: pointer;" },
            onmouseover: move |_| dispatch.call(SelectionEvent::Hover { index }),
            onclick: move |_| dispatch.call(SelectionEvent::Click { index }),

            div { class: "package-header",
                div { class: "package-title", "{title}" }
                div { class: "package-price", "{price_label}" }
            }

            div {
                class: "package-content",
                style: if expanded { "display: block;" } else { "display: none;" },
                p { "{description}" }

                if !fields.is_empty() {
                    div { class: "package-options",
                        div { class: "grid",
                            for (option_id, label, value) in fields {
                                {
                                    let key = option_id.clone();
                                    rsx! {
                                        Field {
                                            key: "{key}",
                                            label,
                                            value,
                                            disabled: !is_selected,
                                            oninput: move |value: String| {
                                                dispatch.call(SelectionEvent::QuantityChanged {
                                                    index,
                                                    option_id: option_id.clone(),
                                                    value,
                                                })
                                            },
                                        }
                                    }
                                }
                            }
                            Field {
                                label: amount_label,
                                value: amount_value,
                                disabled: !is_selected,
                                oninput: move |value: String| {
                                    dispatch.call(SelectionEvent::AmountChanged { index, value })
                                },
                            }
                        }
                        Button {
                            variant: ButtonVariant::Primary,
                            disabled: !(is_selected && can_confirm),
                            onclick: move |evt: MouseEvent| {
                                evt.stop_propagation();
                                dispatch.call(SelectionEvent::Confirm { index });
                            },
                            "{continue_label}"
                        }
                    }
                }
            }
        }
    }
}
