use crowdfunding::SelectionParams;
use crowdfunding::format::chf_format;
use dioxus::prelude::*;

use crate::Route;
use crate::components::{Button, ButtonVariant, LiveCampaignStatus};
use crate::hooks::use_translator;

/// Summary of the chosen package, handed on to the pledge form.
#[component]
pub fn Pledge() -> Element {
    let t = use_translator();
    let nav = navigator();
    let selection = use_context::<Signal<Option<SelectionParams>>>();

    let Some(params) = selection() else {
        return rsx! {
            main { class: "page",
                Link { to: Route::Home {}, "←" }
            }
        };
    };

    let heading = t.t("pledge/title", &[]);
    let title = t.t(&format!("package/{}/title", params.package), &[]);
    let amount = chf_format(params.amount);
    let payload = serde_json::to_string(&params).unwrap_or_default();

    rsx! {
        main { class: "page",
            section { class: "column",
                LiveCampaignStatus { compact: true }
            }
            section { class: "column",
                h2 { "{heading}" }
                p { class: "package-title", "{title}" }
                p { class: "package-price", "{amount}" }
                ul {
                    for (option_id, quantity) in params.options.iter() {
                        li { key: "{option_id}", "{option_id}: {quantity}" }
                    }
                }
                pre { class: "pledge-params", "{payload}" }
                Button {
                    variant: ButtonVariant::Secondary,
                    onclick: move |_| {
                        nav.push(Route::Home {});
                    },
                    "←"
                }
            }
        }
    }
}
