use crowdfunding::SelectionParams;
use dioxus::prelude::*;
use dioxus_logger::tracing::info;

use crate::Route;
use crate::components::{CampaignPackages, LiveCampaignStatus};
use crate::hooks::{use_notifications, use_translator};

#[component]
pub fn Home() -> Element {
    let nav = navigator();
    let t = use_translator();
    let mut notif = use_notifications();
    let mut selection = use_context::<Signal<Option<SelectionParams>>>();

    let on_select = move |params: SelectionParams| {
        info!("Selected {} for {}", params.package, params.amount);
        let title = t.t(&format!("package/{}/title", params.package), &[]);
        notif.success(t.t("pledge/selected", &[("package", title.as_str())]));
        selection.set(Some(params));
        nav.push(Route::Pledge {});
    };

    rsx! {
        main { class: "page",
            section { class: "column",
                LiveCampaignStatus {}
            }
            section { class: "column",
                CampaignPackages { on_select }
            }
        }
    }
}
