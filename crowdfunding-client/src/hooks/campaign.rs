use std::pin::pin;
use std::rc::Rc;

use crowdfunding::source::poll_status;
use crowdfunding::{CampaignSource, Config, PackageCampaign, QueryState, StatusCampaign};
use dioxus::prelude::*;
use dioxus_logger::tracing::{error, warn};
use futures::StreamExt;

use super::{use_notifications, use_translator};

/// Data source shared by every widget on the page.
pub fn use_campaign_source() -> Rc<dyn CampaignSource> {
    use_context::<Rc<dyn CampaignSource>>()
}

pub fn use_config() -> Config {
    use_context::<Config>()
}

/// Fetches the packages once.
///
/// With strict translations enabled, packages whose titles are missing from the
/// catalog turn into an error instead of rendering raw keys.
pub fn use_packages() -> Signal<QueryState<PackageCampaign>> {
    let source = use_campaign_source();
    let config = use_config();
    let translator = use_translator();
    let notif = use_notifications();
    let mut packages = use_signal(|| QueryState::Loading);

    use_future(move || {
        let source = source.clone();
        let config = config.clone();
        let translator = translator.clone();
        let mut notif = notif;
        async move {
            let result = source.fetch_packages(&config.campaign_name).await;
            let state = match result {
                Ok(campaign) => {
                    let missing = translator.missing_keys(&campaign.packages);
                    if config.strict_translations && !missing.is_empty() {
                        error!("Missing translations: {}", missing.join(", "));
                        QueryState::Error(format!("Missing translations: {}", missing.join(", ")))
                    } else {
                        QueryState::Ready(campaign)
                    }
                }
                Err(e) => {
                    error!("Failed to load packages: {:#}", e);
                    notif.error("Pakete konnten nicht geladen werden".to_string());
                    QueryState::from_result(Err(e))
                }
            };
            packages.set(state);
        }
    });

    packages
}

/// Campaign status, refreshed on the configured poll interval.
///
/// A failed refresh keeps the last status on screen.
pub fn use_campaign_status() -> Signal<Option<StatusCampaign>> {
    let source = use_campaign_source();
    let config = use_config();
    let mut campaign = use_signal(|| None::<StatusCampaign>);

    use_future(move || {
        let source = source.clone();
        let config = config.clone();
        async move {
            let mut updates = pin!(poll_status(
                &*source,
                &config.campaign_name,
                config.status_poll_interval,
                gloo_timers::future::sleep,
            ));

            while let Some(state) = updates.next().await {
                match state {
                    QueryState::Ready(data) => campaign.set(data),
                    QueryState::Error(message) => {
                        warn!("Keeping previous status: {}", message)
                    }
                    QueryState::Loading => {}
                }
            }
        }
    });

    campaign
}
