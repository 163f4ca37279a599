mod api;
mod components;
mod hooks;
mod pages;

use std::rc::Rc;

use crowdfunding::{CampaignSource, GraphQlSource, SelectionParams, Translator};
use dioxus::prelude::*;
use dioxus_logger::tracing::{error, info, Level};

use api::{build_config, GlooTransport};
use components::NotificationContainer;
use pages::{Home, Pledge};

#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Layout)]
        #[route("/")]
        Home {},
        #[route("/pledge")]
        Pledge {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        NotificationContainer {}
        Outlet::<Route> {}
    }
}

#[component]
pub fn App() -> Element {
    let config = use_context_provider(build_config);
    use_context_provider(|| {
        let source: Rc<dyn CampaignSource> =
            Rc::new(GraphQlSource::new(GlooTransport::from_config(&config)));
        source
    });
    use_context_provider(|| {
        let translator = Translator::german().unwrap_or_else(|e| {
            error!("Failed to load messages: {:#}", e);
            Translator::default()
        });
        Rc::new(translator)
    });
    use_context_provider(|| Signal::new(hooks::NotificationState::default()));
    use_context_provider(|| Signal::new(None::<SelectionParams>));

    rsx! {
        style { {include_str!("styles.css")} }

        div { class: "app",
            Router::<Route> {}
        }
    }
}

pub fn launch() {
    dioxus_logger::init(Level::INFO).expect("failed to init logger");
    info!("Starting crowdfunding client");
    dioxus::launch(App);
}
