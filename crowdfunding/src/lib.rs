// Shared core: everything here compiles for wasm32 as well as native targets
pub mod config;
pub mod format;
pub mod i18n;
pub mod models;
pub mod pricing;
pub mod progress;
pub mod query;
pub mod selection;
pub mod source;

// Native GraphQL transport
#[cfg(feature = "http-client")]
pub mod http;

pub use config::Config;
pub use i18n::{Segment, Translator};
pub use models::*;
pub use progress::{Accessor, BarModel, Countdown};
pub use query::QueryState;
pub use selection::{SelectionEvent, SelectionParams, SelectionState};
pub use source::{CampaignSource, GraphQlSource, GraphQlTransport};
