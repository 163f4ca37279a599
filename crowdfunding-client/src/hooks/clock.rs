use std::time::Duration;

use chrono::{DateTime, Utc};
use dioxus::prelude::*;

/// Current time, refreshed every `period`.
pub fn use_now(period: Duration) -> Signal<DateTime<Utc>> {
    let mut now = use_signal(Utc::now);

    use_future(move || async move {
        loop {
            gloo_timers::future::sleep(period).await;
            now.set(Utc::now());
        }
    });

    now
}
