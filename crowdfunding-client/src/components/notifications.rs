use crate::hooks::{Notification, NotificationState, NotificationType};
use dioxus::prelude::*;

#[component]
pub fn NotificationContainer() -> Element {
    let state = use_context::<Signal<NotificationState>>();
    let notifications = state.read().notifications.clone();

    rsx! {
        div { class: "notifications",
            for notification in notifications.iter() {
                NotificationToast {
                    key: "{notification.id}",
                    notification: notification.clone(),
                }
            }
        }
    }
}

#[component]
fn NotificationToast(notification: Notification) -> Element {
    let kind = match notification.notification_type {
        NotificationType::Success => "notification-success",
        NotificationType::Error => "notification-error",
    };

    rsx! {
        div { class: "notification {kind}", "{notification.message}" }
    }
}
