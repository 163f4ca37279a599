pub mod campaign;
pub mod clock;
pub mod i18n;
pub mod notifications;

pub use campaign::{use_campaign_source, use_campaign_status, use_config, use_packages};
pub use clock::use_now;
pub use i18n::use_translator;
pub use notifications::{use_notifications, Notification, NotificationState, NotificationType};
