pub mod accordion;
pub mod bar;
pub mod buttons;
pub mod field;
pub mod notifications;
pub mod status;

pub use accordion::{CampaignPackages, PackageSelector};
pub use bar::Bar;
pub use buttons::{Button, ButtonVariant};
pub use field::Field;
pub use notifications::NotificationContainer;
pub use status::{CampaignStatus, LiveCampaignStatus};
