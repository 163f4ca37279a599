pub mod home;
pub mod pledge;

pub use home::Home;
pub use pledge::Pledge;
