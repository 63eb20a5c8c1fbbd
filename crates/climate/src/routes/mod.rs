pub mod api;
pub mod home;

pub use api::*;
pub use home::*;
