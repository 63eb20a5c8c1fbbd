pub mod climate;
pub mod db;
pub mod records;
pub mod reference_window;
pub mod routes;
mod startup;
pub mod templates;
mod utils;

pub use climate::{Climate, ErrorResponse, RangeFilter};
pub use db::{ClimateAccess, ClimateData};
pub use records::*;
pub use reference_window::ReferenceWindow;
pub use routes::*;
pub use startup::*;
pub use utils::*;
