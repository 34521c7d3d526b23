//! The tools a travel assistant can call.

pub mod accommodation;
mod destination_info;
mod today;

pub use accommodation::AccommodationTool;
pub use destination_info::{CountryInfo, DestinationInfoTool};
pub use today::TodayTool;
