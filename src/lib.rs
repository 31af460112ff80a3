// Meeting Scheduler Library
// Event store, calendar layout and lead-time alerts

pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod views;

pub use error::{CalendarError, CalendarResult};
