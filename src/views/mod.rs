//! Calendar views: month/week/day layout math and the controller that turns
//! gestures into store mutations.

pub mod controller;
pub mod drag;
pub mod geometry;
pub mod month_view;
pub mod navigation;
pub mod time_grid;
pub mod types;

pub use controller::CalendarView;
pub use types::{ClickTarget, DropOutcome, DropTarget, ViewAction, ViewType};
