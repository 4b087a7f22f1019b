// Application layer: controllers that drive the core models against the ports.

pub mod controllers;
pub mod in_flight;
pub mod notice;

pub use controllers::{
    AssistantController, DashboardController, InventoryController, IssueController,
    UsersController,
};
pub use in_flight::InFlight;
pub use notice::UserNotice;
