pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::{GeminiChatClient, HttpBloodBankApi};
pub use app::{
    AssistantController, DashboardController, InventoryController, IssueController, UserNotice,
    UsersController,
};
pub use config::ClientConfig;
pub use domain::ports::{BloodBankApi, ChatCollaborator, Clock, FixedClock, SystemClock};
pub use utils::error::{BloodBankError, Result};
