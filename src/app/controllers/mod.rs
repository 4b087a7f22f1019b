pub mod assistant;
pub mod dashboard;
pub mod inventory;
pub mod issue;
pub mod users;

#[cfg(test)]
pub(crate) mod testing;

pub use assistant::AssistantController;
pub use dashboard::{DashboardController, StockOverview};
pub use inventory::InventoryController;
pub use issue::IssueController;
pub use users::UsersController;
