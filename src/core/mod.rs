pub mod chat;
pub mod dashboard;
pub mod donors;
pub mod inventory;
pub mod requests;
pub mod users;

pub use crate::domain::model::*;
pub use crate::domain::ports::{BloodBankApi, ChatCollaborator, Clock, FixedClock, SystemClock};
pub use crate::utils::error::Result;
