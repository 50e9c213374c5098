pub mod classifier;
pub mod fetcher;
pub mod router;

pub use crate::domain::model::{Decision, MacroKind, Route, RunSummary, TicketOutcome};
pub use crate::domain::ports::{HelpdeskApi, InventoryApi};
pub use crate::utils::error::Result;
