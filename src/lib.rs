pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::{HelpdeskClient, InventoryClient};
pub use config::RouterConfig;
pub use crate::core::router::TicketRouter;
pub use utils::error::{Result, RouterError};
