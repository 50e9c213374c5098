use crate::config::RouterConfig;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "ticket-router")]
#[command(about = "Route uncategorized helpdesk tickets by subject and inventory stock")]
pub struct CliArgs {
    #[arg(long, help = "TOML configuration file; the environment is used when omitted")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl CliArgs {
    pub fn load_config(&self) -> Result<RouterConfig> {
        match &self.config {
            Some(path) => RouterConfig::from_toml_file(path),
            None => RouterConfig::from_env(),
        }
    }
}
