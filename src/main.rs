use clap::Parser;
use ticket_router::utils::{logger, validation::Validate};
use ticket_router::{CliArgs, HelpdeskClient, InventoryClient, TicketRouter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting ticket-router");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    // 載入並驗證配置
    let config = match args.load_config().and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(
                "❌ Configuration failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let helpdesk = HelpdeskClient::new(&config.helpdesk);
    let inventory = InventoryClient::new(&config.inventory);
    let router = TicketRouter::new(helpdesk, inventory, &config);

    let summary = router.run().await;

    println!(
        "✅ Processed {} of {} tickets ({} skipped)",
        summary.processed,
        summary.candidates,
        summary.skipped()
    );
    println!(
        "   Macros applied: {} (failed: {}), UPC writes: {} (failed: {})",
        summary.macros_applied,
        summary.macros_failed,
        summary.upc_writes_succeeded,
        summary.upc_writes_failed
    );

    Ok(())
}
