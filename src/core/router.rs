use crate::config::RouterConfig;
use crate::core::classifier;
use crate::core::fetcher::fetch_uncategorized_open_tickets;
use crate::domain::model::{
    MacroKind, MacroOutcome, RunSummary, SkipReason, TicketId, TicketOutcome,
};
use crate::domain::ports::{HelpdeskApi, InventoryApi};

/// 依主旨與庫存狀態套用 macro 並回寫 UPC
pub struct TicketRouter<'a, H: HelpdeskApi, I: InventoryApi> {
    helpdesk: H,
    inventory: I,
    config: &'a RouterConfig,
}

impl<'a, H: HelpdeskApi, I: InventoryApi> TicketRouter<'a, H, I> {
    pub fn new(helpdesk: H, inventory: I, config: &'a RouterConfig) -> Self {
        Self {
            helpdesk,
            inventory,
            config,
        }
    }

    fn macro_id(&self, kind: MacroKind) -> &str {
        let macros = &self.config.macros;
        match kind {
            MacroKind::Dropship => macros.dropship.as_str(),
            MacroKind::FrameOnlyInStock => macros.frame_only.as_str(),
            MacroKind::SuppliedIdentity => macros.supplied_identity.as_str(),
            MacroKind::SpecialOrderIdentity => macros.special_order_identity.as_str(),
        }
    }

    /// 取得待處理 ticket；搜尋失敗時記錄錯誤並回傳空清單
    pub async fn fetch_candidates(&self) -> Vec<TicketId> {
        match fetch_uncategorized_open_tickets(&self.helpdesk, &self.config.search).await {
            Ok(ids) => ids,
            Err(e) => {
                tracing::error!("❌ Error fetching uncategorized tickets: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn process_ticket(&self, ticket_id: &TicketId) -> TicketOutcome {
        let skipped = |reason: SkipReason| TicketOutcome::Skipped {
            ticket_id: ticket_id.clone(),
            reason,
        };

        let ticket = match self.helpdesk.get_ticket(ticket_id).await {
            Ok(ticket) => ticket,
            Err(e) => {
                tracing::error!(
                    "❌ Failed to get ticket info for ticket {}, skipping: {}",
                    ticket_id,
                    e
                );
                return skipped(SkipReason::TicketFetchFailed);
            }
        };

        let Some(upc) = ticket.upc(&self.config.upc_field_id) else {
            tracing::info!("No UPC found in ticket {}.", ticket_id);
            return skipped(SkipReason::NoUpc);
        };

        let item = match self.inventory.lookup_item(&upc).await {
            Ok(item) => item,
            Err(e) => {
                tracing::error!(
                    "❌ Failed to search inventory item for UPC {}, skipping ticket {}: {}",
                    upc,
                    ticket_id,
                    e
                );
                return skipped(SkipReason::LookupFailed);
            }
        };

        let decision = classifier::decide(&ticket.normalized_subject(), item.in_stock);

        let macro_outcome = match decision.macro_kind {
            Some(kind) => {
                let macro_id = self.macro_id(kind);
                let applied = match self.helpdesk.apply_macro(ticket_id, macro_id).await {
                    Ok(_) => {
                        tracing::info!("✅ Applied '{}' macro to ticket {}.", kind, ticket_id);
                        true
                    }
                    Err(e) => {
                        tracing::error!(
                            "❌ Error applying macro {} ('{}') to ticket {}: {}",
                            macro_id,
                            kind,
                            ticket_id,
                            e
                        );
                        false
                    }
                };
                Some(MacroOutcome { kind, applied })
            }
            None => {
                tracing::debug!("Subject of ticket {} matched no route", ticket_id);
                None
            }
        };

        let upc_written = if decision.write_upc {
            match self
                .helpdesk
                .update_custom_field(ticket_id, &self.config.upc_field_id, &upc)
                .await
            {
                Ok(_) => {
                    tracing::info!(
                        "✅ Successfully updated ticket {} with UPC {}.",
                        ticket_id,
                        upc
                    );
                    Some(true)
                }
                Err(e) => {
                    tracing::error!("❌ Failed to update ticket {}: {}", ticket_id, e);
                    Some(false)
                }
            }
        } else {
            tracing::info!(
                "Item with UPC {} is not in stock for ticket {}.",
                upc,
                ticket_id
            );
            None
        };

        TicketOutcome::Processed {
            ticket_id: ticket_id.clone(),
            upc,
            in_stock: item.in_stock,
            route: decision.route,
            macro_outcome,
            upc_written,
        }
    }

    /// 依序處理每張 ticket，單張失敗不影響其餘
    pub async fn run(&self) -> RunSummary {
        let ticket_ids = self.fetch_candidates().await;
        tracing::info!("🔍 Found {} uncategorized open tickets", ticket_ids.len());

        let mut summary = RunSummary {
            candidates: ticket_ids.len(),
            ..RunSummary::default()
        };

        for ticket_id in &ticket_ids {
            let outcome = self.process_ticket(ticket_id).await;
            summary.record(&outcome);
        }

        tracing::info!(
            "📊 Run complete - candidates: {}, processed: {}, skipped: {}, macros applied: {}, UPC writes: {}",
            summary.candidates,
            summary.processed,
            summary.skipped(),
            summary.macros_applied,
            summary.upc_writes_succeeded
        );

        summary
    }
}
