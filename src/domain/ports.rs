use crate::domain::model::{InventoryItem, SearchPage, Ticket, TicketId};
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait HelpdeskApi: Send + Sync {
    /// 第一頁搜尋結果
    async fn search_tickets(&self, query: &str) -> Result<SearchPage>;

    /// 依 `next_page` 取得後續頁面
    async fn search_page(&self, page_url: &str) -> Result<SearchPage>;

    async fn get_ticket(&self, id: &TicketId) -> Result<Ticket>;

    async fn update_custom_field(
        &self,
        id: &TicketId,
        field_id: &str,
        value: &str,
    ) -> Result<serde_json::Value>;

    async fn apply_macro(&self, id: &TicketId, macro_id: &str) -> Result<serde_json::Value>;
}

#[async_trait]
pub trait InventoryApi: Send + Sync {
    async fn lookup_item(&self, upc: &str) -> Result<InventoryItem>;
}
