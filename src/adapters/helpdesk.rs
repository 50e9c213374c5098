use crate::config::ServiceConfig;
use crate::domain::model::{SearchPage, Ticket, TicketEnvelope, TicketId};
use crate::domain::ports::HelpdeskApi;
use crate::utils::error::{Result, RouterError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use url::Url;

use super::{check_status, read_json, trim_base_url};

const SERVICE: &str = "helpdesk";

/// Zendesk 風格的 REST API 客戶端
pub struct HelpdeskClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HelpdeskClient {
    pub fn new(config: &ServiceConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &ServiceConfig) -> Self {
        Self {
            client,
            base_url: trim_base_url(&config.api_url),
            api_key: config.api_key.clone(),
        }
    }

    fn ticket_url(&self, id: &TicketId) -> String {
        format!("{}/tickets/{}.json", self.base_url, id)
    }

    /// `next_page` 必須與設定的 helpdesk 同 scheme/host/port，token 不送往其他主機
    fn same_origin_url(&self, page_url: &str) -> Result<Url> {
        let base = Url::parse(&self.base_url)?;
        let page = Url::parse(page_url)?;
        if page.origin() != base.origin() {
            return Err(RouterError::ForeignUrl {
                service: SERVICE,
                url: page_url.to_string(),
            });
        }
        Ok(page)
    }

    async fn fetch_search_page(&self, request: reqwest::RequestBuilder) -> Result<SearchPage> {
        let response = request.bearer_auth(&self.api_key).send().await?;
        let response = check_status(SERVICE, response).await?;
        read_json(response).await
    }
}

/// 自訂欄位 id 全為數字時以 JSON 數字送出
fn field_id_value(field_id: &str) -> serde_json::Value {
    match field_id.parse::<u64>() {
        Ok(n) => json!(n),
        Err(_) => json!(field_id),
    }
}

#[async_trait]
impl HelpdeskApi for HelpdeskClient {
    async fn search_tickets(&self, query: &str) -> Result<SearchPage> {
        let url = format!("{}/search.json", self.base_url);
        tracing::debug!("Searching tickets: {} (query: {})", url, query);

        self.fetch_search_page(self.client.get(&url).query(&[("query", query)]))
            .await
    }

    async fn search_page(&self, page_url: &str) -> Result<SearchPage> {
        tracing::debug!("Fetching search page: {}", page_url);
        let url = self.same_origin_url(page_url)?;
        self.fetch_search_page(self.client.get(url)).await
    }

    async fn get_ticket(&self, id: &TicketId) -> Result<Ticket> {
        let url = self.ticket_url(id);
        tracing::debug!("Fetching ticket: {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        let response = check_status(SERVICE, response).await?;
        let envelope: TicketEnvelope = read_json(response).await?;
        Ok(envelope.ticket)
    }

    async fn update_custom_field(
        &self,
        id: &TicketId,
        field_id: &str,
        value: &str,
    ) -> Result<serde_json::Value> {
        let url = self.ticket_url(id);
        let body = json!({
            "ticket": {
                "custom_fields": [
                    { "id": field_id_value(field_id), "value": value }
                ]
            }
        });
        tracing::debug!("Updating ticket {} custom field {}", id, field_id);

        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let response = check_status(SERVICE, response).await?;
        read_json(response).await
    }

    async fn apply_macro(&self, id: &TicketId, macro_id: &str) -> Result<serde_json::Value> {
        let url = format!("{}/tickets/{}/macros/{}/apply.json", self.base_url, id, macro_id);
        tracing::debug!("Applying macro: {}", url);

        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;
        let response = check_status(SERVICE, response).await?;
        read_json(response).await
    }
}
