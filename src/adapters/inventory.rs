use crate::config::ServiceConfig;
use crate::domain::model::InventoryItem;
use crate::domain::ports::InventoryApi;
use crate::utils::error::{Result, RouterError};
use async_trait::async_trait;
use reqwest::Client;

use super::{check_status, read_json};

const SERVICE: &str = "inventory";

/// ERP 品項查詢，`GET <url>?q={upc}`
pub struct InventoryClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl InventoryClient {
    pub fn new(config: &ServiceConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &ServiceConfig) -> Self {
        Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

fn is_empty_body(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

#[async_trait]
impl InventoryApi for InventoryClient {
    async fn lookup_item(&self, upc: &str) -> Result<InventoryItem> {
        tracing::debug!("Looking up inventory item: {} (q={})", self.api_url, upc);

        let response = self
            .client
            .get(&self.api_url)
            .bearer_auth(&self.api_key)
            .query(&[("q", upc)])
            .send()
            .await?;
        let response = check_status(SERVICE, response).await?;
        let body: serde_json::Value = read_json(response).await?;

        if is_empty_body(&body) {
            return Err(RouterError::EmptyResponse {
                service: SERVICE,
                context: format!("UPC {}", upc),
            });
        }

        Ok(InventoryItem::from_response(upc, body))
    }
}
