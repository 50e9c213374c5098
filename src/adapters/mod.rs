// Adapters layer: reqwest implementations of the helpdesk and inventory ports.

pub mod helpdesk;
pub mod inventory;

pub use helpdesk::HelpdeskClient;
pub use inventory::InventoryClient;

use crate::utils::error::{Result, RouterError};
use serde::de::DeserializeOwned;

/// 非 2xx 回應轉成 `RouterError::Status`，並保留回應內容
pub(crate) async fn check_status(
    service: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        tracing::debug!("{} response status: {}", service, status);
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    Err(RouterError::Status {
        service,
        status: status.as_u16(),
        url,
        body,
    })
}

/// 讀出完整內容後再解析，解析失敗為 `RouterError::Serialization`
pub(crate) async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

pub(crate) fn trim_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
