use crate::config::SearchConfig;
use crate::domain::model::TicketId;
use crate::domain::ports::HelpdeskApi;
use crate::utils::error::Result;
use std::collections::HashSet;

/// 搜尋 open ticket，在客戶端過濾出帶有 uncategorized 標籤的 id。
///
/// 依 `next_page` 翻頁，最多 `search.max_pages` 頁；任一頁失敗即整體失敗。
/// 回傳的 id 不重複，保持第一次出現的順序。
pub async fn fetch_uncategorized_open_tickets<H: HelpdeskApi + ?Sized>(
    helpdesk: &H,
    search: &SearchConfig,
) -> Result<Vec<TicketId>> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();

    let mut page = helpdesk.search_tickets(&search.query).await?;
    let mut pages_read = 1;

    loop {
        let total = page.results.len();
        for hit in page.results {
            if hit.has_tag(&search.uncategorized_tag) && seen.insert(hit.id.clone()) {
                ids.push(hit.id);
            }
        }
        tracing::debug!(
            "Search page {}: {} results, {} uncategorized so far",
            pages_read,
            total,
            ids.len()
        );

        match page.next_page {
            Some(next) if pages_read < search.max_pages => {
                page = helpdesk.search_page(&next).await?;
                pages_read += 1;
            }
            Some(_) => {
                tracing::warn!(
                    "Stopped after {} search pages; remaining tickets are left for the next run",
                    pages_read
                );
                break;
            }
            None => break,
        }
    }

    Ok(ids)
}
