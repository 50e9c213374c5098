use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Helpdesk 的 ticket 識別碼，API 可能回傳數字或字串
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TicketId(String);

impl TicketId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for TicketId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for TicketId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => TicketId::from(n),
            RawId::Text(s) => TicketId(s),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomField {
    pub id: serde_json::Value,
    #[serde(default)]
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub upc: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub custom_fields: Vec<CustomField>,
}

impl Ticket {
    /// 小寫後的主旨，缺少時為空字串
    pub fn normalized_subject(&self) -> String {
        self.subject.as_deref().unwrap_or_default().to_lowercase()
    }

    /// 先讀頂層 `upc`，再找 id 符合 `upc_field_id` 的自訂欄位
    pub fn upc(&self, upc_field_id: &str) -> Option<String> {
        if let Some(upc) = self.upc.as_ref().and_then(value_as_text) {
            return Some(upc);
        }

        self.custom_fields
            .iter()
            .find(|field| value_as_text(&field.id).as_deref() == Some(upc_field_id))
            .and_then(|field| value_as_text(&field.value))
    }
}

/// `GET /tickets/{id}.json` 的外層
#[derive(Debug, Clone, Deserialize)]
pub struct TicketEnvelope {
    pub ticket: Ticket,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: TicketId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
}

impl SearchHit {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPage {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub results: Vec<SearchHit>,
    #[serde(default)]
    pub next_page: Option<String>,
}

#[derive(Debug, Clone)]
pub struct InventoryItem {
    pub upc: String,
    pub in_stock: bool,
    pub raw: serde_json::Value,
}

impl InventoryItem {
    pub fn from_response(upc: &str, raw: serde_json::Value) -> Self {
        let in_stock = raw.get("in_stock").map(stock_flag).unwrap_or(false);
        Self {
            upc: upc.to_string(),
            in_stock,
            raw,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    FrameOnly,
    Identity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MacroKind {
    Dropship,
    FrameOnlyInStock,
    SuppliedIdentity,
    SpecialOrderIdentity,
}

impl MacroKind {
    pub fn label(&self) -> &'static str {
        match self {
            MacroKind::Dropship => "Special Order: Dropship",
            MacroKind::FrameOnlyInStock => "Supplied: Frame Only",
            MacroKind::SuppliedIdentity => "Supplied: Identity",
            MacroKind::SpecialOrderIdentity => "Special Order: Identity",
        }
    }
}

impl fmt::Display for MacroKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub route: Option<Route>,
    pub macro_kind: Option<MacroKind>,
    pub write_upc: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    TicketFetchFailed,
    NoUpc,
    LookupFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroOutcome {
    pub kind: MacroKind,
    pub applied: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketOutcome {
    Skipped {
        ticket_id: TicketId,
        reason: SkipReason,
    },
    Processed {
        ticket_id: TicketId,
        upc: String,
        in_stock: bool,
        route: Option<Route>,
        macro_outcome: Option<MacroOutcome>,
        /// `None` 表示缺貨未寫入
        upc_written: Option<bool>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub candidates: usize,
    pub processed: usize,
    pub skipped_fetch_failed: usize,
    pub skipped_no_upc: usize,
    pub skipped_lookup_failed: usize,
    pub macros_applied: usize,
    pub macros_failed: usize,
    pub upc_writes_succeeded: usize,
    pub upc_writes_failed: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &TicketOutcome) {
        match outcome {
            TicketOutcome::Skipped { reason, .. } => match reason {
                SkipReason::TicketFetchFailed => self.skipped_fetch_failed += 1,
                SkipReason::NoUpc => self.skipped_no_upc += 1,
                SkipReason::LookupFailed => self.skipped_lookup_failed += 1,
            },
            TicketOutcome::Processed {
                macro_outcome,
                upc_written,
                ..
            } => {
                self.processed += 1;
                match macro_outcome {
                    Some(m) if m.applied => self.macros_applied += 1,
                    Some(_) => self.macros_failed += 1,
                    None => {}
                }
                match upc_written {
                    Some(true) => self.upc_writes_succeeded += 1,
                    Some(false) => self.upc_writes_failed += 1,
                    None => {}
                }
            }
        }
    }

    pub fn skipped(&self) -> usize {
        self.skipped_fetch_failed + self.skipped_no_upc + self.skipped_lookup_failed
    }
}

/// 陣列欄位為 `null` 時視為空陣列
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// ERP 的庫存旗標可能是布林、0/1 或 "T"/"F"
fn stock_flag(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        serde_json::Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "t" | "true" | "y" | "yes" | "1"
        ),
        _ => false,
    }
}

fn value_as_text(value: &serde_json::Value) -> Option<String> {
    let text = match value {
        serde_json::Value::String(s) => s.trim().to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ticket(value: serde_json::Value) -> Ticket {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_ticket_id_accepts_numbers_and_strings() {
        let numeric: TicketId = serde_json::from_value(json!(12345)).unwrap();
        let text: TicketId = serde_json::from_value(json!("abc-1")).unwrap();
        assert_eq!(numeric.as_str(), "12345");
        assert_eq!(text.as_str(), "abc-1");
    }

    #[test]
    fn test_upc_prefers_top_level_member() {
        let t = ticket(json!({
            "id": 1,
            "upc": "012345678905",
            "custom_fields": [{"id": 360001, "value": "999999999999"}]
        }));
        assert_eq!(t.upc("360001").as_deref(), Some("012345678905"));
    }

    #[test]
    fn test_upc_falls_back_to_custom_field() {
        let t = ticket(json!({
            "id": 1,
            "custom_fields": [
                {"id": 100, "value": "other"},
                {"id": 360001, "value": 12345678905u64}
            ]
        }));
        assert_eq!(t.upc("360001").as_deref(), Some("12345678905"));
        assert_eq!(t.upc("777"), None);
    }

    #[test]
    fn test_blank_upc_counts_as_missing() {
        let t = ticket(json!({"id": 1, "upc": "  ", "custom_fields": []}));
        assert_eq!(t.upc("360001"), None);

        let null_upc = ticket(json!({"id": 2, "upc": null}));
        assert_eq!(null_upc.upc("360001"), None);
    }

    #[test]
    fn test_in_stock_defaults_to_false() {
        let item = InventoryItem::from_response("1", json!({"name": "Frame"}));
        assert!(!item.in_stock);

        let stocked = InventoryItem::from_response("1", json!({"in_stock": true}));
        assert!(stocked.in_stock);

        let null_flag = InventoryItem::from_response("1", json!({"in_stock": null}));
        assert!(!null_flag.in_stock);
    }

    #[test]
    fn test_in_stock_accepts_numeric_and_letter_flags() {
        let cases = [
            (json!(1), true),
            (json!(0), false),
            (json!(3), true),
            (json!("T"), true),
            (json!("F"), false),
            (json!("true"), true),
            (json!("no"), false),
            (json!(""), false),
            (json!([true]), false),
        ];
        for (flag, expected) in cases {
            let item = InventoryItem::from_response("1", json!({"in_stock": flag.clone()}));
            assert_eq!(item.in_stock, expected, "in_stock = {}", flag);
        }
    }

    #[test]
    fn test_null_arrays_decode_as_empty() {
        let page: SearchPage = serde_json::from_value(json!({
            "results": [
                {"id": 1, "tags": ["uncategorized"]},
                {"id": 2, "tags": null}
            ],
            "next_page": null
        }))
        .unwrap();
        assert_eq!(page.results.len(), 2);
        assert!(page.results[0].has_tag("uncategorized"));
        assert!(page.results[1].tags.is_empty());

        let t = ticket(json!({"id": 3, "tags": null, "custom_fields": null}));
        assert!(t.tags.is_empty());
        assert!(t.custom_fields.is_empty());

        let empty: SearchPage = serde_json::from_value(json!({"results": null})).unwrap();
        assert!(empty.results.is_empty());
    }

    #[test]
    fn test_summary_counts_outcomes() {
        let mut summary = RunSummary::default();
        summary.record(&TicketOutcome::Skipped {
            ticket_id: TicketId::from(1),
            reason: SkipReason::NoUpc,
        });
        summary.record(&TicketOutcome::Processed {
            ticket_id: TicketId::from(2),
            upc: "123".to_string(),
            in_stock: true,
            route: Some(Route::Identity),
            macro_outcome: Some(MacroOutcome {
                kind: MacroKind::SuppliedIdentity,
                applied: true,
            }),
            upc_written: Some(false),
        });

        assert_eq!(summary.processed, 1);
        assert_eq!(summary.skipped(), 1);
        assert_eq!(summary.macros_applied, 1);
        assert_eq!(summary.upc_writes_failed, 1);
    }
}
