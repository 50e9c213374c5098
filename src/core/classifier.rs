use crate::domain::model::{Decision, MacroKind, Route};

const FRAME_ONLY_KEYWORDS: [&str; 2] = ["frame only", "to view"];
const IDENTITY_KEYWORDS: [&str; 2] = ["identity optical", "iol"];

/// 主旨分類，不分大小寫的子字串比對，frame-only 優先
pub fn classify_subject(subject: &str) -> Option<Route> {
    let subject = subject.to_lowercase();

    if FRAME_ONLY_KEYWORDS.iter().any(|k| subject.contains(k)) {
        Some(Route::FrameOnly)
    } else if IDENTITY_KEYWORDS.iter().any(|k| subject.contains(k)) {
        Some(Route::Identity)
    } else {
        None
    }
}

pub fn select_macro(route: Route, in_stock: bool) -> MacroKind {
    match (route, in_stock) {
        (Route::FrameOnly, true) => MacroKind::FrameOnlyInStock,
        (Route::FrameOnly, false) => MacroKind::Dropship,
        (Route::Identity, true) => MacroKind::SuppliedIdentity,
        (Route::Identity, false) => MacroKind::SpecialOrderIdentity,
    }
}

/// Macro 選擇與 UPC 回寫各自只看 `in_stock`；主旨沒分類到時仍會回寫。
pub fn decide(subject: &str, in_stock: bool) -> Decision {
    let route = classify_subject(subject);
    Decision {
        route,
        macro_kind: route.map(|r| select_macro(r, in_stock)),
        write_upc: in_stock,
    }
}
