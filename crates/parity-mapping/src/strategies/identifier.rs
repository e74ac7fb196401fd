use parity_core::{AppTraceRef, DesignTraceRef};

use crate::model::{MatchEvidence, MatchStrategy};

/// `"com.app:id/login_button"` -> `"login_button"`. Falls back to the part
/// after the last `:` when there is no `/`.
pub fn resource_id_suffix(resource_id: Option<&str>) -> &str {
    let Some(id) = resource_id else {
        return "";
    };
    if let Some(idx) = id.rfind('/') {
        return &id[idx + 1..];
    }
    if let Some(idx) = id.rfind(':') {
        return &id[idx + 1..];
    }
    id
}

/// Lowercase, with hyphens and spaces folded to underscores.
pub fn normalize_id(id: &str) -> String {
    id.chars()
        .map(|c| if c == '-' || c == ' ' { '_' } else { c })
        .collect::<String>()
        .to_lowercase()
}

/// 1.0 on an exact identifier match, 0.85 when one contains the other,
/// 0 otherwise. The design side is the node name (node id if unnamed); the
/// app side is the resource-id suffix and the accessibility id.
pub fn identifier_score(design: &DesignTraceRef, app: &AppTraceRef) -> f64 {
    let design_id = normalize_id(design.display_name());
    let app_ids: Vec<String> = [
        resource_id_suffix(app.resource_id.as_deref()),
        app.accessibility_id.as_deref().unwrap_or(""),
    ]
    .into_iter()
    .filter(|s| !s.is_empty())
    .map(normalize_id)
    .collect();

    if design_id.is_empty() || app_ids.is_empty() {
        return 0.0;
    }
    if app_ids.iter().any(|aid| *aid == design_id) {
        return 1.0;
    }
    if app_ids.iter().any(|aid| design_id.contains(aid.as_str()) || aid.contains(design_id.as_str())) {
        return 0.85;
    }
    0.0
}

pub fn identifier_evidence(score: f64, design: &DesignTraceRef, app: &AppTraceRef) -> MatchEvidence {
    MatchEvidence {
        strategy: MatchStrategy::AccessibilityId,
        score,
        details: format!(
            "design.nodeName=\"{}\" app.resourceId=\"{}\" app.accessibilityId=\"{}\"",
            design.node_name.as_deref().unwrap_or(""),
            app.resource_id.as_deref().unwrap_or(""),
            app.accessibility_id.as_deref().unwrap_or("")
        ),
    }
}
