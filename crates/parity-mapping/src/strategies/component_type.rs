use parity_core::ComponentType;

use crate::model::{MatchEvidence, MatchStrategy};

/// Cross-type pairs that often describe the same element, e.g. a design
/// button captured as a plain text view. Symmetric.
const COMPATIBLE_PAIRS: [(ComponentType, ComponentType); 3] = [
    (ComponentType::Text, ComponentType::Container),
    (ComponentType::Button, ComponentType::Text),
    (ComponentType::Container, ComponentType::Unknown),
];

const COMPATIBLE_SCORE: f64 = 0.6;

fn same_type_score(t: ComponentType) -> f64 {
    match t {
        ComponentType::Button
        | ComponentType::Input
        | ComponentType::Text
        | ComponentType::Image
        | ComponentType::Icon => 1.0,
        ComponentType::Container => 0.5,
        ComponentType::Unknown => 0.2,
    }
}

/// Specific types agreeing is strong evidence; two containers or two
/// unknowns much less so.
pub fn component_type_score(design: ComponentType, app: ComponentType) -> f64 {
    if design == app {
        return same_type_score(design);
    }
    let compatible = COMPATIBLE_PAIRS
        .iter()
        .any(|&(x, y)| (design == x && app == y) || (design == y && app == x));
    if compatible {
        COMPATIBLE_SCORE
    } else {
        0.0
    }
}

pub fn component_type_evidence(score: f64, design: ComponentType, app: ComponentType) -> MatchEvidence {
    MatchEvidence {
        strategy: MatchStrategy::ComponentType,
        score,
        details: format!("design.type=\"{}\" app.type=\"{}\"", design.as_str(), app.as_str()),
    }
}
