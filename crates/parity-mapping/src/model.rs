use parity_core::{AppElement, AppScreen, AppTraceRef, DesignComponent, DesignScreen};
use serde::{Deserialize, Serialize};

/// Scoring strategy that produced a piece of evidence.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum MatchStrategy {
    AccessibilityId,
    TextSimilarity,
    ComponentType,
    PositionalProximity,
}

impl MatchStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStrategy::AccessibilityId => "accessibility-id",
            MatchStrategy::TextSimilarity => "text-similarity",
            MatchStrategy::ComponentType => "component-type",
            MatchStrategy::PositionalProximity => "positional-proximity",
        }
    }
}

/// One strategy's verdict on one design/app pair, with the raw inputs it saw.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MatchEvidence {
    pub strategy: MatchStrategy,
    pub score: f64,
    pub details: String,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ComponentMapping<'a> {
    pub design: &'a DesignComponent,
    pub app: &'a AppElement,
    pub confidence: f64,
    pub evidence: Vec<MatchEvidence>,
}

/// Highest scoring app node for a design node that did not clear the floor.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct RejectedCandidate {
    pub app_ref: AppTraceRef,
    pub confidence: f64,
    pub evidence: Vec<MatchEvidence>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct UnmappedDesign<'a> {
    pub design: &'a DesignComponent,
    pub reason: Option<String>,
    pub best_candidate: Option<RejectedCandidate>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct UnmappedApp<'a> {
    pub app: &'a AppElement,
    pub reason: Option<String>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ScreenMapping<'a> {
    pub design: &'a DesignScreen,
    pub app: &'a AppScreen,
    pub confidence: f64,
    pub component_mappings: Vec<ComponentMapping<'a>>,
    pub unmapped_design: Vec<UnmappedDesign<'a>>,
    pub unmapped_app: Vec<UnmappedApp<'a>>,
}
