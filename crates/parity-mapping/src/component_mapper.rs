//! Greedy one-to-one mapping of design components to app elements.
//!
//! Both trees are flattened in pre-order. Each design node, in that order,
//! takes the highest scoring app node that is still free, provided the score
//! reaches the confidence floor. The assignment is not globally optimal:
//! results depend on traversal order and ties go to the first app node
//! scanned.

use parity_core::{preorder, AppElement, DesignComponent};
use serde::{Deserialize, Serialize};

use crate::assign::best_unused;
use crate::model::{ComponentMapping, MatchEvidence, RejectedCandidate, UnmappedApp, UnmappedDesign};
use crate::strategies::*;

pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.2;
pub const DEFAULT_SCREEN_WIDTH: f64 = 1080.0;
pub const DEFAULT_SCREEN_HEIGHT: f64 = 720.0;

/// Weight of each strategy in the composite score. Not required to sum to 1.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "snake_case")]
pub struct StrategyWeights {
    pub accessibility_id: f64,
    pub text_similarity: f64,
    pub component_type: f64,
    pub positional_proximity: f64,
}

impl Default for StrategyWeights {
    fn default() -> Self {
        Self {
            accessibility_id: 0.40,
            text_similarity: 0.25,
            component_type: 0.15,
            positional_proximity: 0.20,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComponentMapperOptions {
    pub weights: StrategyWeights,
    pub min_confidence: f64,
    /// Scale for positional proximity: the target screen's pixel size.
    pub screen_width: f64,
    pub screen_height: f64,
}

impl Default for ComponentMapperOptions {
    fn default() -> Self {
        Self {
            weights: StrategyWeights::default(),
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct ComponentMapperResult<'a> {
    pub mappings: Vec<ComponentMapping<'a>>,
    pub unmapped_design: Vec<UnmappedDesign<'a>>,
    pub unmapped_app: Vec<UnmappedApp<'a>>,
}

/// Weighted composite of the four strategies, with the evidence of every one.
pub fn score_pair(design: &DesignComponent, app: &AppElement, opts: &ComponentMapperOptions) -> (f64, Vec<MatchEvidence>) {
    let w = &opts.weights;

    let id_score = identifier_score(&design.trace_ref, &app.trace_ref);
    let text_score = text_similarity(design.text.as_deref(), app.text.as_deref());
    let type_score = component_type_score(design.component_type, app.component_type);
    let (dc, ac) = (design_center(design), app_center(app));
    let pos_score = proximity_score(dc, ac, opts.screen_width, opts.screen_height);

    let confidence = id_score * w.accessibility_id
        + text_score * w.text_similarity
        + type_score * w.component_type
        + pos_score * w.positional_proximity;

    let evidence = vec![
        identifier_evidence(id_score, &design.trace_ref, &app.trace_ref),
        text_evidence(text_score, design.text.as_deref(), app.text.as_deref()),
        component_type_evidence(type_score, design.component_type, app.component_type),
        proximity_evidence(pos_score, dc, ac),
    ];
    (confidence, evidence)
}

pub fn map_components<'a>(
    design_roots: &'a [DesignComponent],
    app_roots: &'a [AppElement],
    opts: &ComponentMapperOptions,
) -> ComponentMapperResult<'a> {
    let design_list: Vec<&DesignComponent> = preorder(design_roots).collect();
    let app_list: Vec<&AppElement> = preorder(app_roots).collect();

    let mut used = vec![false; app_list.len()];
    let mut result = ComponentMapperResult::default();

    for design in design_list {
        let pick = best_unused(&used, |i| score_pair(design, app_list[i], opts));
        match pick {
            Some(p) if p.score >= opts.min_confidence => {
                used[p.index] = true;
                let app = app_list[p.index];
                tracing::debug!(
                    design = %design.trace_ref.node_id,
                    app = %app.trace_ref.element_id,
                    confidence = p.score,
                    "mapped component"
                );
                result.mappings.push(ComponentMapping {
                    design,
                    app,
                    confidence: p.score,
                    evidence: p.payload,
                });
            }
            Some(p) => {
                tracing::debug!(
                    design = %design.trace_ref.node_id,
                    best = p.score,
                    floor = opts.min_confidence,
                    "component below confidence floor"
                );
                result.unmapped_design.push(UnmappedDesign {
                    design,
                    reason: Some(format!(
                        "best candidate confidence {:.3} below minimum {:.3}",
                        p.score, opts.min_confidence
                    )),
                    best_candidate: Some(RejectedCandidate {
                        app_ref: app_list[p.index].trace_ref.clone(),
                        confidence: p.score,
                        evidence: p.payload,
                    }),
                });
            }
            None => {
                result.unmapped_design.push(UnmappedDesign {
                    design,
                    reason: Some("no unmapped app elements left".to_string()),
                    best_candidate: None,
                });
            }
        }
    }

    result.unmapped_app = app_list
        .into_iter()
        .zip(used)
        .filter(|(_, u)| !u)
        .map(|(app, _)| UnmappedApp {
            app,
            reason: Some("not selected by any design component".to_string()),
        })
        .collect();

    result
}
