use parity_core::{AppScreen, DesignScreen};
use serde::{Deserialize, Serialize};

use crate::assign::best_unused;
use crate::component_mapper::{map_components, ComponentMapperOptions, StrategyWeights, DEFAULT_MIN_CONFIDENCE};
use crate::model::ScreenMapping;
use crate::strategies::text_similarity;

const NAME_WEIGHT: f64 = 0.6;
const DIMENSION_WEIGHT: f64 = 0.4;
const UNKNOWN_DIMENSION_SIMILARITY: f64 = 0.5;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "snake_case")]
pub struct ScreenMapperOptions {
    pub min_confidence: f64,
    pub component_weights: StrategyWeights,
    pub component_min_confidence: f64,
}

impl Default for ScreenMapperOptions {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            component_weights: StrategyWeights::default(),
            component_min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }
}

/// Mean of the width and height ratios (`min / max` each). A design screen
/// without a usable size is neutral (0.5) whatever the app screen measures.
pub fn dimension_similarity(design: &DesignScreen, app: &AppScreen) -> f64 {
    if design.width <= 0.0 || design.height <= 0.0 {
        return UNKNOWN_DIMENSION_SIMILARITY;
    }
    let ratio = |a: f64, b: f64| {
        let (lo, hi) = (a.min(b), a.max(b));
        if hi <= 0.0 {
            0.0
        } else {
            (lo / hi).max(0.0)
        }
    };
    (ratio(design.width, app.width) + ratio(design.height, app.height)) / 2.0
}

pub fn screen_confidence(design: &DesignScreen, app: &AppScreen) -> f64 {
    let name = text_similarity(Some(design.name.as_str()), Some(app.name.as_str()));
    name * NAME_WEIGHT + dimension_similarity(design, app) * DIMENSION_WEIGHT
}

/// Pairs screens with the same greedy one-to-one policy as components, in
/// design list order, then maps the components of every accepted pair using
/// the app screen's pixel size as the proximity scale. Design screens with no
/// acceptable partner are left out of the result.
pub fn map_screens<'a>(
    design_screens: &'a [DesignScreen],
    app_screens: &'a [AppScreen],
    opts: &ScreenMapperOptions,
) -> Vec<ScreenMapping<'a>> {
    let mut used = vec![false; app_screens.len()];
    let mut out = Vec::new();

    for design in design_screens {
        let pick = best_unused(&used, |i| (screen_confidence(design, &app_screens[i]), ()));
        let Some(pick) = pick.filter(|p| p.score >= opts.min_confidence) else {
            tracing::debug!(screen = %design.name, "no app screen reached the confidence floor");
            continue;
        };
        used[pick.index] = true;
        let app = &app_screens[pick.index];

        let component_opts = ComponentMapperOptions {
            weights: opts.component_weights,
            min_confidence: opts.component_min_confidence,
            screen_width: app.width,
            screen_height: app.height,
        };
        let components = map_components(&design.components, &app.elements, &component_opts);
        tracing::debug!(
            design = %design.name,
            app = %app.name,
            confidence = pick.score,
            mapped = components.mappings.len(),
            "mapped screen"
        );

        out.push(ScreenMapping {
            design,
            app,
            confidence: pick.score,
            component_mappings: components.mappings,
            unmapped_design: components.unmapped_design,
            unmapped_app: components.unmapped_app,
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use parity_core::{AppTraceRef, DesignTraceRef};

    fn design(id: &str, name: &str, w: f64, h: f64) -> DesignScreen {
        DesignScreen {
            trace_ref: DesignTraceRef::new("f", id),
            name: name.to_string(),
            width: w,
            height: h,
            components: vec![],
        }
    }

    fn app(id: &str, name: &str, w: f64, h: f64) -> AppScreen {
        AppScreen {
            trace_ref: AppTraceRef::new("s", id),
            name: name.to_string(),
            width: w,
            height: h,
            elements: vec![],
        }
    }

    #[test]
    fn equal_dimensions_are_fully_similar() {
        assert_eq!(dimension_similarity(&design("1", "a", 375.0, 812.0), &app("x", "a", 375.0, 812.0)), 1.0);
    }

    #[test]
    fn zero_width_design_is_neutral() {
        assert_eq!(dimension_similarity(&design("1", "a", 0.0, 812.0), &app("x", "a", 1080.0, 2340.0)), 0.5);
        assert_eq!(dimension_similarity(&design("1", "a", 375.0, -1.0), &app("x", "a", 1.0, 1.0)), 0.5);
    }

    #[test]
    fn ratio_per_dimension() {
        let s = dimension_similarity(&design("1", "a", 100.0, 200.0), &app("x", "a", 200.0, 200.0));
        assert!((s - 0.75).abs() < 1e-12);
    }

    #[test]
    fn screens_pair_by_name_and_size() {
        let designs = vec![design("1", "Login", 375.0, 812.0), design("2", "Home", 375.0, 812.0)];
        let apps = vec![app("h", "home", 375.0, 812.0), app("l", "login", 375.0, 812.0)];
        let out = map_screens(&designs, &apps, &ScreenMapperOptions::default());
        let pairs: Vec<_> = out.iter().map(|m| (m.design.name.as_str(), m.app.name.as_str())).collect();
        assert_eq!(pairs, vec![("Login", "login"), ("Home", "home")]);
        assert!((out[0].confidence - 1.0).abs() < 1e-12);
    }

    #[test]
    fn screens_below_floor_are_dropped() {
        let designs = vec![design("1", "Login", 375.0, 812.0)];
        let apps = vec![app("x", "zzz", 375.0, 812.0)];
        let opts = ScreenMapperOptions { min_confidence: 0.5, ..Default::default() };
        assert!(map_screens(&designs, &apps, &opts).is_empty());
    }

    #[test]
    fn one_app_screen_serves_one_design_screen() {
        let designs = vec![design("1", "Login", 375.0, 812.0), design("2", "Login", 375.0, 812.0)];
        let apps = vec![app("x", "Login", 375.0, 812.0)];
        let out = map_screens(&designs, &apps, &ScreenMapperOptions::default());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].design.trace_ref.node_id, "1");
    }

    #[test]
    fn proximity_is_scaled_by_the_matched_app_screen() {
        use crate::model::MatchStrategy;
        use parity_core::{AppElement, ComponentType, DesignComponent, Rect};

        let mut component = DesignComponent::new(DesignTraceRef::new("f", "1:2"), ComponentType::Button);
        component.styles.layout = Some(Rect::new(0.0, 0.0, 10.0, 10.0));
        let mut element = AppElement::new(AppTraceRef::new("s", "e1"), ComponentType::Button);
        element.styles.bounds = Rect::new(30.0, 40.0, 10.0, 10.0);

        // Design frame size differs so only the app screen can give a 100x100 scale.
        let mut d = design("1", "Login", 1080.0, 720.0);
        d.components = vec![component];
        let mut a = app("x", "Login", 100.0, 100.0);
        a.elements = vec![element];
        let (designs, apps) = (vec![d], vec![a]);

        let out = map_screens(&designs, &apps, &ScreenMapperOptions::default());
        assert_eq!(out[0].component_mappings.len(), 1);
        let proximity = out[0].component_mappings[0]
            .evidence
            .iter()
            .find(|e| e.strategy == MatchStrategy::PositionalProximity)
            .unwrap();
        // Centers (5,5) and (35,45) are 50px apart.
        let expected = 1.0 - 50.0 / (100.0f64 * 100.0 + 100.0 * 100.0).sqrt();
        assert!((proximity.score - expected).abs() < 1e-9, "score = {}", proximity.score);
    }
}
