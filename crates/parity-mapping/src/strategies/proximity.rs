use parity_core::{AppElement, DesignComponent};

use crate::model::{MatchEvidence, MatchStrategy};

/// Center of the design layout; a node without layout sits at the origin.
pub fn design_center(design: &DesignComponent) -> (f64, f64) {
    design.styles.layout.map(|l| l.center()).unwrap_or((0.0, 0.0))
}

pub fn app_center(app: &AppElement) -> (f64, f64) {
    app.styles.bounds.center()
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

/// `max(0, 1 - d / diagonal)` where `d` is the distance between the two
/// centers and `diagonal` is the target screen's diagonal. A screen with a
/// non-positive width or height scores 0.
pub fn proximity_score(design_center: (f64, f64), app_center: (f64, f64), screen_width: f64, screen_height: f64) -> f64 {
    if screen_width <= 0.0 || screen_height <= 0.0 {
        return 0.0;
    }
    let diagonal = (screen_width.powi(2) + screen_height.powi(2)).sqrt();
    let normalized = distance(design_center, app_center) / diagonal;
    if normalized.is_nan() {
        return 0.0;
    }
    (1.0 - normalized).clamp(0.0, 1.0)
}

pub fn proximity_evidence(score: f64, design_center: (f64, f64), app_center: (f64, f64)) -> MatchEvidence {
    MatchEvidence {
        strategy: MatchStrategy::PositionalProximity,
        score,
        details: format!(
            "designCenter=({},{}) appCenter=({},{}) distance={:.1}",
            design_center.0,
            design_center.1,
            app_center.0,
            app_center.1,
            distance(design_center, app_center)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearby_centers_on_landscape_screen() {
        let score = proximity_score((100.0, 100.0), (110.0, 105.0), 1080.0, 720.0);
        assert!((score - 0.991385).abs() < 1e-4, "score = {score}");
    }

    #[test]
    fn identical_centers_score_one() {
        assert_eq!(proximity_score((5.0, 5.0), (5.0, 5.0), 100.0, 100.0), 1.0);
    }

    #[test]
    fn far_apart_clamps_to_zero() {
        assert_eq!(proximity_score((0.0, 0.0), (5000.0, 5000.0), 100.0, 100.0), 0.0);
    }

    #[test]
    fn degenerate_screen_scores_zero() {
        assert_eq!(proximity_score((0.0, 0.0), (0.0, 0.0), 0.0, 720.0), 0.0);
        assert_eq!(proximity_score((0.0, 0.0), (0.0, 0.0), 1080.0, 0.0), 0.0);
    }

    #[test]
    fn evidence_reports_centers_and_distance() {
        let ev = proximity_evidence(0.99, (100.0, 100.0), (110.0, 105.0));
        assert_eq!(ev.details, "designCenter=(100,100) appCenter=(110,105) distance=11.2");
    }
}
