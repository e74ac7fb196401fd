use crate::model::{MatchEvidence, MatchStrategy};

pub fn normalize_text(text: Option<&str>) -> String {
    text.map(|t| t.trim().to_lowercase()).unwrap_or_default()
}

/// Heuristic text similarity in `[0, 1]`.
///
/// Both empty or equal (after trim + lowercase) is 1, exactly one empty is
/// 0, containment is 0.8. Otherwise the score is the number of characters of
/// the shorter string that occur anywhere in the longer one, divided by the
/// longer length. That last step ignores order and repetition, so it is a
/// cheap overlap signal and not a string distance.
pub fn text_similarity(a: Option<&str>, b: Option<&str>) -> f64 {
    let na = normalize_text(a);
    let nb = normalize_text(b);
    if na.is_empty() && nb.is_empty() {
        return 1.0;
    }
    if na.is_empty() || nb.is_empty() {
        return 0.0;
    }
    if na == nb {
        return 1.0;
    }
    if na.contains(nb.as_str()) || nb.contains(na.as_str()) {
        return 0.8;
    }

    let (len_a, len_b) = (na.chars().count(), nb.chars().count());
    let (longer, shorter, longer_len) = if len_a > len_b { (&na, &nb, len_a) } else { (&nb, &na, len_b) };
    let matches = shorter.chars().filter(|c| longer.contains(*c)).count();
    matches as f64 / longer_len as f64
}

pub fn text_evidence(score: f64, design_text: Option<&str>, app_text: Option<&str>) -> MatchEvidence {
    MatchEvidence {
        strategy: MatchStrategy::TextSimilarity,
        score,
        details: format!(
            "design=\"{}\" app=\"{}\"",
            design_text.unwrap_or(""),
            app_text.unwrap_or("")
        ),
    }
}
