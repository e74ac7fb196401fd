/// Best-scoring candidate among those not yet used.
pub(crate) struct Pick<P> {
    pub index: usize,
    pub score: f64,
    pub payload: P,
}

/// Scans candidates in order and keeps the first maximum: a later candidate
/// replaces the current best only with a strictly higher score. The floor is
/// applied by the caller so a rejected best can still be reported.
pub(crate) fn best_unused<P>(used: &[bool], mut score: impl FnMut(usize) -> (f64, P)) -> Option<Pick<P>> {
    let mut best: Option<Pick<P>> = None;
    for (index, _) in used.iter().enumerate().filter(|(_, u)| !**u) {
        let (s, payload) = score(index);
        if best.as_ref().map_or(true, |b| s > b.score) {
            best = Some(Pick { index, score: s, payload });
        }
    }
    best
}
