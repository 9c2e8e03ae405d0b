use std::cmp::Ordering;

use crate::model::MatchResult;

/// Order results best first: higher match ratio, then more matched
/// ingredients. Recipes without ingredients are dropped. Exact ties keep
/// their input order.
pub fn rank(results: Vec<MatchResult<'_>>) -> Vec<MatchResult<'_>> {
    let mut ranked: Vec<MatchResult<'_>> = results
        .into_iter()
        .filter(|result| result.total_ingredient_count > 0)
        .collect();
    // Vec::sort_by is stable
    ranked.sort_by(compare);
    ranked
}

/// Ratios are compared by cross-multiplication so 1/2 and 2/4 tie exactly
pub fn compare(a: &MatchResult<'_>, b: &MatchResult<'_>) -> Ordering {
    let a_weighted = a.matched_count() * b.total_ingredient_count;
    let b_weighted = b.matched_count() * a.total_ingredient_count;
    b_weighted
        .cmp(&a_weighted)
        .then_with(|| b.matched_count().cmp(&a.matched_count()))
}
