pub const PERFECT_FIT: &str = "perfect fit";
pub const ADEQUATE_FIT: &str = "adequate fit";
pub const MATCHES_TASTE: &str = "matches taste";
pub const TRENDING_NOW: &str = "trending now";
pub const SIMILAR_POPULAR: &str = "similar items popular";
pub const BALANCED: &str = "balanced recommendation";
pub const SEPARATOR: &str = " • ";

/// Human-readable rationale for a recommendation
///
/// Clauses always appear in the same order: fit, taste, time of day, similar items.
#[must_use]
pub fn explain(fit: f64, preference: f64, content: f64, contextual_multiplier: f64) -> String {
    let mut clauses: Vec<&str> = Vec::with_capacity(4);

    if fit > 80.0 {
        clauses.push(PERFECT_FIT);
    } else if fit > 60.0 {
        clauses.push(ADEQUATE_FIT);
    }
    if preference > 40.0 {
        clauses.push(MATCHES_TASTE);
    }
    if contextual_multiplier > 1.1 {
        clauses.push(TRENDING_NOW);
    }
    if content > 5.0 {
        clauses.push(SIMILAR_POPULAR);
    }

    if clauses.is_empty() {
        BALANCED.to_string()
    } else {
        clauses.join(SEPARATOR)
    }
}
