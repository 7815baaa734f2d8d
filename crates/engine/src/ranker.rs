//! Score combination and diversity-aware ordering.
//!
//! The diversity bonus is assigned while items are scanned in catalog order,
//! before the global sort, against the items accepted up to that point.

use crate::response::Recommendation;
use menufit_catalog::Category;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Popularity enters the blend on a doubled scale
pub const POPULARITY_SCALE: f64 = 2.0;
/// Bonus for a category not yet seen among accepted items
pub const NEW_CATEGORY_BONUS: f64 = 5.0;
/// Repeated categories earn `max(0, REPEAT_BONUS_BASE - count)`
pub const REPEAT_BONUS_BASE: f64 = 3.0;

/// Blend weights for the sub-scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingWeights {
    pub fit: f64,
    pub preference: f64,
    pub content: f64,
    pub popularity: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            fit: 0.4,
            preference: 0.25,
            content: 0.15,
            popularity: 0.2,
        }
    }
}

impl RankingWeights {
    /// Weighted blend before the contextual multiplier and diversity bonus
    #[must_use]
    pub fn blend(&self, fit: f64, preference: f64, content: f64, popularity: f64) -> f64 {
        fit * self.fit
            + preference * self.preference
            + content * self.content
            + popularity * POPULARITY_SCALE * self.popularity
    }

    /// `blend * contextual_multiplier + diversity_bonus`
    #[must_use]
    pub fn final_score(
        &self,
        fit: f64,
        preference: f64,
        content: f64,
        popularity: f64,
        contextual_multiplier: f64,
        diversity_bonus: f64,
    ) -> f64 {
        self.blend(fit, preference, content, popularity) * contextual_multiplier + diversity_bonus
    }
}

/// Category counts of the items accepted so far in the scan
#[derive(Debug, Clone, Default)]
pub struct DiversityTracker {
    counts: HashMap<Category, usize>,
    accepted: usize,
}

impl DiversityTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bonus for the next item: nothing before the first acceptance, then
    /// a flat bonus for unseen categories and a shrinking one for repeats
    #[must_use]
    pub fn bonus(&self, category: &Category) -> f64 {
        if self.accepted == 0 {
            return 0.0;
        }
        match self.counts.get(category) {
            None => NEW_CATEGORY_BONUS,
            Some(&count) => (REPEAT_BONUS_BASE - count as f64).max(0.0),
        }
    }

    pub fn accept(&mut self, category: &Category) {
        *self.counts.entry(category.clone()).or_insert(0) += 1;
        self.accepted += 1;
    }

    #[must_use]
    pub const fn accepted(&self) -> usize {
        self.accepted
    }
}

/// Stable sort by final score (descending) and keep the first `limit`
pub fn rank(recommendations: &mut Vec<Recommendation>, limit: usize) {
    recommendations.sort_by(|a, b| b.scores.final_score.total_cmp(&a.scores.final_score));
    recommendations.truncate(limit);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::ScoreBundle;
    use menufit_catalog::MenuSize;

    fn scored(menu_id: &str, final_score: f64) -> Recommendation {
        Recommendation {
            menu_id: menu_id.into(),
            restaurant_id: "r1".into(),
            restaurant_name: "Hanok".into(),
            menu_name: format!("dish {menu_id}"),
            category: "Korean".into(),
            price: 9000,
            size: MenuSize::new(10.0, 10.0, 5.0),
            scores: ScoreBundle::rounded(80.0, 50.0, 6.0, final_score),
            volume_utilization: 50.0,
            explanation: String::new(),
            contextual_boost: 0.0,
            place_id: None,
        }
    }

    fn ids(recommendations: &[Recommendation]) -> Vec<&str> {
        recommendations.iter().map(|r| r.menu_id.as_str()).collect()
    }

    #[test]
    fn ties_keep_scan_order_across_the_cut() {
        let mut recommendations = vec![
            scored("a", 40.0),
            scored("b", 61.2),
            scored("c", 55.0),
            scored("d", 55.0),
            scored("e", 61.2),
            scored("f", 55.0),
            scored("g", 55.0),
        ];
        rank(&mut recommendations, 4);
        assert_eq!(ids(&recommendations), vec!["b", "e", "c", "d"]);
    }

    #[test]
    fn scores_equal_after_rounding_tie() {
        // 61.24 and 61.16 both display as 61.2
        let mut recommendations = vec![scored("x", 61.16), scored("y", 61.24), scored("z", 70.0)];
        rank(&mut recommendations, 5);
        assert_eq!(ids(&recommendations), vec!["z", "x", "y"]);
    }

    #[test]
    fn blend_uses_configured_weights() {
        let weights = RankingWeights::default();
        // 90*0.4 + 50*0.25 + 10*0.15 + 5*2*0.2
        assert!((weights.blend(90.0, 50.0, 10.0, 5.0) - 52.0).abs() < 1e-9);
        let score = weights.final_score(90.0, 50.0, 10.0, 5.0, 1.2, 5.0);
        assert!((score - (52.0 * 1.2 + 5.0)).abs() < 1e-9);
    }

    #[test]
    fn first_item_gets_no_bonus() {
        let tracker = DiversityTracker::new();
        assert_eq!(tracker.bonus(&Category::Korean), 0.0);
    }

    #[test]
    fn bonus_tracks_scan_order() {
        let mut tracker = DiversityTracker::new();
        tracker.accept(&Category::Korean);
        assert_eq!(tracker.bonus(&Category::Chinese), NEW_CATEGORY_BONUS);
        assert_eq!(tracker.bonus(&Category::Korean), 2.0);
        tracker.accept(&Category::Korean);
        assert_eq!(tracker.bonus(&Category::Korean), 1.0);
        tracker.accept(&Category::Korean);
        tracker.accept(&Category::Korean);
        assert_eq!(tracker.bonus(&Category::Korean), 0.0);
        assert_eq!(tracker.accepted(), 4);
    }
}
