use chrono::{Datelike, NaiveDateTime, Timelike};
use menufit_catalog::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Multiplier applied to categories without an entry
pub const NEUTRAL_MULTIPLIER: f64 = 1.0;

/// Time bucket selecting a contextual weight table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlot {
    Morning,
    Lunch,
    Dinner,
    Weekend,
}

impl TimeSlot {
    /// Weekend wins over the hour; otherwise [6,11) morning, [11,15) lunch, else dinner
    #[must_use]
    pub fn at(timestamp: &NaiveDateTime) -> Self {
        if timestamp.weekday().num_days_from_monday() >= 5 {
            return Self::Weekend;
        }
        match timestamp.hour() {
            6..=10 => Self::Morning,
            11..=14 => Self::Lunch,
            _ => Self::Dinner,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Weekend => "weekend",
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category → multiplier table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryWeights(BTreeMap<Category, f64>);

impl CategoryWeights {
    /// Build from multipliers in [`Category::KNOWN`] order
    #[must_use]
    pub fn from_known(multipliers: [f64; 5]) -> Self {
        Self(Category::KNOWN.into_iter().zip(multipliers).collect())
    }

    /// Multiplier for `category`, neutral when the table has no entry
    #[must_use]
    pub fn multiplier(&self, category: &Category) -> f64 {
        self.0.get(category).copied().unwrap_or(NEUTRAL_MULTIPLIER)
    }
}

/// The four contextual tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextualTables {
    pub morning: CategoryWeights,
    pub lunch: CategoryWeights,
    pub dinner: CategoryWeights,
    pub weekend: CategoryWeights,
}

impl Default for ContextualTables {
    fn default() -> Self {
        // Korean, Chinese, Japanese, Western, Other
        Self {
            morning: CategoryWeights::from_known([1.2, 0.9, 1.0, 0.8, 0.7]),
            lunch: CategoryWeights::from_known([1.1, 1.2, 1.1, 1.0, 0.9]),
            dinner: CategoryWeights::from_known([1.0, 1.0, 1.2, 1.1, 0.8]),
            weekend: CategoryWeights::from_known([0.9, 1.1, 1.0, 1.2, 1.0]),
        }
    }
}

impl ContextualTables {
    #[must_use]
    pub const fn table(&self, slot: TimeSlot) -> &CategoryWeights {
        match slot {
            TimeSlot::Morning => &self.morning,
            TimeSlot::Lunch => &self.lunch,
            TimeSlot::Dinner => &self.dinner,
            TimeSlot::Weekend => &self.weekend,
        }
    }
}

/// Maps a timestamp to the category multipliers in effect
#[derive(Debug, Clone, Default)]
pub struct ContextualWeighter {
    tables: ContextualTables,
}

impl ContextualWeighter {
    #[must_use]
    pub const fn new(tables: ContextualTables) -> Self {
        Self { tables }
    }

    #[must_use]
    pub fn weights_for(&self, timestamp: &NaiveDateTime) -> (TimeSlot, &CategoryWeights) {
        let slot = TimeSlot::at(timestamp);
        (slot, self.tables.table(slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn weekend_overrides_hour() {
        // 2024-06-01 is a Saturday, 2024-06-02 a Sunday
        for hour in [0, 7, 12, 20] {
            assert_eq!(TimeSlot::at(&at(2024, 6, 1, hour)), TimeSlot::Weekend);
        }
        assert_eq!(TimeSlot::at(&at(2024, 6, 2, 9)), TimeSlot::Weekend);
    }

    #[test]
    fn weekday_hours_bucket() {
        // 2024-06-04 is a Tuesday
        assert_eq!(TimeSlot::at(&at(2024, 6, 4, 9)), TimeSlot::Morning);
        assert_eq!(TimeSlot::at(&at(2024, 6, 4, 13)), TimeSlot::Lunch);
        assert_eq!(TimeSlot::at(&at(2024, 6, 4, 20)), TimeSlot::Dinner);
        assert_eq!(TimeSlot::at(&at(2024, 6, 4, 6)), TimeSlot::Morning);
        assert_eq!(TimeSlot::at(&at(2024, 6, 4, 11)), TimeSlot::Lunch);
        assert_eq!(TimeSlot::at(&at(2024, 6, 4, 15)), TimeSlot::Dinner);
        assert_eq!(TimeSlot::at(&at(2024, 6, 4, 5)), TimeSlot::Dinner);
    }

    #[test]
    fn weighter_returns_matching_table() {
        let weighter = ContextualWeighter::default();
        let (slot, weights) = weighter.weights_for(&at(2024, 6, 1, 9));
        assert_eq!(slot, TimeSlot::Weekend);
        assert_eq!(weights.multiplier(&Category::Western), 1.2);

        let (slot, weights) = weighter.weights_for(&at(2024, 6, 4, 9));
        assert_eq!(slot, TimeSlot::Morning);
        assert_eq!(weights.multiplier(&Category::Korean), 1.2);
        assert_eq!(weights.multiplier(&Category::Other), 0.7);
    }

    #[test]
    fn unlisted_category_is_neutral() {
        let tables = ContextualTables::default();
        let weight = tables
            .table(TimeSlot::Lunch)
            .multiplier(&Category::Unlisted("Fusion".into()));
        assert_eq!(weight, NEUTRAL_MULTIPLIER);
    }
}
