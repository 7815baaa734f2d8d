use crate::types::{Category, MenuItem, MenuSize, Restaurant};
use serde::{Deserialize, Serialize};

pub const DEFAULT_POPULARITY: f64 = 5.0;
pub const DEFAULT_WIDTH: f64 = 15.0;
pub const DEFAULT_LENGTH: f64 = 15.0;
pub const DEFAULT_HEIGHT: f64 = 8.0;

/// Identifier as it appears in source data (number or string)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl RawId {
    /// Normalized string form; empty text yields `None`
    #[must_use]
    pub fn normalize(&self) -> Option<String> {
        match self {
            Self::Integer(value) => Some(value.to_string()),
            Self::Float(value) if !value.is_finite() => None,
            Self::Float(value) if value.fract() == 0.0 => Some(format!("{value:.0}")),
            Self::Float(value) => Some(value.to_string()),
            Self::Text(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
        }
    }
}

/// Numeric field as it appears in source data
///
/// Coercion is lenient: numeric strings parse, anything else counts as missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    #[must_use]
    pub fn coerce(&self) -> Option<f64> {
        let value = match self {
            Self::Number(value) => *value,
            Self::Text(text) => text.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

/// Menu row before normalization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMenuRecord {
    #[serde(default)]
    pub menu_id: Option<RawId>,
    #[serde(default)]
    pub restaurant_id: Option<RawId>,
    #[serde(default)]
    pub menu_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price: Option<RawNumber>,
    #[serde(default)]
    pub width: Option<RawNumber>,
    #[serde(default)]
    pub length: Option<RawNumber>,
    #[serde(default)]
    pub height: Option<RawNumber>,
    #[serde(default)]
    pub popularity_score: Option<RawNumber>,
}

/// Restaurant row before normalization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRestaurantRecord {
    #[serde(default)]
    pub restaurant_id: Option<RawId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub place_id: Option<RawId>,
}

impl RawMenuRecord {
    fn price(&self) -> Option<f64> {
        self.price
            .as_ref()
            .and_then(RawNumber::coerce)
            .filter(|price| *price >= 0.0)
    }

    /// Normalize into a [`MenuItem`], imputing missing numeric fields
    ///
    /// Returns `None` when the record has no menu id.
    #[must_use]
    pub fn normalize(&self, median_price: f64) -> Option<MenuItem> {
        let menu_id = self.menu_id.as_ref().and_then(RawId::normalize)?;
        let dimension = |field: &Option<RawNumber>, default: f64| {
            field
                .as_ref()
                .and_then(RawNumber::coerce)
                .filter(|value| *value > 0.0)
                .unwrap_or(default)
        };

        Some(MenuItem {
            menu_id,
            restaurant_id: self
                .restaurant_id
                .as_ref()
                .and_then(RawId::normalize)
                .unwrap_or_default(),
            name: self.menu_name.clone().unwrap_or_default(),
            category: Category::parse(self.category.as_deref().unwrap_or_default()),
            category_label: self.category.as_deref().unwrap_or_default().trim().to_string(),
            price: self.price().unwrap_or(median_price).trunc() as i64,
            size: MenuSize::new(
                dimension(&self.width, DEFAULT_WIDTH),
                dimension(&self.length, DEFAULT_LENGTH),
                dimension(&self.height, DEFAULT_HEIGHT),
            ),
            popularity_score: self
                .popularity_score
                .as_ref()
                .and_then(RawNumber::coerce)
                .unwrap_or(DEFAULT_POPULARITY),
        })
    }
}

impl RawRestaurantRecord {
    #[must_use]
    pub fn normalize(&self) -> Option<Restaurant> {
        let restaurant_id = self.restaurant_id.as_ref().and_then(RawId::normalize)?;
        Some(Restaurant {
            restaurant_id,
            name: self.name.clone().unwrap_or_default(),
            place_id: self.place_id.as_ref().and_then(RawId::normalize),
        })
    }
}

/// Median of the prices present in the records (0 when none are present)
#[must_use]
pub fn median_price(records: &[RawMenuRecord]) -> f64 {
    let mut prices: Vec<f64> = records.iter().filter_map(RawMenuRecord::price).collect();
    if prices.is_empty() {
        return 0.0;
    }
    prices.sort_by(f64::total_cmp);
    let mid = prices.len() / 2;
    if prices.len() % 2 == 0 {
        (prices[mid - 1] + prices[mid]) / 2.0
    } else {
        prices[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(json: &str) -> RawMenuRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn imputes_missing_numeric_fields() {
        let raw = record(r#"{"menu_id": 7, "restaurant_id": 2, "menu_name": "Ramen", "category": "일식"}"#);
        let item = raw.normalize(12000.0).unwrap();
        assert_eq!(item.menu_id, "7");
        assert_eq!(item.restaurant_id, "2");
        assert_eq!(item.category, Category::Japanese);
        assert_eq!(item.category_label, "일식");
        assert_eq!(item.price, 12000);
        assert_eq!(item.size, MenuSize::new(15.0, 15.0, 8.0));
        assert_eq!(item.popularity_score, 5.0);
    }

    #[test]
    fn coerces_numeric_strings_and_drops_garbage() {
        let raw = record(
            r#"{"menu_id": "a1", "price": "8500", "width": "12.5", "length": "n/a", "height": -1, "popularity_score": "7.5"}"#,
        );
        let item = raw.normalize(0.0).unwrap();
        assert_eq!(item.price, 8500);
        assert_eq!(item.size, MenuSize::new(12.5, 15.0, 8.0));
        assert_eq!(item.popularity_score, 7.5);
    }

    #[test]
    fn record_without_id_is_rejected() {
        let raw = record(r#"{"menu_name": "Orphan"}"#);
        assert!(raw.normalize(0.0).is_none());
    }

    #[test]
    fn median_uses_present_prices_only() {
        let records = vec![
            record(r#"{"menu_id": 1, "price": 1000}"#),
            record(r#"{"menu_id": 2, "price": 3000}"#),
            record(r#"{"menu_id": 3}"#),
            record(r#"{"menu_id": 4, "price": 2000}"#),
            record(r#"{"menu_id": 5, "price": 6000}"#),
        ];
        assert_eq!(median_price(&records), 2500.0);
        assert_eq!(median_price(&[]), 0.0);
    }

    #[test]
    fn float_ids_render_without_fraction() {
        assert_eq!(RawId::Float(12.0).normalize().as_deref(), Some("12"));
        assert_eq!(RawId::Text("  ".into()).normalize(), None);
    }
}
