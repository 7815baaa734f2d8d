//! Preference prediction capability.
//!
//! No trained model ships with the engine: [`ConstantPreference`] predicts
//! the same value for every item, and the ranker only depends on the trait.

use crate::container::ContainerSpec;
use menufit_catalog::{Category, MenuItem};
use serde::Serialize;

/// Prediction returned by the untrained default model
pub const DEFAULT_PREFERENCE: f64 = 5.0;

/// Inputs handed to a preference model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreferenceFeatures {
    pub container_width: f64,
    pub container_length: f64,
    pub container_height: f64,
    pub price: f64,
    pub popularity_score: f64,
    /// One-hot over [`Category::KNOWN`]
    pub category_one_hot: [f64; 5],
}

impl PreferenceFeatures {
    #[must_use]
    pub fn new(container: &ContainerSpec, item: &MenuItem) -> Self {
        let mut category_one_hot = [0.0; 5];
        if let Some(idx) = item.category.known_index() {
            category_one_hot[idx] = 1.0;
        }
        Self {
            container_width: container.width,
            container_length: container.length,
            container_height: container.height,
            price: item.price as f64,
            popularity_score: item.popularity_score,
            category_one_hot,
        }
    }

    /// Flat feature vector (10 values)
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        let mut values = vec![
            self.container_width,
            self.container_length,
            self.container_height,
            self.price,
            self.popularity_score,
        ];
        values.extend_from_slice(&self.category_one_hot);
        values
    }

    #[must_use]
    pub fn category(&self) -> Option<Category> {
        self.category_one_hot
            .iter()
            .position(|v| *v > 0.0)
            .map(|idx| Category::KNOWN[idx].clone())
    }
}

/// Predicts a user's preference for an item on a 0-10 scale
pub trait PreferenceModel: Send + Sync {
    fn predict(&self, features: &PreferenceFeatures) -> f64;

    fn name(&self) -> &str {
        "custom"
    }
}

/// Untrained stand-in returning a fixed prediction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantPreference {
    value: f64,
}

impl ConstantPreference {
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self { value }
    }
}

impl Default for ConstantPreference {
    fn default() -> Self {
        Self::new(DEFAULT_PREFERENCE)
    }
}

impl PreferenceModel for ConstantPreference {
    fn predict(&self, _features: &PreferenceFeatures) -> f64 {
        self.value
    }

    fn name(&self) -> &str {
        "constant"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menufit_catalog::MenuSize;

    fn item(category: Category) -> MenuItem {
        MenuItem {
            menu_id: "1".into(),
            restaurant_id: "1".into(),
            name: "dish".into(),
            category_label: category.label().to_string(),
            category,
            price: 12000,
            size: MenuSize::new(10.0, 10.0, 5.0),
            popularity_score: 7.0,
        }
    }

    #[test]
    fn features_encode_category_one_hot() {
        let container = ContainerSpec::new(30.0, 25.0, 10.0);
        let features = PreferenceFeatures::new(&container, &item(Category::Japanese));
        assert_eq!(
            features.to_vec(),
            vec![30.0, 25.0, 10.0, 12000.0, 7.0, 0.0, 0.0, 1.0, 0.0, 0.0]
        );
        assert_eq!(features.category(), Some(Category::Japanese));

        let unlisted = PreferenceFeatures::new(&container, &item(Category::Unlisted("x".into())));
        assert_eq!(unlisted.category_one_hot, [0.0; 5]);
        assert_eq!(unlisted.category(), None);
    }

    #[test]
    fn default_model_always_predicts_five() {
        let model = ConstantPreference::default();
        let container = ContainerSpec::new(1.0, 1.0, 1.0);
        for category in Category::KNOWN {
            let features = PreferenceFeatures::new(&container, &item(category));
            assert_eq!(model.predict(&features), DEFAULT_PREFERENCE);
        }
        assert_eq!(model.name(), "constant");
    }
}
