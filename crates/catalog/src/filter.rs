use crate::types::{Category, MenuItem};

/// Category and price predicates applied before fit scoring
///
/// Each predicate is usable on its own; [`CatalogFilter::matches`] is their conjunction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    pub category: Option<Category>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
}

impl CatalogFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: restrict to one category
    #[must_use]
    pub fn category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    /// Builder: inclusive price bounds
    #[must_use]
    pub const fn price_range(mut self, min_price: Option<i64>, max_price: Option<i64>) -> Self {
        self.min_price = min_price;
        self.max_price = max_price;
        self
    }

    #[must_use]
    pub fn category_matches(&self, item: &MenuItem) -> bool {
        self.category
            .as_ref()
            .map_or(true, |category| &item.category == category)
    }

    #[must_use]
    pub fn price_matches(&self, item: &MenuItem) -> bool {
        self.min_price.map_or(true, |min| item.price >= min)
            && self.max_price.map_or(true, |max| item.price <= max)
    }

    #[must_use]
    pub fn matches(&self, item: &MenuItem) -> bool {
        self.category_matches(item) && self.price_matches(item)
    }

    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.category.is_none() && self.min_price.is_none() && self.max_price.is_none()
    }
}
