use crate::filter::CatalogFilter;
use crate::raw::{median_price, RawMenuRecord, RawRestaurantRecord};
use crate::types::{Category, MenuItem, Restaurant};
use std::collections::HashMap;

/// Read-only menu and restaurant store
///
/// Menu order is the load order and is preserved by every query.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<MenuItem>,
    restaurants: Vec<Restaurant>,
    restaurant_index: HashMap<String, usize>,
    menu_index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from normalized records
    ///
    /// Duplicate ids resolve to the first record carrying them.
    pub fn new(items: Vec<MenuItem>, restaurants: Vec<Restaurant>) -> Self {
        let mut restaurant_index = HashMap::with_capacity(restaurants.len());
        for (idx, restaurant) in restaurants.iter().enumerate() {
            restaurant_index
                .entry(restaurant.restaurant_id.clone())
                .or_insert(idx);
        }

        let mut menu_index = HashMap::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            menu_index.entry(item.menu_id.clone()).or_insert(idx);
        }

        Self {
            items,
            restaurants,
            restaurant_index,
            menu_index,
        }
    }

    /// Normalize raw rows and build a catalog
    ///
    /// Rows without an id are skipped; missing numeric fields are imputed.
    pub fn from_raw(menus: &[RawMenuRecord], restaurants: &[RawRestaurantRecord]) -> Self {
        let median = median_price(menus);

        let mut items = Vec::with_capacity(menus.len());
        for (idx, raw) in menus.iter().enumerate() {
            match raw.normalize(median) {
                Some(item) => items.push(item),
                None => log::warn!("Skipping menu row {idx}: missing menu_id"),
            }
        }

        let mut normalized = Vec::with_capacity(restaurants.len());
        for (idx, raw) in restaurants.iter().enumerate() {
            match raw.normalize() {
                Some(restaurant) => normalized.push(restaurant),
                None => log::warn!("Skipping restaurant row {idx}: missing restaurant_id"),
            }
        }

        log::debug!(
            "Normalized catalog: {} menus, {} restaurants (median price {median})",
            items.len(),
            normalized.len()
        );

        Self::new(items, normalized)
    }

    /// Menu items matching `filter`, in load order
    pub fn filter(&self, filter: &CatalogFilter) -> Vec<&MenuItem> {
        self.filter_indexed(filter)
            .into_iter()
            .map(|(_, item)| item)
            .collect()
    }

    /// Like [`Catalog::filter`], paired with each item's catalog position
    pub fn filter_indexed(&self, filter: &CatalogFilter) -> Vec<(usize, &MenuItem)> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| filter.matches(item))
            .collect()
    }

    pub fn restaurant_by_id(&self, restaurant_id: &str) -> Option<&Restaurant> {
        self.restaurant_index
            .get(restaurant_id)
            .and_then(|&idx| self.restaurants.get(idx))
    }

    pub fn index_of(&self, menu_id: &str) -> Option<usize> {
        self.menu_index.get(menu_id).copied()
    }

    pub fn get(&self, idx: usize) -> Option<&MenuItem> {
        self.items.get(idx)
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn restaurant_count(&self) -> usize {
        self.restaurants.len()
    }

    /// Distinct source category labels in first-seen order
    pub fn categories(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for item in &self.items {
            if !seen.contains(&item.category_label) {
                seen.push(item.category_label.clone());
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MenuSize;

    fn item(id: &str, restaurant: &str, category: Category, price: i64) -> MenuItem {
        MenuItem {
            menu_id: id.into(),
            restaurant_id: restaurant.into(),
            name: format!("dish {id}"),
            category_label: category.label().to_string(),
            category,
            price,
            size: MenuSize::new(10.0, 10.0, 5.0),
            popularity_score: 5.0,
        }
    }

    fn restaurant(id: &str, name: &str) -> Restaurant {
        Restaurant {
            restaurant_id: id.into(),
            name: name.into(),
            place_id: None,
        }
    }

    fn sample() -> Catalog {
        Catalog::new(
            vec![
                item("1", "r1", Category::Korean, 8000),
                item("2", "r2", Category::Chinese, 12000),
                item("3", "r1", Category::Korean, 15000),
                item("4", "r9", Category::Western, 6000),
            ],
            vec![restaurant("r1", "Han"), restaurant("r2", "Wok"), restaurant("r1", "Dup")],
        )
    }

    #[test]
    fn filter_preserves_load_order() {
        let catalog = sample();
        let filter = CatalogFilter::new().category(Some(Category::Korean));
        let ids: Vec<&str> = catalog
            .filter(&filter)
            .iter()
            .map(|item| item.menu_id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn filter_indexed_reports_catalog_positions() {
        let catalog = sample();
        let filter = CatalogFilter::new().price_range(Some(10000), None);
        let positions: Vec<usize> = catalog
            .filter_indexed(&filter)
            .iter()
            .map(|(idx, _)| *idx)
            .collect();
        assert_eq!(positions, vec![1, 2]);
    }

    #[test]
    fn restaurant_lookup_uses_first_duplicate() {
        let catalog = sample();
        assert_eq!(catalog.restaurant_by_id("r1").unwrap().name, "Han");
        assert!(catalog.restaurant_by_id("r9").is_none());
        assert_eq!(catalog.restaurant_count(), 3);
    }

    #[test]
    fn categories_in_first_seen_order() {
        let catalog = sample();
        assert_eq!(
            catalog.categories(),
            vec!["Korean", "Chinese", "Western"]
        );
        assert_eq!(catalog.index_of("3"), Some(2));
    }
}
