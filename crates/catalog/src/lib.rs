//! # Menufit Catalog
//!
//! Read-only store of menu items and restaurants.
//!
//! ## Pipeline
//!
//! ```text
//! menus / restaurants (.json arrays or .csv in UTF-8, CP949 or Latin-1)
//!     │
//!     ├──> Raw records (lenient numbers, numeric or string ids)
//!     │
//!     ├──> Normalization (imputation: popularity 5, median price, 15x15x8 size)
//!     │
//!     └──> Catalog (load order, id maps, category/price filters)
//! ```
//!
//! ## Example
//!
//! ```
//! use menufit_catalog::{fallback_catalog, Category, CatalogFilter};
//!
//! let catalog = fallback_catalog();
//! let korean = catalog.filter(&CatalogFilter::new().category(Some(Category::Korean)));
//! assert!(!korean.is_empty());
//! ```

mod error;
mod filter;
mod loader;
mod raw;
mod store;
mod types;

pub use error::{CatalogError, Result};
pub use filter::CatalogFilter;
pub use loader::{
    decode_text, fallback_catalog, load_catalog, load_or_fallback, read_menu_records,
    read_restaurant_records,
};
pub use raw::{
    median_price, RawId, RawMenuRecord, RawNumber, RawRestaurantRecord, DEFAULT_HEIGHT,
    DEFAULT_LENGTH, DEFAULT_POPULARITY, DEFAULT_WIDTH,
};
pub use store::Catalog;
pub use types::{Category, MenuItem, MenuSize, Restaurant, UNKNOWN_RESTAURANT};
