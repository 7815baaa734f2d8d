use crate::error::{CatalogError, Result};
use crate::raw::{RawMenuRecord, RawRestaurantRecord};
use crate::store::Catalog;
use crate::types::{Category, MenuItem, MenuSize, Restaurant};
use encoding_rs::{EUC_KR, WINDOWS_1252};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::fs;
use std::path::Path;

const FALLBACK_MENUS: usize = 100;
const FALLBACK_RESTAURANTS: usize = 20;

/// Decode catalog text: UTF-8 (BOM stripped), then CP949, then Latin-1 (Windows-1252)
///
/// CP949 is tried through encoding_rs' `EUC-KR`, which is the Windows-949
/// superset. Latin-1 maps every byte, so decoding never fails.
pub fn decode_text(raw: &[u8]) -> Cow<'_, str> {
    let body = raw.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(raw);
    if let Ok(text) = std::str::from_utf8(body) {
        return Cow::Borrowed(text);
    }
    if let Some(text) = EUC_KR.decode_without_bom_handling_and_without_replacement(body) {
        log::debug!("Catalog text decoded as CP949");
        return text;
    }
    log::debug!("Catalog text decoded as Latin-1");
    WINDOWS_1252.decode_without_bom_handling(body).0
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

/// Read raw records from a `.csv` file or a JSON array (any other extension)
fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let raw = fs::read(path)?;
    let text = decode_text(&raw);
    if is_csv(path) {
        parse_csv(&text, path)
    } else {
        Ok(serde_json::from_str(&text)?)
    }
}

/// Parse CSV rows against the header, skipping rows that cannot be read
///
/// Short rows leave the missing columns unset. Rows with more fields than the
/// header, or with values that fail to deserialize, are dropped.
fn parse_csv<T: DeserializeOwned>(text: &str, path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());
    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for row in reader.records() {
        let row = match row {
            Ok(row) if row.len() <= headers.len() => row,
            Ok(_) => {
                skipped += 1;
                continue;
            }
            Err(err) => {
                log::debug!("Skipping bad line in {}: {err}", path.display());
                skipped += 1;
                continue;
            }
        };
        match row.deserialize::<T>(Some(&headers)) {
            Ok(record) => records.push(record),
            Err(err) => {
                log::debug!("Skipping bad line in {}: {err}", path.display());
                skipped += 1;
            }
        }
    }
    if skipped > 0 {
        log::warn!("Skipped {skipped} bad lines in {}", path.display());
    }
    Ok(records)
}

pub fn read_menu_records(path: &Path) -> Result<Vec<RawMenuRecord>> {
    read_records(path)
}

pub fn read_restaurant_records(path: &Path) -> Result<Vec<RawRestaurantRecord>> {
    read_records(path)
}

/// Load a catalog from menu and restaurant files (JSON or CSV)
///
/// Fails when either file cannot be read or parsed, or when no menu row survives
/// normalization.
pub fn load_catalog(menus_path: &Path, restaurants_path: &Path) -> Result<Catalog> {
    let menus = read_menu_records(menus_path)?;
    let restaurants = read_restaurant_records(restaurants_path)?;
    let catalog = Catalog::from_raw(&menus, &restaurants);
    if catalog.is_empty() {
        return Err(CatalogError::EmptyCatalog);
    }

    log::info!(
        "Loaded catalog: {} menus, {} restaurants",
        catalog.len(),
        catalog.restaurant_count()
    );
    Ok(catalog)
}

/// Load the catalog, substituting the built-in dataset on any failure
pub fn load_or_fallback(menus_path: Option<&Path>, restaurants_path: Option<&Path>) -> Catalog {
    let (Some(menus_path), Some(restaurants_path)) = (menus_path, restaurants_path) else {
        log::warn!("Catalog paths not configured, using fallback dataset");
        return fallback_catalog();
    };

    match load_catalog(menus_path, restaurants_path) {
        Ok(catalog) => catalog,
        Err(err) => {
            log::warn!(
                "Catalog load failed ({}, {}): {err}; using fallback dataset",
                menus_path.display(),
                restaurants_path.display()
            );
            fallback_catalog()
        }
    }
}

/// Deterministic stand-in dataset: 100 menus over 20 restaurants
pub fn fallback_catalog() -> Catalog {
    let items = (1..=FALLBACK_MENUS)
        .map(|i| {
            let category = Category::KNOWN[(i * 3) % Category::KNOWN.len()].clone();
            MenuItem {
                menu_id: i.to_string(),
                restaurant_id: ((i * 7) % FALLBACK_RESTAURANTS + 1).to_string(),
                name: format!("Menu {i}"),
                category_label: category.label().to_string(),
                category,
                price: 5000 + ((i * 1373) % 150) as i64 * 100,
                size: MenuSize::new(
                    10.0 + ((i * 37) % 150) as f64 / 10.0,
                    10.0 + ((i * 53) % 150) as f64 / 10.0,
                    3.0 + ((i * 29) % 70) as f64 / 10.0,
                ),
                popularity_score: 1.0 + ((i * 41) % 90) as f64 / 10.0,
            }
        })
        .collect();

    let restaurants = (1..=FALLBACK_RESTAURANTS)
        .map(|i| Restaurant {
            restaurant_id: i.to_string(),
            name: format!("Restaurant {i}"),
            place_id: None,
        })
        .collect();

    Catalog::new(items, restaurants)
}
