use serde::{Deserialize, Serialize};
use std::fmt;

/// Display name used when a menu item references a restaurant the catalog does not know
pub const UNKNOWN_RESTAURANT: &str = "unknown";

/// Menu category
///
/// The five known categories drive the contextual weight tables and the
/// preference feature one-hot. Any other label is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Korean,
    Chinese,
    Japanese,
    Western,
    Other,
    Unlisted(String),
}

impl Category {
    /// Known categories in one-hot order
    pub const KNOWN: [Category; 5] = [
        Category::Korean,
        Category::Chinese,
        Category::Japanese,
        Category::Western,
        Category::Other,
    ];

    /// Parse a category label (English names case-insensitively, plus the Korean labels
    /// found in source data)
    pub fn parse(label: &str) -> Self {
        let trimmed = label.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "korean" | "한식" => Self::Korean,
            "chinese" | "중식" => Self::Chinese,
            "japanese" | "일식" => Self::Japanese,
            "western" | "양식" => Self::Western,
            "other" | "기타" => Self::Other,
            _ => Self::Unlisted(trimmed.to_string()),
        }
    }

    /// Canonical label
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Korean => "Korean",
            Self::Chinese => "Chinese",
            Self::Japanese => "Japanese",
            Self::Western => "Western",
            Self::Other => "Other",
            Self::Unlisted(label) => label,
        }
    }

    /// Position in [`Category::KNOWN`], `None` for unlisted labels
    #[must_use]
    pub fn known_index(&self) -> Option<usize> {
        Self::KNOWN.iter().position(|known| known == self)
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Physical footprint of a menu item (container units)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MenuSize {
    pub width: f64,
    pub length: f64,
    pub height: f64,
}

impl MenuSize {
    #[must_use]
    pub const fn new(width: f64, length: f64, height: f64) -> Self {
        Self {
            width,
            length,
            height,
        }
    }

    #[must_use]
    pub fn volume(&self) -> f64 {
        self.width * self.length * self.height
    }

    /// Axes in (width, length, height) order
    #[must_use]
    pub const fn axes(&self) -> [f64; 3] {
        [self.width, self.length, self.height]
    }
}

/// A normalized menu record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub menu_id: String,
    pub restaurant_id: String,
    #[serde(rename = "menu_name")]
    pub name: String,
    pub category: Category,
    /// Category exactly as written in the source row (trimmed)
    pub category_label: String,
    /// Price in integer currency units
    pub price: i64,
    pub size: MenuSize,
    pub popularity_score: f64,
}

impl MenuItem {
    /// Text used for content similarity: `name + " " + source category label`
    #[must_use]
    pub fn content_text(&self) -> String {
        format!("{} {}", self.name, self.category_label)
    }
}

/// A normalized restaurant record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    pub restaurant_id: String,
    pub name: String,
    pub place_id: Option<String>,
}
