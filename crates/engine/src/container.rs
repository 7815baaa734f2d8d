use crate::error::{RecommendError, Result};
use menufit_catalog::MenuSize;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Target container dimensions supplied per request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerSpec {
    pub width: f64,
    pub length: f64,
    pub height: f64,
}

impl ContainerSpec {
    #[must_use]
    pub const fn new(width: f64, length: f64, height: f64) -> Self {
        Self {
            width,
            length,
            height,
        }
    }

    /// Every dimension must be a finite value greater than zero
    pub fn validate(&self) -> Result<()> {
        let valid = self.axes().iter().all(|d| d.is_finite() && *d > 0.0);
        if valid {
            Ok(())
        } else {
            Err(RecommendError::InvalidSize {
                width: self.width,
                length: self.length,
                height: self.height,
            })
        }
    }

    #[must_use]
    pub fn volume(&self) -> f64 {
        self.width * self.length * self.height
    }

    #[must_use]
    pub const fn axes(&self) -> [f64; 3] {
        [self.width, self.length, self.height]
    }

    /// No item axis exceeds the matching container axis
    #[must_use]
    pub fn fits(&self, size: &MenuSize) -> bool {
        size.width <= self.width && size.length <= self.length && size.height <= self.height
    }
}

/// `WxLxH` with every dimension in float form, e.g. `30.0x25.5x10.0`
impl fmt::Display for ContainerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}x{:?}x{:?}", self.width, self.length, self.height)
    }
}
