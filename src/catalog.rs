//! Static content for the section, injected as JSON.

use serde::Deserialize;
use thiserror::Error;

use crate::config::SectionConfig;

const DEFAULT_CATALOG: &str = include_str!("../assets/steps.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse step catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("step catalog has no steps")]
    Empty,
    #[error("step {ordinal} has invalid accent color {color:?}, expected #rrggbb")]
    InvalidColor { ordinal: usize, color: String },
    #[error("step at position {position} has ordinal {ordinal}, expected {expected}")]
    OrdinalMismatch {
        position: usize,
        ordinal: usize,
        expected: usize,
    },
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Step {
    pub ordinal: usize,
    pub title: String,
    pub description: String,
    pub accent_color: String,
    /// Opaque icon content, rendered as-is inside the card.
    pub icon: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Catalog {
    pub heading: String,
    pub subtitle: String,
    pub step_label: String,
    pub scroll_hint: String,
    pub steps: Vec<Step>,
    #[serde(default)]
    pub config: SectionConfig,
}

impl Catalog {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// The bundled catalog shipped with the crate.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(DEFAULT_CATALOG)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step at `index`, clamped to the last one. `None` only for a catalog
    /// built by hand with no steps.
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index).or(self.steps.last())
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.steps.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (position, step) in self.steps.iter().enumerate() {
            if step.ordinal != position + 1 {
                return Err(CatalogError::OrdinalMismatch {
                    position,
                    ordinal: step.ordinal,
                    expected: position + 1,
                });
            }
            if !is_hex_rgb(&step.accent_color) {
                return Err(CatalogError::InvalidColor {
                    ordinal: step.ordinal,
                    color: step.accent_color.clone(),
                });
            }
        }
        Ok(())
    }
}

// Accent colors get an alpha byte appended when rendered, so only the
// six digit form is accepted.
fn is_hex_rgb(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}
