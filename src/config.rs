use log::Level;
use serde::Deserialize;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose transitions when running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Tunables for scroll capture. Every field has a default so a partial JSON
/// object is enough to override one value.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SectionConfig {
    /// Fraction of the section that must intersect the viewport to capture.
    pub visibility_threshold: f64,
    /// CSS margin applied to the viewport before intersecting.
    pub root_margin: String,
    /// Minimum gap between two accepted wheel events.
    pub debounce_ms: u64,
    /// Vertical travel below which a touch is a tap, not a swipe.
    pub min_swipe_px: f64,
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self {
            visibility_threshold: 0.5,
            root_margin: "-10% 0px -10% 0px".to_string(),
            debounce_ms: 800,
            min_swipe_px: 50.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_defaults() {
        let config: SectionConfig = serde_json::from_str(r#"{"debounce_ms": 500}"#).unwrap();
        assert_eq!(config.debounce_ms, 500);
        assert_eq!(config.visibility_threshold, 0.5);
        assert_eq!(config.root_margin, "-10% 0px -10% 0px");
        assert_eq!(config.min_swipe_px, 50.0);
    }
}
