//! Viewport visibility tracking.
//!
//! [`VisibilityWatch`] turns raw intersection samples into enter/leave edges.
//! [`IntersectionWatcher`] is the browser binding that feeds it and keeps the
//! `IntersectionObserver` alive until dropped.

use js_sys::Array;
use log::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::config::SectionConfig;
use crate::error::BindingError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisibilityEdge {
    Entered,
    Left,
}

impl VisibilityEdge {
    pub fn is_visible(self) -> bool {
        matches!(self, VisibilityEdge::Entered)
    }
}

#[derive(Clone, Debug)]
pub struct VisibilityWatch {
    threshold: f64,
    visible: bool,
}

impl VisibilityWatch {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            visible: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Feeds one observation. Returns an edge only when the visible state
    /// actually flips.
    pub fn observe(&mut self, is_intersecting: bool, ratio: f64) -> Option<VisibilityEdge> {
        let now_visible = is_intersecting && ratio >= self.threshold;
        if now_visible == self.visible {
            return None;
        }
        self.visible = now_visible;
        Some(if now_visible {
            VisibilityEdge::Entered
        } else {
            VisibilityEdge::Left
        })
    }
}

/// Owns an `IntersectionObserver` on one element. Dropping it disconnects
/// the observer so no callback can reach a torn-down component.
pub struct IntersectionWatcher {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl IntersectionWatcher {
    pub fn observe<F>(target: &Element, config: &SectionConfig, mut on_edge: F) -> Result<Self, BindingError>
    where
        F: FnMut(VisibilityEdge) + 'static,
    {
        let mut watch = VisibilityWatch::new(config.visibility_threshold);
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        warn!("intersection callback received a non-entry value");
                        continue;
                    };
                    if let Some(edge) = watch.observe(entry.is_intersecting(), entry.intersection_ratio()) {
                        on_edge(edge);
                    }
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_root_margin(&config.root_margin);
        init.set_threshold(&JsValue::from_f64(config.visibility_threshold));

        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
            .map_err(|err| BindingError::Observer(format!("{err:?}")))?;
        observer.observe(target);

        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for IntersectionWatcher {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossing_threshold_enters_once() {
        let mut watch = VisibilityWatch::new(0.5);
        assert_eq!(watch.observe(true, 0.2), None);
        assert_eq!(watch.observe(true, 0.5), Some(VisibilityEdge::Entered));
        assert_eq!(watch.observe(true, 0.9), None);
        assert!(watch.is_visible());
    }

    #[test]
    fn dropping_below_threshold_leaves() {
        let mut watch = VisibilityWatch::new(0.5);
        watch.observe(true, 0.7);
        assert_eq!(watch.observe(true, 0.3), Some(VisibilityEdge::Left));
        assert_eq!(watch.observe(false, 0.0), None);
    }

    #[test]
    fn non_intersecting_sample_is_never_visible() {
        let mut watch = VisibilityWatch::new(0.0);
        assert_eq!(watch.observe(false, 0.0), None);
        assert_eq!(watch.observe(true, 0.0), Some(VisibilityEdge::Entered));
    }
}
