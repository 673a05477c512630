use thiserror::Error;

/// Failures while wiring the section to the browser. None of these are
/// fatal: the section renders and indicator clicks still work, it just
/// stops capturing scroll.
#[derive(Debug, Error)]
pub enum BindingError {
    #[error("section element not mounted")]
    NotMounted,
    #[error("failed to create intersection observer: {0}")]
    Observer(String),
}
