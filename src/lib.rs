//! "How it works" section: a scroll-captured, four step walkthrough rendered
//! with Yew.
//!
//! The state machine, input adapters and presentation math are plain Rust and
//! testable off the browser. `components` and `visibility` bind them to DOM
//! events.

pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod input;
pub mod machine;
pub mod presentation;
pub mod section;
pub mod visibility;

pub mod components {
    pub mod how_it_works;
}

pub mod pages {
    pub mod home;
    pub mod not_found;
}
