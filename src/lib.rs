//! sectionspy: a scroll-spy for markdown documents.
//!
//! Sections are extracted with tree-sitter, their visibility inside a scrolling viewport is
//! observed, and a single "active" section is selected for navigation highlighting.
#![allow(clippy::multiple_crate_versions)]

pub mod app_state;
pub mod config;
pub mod error;
pub mod formats;
pub mod input;
pub mod observer;
pub mod replay;
pub mod section;
pub mod selector;
pub mod tracker;
pub mod ui;
pub mod visibility;

pub use error::{Error, Result};
