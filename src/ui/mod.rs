//! UI rendering module for Skycast
//!
//! This module contains all the rendering logic for the terminal user
//! interface, using the ratatui library for TUI components.

pub mod conditions;
pub mod help;
pub mod search_bar;

pub use conditions::render_conditions;
pub use help::render as render_help;
pub use search_bar::{render_search_bar, render_suggestion_panel};
