//! UI rendering module for skygaze
//!
//! This module contains all the rendering logic for the terminal user
//! interface, using the ratatui library for TUI components.

pub mod dashboard;
pub mod theme;

pub use dashboard::render as render_dashboard;
