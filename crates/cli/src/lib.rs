//! Command-line driver for the release browser: argument parsing and
//! plain-text rendering of listings and detail pages.

pub mod args;
pub mod render;
