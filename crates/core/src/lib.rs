//! Domain logic for browsing the visual-novel catalog.
//!
//! Everything in this crate is pure and synchronous: date filters for the
//! catalog query, maturity and spoiler gates, and the classification of
//! associated-entity lists into ordered presentation groups. Network access
//! and listing state live in `vnshelf-catalog` and `vnshelf-listing`.

pub mod classifier;
pub mod detail;
pub mod error;
pub mod maturity;
pub mod model;
pub mod panels;
pub mod spoiler;
pub mod tables;
pub mod temporal;
pub mod types;
