//! Core filtering logic for chatlens.
//!
//! This module contains:
//! - [`filter`] - Date range and sender selection
//! - [`output`] - CSV, JSON and SVG artifact writers
//!
//! # Quick Start
//!
//! ```rust
//! use chatlens::core::{FilterConfig, Selection, apply_filters};
//! use chatlens::parser::preprocess;
//!
//! let table = preprocess("01/01/24, 10:00 - Alice: hi");
//! let view = apply_filters(&table, &FilterConfig::new().with_selection(Selection::Overall));
//! assert_eq!(view.len(), 1);
//! ```

pub mod filter;
pub mod output;

pub use filter::{FilterConfig, OVERALL, Selection, apply_filters, parse_date};

// Re-export the record types from the crate root
pub use crate::{ChatTable, Message};
