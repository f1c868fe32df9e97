//! Low-level parsing utilities.
//!
//! [`whatsapp`] holds the header formats and timestamp handling the
//! [`parser`](crate::parser) builds on.

pub mod whatsapp;

pub use whatsapp::{
    DateFormat, HeaderMatcher, detect_whatsapp_format, parse_whatsapp_timestamp,
};
