//! Data models: metric configuration, page text, extraction output, settings.

pub mod config;
pub mod document;
pub mod metric;
pub mod observation;
