// src/utils/mod.rs
pub mod formatter;

pub use formatter::format_json;
