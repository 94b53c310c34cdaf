//! Offline exporter for the biome composition tables.
//!
//! Reads the climate/geography weight tables out of the balance spreadsheet
//! (or a local CSV export of it), parses them into nested weight tables, and
//! renders the result as Rust source for the worldgen crate.

pub mod emit;
pub mod fetch;
pub mod parse;
