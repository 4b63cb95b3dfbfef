// src/data/mod.rs
//! Tabular view over scraped records, the shape reporting works on

pub mod table;

pub use table::{DataRow, DataTable, COLUMNS};
