//! Writers for the export tree.

pub mod json;
