//! Loader utilities for the roster projection CLI.
//!
//! Converts spreadsheet exports (athletes, compensation rows, field
//! overrides) into the snapshot JSON the engine consumes.

pub mod csv_import;
