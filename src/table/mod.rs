//! Reference code table storage and lookup.
//!
//! The table is loaded once per invocation from a delimited file and
//! never mutated afterwards; matching functions borrow it read-only.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use cmsify::table::store::CodeTable;
//!
//! let table = CodeTable::load_from_file(Path::new("icd10cm_codes.csv")).unwrap();
//! println!("{} codes loaded", table.len());
//! ```

pub mod store;

pub use store::{CodeTable, TableError};
