//! Output generation.
//!
//! # Submodules
//!
//! - [`json`]: Writes the combined article collection as one JSON document
//!
//! # Output Structure
//!
//! ```text
//! ./combined_articles.json   # array of article objects, 4-space indented
//! ```

pub mod json;
