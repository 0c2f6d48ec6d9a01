//! Fixture Front-end
//!
//! Lowers Crucible-style C fixtures (`crucible_int8_t`, `assuming`, `check`)
//! to the straight-line program model the execution driver runs.
//!
//! ## Architecture
//!
//! ```text
//! frontend
//! ├── domain/            # FixtureFrontend port, FrontendError
//! └── infrastructure/    # tree-sitter C visitor
//! ```

pub mod domain;
pub mod infrastructure;

pub use domain::{FixtureFrontend, FrontendError};
pub use infrastructure::CFixtureParser;

use crate::errors::Result;
use crate::features::execution::Program;

/// Parse one C fixture file
pub fn parse_fixture(file_name: &str, source: &str) -> Result<Program> {
    let mut parser = CFixtureParser::new()?;
    Ok(parser.parse(file_name, source)?)
}
