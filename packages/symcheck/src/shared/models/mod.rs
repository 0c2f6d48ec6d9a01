//! Shared models

mod location;

pub use location::SourceLocation;
