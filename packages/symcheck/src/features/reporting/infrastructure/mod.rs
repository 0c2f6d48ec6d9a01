//! Verdict Reporter - Infrastructure

pub mod render;
pub mod reporter;

pub use render::CheckReport;
pub use reporter::VerdictReporter;
