/*
 * symcheck - Bitvector Symbolic Checking Engine
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (SourceLocation)
 * - features/    : Vertical slices (symbolic → constraint_store → solver → execution → reporting)
 * - pipeline/    : Entry points (single program, C fixture, parallel batch)
 * - config/      : Presets, stage overrides, YAML
 *
 * A run declares symbolic inputs, collects assumptions, and discharges each
 * check as `assumptions ∧ ¬check` against a decision procedure over
 * fixed-width bitvectors.
 */

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models
pub mod shared;

/// Feature modules
pub mod features;

/// Verification entry points
pub mod pipeline;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{Preset, ValidatedConfig, VerifierConfig};
pub use errors::{EngineError, Result};
pub use features::execution::{Expr, Item, Program};
pub use features::reporting::{CheckStatus, Verdict, VerdictSummary};
pub use pipeline::{verify_batch, verify_program, verify_source, BatchOutcome};
pub use shared::models::SourceLocation;
