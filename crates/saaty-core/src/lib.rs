//! # saaty-core
//!
//! Pairwise criteria comparison and priority weights using the Analytic
//! Hierarchy Process - THE LOGIC.
//!
//! The crate turns an ordered list of criteria plus one judgment per
//! unordered pair into a positive reciprocal comparison matrix, then derives
//! normalized weights with the geometric-mean (row-product) method.
//!
//! ```text
//!  labels ──► Criteria ──┐
//!                        ├──► ComparisonMatrix ──► WeightVector
//!  pairs ───► Judgments ─┘          (builder)         (solver)
//!                                        │
//!                                        ▼
//!                                   Assessment ──► SubmissionRecord ──► SheetStore
//! ```
//!
//! ## Architectural Constraints
//!
//! - Computation is pure, synchronous and deterministic
//! - No ambient state: every step returns a value that is handed to the next
//! - Persistence is optional and never invalidates a computed `Assessment`
//! - NO async, NO network dependencies

// =============================================================================
// MODULES
// =============================================================================

pub mod assessment;
pub mod criteria;
pub mod formats;
pub mod judgment;
pub mod matrix;
pub mod primitives;
pub mod record;
pub mod scale;
pub mod solver;
pub mod storage;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types
// =============================================================================

pub use types::{ErrorKind, RowId, SaatyError, SheetId};

// =============================================================================
// RE-EXPORTS: Builder & Solver
// =============================================================================

pub use assessment::{Assessment, Priority};
pub use criteria::{Criteria, CriteriaBounds, Readiness};
pub use judgment::{Favors, Judgment, Judgments, Pair};
pub use matrix::ComparisonMatrix;
pub use scale::{Intensity, Locale};
pub use solver::{WeightVector, solve, solve_matrix, solve_with_bounds};

// =============================================================================
// RE-EXPORTS: Records & Storage
// =============================================================================

pub use formats::{PersistenceHeader, record_from_bytes, record_to_bytes};
pub use record::{Cell, RecordEntry, SubmissionRecord};
pub use storage::{MemorySheets, RedbSheets, SheetBackend, SheetStore};
