//! # Import Orchestration
//!
//! Runs an import session end to end:
//!
//! 1. [`Importer::start`] validates the input and creates the playlist. Only
//!    this step can fail the whole session.
//! 2. [`Importer::process`] resolves entries in input order and settles each
//!    [`ImportRecord`] exactly once (`Pending` → `Success | Similar | Error`).
//! 3. Resolved tracks are appended in batches of at most
//!    [`crate::catalog::APPEND_BATCH_LIMIT`], preserving input order.
//! 4. The session ends `Completed`, or `Cancelled` when the [`StopSignal`]
//!    fired; entries that were never attempted stay `Pending`.
//!
//! Progress is reported through a caller supplied callback receiving
//! [`ProgressEvent`]s.

mod importer;
mod session;

pub use importer::{DEFAULT_DESCRIPTION, ImportOptions, Importer, MAX_CONCURRENCY};
pub use session::{
    BatchOutcome, ImportRecord, ImportSession, ImportStatus, ImportSummary, NOT_FOUND_REASON,
    ProgressEvent, SessionState, StopSignal,
};
