//! Core analysis engine.
//!
//! ```text
//! resources (locale files) ─┐
//!                           ├─> classifier ─> analysis ─> report
//! scanner (source files) ───┘                     │
//!                                                 └─> backup ─> mutation
//! ```
//!
//! ## Module Structure
//!
//! - `context`: Configuration merged with CLI overrides, path resolution
//! - `resources`: ARB loading, metadata separation, locale discovery
//! - `scanner`: Source tree walk
//! - `patterns`: `{key}` usage templates compiled to regexes
//! - `comments`: String-aware comment regions per source line
//! - `classifier`: Per-key USED / COMMENT_ONLY / UNUSED classification
//! - `analysis`: Classification of the whole master key set
//! - `report`: Timestamped plain-text report
//! - `backup`: Timestamped copies of the locale files
//! - `mutation`: Key and metadata removal, dry-run or applied

pub mod analysis;
pub mod backup;
pub mod classifier;
pub mod comments;
pub mod context;
pub mod mutation;
pub mod patterns;
pub mod report;
pub mod resources;
pub mod scanner;

pub use analysis::{Analysis, CleanupStrategy};
pub use classifier::{Classification, Occurrence, UsageRecord};
pub use context::ProjectContext;
pub use mutation::{RemovalMode, RemovalReport};
pub use resources::{LoadWarning, LocaleResource, ResourceSet, TranslationKey};
