//! Filter engine: per-column and global match rules.
//!
//! # Organization
//!
//! - [`mode`]: Comparison modes (`Contains`, `StartsWith`, ...)
//! - [`state`]: Rule values keyed by `global` or a field
//! - [`engine`]: Visibility and highlight evaluation

pub mod engine;
pub mod mode;
pub mod state;

pub use engine::{FilterEngine, Highlights};
pub use mode::MatchMode;
pub use state::{FilterKey, FilterRule, FilterState, FILTERABLE_FIELDS, GLOBAL_FIELDS};
