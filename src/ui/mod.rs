//! Terminal presentation layer.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI frame
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready types, no business logic
//! - [`table`]: Sort and pagination state of the pets table
//! - [`renderer`]: Frame composition
//! - [`components`]: Per-section renderers
//! - [`helpers`]: Width-aware text utilities and highlighting
//! - [`theme`]: Color schemes and ANSI escape generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod table;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_state};
pub use table::{Pagination, SortOrder, SortState};
pub use theme::Theme;
pub use viewmodel::{
    ColumnInfo, ConfirmInfo, DialogInfo, DisplayRow, EmptyState, FooterInfo, HeaderInfo,
    PaginatorInfo, ToastInfo, UIViewModel,
};
