//! Petdesk: a terminal CRUD console for a remote pet registry.
//!
//! Petdesk keeps a local copy of a remote collection of pets and provides:
//! - Create, edit and delete with a "Pet Details" dialog and inline validation
//! - Optimistic deletion, confirm-then-apply creation and update
//! - Global and per-column filtering with configurable match modes
//! - Client-side sorting and pagination
//! - CSV and paginated text exports of the full collection

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI (main.rs) + command parser (command)           │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Runtime (runtime)                                  │  ← Event loop
//! │  - In-flight gateway calls                          │
//! │  - Notifications, exports                           │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Editing session, selection, delete confirmation  │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Store/Filter  │   │ Gateway Layer │
//! │ (ui/)         │   │ (store/,      │   │ (gateway/)    │
//! │ - Rendering   │   │  filter/)     │   │ - HTTP        │
//! │ - Theming     │   │ - Sync rules  │   │ - In-memory   │
//! │ - Table state │   │ - Match modes │   │ - Executor    │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/), Export (export/), Config,        │
//! │  Infrastructure (paths), Observability (logging)    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`command`]: Line commands typed at the prompt
//! - [`config`]: TOML configuration
//! - [`domain`]: Pet record, field names, validation, errors
//! - [`export`]: Spreadsheet and document exports
//! - [`filter`]: Filter rules and evaluation
//! - [`gateway`]: Remote service access
//! - [`infrastructure`]: Platform paths
//! - [`observability`]: Rotating file logs
//! - [`runtime`]: Event loop driver
//! - [`store`]: Local record list
//! - [`ui`]: Terminal rendering with theme support
//!
//! # Example
//!
//! ```
//! use petdesk::{handle_event, initialize, Config, Event};
//! use petdesk::gateway::GatewayResponse;
//! use petdesk::domain::Pet;
//!
//! let mut state = initialize(&Config::default())?;
//!
//! let loaded = GatewayResponse::Listed {
//!     pets: vec![Pet::new("Fido", "dog").with_id(1)],
//! };
//! let (render, actions) = handle_event(&mut state, &Event::Gateway(loaded))?;
//! assert!(render);
//! assert!(actions.is_empty());
//! assert_eq!(state.visible_records().len(), 1);
//! # Ok::<(), petdesk::PetdeskError>(())
//! ```
//!
//! # Key Design Decisions
//!
//! ## One Owner, Many Readers
//!
//! [`AppState`] is only mutated by [`handle_event`]. The renderer and the
//! exporters read through borrowed read models.
//!
//! ## Asymmetric Synchronization
//!
//! Deletion removes the local record before the remote call and is never
//! rolled back. Creation and update touch the local store only once the
//! service confirmed them. Failures surface as notifications.
//!
//! ## Unordered Completions
//!
//! Gateway calls run concurrently and their responses are applied in arrival
//! order. Nothing is sequenced or cancelled.

pub mod app;
pub mod command;
pub mod config;
pub mod domain;
pub mod export;
pub mod filter;
pub mod gateway;
pub mod infrastructure;
pub mod observability;
pub mod runtime;
pub mod store;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event};
pub use config::Config;
pub use domain::{Pet, PetField, PetId, PetdeskError, Result};
pub use runtime::Console;
pub use ui::Theme;

use filter::FilterEngine;
use ui::table::Pagination;

/// Builds the initial application state from configuration.
///
/// The store starts empty; the caller dispatches [`Event::Load`] to fetch
/// the collection. A theme that cannot be loaded falls back to the default.
///
/// # Errors
///
/// Returns [`PetdeskError::Config`] if the configuration fails
/// [`Config::validate`].
pub fn initialize(config: &Config) -> Result<AppState> {
    tracing::debug!("initializing petdesk");
    config.validate()?;

    let theme = config.theme().unwrap_or_else(|e| {
        tracing::warn!(theme = %config.theme, error = %e, "failed to load theme, using default");
        Theme::default()
    });

    let mut state = AppState::new(theme);
    state.engine = FilterEngine::new(config.case_sensitive);
    state.pagination = Pagination::new(config.page_size)?;
    state.notification_life = config.notification_life();
    state.refresh();
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn initialize_applies_configuration() {
        let config = Config {
            page_size: 25,
            case_sensitive: false,
            notification_life_ms: 500,
            theme: "vela-blue".to_string(),
            ..Config::default()
        };
        let state = initialize(&config).unwrap();

        assert_eq!(state.pagination.page_size(), 25);
        assert!(!state.engine.case_sensitive());
        assert_eq!(state.notification_life, Duration::from_millis(500));
        assert_eq!(state.theme.name, "vela-blue");
        assert!(state.store.is_empty());
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let config = Config {
            theme: "solarized".to_string(),
            ..Config::default()
        };
        assert_eq!(initialize(&config).unwrap().theme.name, "saga-blue");
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        let config = Config {
            page_size: 3,
            ..Config::default()
        };
        assert!(matches!(initialize(&config), Err(PetdeskError::Config(_))));
    }
}
