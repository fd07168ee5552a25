//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes user intents and
//! gateway responses, translating them into state changes and action
//! sequences. It is the only place where [`AppState`] is mutated.
//!
//! # Architecture
//!
//! 1. Events arrive from the command loop or from completed gateway tasks
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for the runtime to execute
//!
//! # Synchronization
//!
//! Creates and updates are confirm-then-apply: the store only changes when
//! the matching [`GatewayResponse`] arrives. Deletes are optimistic: the
//! record leaves the store while handling [`Event::DeleteConfirm`], before the
//! delete request has even been started, and a failed delete is never rolled
//! back. Responses are applied in arrival order; nothing is sequenced,
//! debounced or cancelled.
//!
//! # Example
//!
//! ```
//! use petdesk::app::{handle_event, Action, AppState, Event};
//! use petdesk::gateway::GatewayRequest;
//! use petdesk::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! let (_render, actions) = handle_event(&mut state, &Event::Load)?;
//! assert_eq!(actions, vec![Action::Gateway(GatewayRequest::List)]);
//! # Ok::<(), petdesk::PetdeskError>(())
//! ```

use crate::app::notification;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{PetField, PetId};
use crate::export::ExportFormat;
use crate::filter::{FilterKey, MatchMode};
use crate::gateway::{GatewayOp, GatewayRequest, GatewayResponse};

/// Events triggered by user intent or by completed gateway calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Fetches the full collection from the service.
    Load,

    /// Selects a row, or clears the selection with `None`.
    Select(Option<PetId>),

    /// Opens the dialog for a new record.
    New,

    /// Opens the dialog for the selected record.
    Edit(PetId),

    /// Edits one field of the open dialog's working copy.
    FieldChange { field: PetField, value: String },

    /// Saves the open dialog.
    Save,

    /// Closes the open dialog without saving.
    CancelEdit,

    /// Asks for confirmation before deleting the selected record.
    DeleteRequest(PetId),

    /// Confirms the pending deletion.
    DeleteConfirm,

    /// Dismisses the pending deletion.
    DeleteCancel,

    /// Sets a filter value; `None` or empty clears it.
    FilterChange { key: FilterKey, value: Option<String> },

    /// Changes how a filter compares values.
    FilterMatchMode { key: FilterKey, mode: MatchMode },

    /// Clears every filter, including the global search.
    ClearFilters,

    /// Advances the sort cycle of a column.
    Sort(PetField),

    /// Moves to a zero-based page.
    Page(usize),

    /// Changes rows per page.
    PageSize(usize),

    /// Exports every record.
    Export(ExportFormat),

    /// Outcome of a gateway call.
    Gateway(GatewayResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(render, actions)`: whether the visible state changed, and the side
/// effects to run in order.
///
/// # Errors
///
/// Returns [`PetdeskError::ReadOnlyField`](crate::PetdeskError::ReadOnlyField)
/// for edits of the id, [`PetdeskError::UnknownField`](crate::PetdeskError::UnknownField)
/// for filters on a field without a column filter, and
/// [`PetdeskError::Config`](crate::PetdeskError::Config) for an unsupported
/// page size. The state is left unchanged in every error case.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Load => Ok((false, vec![Action::Gateway(GatewayRequest::List)])),
        Event::Select(id) => {
            if state.phase().is_modal() {
                tracing::debug!("selection ignored while a dialog is open");
                return Ok((false, vec![]));
            }
            state.selection.select(id.clone());
            Ok((true, vec![]))
        }
        Event::New => Ok((state.open_new(), vec![])),
        Event::Edit(id) => Ok((state.request_edit(id), vec![])),
        Event::FieldChange { field, value } => {
            let Some(session) = state.editing.as_mut() else {
                tracing::debug!(field = %field, "field change without an open dialog");
                return Ok((false, vec![]));
            };
            session.set_field(*field, value)?;
            Ok((true, vec![]))
        }
        Event::Save => {
            let Some(session) = state.editing.as_mut() else {
                return Ok((false, vec![]));
            };
            if let Err(e) = session.ensure_valid() {
                tracing::debug!(error = %e, "saving a record that fails validation");
            }
            let request = session.commit();
            Ok((true, vec![Action::Gateway(request)]))
        }
        Event::CancelEdit => Ok((state.editing.take().is_some(), vec![])),
        Event::DeleteRequest(id) => Ok((state.request_delete(id), vec![])),
        Event::DeleteConfirm => {
            if state.delete_confirmation.is_none() {
                return Ok((false, vec![]));
            }
            let actions = state
                .confirm_delete()
                .map(|id| Action::Gateway(GatewayRequest::Delete { id }))
                .into_iter()
                .collect();
            Ok((true, actions))
        }
        Event::DeleteCancel => Ok((state.cancel_delete(), vec![])),
        Event::FilterChange { key, value } => {
            state.filters.set(*key, value.clone())?;
            if *key == FilterKey::Global {
                state.global_filter_value = value.clone().unwrap_or_default();
            }
            state.refresh();
            Ok((true, vec![]))
        }
        Event::FilterMatchMode { key, mode } => {
            state.filters.set_match_mode(*key, *mode)?;
            state.refresh();
            Ok((true, vec![]))
        }
        Event::ClearFilters => {
            state.filters.clear();
            state.global_filter_value.clear();
            state.refresh();
            Ok((true, vec![]))
        }
        Event::Sort(field) => {
            state.sort.cycle(*field);
            Ok((true, vec![]))
        }
        Event::Page(page) => {
            state.pagination.set_page(*page, state.visible.len());
            Ok((true, vec![]))
        }
        Event::PageSize(size) => {
            state.pagination.set_page_size(*size)?;
            Ok((true, vec![]))
        }
        Event::Export(format) => Ok((false, vec![Action::Export(*format)])),
        Event::Gateway(response) => Ok(handle_response(state, response)),
    }
}

/// Applies a gateway outcome to the state.
fn handle_response(state: &mut AppState, response: &GatewayResponse) -> (bool, Vec<Action>) {
    match response {
        GatewayResponse::Listed { pets } => {
            state.store.replace_all(pets.clone());
            state.refresh();
            tracing::debug!(pet_count = state.store.len(), "collection loaded");
            (true, vec![])
        }
        GatewayResponse::Created { pet, ticket } => {
            tracing::debug!(pet_id = ?pet.id, ticket, "record created");
            state.store.prepend(pet.clone());
            state.close_session(*ticket);
            state.refresh();
            (true, vec![Action::Notify(state.success(notification::SAVED))])
        }
        GatewayResponse::Updated { pet, ticket } => {
            tracing::debug!(pet_id = ?pet.id, ticket, "record updated");
            state.store.replace(pet.clone());
            state.close_session(*ticket);
            state.refresh();
            (true, vec![Action::Notify(state.success(notification::UPDATED))])
        }
        GatewayResponse::Deleted { id } => {
            tracing::debug!(pet_id = %id, "deletion confirmed");
            (true, vec![Action::Notify(state.success(notification::DELETED))])
        }
        GatewayResponse::Failed { op: GatewayOp::List, message, .. } => {
            tracing::warn!(error = %message, "failed to load pets, keeping current list");
            (false, vec![])
        }
        GatewayResponse::Failed { op, ticket, message } => {
            tracing::warn!(op = %op, error = %message, "remote operation failed");
            if let Some(ticket) = ticket {
                state.close_session(*ticket);
            }
            (true, vec![Action::Notify(state.unexpected_error())])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::notification::Severity;
    use crate::app::ConsolePhase;
    use crate::domain::Pet;
    use crate::ui::Theme;

    fn loaded() -> AppState {
        let mut state = AppState::new(Theme::default());
        handle_event(
            &mut state,
            &Event::Gateway(GatewayResponse::Listed {
                pets: vec![
                    Pet::new("Fido", "dog").with_id(1),
                    Pet::new("Rex", "cat").with_id(2),
                ],
            }),
        )
        .unwrap();
        state
    }

    fn dispatch(state: &mut AppState, event: Event) -> Vec<Action> {
        handle_event(state, &event).unwrap().1
    }

    fn notification_detail(actions: &[Action]) -> Option<&str> {
        actions.iter().find_map(|action| match action {
            Action::Notify(n) => Some(n.detail.as_str()),
            _ => None,
        })
    }

    #[test]
    fn save_emits_request_and_waits_for_confirmation() {
        let mut state = loaded();
        dispatch(&mut state, Event::New);
        dispatch(
            &mut state,
            Event::FieldChange {
                field: PetField::Name,
                value: "Tom".to_string(),
            },
        );

        let actions = dispatch(&mut state, Event::Save);

        let ticket = match &actions[..] {
            [Action::Gateway(GatewayRequest::Create { candidate, ticket })] => {
                assert_eq!(candidate.name, "Tom");
                *ticket
            }
            other => panic!("unexpected actions: {other:?}"),
        };
        assert_eq!(state.store.len(), 2);
        assert!(state.editing.as_ref().unwrap().submitted);

        let actions = dispatch(
            &mut state,
            Event::Gateway(GatewayResponse::Created {
                pet: Pet::new("Tom", "").with_id(3),
                ticket,
            }),
        );

        assert_eq!(state.records()[0].name, "Tom");
        assert!(state.editing.is_none());
        assert_eq!(notification_detail(&actions), Some("Pet has been successfully saved."));
    }

    #[test]
    fn save_does_not_block_on_validation() {
        let mut state = loaded();
        dispatch(&mut state, Event::New);

        let actions = dispatch(&mut state, Event::Save);

        assert_eq!(actions.len(), 1);
        let vm = state.compute_viewmodel();
        let dialog = vm.dialog.unwrap();
        assert_eq!(dialog.violations, vec![(PetField::Name, "Name is required.".to_string())]);
    }

    #[test]
    fn failed_save_closes_session_and_keeps_store() {
        let mut state = loaded();
        state.selection.select(Some(PetId::Number(2)));
        dispatch(&mut state, Event::Edit(PetId::Number(2)));
        dispatch(
            &mut state,
            Event::FieldChange {
                field: PetField::Name,
                value: "Rexy".to_string(),
            },
        );
        let ticket = state.editing.as_ref().unwrap().ticket();
        dispatch(&mut state, Event::Save);

        let actions = dispatch(
            &mut state,
            Event::Gateway(GatewayResponse::Failed {
                op: GatewayOp::Update,
                ticket: Some(ticket),
                message: "500".to_string(),
            }),
        );

        assert!(state.editing.is_none());
        assert_eq!(state.records()[1].name, "Rex");
        match &actions[..] {
            [Action::Notify(n)] => {
                assert_eq!(n.severity, Severity::Error);
                assert_eq!(n.detail, "An unexpected error occured.");
            }
            other => panic!("unexpected actions: {other:?}"),
        }
    }

    #[test]
    fn update_replaces_in_place() {
        let mut state = loaded();
        dispatch(
            &mut state,
            Event::Gateway(GatewayResponse::Updated {
                pet: Pet::new("Rexy", "cat").with_id(2),
                ticket: 99,
            }),
        );

        let names: Vec<&str> = state.records().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Fido", "Rexy"]);
    }

    #[test]
    fn delete_is_applied_before_the_request_runs() {
        let mut state = loaded();
        dispatch(&mut state, Event::Select(Some(PetId::Number(1))));
        dispatch(&mut state, Event::DeleteRequest(PetId::Number(1)));
        assert_eq!(state.phase(), ConsolePhase::ConfirmingDelete);

        let actions = dispatch(&mut state, Event::DeleteConfirm);

        assert_eq!(
            actions,
            vec![Action::Gateway(GatewayRequest::Delete { id: PetId::Number(1) })]
        );
        assert!(!state.store.contains(&PetId::Number(1)));
        assert_eq!(state.phase(), ConsolePhase::Idle);
    }

    #[test]
    fn failed_delete_is_not_rolled_back() {
        let mut state = loaded();
        dispatch(&mut state, Event::Select(Some(PetId::Number(1))));
        dispatch(&mut state, Event::DeleteRequest(PetId::Number(1)));
        dispatch(&mut state, Event::DeleteConfirm);

        let actions = dispatch(
            &mut state,
            Event::Gateway(GatewayResponse::Failed {
                op: GatewayOp::Delete,
                ticket: None,
                message: "timeout".to_string(),
            }),
        );

        assert_eq!(state.store.len(), 1);
        assert_eq!(notification_detail(&actions), Some("An unexpected error occured."));
    }

    #[test]
    fn load_failure_is_silent() {
        let mut state = loaded();
        let (render, actions) = handle_event(
            &mut state,
            &Event::Gateway(GatewayResponse::Failed {
                op: GatewayOp::List,
                ticket: None,
                message: "refused".to_string(),
            }),
        )
        .unwrap();

        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.store.len(), 2);
    }

    #[test]
    fn edit_and_delete_of_unselected_rows_are_ignored() {
        let mut state = loaded();
        dispatch(&mut state, Event::Select(Some(PetId::Number(1))));

        let (render_edit, _) = handle_event(&mut state, &Event::Edit(PetId::Number(2))).unwrap();
        let (render_delete, _) =
            handle_event(&mut state, &Event::DeleteRequest(PetId::Number(2))).unwrap();

        assert!(!render_edit && !render_delete);
        assert_eq!(state.phase(), ConsolePhase::Selected);
    }

    #[test]
    fn global_filter_and_clear() {
        let mut state = loaded();
        dispatch(
            &mut state,
            Event::FilterChange {
                key: FilterKey::Global,
                value: Some("do".to_string()),
            },
        );
        assert_eq!(state.visible_records().len(), 1);
        assert_eq!(state.global_filter_value, "do");

        dispatch(&mut state, Event::ClearFilters);

        assert_eq!(state.visible_records().len(), 2);
        assert!(state.filter_state().global().value.is_none());
        assert!(state.global_filter_value.is_empty());
    }

    #[test]
    fn filtering_clamps_the_page() {
        let mut state = AppState::new(Theme::default());
        let pets = (1..=12_i64).map(|i| Pet::new(format!("P{i}"), "").with_id(i)).collect();
        dispatch(&mut state, Event::Gateway(GatewayResponse::Listed { pets }));
        dispatch(&mut state, Event::PageSize(5));
        dispatch(&mut state, Event::Page(2));
        assert_eq!(state.pagination.page(), 2);

        dispatch(
            &mut state,
            Event::FilterChange {
                key: FilterKey::Field(PetField::Name),
                value: Some("P1".to_string()),
            },
        );

        assert_eq!(state.visible.len(), 4);
        assert_eq!(state.pagination.page(), 0);
    }

    #[test]
    fn errors_leave_state_untouched() {
        let mut state = loaded();
        dispatch(&mut state, Event::New);

        assert!(handle_event(
            &mut state,
            &Event::FieldChange {
                field: PetField::Id,
                value: "7".to_string()
            }
        )
        .is_err());
        assert!(handle_event(&mut state, &Event::PageSize(7)).is_err());
        assert!(handle_event(
            &mut state,
            &Event::FilterChange {
                key: FilterKey::Field(PetField::Id),
                value: Some("1".to_string())
            }
        )
        .is_err());
        assert_eq!(state.editing.as_ref().unwrap().record.id, None);
        assert_eq!(state.pagination.page_size(), 10);
    }

    #[test]
    fn global_search_stays_contains_after_match_command() {
        let mut state = loaded();

        assert!(handle_event(
            &mut state,
            &Event::FilterMatchMode {
                key: FilterKey::Global,
                mode: MatchMode::StartsWith,
            }
        )
        .is_err());
        dispatch(
            &mut state,
            Event::FilterChange {
                key: FilterKey::Global,
                value: Some("og".to_string()),
            },
        );

        assert_eq!(state.visible_records().len(), 1);
        assert_eq!(state.visible_records()[0].name, "Fido");
    }
}
