//! Event loop driver.
//!
//! [`Console`] owns the application state and a gateway. It feeds events to
//! [`handle_event`] and executes the returned actions: gateway requests become
//! in-flight tasks, notifications are queued with an expiry, exports are
//! written to disk. Completed gateway tasks are fed back as
//! [`Event::Gateway`] in the order they finish.
//!
//! ```text
//! Event → handle_event → Actions ─┬─ Gateway  → in-flight task ─┐
//!   ↑                             ├─ Notify   → toast queue     │
//!   │                             └─ Export   → file on disk    │
//!   └──────────────── Event::Gateway(response) ─────────────────┘
//! ```
//!
//! Requests are never sequenced or cancelled; when two calls overlap, the
//! last one to complete wins.

use crate::app::{handle_event, Action, AppState, Event, Notification};
use crate::domain::error::Result;
use crate::export::{self, ExportFormat};
use crate::gateway::{execute, Gateway, GatewayResponse};
use crate::ui::renderer;
use crate::ui::viewmodel::{ToastInfo, UIViewModel};
use chrono::Utc;
use futures_util::future::BoxFuture;
use futures_util::stream::{FuturesUnordered, StreamExt};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// A notification and the instant it stops being shown.
#[derive(Debug, Clone)]
struct LiveNotification {
    notification: Notification,
    expires_at: Instant,
}

/// Runs the console against a gateway.
pub struct Console<G: Gateway> {
    state: AppState,
    gateway: G,
    in_flight: FuturesUnordered<BoxFuture<'static, GatewayResponse>>,
    notifications: Vec<LiveNotification>,
    export_dir: PathBuf,
    last_export: Option<PathBuf>,
}

impl<G: Gateway> Console<G> {
    #[must_use]
    pub fn new(state: AppState, gateway: G, export_dir: impl Into<PathBuf>) -> Self {
        Self {
            state,
            gateway,
            in_flight: FuturesUnordered::new(),
            notifications: Vec::new(),
            export_dir: export_dir.into(),
            last_export: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Path of the most recent successful export.
    #[must_use]
    pub fn last_export(&self) -> Option<&Path> {
        self.last_export.as_deref()
    }

    /// Handles one event and runs its actions.
    ///
    /// Returns whether the screen should be redrawn.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`]; no action runs in that case.
    pub fn dispatch(&mut self, event: &Event) -> Result<bool> {
        let (mut render, actions) = handle_event(&mut self.state, event)?;
        for action in actions {
            render |= self.execute_action(action);
        }
        Ok(render)
    }

    /// Executes one side effect. Returns whether it changed what is shown.
    fn execute_action(&mut self, action: Action) -> bool {
        match action {
            Action::Gateway(request) => {
                tracing::debug!(
                    op = %request.op(),
                    in_flight = self.in_flight.len(),
                    "starting gateway call"
                );
                self.in_flight.push(execute(&self.gateway, request));
                false
            }
            Action::Notify(notification) => {
                self.notify(notification);
                true
            }
            Action::Export(format) => {
                self.export(format);
                true
            }
        }
    }

    fn notify(&mut self, notification: Notification) {
        tracing::debug!(
            severity = ?notification.severity,
            detail = %notification.detail,
            "notification raised"
        );
        self.notifications.push(LiveNotification {
            expires_at: Instant::now() + notification.life,
            notification,
        });
    }

    /// Writes every record of the store, regardless of filters, sort or page.
    fn export(&mut self, format: ExportFormat) {
        let columns = export::default_columns();
        match export::export_to_dir(
            &self.export_dir,
            format,
            self.state.store.pets(),
            &columns,
            Utc::now(),
        ) {
            Ok(path) => self.last_export = Some(path),
            Err(e) => {
                tracing::warn!(format = %format, error = %e, "export failed");
                let life = self.state.notification_life;
                self.notify(Notification::error(e.to_string(), life));
            }
        }
    }

    #[must_use]
    pub fn has_in_flight(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Waits for the next gateway call to finish.
    ///
    /// Resolves to `None` immediately when nothing is in flight. Cancel-safe:
    /// dropping the future leaves every call in flight.
    pub async fn next_response(&mut self) -> Option<GatewayResponse> {
        self.in_flight.next().await
    }

    /// Applies every in-flight response as it completes, until none remain.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub async fn settle(&mut self) -> Result<()> {
        while let Some(response) = self.next_response().await {
            self.dispatch(&Event::Gateway(response))?;
        }
        Ok(())
    }

    /// Drops notifications whose life ended before `now`. Returns whether any
    /// were dropped.
    pub fn expire_notifications(&mut self, now: Instant) -> bool {
        let before = self.notifications.len();
        self.notifications.retain(|live| live.expires_at > now);
        before != self.notifications.len()
    }

    /// Notifications still shown at `now`, oldest first.
    pub fn live_notifications(&self, now: Instant) -> impl Iterator<Item = &Notification> {
        self.notifications
            .iter()
            .filter(move |live| live.expires_at > now)
            .map(|live| &live.notification)
    }

    /// View model including the live notifications.
    #[must_use]
    pub fn view(&self) -> UIViewModel {
        let mut vm = self.state.compute_viewmodel();
        vm.toasts = self
            .live_notifications(Instant::now())
            .map(|notification| ToastInfo {
                severity: notification.severity,
                summary: notification.summary.clone(),
                detail: notification.detail.clone(),
            })
            .collect();
        vm
    }

    /// Renders the current frame.
    #[must_use]
    pub fn render(&self, cols: usize) -> String {
        renderer::render(&self.view(), &self.state.theme, cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::notification::{self, Severity};
    use crate::app::ConsolePhase;
    use crate::domain::{Pet, PetField, PetId};
    use crate::gateway::{GatewayOp, MemoryGateway};
    use crate::ui::Theme;
    use std::time::Duration;

    async fn loaded(gateway: MemoryGateway) -> Console<MemoryGateway> {
        let mut console = Console::new(AppState::new(Theme::default()), gateway, ".");
        console.dispatch(&Event::Load).unwrap();
        console.settle().await.unwrap();
        console
    }

    fn details(console: &Console<MemoryGateway>) -> Vec<String> {
        console
            .live_notifications(Instant::now())
            .map(|n| n.detail.clone())
            .collect()
    }

    fn set_name(console: &mut Console<MemoryGateway>, name: &str) {
        console
            .dispatch(&Event::FieldChange {
                field: PetField::Name,
                value: name.to_string(),
            })
            .unwrap();
    }

    #[tokio::test]
    async fn load_populates_store() {
        let console = loaded(MemoryGateway::sample()).await;

        assert_eq!(console.state().store.len(), 4);
        assert_eq!(console.state().visible.len(), 4);
        assert!(!console.has_in_flight());
        assert!(details(&console).is_empty());
    }

    #[tokio::test]
    async fn failed_load_is_silent() {
        let gateway = MemoryGateway::sample();
        gateway.fail(GatewayOp::List);
        let console = loaded(gateway).await;

        assert!(console.state().store.is_empty());
        assert!(details(&console).is_empty());
    }

    #[tokio::test]
    async fn delete_removes_locally_before_response() {
        let gateway = MemoryGateway::sample();
        let mut console = loaded(gateway.clone()).await;
        gateway.hold();

        console.dispatch(&Event::Select(Some(PetId::Number(2)))).unwrap();
        console.dispatch(&Event::DeleteRequest(PetId::Number(2))).unwrap();
        console.dispatch(&Event::DeleteConfirm).unwrap();

        assert!(console.has_in_flight());
        assert!(!console.state().store.contains(&PetId::Number(2)));
        assert_eq!(gateway.pets().len(), 4);

        gateway.release();
        console.settle().await.unwrap();

        assert_eq!(gateway.pets().len(), 3);
        assert_eq!(details(&console), vec![notification::DELETED]);
    }

    #[tokio::test]
    async fn failed_delete_is_not_rolled_back() {
        let gateway = MemoryGateway::sample();
        let mut console = loaded(gateway.clone()).await;
        gateway.fail(GatewayOp::Delete);

        console.dispatch(&Event::Select(Some(PetId::Number(1)))).unwrap();
        console.dispatch(&Event::DeleteRequest(PetId::Number(1))).unwrap();
        console.dispatch(&Event::DeleteConfirm).unwrap();
        console.settle().await.unwrap();

        assert!(!console.state().store.contains(&PetId::Number(1)));
        assert_eq!(gateway.pets().len(), 4);
        let toasts: Vec<_> = console.live_notifications(Instant::now()).collect();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].severity, Severity::Error);
        assert_eq!(toasts[0].detail, notification::UNEXPECTED_ERROR);
    }

    #[tokio::test]
    async fn create_applies_only_after_confirmation() {
        let gateway = MemoryGateway::sample();
        let mut console = loaded(gateway.clone()).await;
        gateway.hold();

        console.dispatch(&Event::New).unwrap();
        set_name(&mut console, "Tom");
        console.dispatch(&Event::Save).unwrap();

        assert_eq!(console.state().store.len(), 4);
        assert_eq!(console.state().phase(), ConsolePhase::Editing);

        gateway.release();
        console.settle().await.unwrap();

        let first = &console.state().store.pets()[0];
        assert_eq!(first.name, "Tom");
        assert_eq!(first.id, Some(PetId::Number(5)));
        assert!(console.state().editing.is_none());
        assert_eq!(details(&console), vec![notification::SAVED]);
    }

    #[tokio::test]
    async fn update_keeps_position_and_length() {
        let gateway = MemoryGateway::sample();
        let mut console = loaded(gateway.clone()).await;

        console.dispatch(&Event::Select(Some(PetId::Number(3)))).unwrap();
        console.dispatch(&Event::Edit(PetId::Number(3))).unwrap();
        set_name(&mut console, "Dory");
        console.dispatch(&Event::Save).unwrap();
        console.settle().await.unwrap();

        let pets = console.state().store.pets();
        assert_eq!(pets.len(), 4);
        assert_eq!(pets[2].name, "Dory");
        assert_eq!(pets[0].name, "Fido");
        assert_eq!(gateway.pets()[2].name, "Dory");
        assert_eq!(details(&console), vec![notification::UPDATED]);
    }

    #[tokio::test]
    async fn failed_save_closes_dialog_with_error() {
        let gateway = MemoryGateway::sample();
        let mut console = loaded(gateway.clone()).await;
        gateway.fail(GatewayOp::Create);

        console.dispatch(&Event::New).unwrap();
        set_name(&mut console, "Tom");
        console.dispatch(&Event::Save).unwrap();
        console.settle().await.unwrap();

        assert_eq!(console.state().store.len(), 4);
        assert!(console.state().editing.is_none());
        assert_eq!(details(&console), vec![notification::UNEXPECTED_ERROR]);
    }

    #[tokio::test]
    async fn last_completed_list_wins() {
        let gateway = MemoryGateway::sample();
        let mut console = loaded(gateway.clone()).await;

        console.dispatch(&Event::Select(Some(PetId::Number(4)))).unwrap();
        console.dispatch(&Event::DeleteRequest(PetId::Number(4))).unwrap();
        console.dispatch(&Event::DeleteConfirm).unwrap();
        console.settle().await.unwrap();

        let stale = GatewayResponse::Listed {
            pets: vec![Pet::new("Fido", "dog").with_id(1)],
        };
        console.dispatch(&Event::Gateway(stale)).unwrap();
        assert_eq!(console.state().store.len(), 1);

        console.dispatch(&Event::Load).unwrap();
        console.settle().await.unwrap();
        assert_eq!(console.state().store.len(), 3);
    }

    #[tokio::test]
    async fn export_writes_full_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut console =
            Console::new(AppState::new(Theme::default()), MemoryGateway::sample(), dir.path());
        console.dispatch(&Event::Load).unwrap();
        console.settle().await.unwrap();
        console
            .dispatch(&Event::FilterChange {
                key: crate::filter::FilterKey::Global,
                value: Some("Rex".to_string()),
            })
            .unwrap();

        console.dispatch(&Event::Export(ExportFormat::Spreadsheet)).unwrap();

        let path = console.last_export().unwrap().to_path_buf();
        assert!(path.starts_with(dir.path()));
        let contents = std::fs::read_to_string(path).unwrap();
        assert_eq!(contents.lines().count(), 5);
        assert!(contents.starts_with("id,name,description\n"));
    }

    #[tokio::test]
    async fn export_failure_raises_error_toast() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let mut console =
            Console::new(AppState::new(Theme::default()), MemoryGateway::new(), missing);

        console.dispatch(&Event::Export(ExportFormat::Document)).unwrap();

        assert!(console.last_export().is_none());
        let toasts: Vec<_> = console.live_notifications(Instant::now()).collect();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].severity, Severity::Error);
    }

    #[tokio::test]
    async fn notifications_expire_after_their_life() {
        let mut state = AppState::new(Theme::default());
        state.notification_life = Duration::from_secs(5);
        let mut console = Console::new(state, MemoryGateway::sample(), ".");
        console.dispatch(&Event::New).unwrap();
        set_name(&mut console, "Tom");
        console.dispatch(&Event::Save).unwrap();
        console.settle().await.unwrap();

        let now = Instant::now();
        assert_eq!(console.live_notifications(now).count(), 1);
        assert_eq!(console.view().toasts.len(), 1);

        let later = now + Duration::from_secs(10);
        assert_eq!(console.live_notifications(later).count(), 0);
        assert!(console.expire_notifications(later));
        assert!(!console.expire_notifications(later));
    }

    #[tokio::test]
    async fn rendered_frame_shows_toast() {
        let mut console = loaded(MemoryGateway::sample()).await;
        console.dispatch(&Event::New).unwrap();
        set_name(&mut console, "Tom");
        console.dispatch(&Event::Save).unwrap();
        console.settle().await.unwrap();

        let frame = crate::ui::helpers::strip_ansi(&console.render(100));
        assert!(frame.contains("✔ Successful: Pet has been successfully saved."));
        assert!(frame.contains("Showing 1 to 5 of 5 pets"));
    }
}
