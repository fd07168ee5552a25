//! Console phase state machine.
//!
//! ```text
//! Idle ──select──▶ Selected ──edit──────▶ Editing ──────────┐
//!  │                  │                                      ├──▶ Idle
//!  │                  └──delete request──▶ ConfirmingDelete ─┘
//!  └──new──▶ Editing
//! ```
//!
//! The phase is derived from [`AppState`](crate::app::AppState) rather than
//! stored, so it can never disagree with the session and dialog fields.

/// Which interaction the console is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsolePhase {
    /// Nothing selected, no dialog open.
    Idle,

    /// A record is selected; edit and delete are enabled for it.
    Selected,

    /// The "Pet Details" dialog is open.
    Editing,

    /// The delete confirmation dialog is open.
    ConfirmingDelete,
}

impl ConsolePhase {
    /// Returns `true` while a modal dialog blocks table interaction.
    #[must_use]
    pub const fn is_modal(self) -> bool {
        matches!(self, Self::Editing | Self::ConfirmingDelete)
    }
}
