//! The session controller.
//!
//! [`Session`] owns every piece of mutable UI state: the transcript, the
//! input draft, the busy flag and the panel. Front ends drive it through the
//! command methods below instead of mutating fields directly.
//!
//! Submitting a question is a two-step command. [`Session::begin_submit`]
//! appends the visitor's message right away and hands back a
//! [`PendingQuestion`]; once the remote call settles,
//! [`Session::complete`] consumes that token and appends the answer or the
//! fallback text. The visitor's message is never rolled back.

use serde::Serialize;

use crate::conversation::ConversationStore;
use crate::error::AskError;
use crate::panel::{PanelEvent, PanelState, ResponsivePanel};
use crate::profile::Profile;
use crate::sanitize::sanitize;
use crate::state::ChatMessage;
use crate::viewport::Viewport;

/// Shown in place of an answer whenever the remote call fails
pub const FALLBACK_ERROR_TEXT: &str = "Üzgünüm, bir hata oluştu. Lütfen tekrar deneyin.";

/// A submission that has been recorded but not yet answered
#[derive(Debug)]
#[must_use = "a pending question must be completed to clear the busy flag"]
pub struct PendingQuestion {
    question: String,
}

impl PendingQuestion {
    pub fn question(&self) -> &str {
        &self.question
    }
}

/// Snapshot of the per-session UI flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUiState {
    pub input_draft: String,
    pub is_busy: bool,
    pub is_panel_open: bool,
}

#[derive(Debug)]
pub struct Session {
    conversation: ConversationStore,
    input_draft: String,
    busy: bool,
    panel: ResponsivePanel,
}

impl Session {
    pub fn new(greeting: impl Into<String>, viewport: Viewport) -> Self {
        Self {
            conversation: ConversationStore::new(greeting),
            input_draft: String::new(),
            busy: false,
            panel: ResponsivePanel::new(viewport),
        }
    }

    pub fn from_profile(profile: &Profile, viewport: Viewport) -> Self {
        Self::new(profile.greeting, viewport)
    }

    pub fn conversation(&self) -> &ConversationStore {
        &self.conversation
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.conversation.messages()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn input_draft(&self) -> &str {
        &self.input_draft
    }

    pub fn input_draft_mut(&mut self) -> &mut String {
        &mut self.input_draft
    }

    pub fn set_input_draft(&mut self, draft: impl Into<String>) {
        self.input_draft = draft.into();
    }

    pub fn panel(&self) -> &ResponsivePanel {
        &self.panel
    }

    pub fn ui_state(&self) -> SessionUiState {
        SessionUiState {
            input_draft: self.input_draft.clone(),
            is_busy: self.busy,
            is_panel_open: self.panel.is_open(),
        }
    }

    // Panel commands

    pub fn open_panel(&mut self) -> PanelState {
        self.panel.handle(PanelEvent::MenuActivated)
    }

    pub fn close_panel(&mut self) -> PanelState {
        self.panel.handle(PanelEvent::CloseRequested)
    }

    pub fn click_overlay(&mut self) -> PanelState {
        self.panel.handle(PanelEvent::OverlayClicked)
    }

    pub fn apply_viewport(&mut self, viewport: Viewport) -> PanelState {
        self.panel.handle(PanelEvent::ViewportChanged(viewport))
    }

    // Submission commands

    /// Submit whatever is in the input draft
    pub fn submit_draft(&mut self) -> Option<PendingQuestion> {
        let draft = self.input_draft.clone();
        self.begin_submit(&draft)
    }

    /// First half of a submission.
    ///
    /// Ignored (returns `None`, nothing changes) when the trimmed question is
    /// empty or another question is still in flight. Otherwise marks the
    /// session busy, clears the draft, closes the panel and appends the
    /// visitor's message.
    pub fn begin_submit(&mut self, question: &str) -> Option<PendingQuestion> {
        let question = question.trim();
        if question.is_empty() {
            tracing::debug!("ignoring empty submission");
            return None;
        }
        if self.busy {
            tracing::debug!("ignoring submission while a question is in flight");
            return None;
        }

        self.conversation.append_user(question).ok()?;
        self.busy = true;
        self.input_draft.clear();
        self.panel.handle(PanelEvent::MessageSubmitted);

        tracing::info!(chars = question.chars().count(), "question submitted");
        Some(PendingQuestion {
            question: question.to_string(),
        })
    }

    /// Second half of a submission. Always clears the busy flag.
    pub fn complete(
        &mut self,
        pending: PendingQuestion,
        outcome: Result<String, AskError>,
    ) -> &ChatMessage {
        let PendingQuestion { question } = pending;
        let text = match outcome {
            Ok(answer) => {
                tracing::info!(chars = answer.chars().count(), "answer received");
                sanitize(&answer)
            }
            Err(e) => {
                tracing::error!(error = %e, question = %question, "answer request failed");
                FALLBACK_ERROR_TEXT.to_string()
            }
        };
        self.busy = false;
        self.conversation.append_assistant(text)
    }
}
