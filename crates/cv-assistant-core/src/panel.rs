//! Collapsible profile panel.
//!
//! The panel is always mounted. On wide viewports it is always visible and
//! the open/closed state does not matter; on narrow viewports it only shows
//! while `Open`, drawn over the chat with a dimming overlay behind it.

use crate::viewport::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    /// The menu control was activated
    MenuActivated,
    /// The dimming overlay was clicked
    OverlayClicked,
    /// Explicit close (e.g. Esc)
    CloseRequested,
    /// A message was submitted
    MessageSubmitted,
    /// The viewport width was re-evaluated
    ViewportChanged(Viewport),
}

#[derive(Debug, Clone)]
pub struct ResponsivePanel {
    state: PanelState,
    viewport: Viewport,
}

impl ResponsivePanel {
    pub fn new(viewport: Viewport) -> Self {
        let mut panel = Self {
            state: PanelState::Closed,
            viewport,
        };
        panel.handle(PanelEvent::ViewportChanged(viewport));
        panel
    }

    /// Apply an event and return the resulting state
    pub fn handle(&mut self, event: PanelEvent) -> PanelState {
        self.state = match (self.state, event) {
            (_, PanelEvent::ViewportChanged(viewport)) => {
                self.viewport = viewport;
                if viewport.is_narrow() {
                    self.state
                } else {
                    PanelState::Closed
                }
            }
            // The menu control only exists on narrow viewports
            (PanelState::Closed, PanelEvent::MenuActivated) if self.viewport.is_narrow() => {
                PanelState::Open
            }
            (PanelState::Open, PanelEvent::OverlayClicked)
            | (PanelState::Open, PanelEvent::CloseRequested)
            | (PanelState::Open, PanelEvent::MessageSubmitted) => PanelState::Closed,
            (state, _) => state,
        };
        self.state
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == PanelState::Open
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn is_narrow(&self) -> bool {
        self.viewport.is_narrow()
    }

    pub fn panel_visible(&self) -> bool {
        !self.is_narrow() || self.is_open()
    }

    pub fn overlay_visible(&self) -> bool {
        self.is_narrow() && self.is_open()
    }
}
