pub mod client;
pub mod config;
pub mod conversation;
pub mod dispatch;
pub mod error;
pub mod panel;
pub mod profile;
pub mod sanitize;
pub mod session;
pub mod state;
pub mod viewport;

// Re-export main types for convenience
pub use client::{AskClient, DEFAULT_API_URL};
pub use config::Config;
pub use conversation::ConversationStore;
pub use dispatch::{AnswerSource, Dispatcher};
pub use error::{AskError, ConfigError, ConversationError};
pub use panel::{PanelEvent, PanelState, ResponsivePanel};
pub use profile::{Profile, DEFAULT_PROFILE};
pub use sanitize::sanitize;
pub use session::{PendingQuestion, Session, SessionUiState, FALLBACK_ERROR_TEXT};
pub use state::{ChatMessage, ChatRole};
pub use viewport::{Viewport, ViewportSignal, ViewportSubscription, NARROW_BREAKPOINT_PX};
