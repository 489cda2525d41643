//! Request dispatch: one outbound call per accepted submission.

use async_trait::async_trait;
use tokio::task::JoinHandle;

use crate::error::AskError;
use crate::session::{PendingQuestion, Session};

/// Anything that can turn a question into an answer
#[async_trait]
pub trait AnswerSource: Send + Sync {
    async fn ask(&self, question: &str) -> Result<String, AskError>;
}

pub struct Dispatcher<S> {
    source: S,
}

impl<S: AnswerSource> Dispatcher<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Submit a question and wait for it to settle.
    ///
    /// Returns the text that was appended for the assistant (the sanitized
    /// answer or the fallback), or `None` when the submission was ignored.
    pub async fn submit(&self, session: &mut Session, question: &str) -> Option<String> {
        let pending = session.begin_submit(question)?;
        let outcome = self.source.ask(pending.question()).await;
        Some(session.complete(pending, outcome).content.clone())
    }
}

impl<S: AnswerSource + Clone + 'static> Dispatcher<S> {
    /// Run the outbound call for `pending` on a background task, so the
    /// caller can keep handling input while it is in flight. Feed the
    /// result to [`Session::complete`] with [`Dispatcher::settle`].
    pub fn spawn(&self, pending: &PendingQuestion) -> JoinHandle<Result<String, AskError>> {
        let source = self.source.clone();
        let question = pending.question().to_string();
        tokio::spawn(async move { source.ask(&question).await })
    }

    /// Await a spawned call and complete the pending submission with it
    pub async fn settle(
        &self,
        session: &mut Session,
        pending: PendingQuestion,
        task: JoinHandle<Result<String, AskError>>,
    ) {
        let outcome = match task.await {
            Ok(outcome) => outcome,
            Err(e) => Err(AskError::TaskFailed(e.to_string())),
        };
        session.complete(pending, outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::FALLBACK_ERROR_TEXT;
    use crate::state::{ChatMessage, ChatRole};
    use crate::viewport::Viewport;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Answers from a fixed script and counts calls
    #[derive(Clone)]
    struct ScriptedSource {
        answer: Option<&'static str>,
        calls: Arc<AtomicUsize>,
    }

    impl ScriptedSource {
        fn answering(answer: &'static str) -> Self {
            Self {
                answer: Some(answer),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn failing() -> Self {
            Self {
                answer: None,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AnswerSource for ScriptedSource {
        async fn ask(&self, _question: &str) -> Result<String, AskError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.answer {
                Some(answer) => Ok(answer.to_string()),
                None => Err(AskError::Status {
                    status: reqwest::StatusCode::BAD_GATEWAY,
                    body: "upstream down".to_string(),
                }),
            }
        }
    }

    fn session() -> Session {
        Session::new("Merhaba.", Viewport::new(1280))
    }

    #[tokio::test]
    async fn test_successful_round_trip() {
        let dispatcher = Dispatcher::new(ScriptedSource::answering("**Skills**\n\n\n\nC#, .NET"));
        let mut session = session();
        assert_eq!(session.messages().len(), 1);

        let appended = dispatcher
            .submit(&mut session, "Teknik yetkinlikleriniz neler?")
            .await;

        assert_eq!(appended.as_deref(), Some("**Skills**\n\nC#, .NET"));
        assert_eq!(session.messages().len(), 3);
        assert_eq!(session.messages()[1], ChatMessage::user("Teknik yetkinlikleriniz neler?"));
        assert_eq!(session.messages()[2], ChatMessage::assistant("**Skills**\n\nC#, .NET"));
        assert!(!session.is_busy());
        assert_eq!(dispatcher.source().calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_appends_fallback() {
        let dispatcher = Dispatcher::new(ScriptedSource::failing());
        let mut session = session();

        let appended = dispatcher.submit(&mut session, "soru").await;

        assert_eq!(appended.as_deref(), Some(FALLBACK_ERROR_TEXT));
        assert_eq!(session.messages().len(), 3);
        assert_eq!(session.messages()[2].role, ChatRole::Assistant);
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn test_blank_submit_makes_no_call() {
        let dispatcher = Dispatcher::new(ScriptedSource::answering("unused"));
        let mut session = session();

        assert_eq!(dispatcher.submit(&mut session, "  \n ").await, None);
        assert_eq!(session.messages().len(), 1);
        assert!(!session.is_busy());
        assert_eq!(dispatcher.source().calls(), 0);
    }

    #[tokio::test]
    async fn test_spawned_call_keeps_session_usable() {
        let dispatcher = Dispatcher::new(ScriptedSource::answering("cevap"));
        let mut session = Session::new("Merhaba.", Viewport::new(500));

        let pending = session.begin_submit("ilk soru").unwrap();
        let task = dispatcher.spawn(&pending);

        // in flight: a second submit is a no-op and makes no call
        assert_eq!(dispatcher.submit(&mut session, "ikinci soru").await, None);
        assert_eq!(session.messages().len(), 2);
        assert!(session.is_busy());
        // the panel still responds
        session.open_panel();
        assert!(session.panel().is_open());

        dispatcher.settle(&mut session, pending, task).await;

        assert!(!session.is_busy());
        assert_eq!(session.messages().len(), 3);
        assert_eq!(session.messages()[2].content, "cevap");
        assert_eq!(dispatcher.source().calls(), 1);
    }

    #[tokio::test]
    async fn test_panicked_task_settles_with_fallback() {
        let dispatcher = Dispatcher::new(ScriptedSource::answering("unused"));
        let mut session = session();
        let pending = session.begin_submit("soru").unwrap();
        let task: JoinHandle<Result<String, AskError>> =
            tokio::spawn(async { panic!("boom") });

        dispatcher.settle(&mut session, pending, task).await;

        assert_eq!(session.messages()[2].content, FALLBACK_ERROR_TEXT);
        assert!(!session.is_busy());
    }
}
