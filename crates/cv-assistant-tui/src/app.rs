use cv_assistant_core::{
    AskClient, AskError, Dispatcher, PendingQuestion, Profile, Session, ViewportSubscription,
};
use ratatui::layout::Rect;
use tokio::task::JoinHandle;

type AnswerTask = JoinHandle<Result<String, AskError>>;

pub struct App {
    // Core state
    pub should_quit: bool,
    pub profile: Profile,
    pub session: Session,
    pub dispatcher: Dispatcher<AskClient>,
    pub viewport: ViewportSubscription,
    pub in_flight: Option<(PendingQuestion, AnswerTask)>,

    // Input state
    pub input_cursor: usize, // cursor position (chars) in the draft

    // Transcript scroll state
    pub chat_scroll: u16,
    pub max_chat_scroll: u16,
    pub chat_height: u16,
    pub stick_to_bottom: bool,
    pub seen_revision: u64,

    // Profile panel scroll state
    pub panel_scroll: u16,
    pub max_panel_scroll: u16,

    // Animation state
    pub animation_frame: u8, // 0-2 for the loading dots

    // Areas recorded during render for mouse hit-testing
    pub chat_area: Option<Rect>,
    pub panel_area: Option<Rect>,
    pub overlay_area: Option<Rect>,
    pub menu_area: Option<Rect>,
    pub quick_question_areas: Vec<Rect>,
}

impl App {
    pub fn new(profile: Profile, client: AskClient, viewport: ViewportSubscription) -> Self {
        let session = Session::from_profile(&profile, viewport.current());
        tracing::info!(
            endpoint = client.endpoint(),
            width = viewport.current().width,
            "session started"
        );

        Self {
            should_quit: false,
            profile,
            session,
            dispatcher: Dispatcher::new(client),
            viewport,
            in_flight: None,

            input_cursor: 0,

            chat_scroll: 0,
            max_chat_scroll: 0,
            chat_height: 0,
            stick_to_bottom: true,
            seen_revision: 0,

            panel_scroll: 0,
            max_panel_scroll: 0,

            animation_frame: 0,

            chat_area: None,
            panel_area: None,
            overlay_area: None,
            menu_area: None,
            quick_question_areas: Vec::new(),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.session.is_busy()
    }

    /// Submit the input draft
    pub fn submit_draft(&mut self) {
        if let Some(pending) = self.session.submit_draft() {
            self.start(pending);
        }
    }

    /// Submit one of the preset questions
    pub fn submit_quick_question(&mut self, index: usize) {
        let Some(question) = self.profile.quick_question(index) else {
            return;
        };
        if let Some(pending) = self.session.begin_submit(question) {
            self.start(pending);
        }
    }

    fn start(&mut self, pending: PendingQuestion) {
        self.input_cursor = 0;
        self.animation_frame = 0;
        let task = self.dispatcher.spawn(&pending);
        self.in_flight = Some((pending, task));
    }

    /// Apply the answer once the background call has finished
    pub async fn poll_answer(&mut self) {
        let finished = matches!(&self.in_flight, Some((_, task)) if task.is_finished());
        if !finished {
            return;
        }
        if let Some((pending, task)) = self.in_flight.take() {
            self.dispatcher.settle(&mut self.session, pending, task).await;
        }
    }

    /// Re-evaluate the breakpoint if the terminal width changed
    pub fn sync_viewport(&mut self) {
        if let Some(viewport) = self.viewport.poll() {
            self.session.apply_viewport(viewport);
        }
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.is_busy() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    /// Jump to the latest message whenever the transcript grew
    pub fn follow_new_messages(&mut self) {
        let revision = self.session.conversation().revision();
        if revision != self.seen_revision {
            self.seen_revision = revision;
            self.stick_to_bottom = true;
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.chat_scroll = self.chat_scroll.saturating_sub(lines);
        self.stick_to_bottom = false;
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.chat_scroll = self.chat_scroll.saturating_add(lines).min(self.max_chat_scroll);
        self.stick_to_bottom = self.chat_scroll >= self.max_chat_scroll;
    }

    pub fn scroll_half_page_up(&mut self) {
        self.scroll_up((self.chat_height / 2).max(1));
    }

    pub fn scroll_half_page_down(&mut self) {
        self.scroll_down((self.chat_height / 2).max(1));
    }

    pub fn scroll_panel_up(&mut self, lines: u16) {
        self.panel_scroll = self.panel_scroll.saturating_sub(lines);
    }

    pub fn scroll_panel_down(&mut self, lines: u16) {
        self.panel_scroll = self.panel_scroll.saturating_add(lines).min(self.max_panel_scroll);
    }

    pub fn clear_hit_areas(&mut self) {
        self.chat_area = None;
        self.panel_area = None;
        self.overlay_area = None;
        self.menu_area = None;
        self.quick_question_areas.clear();
    }
}
