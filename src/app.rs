use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use crate::config::Config;
use crate::error::{Result, SubmitError};
use crate::link::is_valid_video_link;
use crate::models::{Focus, GenerationResult, LinkStatus};
use crate::progress::{ProgressFill, StageCycle};
use crate::services::GenerationClient;
use crate::tui::AppAction;

/// Pause between a successful response and the results appearing.
pub const REVEAL_DELAY: Duration = Duration::from_millis(500);
/// How long the results take to slide into place once revealed.
pub const REVEAL_TRANSITION: Duration = Duration::from_millis(300);
/// Rows the results start below their resting position.
pub const REVEAL_SLIDE_ROWS: u16 = 2;

const PAGE_ROWS: u16 = 10;

// Message for a finished generation request
pub struct GenerationOutcome {
    pub submission_id: u64,
    pub result: std::result::Result<GenerationResult, SubmitError>,
}

pub struct App {
    // Form
    pub link_input: String,
    pub link_status: LinkStatus,
    pub error_message: Option<String>,
    pub submit_enabled: bool,
    pub focus: Focus,
    pub show_help: bool,

    // Loading
    pub loading: bool,
    pub stages: StageCycle,
    pub progress: ProgressFill,

    // Results
    pub result: Option<GenerationResult>,
    pub submitted_link: Option<String>,
    pub results_visible: bool,
    pub results_scroll: u16,
    reveal_at: Option<Instant>,
    revealed_at: Option<Instant>,

    // Async state
    next_submission_id: u64,
    pending_submission_id: Option<u64>,
    generation_rx: mpsc::Receiver<GenerationOutcome>,
    generation_tx: mpsc::Sender<GenerationOutcome>,

    // Services
    generator: Arc<GenerationClient>,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        let generator = GenerationClient::new(config.endpoint()?, config.request_timeout())?;
        tracing::debug!("Generation endpoint: {}", generator.endpoint());

        let (generation_tx, generation_rx) = mpsc::channel(1);

        Ok(Self {
            link_input: String::new(),
            link_status: LinkStatus::Empty,
            error_message: None,
            submit_enabled: true,
            focus: Focus::Input,
            show_help: false,
            loading: false,
            stages: StageCycle::default(),
            progress: ProgressFill::default(),
            result: None,
            submitted_link: None,
            results_visible: false,
            results_scroll: 0,
            reveal_at: None,
            revealed_at: None,
            next_submission_id: 0,
            pending_submission_id: None,
            generation_rx,
            generation_tx,
            generator: Arc::new(generator),
        })
    }

    pub fn handle_action(&mut self, action: AppAction) -> bool {
        match action {
            AppAction::Quit => return true,

            AppAction::Submit => self.submit(),

            AppAction::FocusNext => {
                self.focus = self.focus.toggle();
            }

            AppAction::ScrollUp => {
                self.results_scroll = self.results_scroll.saturating_sub(1);
            }

            AppAction::ScrollDown => {
                if self.results_visible {
                    self.results_scroll = self.results_scroll.saturating_add(1);
                }
            }

            AppAction::PageUp => {
                self.results_scroll = self.results_scroll.saturating_sub(PAGE_ROWS);
            }

            AppAction::PageDown => {
                if self.results_visible {
                    self.results_scroll = self.results_scroll.saturating_add(PAGE_ROWS);
                }
            }

            AppAction::OpenVideo => self.open_video(),

            AppAction::ShowHelp => {
                self.show_help = true;
            }

            AppAction::HideHelp => {
                self.show_help = false;
            }

            AppAction::InputChar(c) => {
                self.link_input.push(c);
                self.on_input_changed();
            }

            AppAction::InputBackspace => {
                self.link_input.pop();
                self.on_input_changed();
            }

            AppAction::InputClear => {
                self.link_input.clear();
                self.on_input_changed();
            }

            AppAction::InputPaste(text) => {
                // Single-line field
                self.link_input
                    .extend(text.chars().filter(|c| *c != '\n' && *c != '\r'));
                self.focus = Focus::Input;
                self.on_input_changed();
            }
        }

        false
    }

    /// Live validation feedback. An empty field is neutral rather than an
    /// error, so it leaves submission enabled.
    pub fn on_input_changed(&mut self) {
        self.link_status = LinkStatus::of(&self.link_input);
        match self.link_status {
            LinkStatus::Empty | LinkStatus::Valid => {
                self.error_message = None;
                self.submit_enabled = !self.loading;
            }
            LinkStatus::Invalid => {
                self.error_message = Some(SubmitError::InvalidLink.user_message());
                self.submit_enabled = false;
            }
        }
    }

    pub fn submit(&mut self) {
        if !self.submit_enabled {
            tracing::debug!("Submit ignored: control disabled");
            if self.link_status == LinkStatus::Invalid {
                self.focus = Focus::Input;
            }
            return;
        }

        let link = self.link_input.trim().to_string();

        if link.is_empty() {
            self.reject(SubmitError::EmptyLink);
            return;
        }

        if !is_valid_video_link(&link) {
            self.reject(SubmitError::InvalidLink);
            return;
        }

        self.start_loading(Instant::now());

        let submission_id = self.next_submission_id;
        self.next_submission_id += 1;
        self.pending_submission_id = Some(submission_id);
        self.submitted_link = Some(link.clone());

        tracing::info!("Submitting {}", link);

        // Spawn background task for the generation request
        let generator = Arc::clone(&self.generator);
        let tx = self.generation_tx.clone();

        tokio::spawn(async move {
            let result = generator.generate(&link).await;
            let _ = tx.send(GenerationOutcome { submission_id, result }).await;
        });
    }

    fn reject(&mut self, err: SubmitError) {
        tracing::debug!("Submission rejected: {}", err);
        self.error_message = Some(err.user_message());
        self.focus = Focus::Input;
    }

    fn start_loading(&mut self, now: Instant) {
        self.loading = true;
        self.submit_enabled = false;
        self.error_message = None;

        self.result = None;
        self.results_visible = false;
        self.results_scroll = 0;
        self.reveal_at = None;
        self.revealed_at = None;

        self.stages.start(now);
        self.progress.start(now);
    }

    /// Poll for a finished generation request (non-blocking)
    pub fn poll_generation_result(&mut self) {
        if let Ok(outcome) = self.generation_rx.try_recv() {
            self.finish_generation(outcome, Instant::now());
        }
    }

    /// Wait until the pending submission, if any, has resolved.
    pub async fn await_generation(&mut self) {
        while self.pending_submission_id.is_some() {
            match self.generation_rx.recv().await {
                Some(outcome) => self.finish_generation(outcome, Instant::now()),
                None => break,
            }
        }
    }

    fn finish_generation(&mut self, outcome: GenerationOutcome, now: Instant) {
        // Only process the submission we're waiting for
        if self.pending_submission_id != Some(outcome.submission_id) {
            tracing::debug!("Dropping stale outcome for submission {}", outcome.submission_id);
            return;
        }
        self.pending_submission_id = None;

        match outcome.result {
            Ok(result) => {
                tracing::info!(
                    "Generated \"{}\" ({} tags, {} hashtags)",
                    result.blog_post.title,
                    result.blog_post.tags.len(),
                    result.instagram_post.hashtags.len()
                );
                self.progress.complete();
                self.result = Some(result);
                self.reveal_at = Some(now + REVEAL_DELAY);
            }
            Err(err) => {
                tracing::info!("Failed to generate content: {}", err);
                self.progress.reset();
                self.error_message = Some(err.user_message());
                self.focus = Focus::Input;
            }
        }

        self.loading = false;
        self.submit_enabled = true;
        self.stages.reset();
    }

    /// Advance the loading simulations and reveal results once due.
    pub fn tick(&mut self, now: Instant) {
        self.stages.tick(now);
        self.progress.tick(now);

        if let Some(reveal_at) = self.reveal_at {
            if now >= reveal_at {
                self.reveal_at = None;
                self.revealed_at = Some(now);
                self.results_visible = true;
                // Bring the new results into view
                self.results_scroll = 0;
            }
        }
    }

    /// Remaining slide-in offset in rows; zero once the transition is over.
    pub fn reveal_offset(&self, now: Instant) -> u16 {
        let Some(revealed_at) = self.revealed_at else {
            return 0;
        };
        let elapsed = now.saturating_duration_since(revealed_at);
        if elapsed >= REVEAL_TRANSITION {
            return 0;
        }
        let remaining = (REVEAL_TRANSITION - elapsed).as_millis();
        let rows = remaining * REVEAL_SLIDE_ROWS as u128;
        rows.div_ceil(REVEAL_TRANSITION.as_millis()) as u16
    }

    fn open_video(&self) {
        let Some(link) = &self.submitted_link else {
            return;
        };
        let url = if link.starts_with("http://") || link.starts_with("https://") {
            link.clone()
        } else {
            format!("https://{link}")
        };
        if let Err(e) = open::that(&url) {
            tracing::warn!("Failed to open {}: {}", url, e);
        }
    }
}
