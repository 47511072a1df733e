use std::io;
use std::sync::Arc;
use std::time::Duration;

use agentic_core::{SimulationView, TuiConfig, MIN_ROUNDS};
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, warn};

use crate::events::{Action, EventHandler};
use crate::theme::{Theme, ThemeManager};
use crate::ui;

const PAGE_SIZE: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Prompt,
    Rounds,
    Trigger,
    Transcript,
}

impl Focus {
    pub fn all() -> &'static [Focus] {
        &[Focus::Prompt, Focus::Rounds, Focus::Trigger, Focus::Transcript]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Focus::Prompt => "Prompt",
            Focus::Rounds => "Rounds",
            Focus::Trigger => "Start",
            Focus::Transcript => "Conversation",
        }
    }

    pub fn next(&self) -> Focus {
        let all = Focus::all();
        let idx = all.iter().position(|f| f == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    pub fn prev(&self) -> Focus {
        let all = Focus::all();
        let idx = all.iter().position(|f| f == self).unwrap_or(0);
        if idx == 0 {
            all[all.len() - 1]
        } else {
            all[idx - 1]
        }
    }
}

pub struct App {
    pub should_quit: bool,
    pub focus: Focus,
    pub view: Arc<SimulationView>,
    pub theme_manager: ThemeManager,
    pub event_handler: EventHandler,
    pub rounds_input: String,
    pub rounds_error: Option<String>,
    pub transcript_scroll: u16,
    pub show_help: bool,
    pub status_message: Option<String>,
    pub animation_tick: u64,
    pub tick_rate: Duration,
}

impl App {
    pub async fn new(view: Arc<SimulationView>, tui: &TuiConfig) -> Self {
        let mut theme_manager = ThemeManager::new();
        if !theme_manager.set_by_name(&tui.theme) {
            warn!("Unknown theme '{}', using {}", tui.theme, theme_manager.current().name);
        }

        let rounds_input = view.snapshot().await.rounds().to_string();

        Self {
            should_quit: false,
            focus: Focus::Prompt,
            view,
            theme_manager,
            event_handler: EventHandler::new(),
            rounds_input,
            rounds_error: None,
            transcript_scroll: 0,
            show_help: false,
            status_message: Some("Tab to move between fields, F5 to start, F1 for help".to_string()),
            animation_tick: 0,
            tick_rate: Duration::from_millis(tui.tick_rate_ms),
        }
    }

    pub fn theme(&self) -> &Theme {
        self.theme_manager.current()
    }

    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        loop {
            self.animation_tick = self.animation_tick.wrapping_add(1);

            let state = self.view.snapshot().await;
            terminal.draw(|frame| ui::render(frame, self, &state))?;

            if event::poll(self.tick_rate)? {
                let evt = event::read()?;
                self.handle_event(evt).await;
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    async fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            if key.kind == KeyEventKind::Press {
                let action = self.event_handler.handle_key(key, self.focus);
                self.apply(action).await;
            }
        }
    }

    /// Status messages last until the next key press.
    pub async fn apply(&mut self, action: Action) {
        self.status_message = None;

        match action {
            Action::Quit => self.should_quit = true,
            Action::Run => self.start_run().await,
            Action::NextFocus => self.move_focus(self.focus.next()).await,
            Action::PrevFocus => self.move_focus(self.focus.prev()).await,
            Action::InsertChar(c) => match self.focus {
                Focus::Prompt => self.edit_prompt(|p| p.push(c)).await,
                Focus::Rounds => {
                    self.rounds_input.push(c);
                    self.sync_rounds().await;
                }
                _ => {}
            },
            Action::InsertNewline => {
                if self.focus == Focus::Prompt {
                    self.edit_prompt(|p| p.push('\n')).await;
                }
            }
            Action::DeleteChar => match self.focus {
                Focus::Prompt => {
                    self.edit_prompt(|p| {
                        p.pop();
                    })
                    .await
                }
                Focus::Rounds => {
                    self.rounds_input.pop();
                    self.sync_rounds().await;
                }
                _ => {}
            },
            Action::ClearField => {
                if self.focus == Focus::Prompt {
                    self.edit_prompt(String::clear).await;
                }
            }
            Action::IncrementRounds => {
                let rounds = self.view.snapshot().await.rounds().saturating_add(1);
                self.rounds_input = rounds.to_string();
                self.sync_rounds().await;
            }
            Action::DecrementRounds => {
                let rounds = self
                    .view
                    .snapshot()
                    .await
                    .rounds()
                    .saturating_sub(1)
                    .max(MIN_ROUNDS);
                self.rounds_input = rounds.to_string();
                self.sync_rounds().await;
            }
            Action::ScrollDown => self.scroll_to(self.transcript_scroll.saturating_add(1)).await,
            Action::ScrollUp => self.transcript_scroll = self.transcript_scroll.saturating_sub(1),
            Action::PageDown => {
                self.scroll_to(self.transcript_scroll.saturating_add(PAGE_SIZE))
                    .await
            }
            Action::PageUp => {
                self.transcript_scroll = self.transcript_scroll.saturating_sub(PAGE_SIZE)
            }
            Action::Top => self.transcript_scroll = 0,
            Action::Bottom => self.scroll_to(u16::MAX).await,
            Action::ToggleHelp => {
                self.show_help = !self.show_help;
                self.event_handler.set_help_open(self.show_help);
            }
            Action::CycleTheme => {
                self.theme_manager.cycle();
                self.status_message = Some(format!("Theme: {}", self.theme().name));
            }
            Action::None => {}
        }
    }

    async fn start_run(&mut self) {
        if let Some(ref err) = self.rounds_error {
            self.status_message = Some(format!("Cannot start: {}", err));
            return;
        }

        if !self.view.snapshot().await.can_run() {
            self.status_message = Some("A simulation is already running".to_string());
            return;
        }

        debug!("Starting simulation from the TUI");
        self.transcript_scroll = 0;
        self.view.spawn_run();
    }

    async fn move_focus(&mut self, focus: Focus) {
        if self.focus == Focus::Rounds && self.rounds_error.is_none() {
            self.rounds_input = self.view.snapshot().await.rounds().to_string();
        }
        self.focus = focus;
    }

    async fn edit_prompt<F>(&mut self, edit: F)
    where
        F: FnOnce(&mut String),
    {
        let state = self.view.state();
        let mut state = state.write().await;
        let mut prompt = state.prompt().to_string();
        edit(&mut prompt);
        state.edit_prompt(prompt);
    }

    async fn sync_rounds(&mut self) {
        match self.view.edit_rounds(&self.rounds_input).await {
            Ok(_) => self.rounds_error = None,
            Err(err) => {
                self.rounds_error = Some(
                    err.user_suggestion()
                        .map(str::to_string)
                        .unwrap_or_else(|| err.to_string()),
                )
            }
        }
    }

    async fn scroll_to(&mut self, target: u16) {
        let state = self.view.snapshot().await;
        let max = ui::transcript::line_count(state.conversation()).saturating_sub(1);
        let max = u16::try_from(max).unwrap_or(u16::MAX);
        self.transcript_scroll = target.min(max);
    }

    pub fn rounds_valid(&self) -> bool {
        self.rounds_error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentic_core::{
        AgenticResult, SimulationRequest, SimulationResponse, SimulationService, ViewState,
    };
    use async_trait::async_trait;

    struct EchoService;

    #[async_trait]
    impl SimulationService for EchoService {
        fn endpoint(&self) -> String {
            "mock://echo".to_string()
        }

        async fn simulate(
            &self,
            request: &SimulationRequest,
        ) -> AgenticResult<SimulationResponse> {
            Ok(serde_json::from_value(serde_json::json!({
                "conversation": [
                    {"from": "CEO", "to": ["CTO", "CFO"], "response": request.prompt},
                    {"from": "CTO", "to": "CEO", "response": {"rounds": request.max_rounds}}
                ]
            }))
            .unwrap())
        }
    }

    async fn app() -> App {
        let view = Arc::new(SimulationView::new(Arc::new(EchoService)));
        App::new(view, &TuiConfig::default()).await
    }

    async fn wait_for_idle(app: &App) -> ViewState {
        for _ in 0..100 {
            let state = app.view.snapshot().await;
            if !state.is_loading() && !state.conversation().is_empty() {
                return state;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("run did not finish");
    }

    #[test]
    fn test_focus_cycle() {
        assert_eq!(Focus::Prompt.next(), Focus::Rounds);
        assert_eq!(Focus::Transcript.next(), Focus::Prompt);
        assert_eq!(Focus::Prompt.prev(), Focus::Transcript);
    }

    #[tokio::test]
    async fn test_initial_inputs() {
        let app = app().await;
        assert_eq!(app.rounds_input, "2");
        assert_eq!(app.focus, Focus::Prompt);
        assert_eq!(app.theme().name, "Tokyo Night");
    }

    #[tokio::test]
    async fn test_prompt_editing() {
        let mut app = app().await;
        app.apply(Action::ClearField).await;
        for c in "Hi".chars() {
            app.apply(Action::InsertChar(c)).await;
        }
        app.apply(Action::InsertNewline).await;
        app.apply(Action::InsertChar('x')).await;
        app.apply(Action::DeleteChar).await;

        assert_eq!(app.view.snapshot().await.prompt(), "Hi\n");
    }

    #[tokio::test]
    async fn test_rounds_editing() {
        let mut app = app().await;
        app.apply(Action::NextFocus).await;
        assert_eq!(app.focus, Focus::Rounds);

        app.apply(Action::DeleteChar).await;
        assert!(!app.rounds_valid());
        assert_eq!(app.view.snapshot().await.rounds(), 2);

        app.apply(Action::InsertChar('5')).await;
        assert!(app.rounds_valid());
        assert_eq!(app.view.snapshot().await.rounds(), 5);

        app.apply(Action::IncrementRounds).await;
        assert_eq!(app.rounds_input, "6");
        app.apply(Action::DecrementRounds).await;
        assert_eq!(app.view.snapshot().await.rounds(), 5);
    }

    #[tokio::test]
    async fn test_invalid_rounds_block_run() {
        let mut app = app().await;
        app.focus = Focus::Rounds;
        app.apply(Action::DeleteChar).await;
        app.apply(Action::Run).await;

        assert!(app.status_message.as_deref().unwrap_or("").starts_with("Cannot start"));
        assert!(!app.view.snapshot().await.is_loading());
    }

    #[tokio::test]
    async fn test_run_fills_transcript() {
        let mut app = app().await;
        app.apply(Action::Run).await;

        let state = wait_for_idle(&app).await;
        assert_eq!(state.conversation().len(), 2);
        assert_eq!(state.conversation()[0].to.display(), "CTO, CFO");
        assert_eq!(state.last_run().map(|r| r.rounds), Some(2));
    }

    #[tokio::test]
    async fn test_theme_notice_gives_way_to_run_summary() {
        let mut app = app().await;
        app.apply(Action::Run).await;
        wait_for_idle(&app).await;

        app.apply(Action::CycleTheme).await;
        assert_eq!(
            app.status_message.as_deref(),
            Some("Theme: Catppuccin Mocha")
        );

        app.apply(Action::ScrollDown).await;
        assert!(app.status_message.is_none());
        assert!(app.view.snapshot().await.last_run().is_some());
    }

    #[tokio::test]
    async fn test_scroll_is_clamped_to_transcript() {
        let mut app = app().await;
        app.apply(Action::Bottom).await;
        assert_eq!(app.transcript_scroll, 0);

        app.apply(Action::Run).await;
        let state = wait_for_idle(&app).await;
        app.apply(Action::Bottom).await;
        let lines = ui::transcript::line_count(state.conversation()) as u16;
        assert_eq!(app.transcript_scroll, lines - 1);

        app.apply(Action::Top).await;
        assert_eq!(app.transcript_scroll, 0);
    }
}
