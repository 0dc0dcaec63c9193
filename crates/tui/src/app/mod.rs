mod tasks;

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::mpsc::UnboundedReceiver;

use screens::{
    Backend, Currency, Dashboard, Field, HttpClient, SubmissionState, SubmitStart,
    TransactionFeed, TransactionForm, form::DESCRIPTION_MAX_CHARS, form::SUCCESS_MESSAGE,
};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
    ui::{self, keymap::AppAction},
};

use tasks::{Dispatcher, NetEvent, ScreenLifetime};

const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    NewTransaction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Amount,
    Kind,
    Description,
    Submit,
}

impl FormFocus {
    fn next(self) -> Self {
        match self {
            Self::Amount => Self::Kind,
            Self::Kind => Self::Description,
            Self::Description => Self::Submit,
            Self::Submit => Self::Amount,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Amount => Self::Submit,
            Self::Kind => Self::Amount,
            Self::Description => Self::Kind,
            Self::Submit => Self::Description,
        }
    }

    fn text_field(self) -> Option<Field> {
        match self {
            Self::Amount => Some(Field::Amount),
            Self::Description => Some(Field::Description),
            Self::Kind | Self::Submit => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    expires_at: Instant,
}

impl ToastState {
    fn new(message: impl Into<String>, level: ToastLevel) -> Self {
        Self {
            message: message.into(),
            level,
            expires_at: Instant::now() + TOAST_TTL,
        }
    }
}

/// The new-transaction screen while it is shown.
#[derive(Debug)]
pub struct FormScreen {
    pub form: TransactionForm,
    pub focus: FormFocus,
    lifetime: ScreenLifetime,
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub dashboard: Dashboard,
    pub currency: Currency,
    pub feed: TransactionFeed,
    pub new_transaction: Option<FormScreen>,
    pub toast: Option<ToastState>,
    pub base_url: String,
    pub last_refresh: Option<DateTime<Local>>,
}

impl AppState {
    fn set_toast(&mut self, message: impl Into<String>, level: ToastLevel) {
        self.toast = Some(ToastState::new(message, level));
    }

    fn expire_toast(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|toast| toast.expires_at <= now) {
            self.toast = None;
        }
    }
}

pub struct App<B = HttpClient> {
    dispatcher: Dispatcher<B>,
    events: UnboundedReceiver<NetEvent>,
    home: ScreenLifetime,
    pub state: AppState,
    should_quit: bool,
}

impl App<HttpClient> {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let backend = HttpClient::new(&config.base_url, config.request_timeout())?;
        let dashboard = Dashboard::load(&config.dashboard_path)?;
        Ok(Self::with_backend(backend, dashboard, config.currency))
    }
}

impl<B> App<B>
where
    B: Backend + Clone + Send + Sync + 'static,
{
    /// Mounts the dashboard and starts loading its transactions.
    pub fn with_backend(backend: B, dashboard: Dashboard, currency: Currency) -> Self {
        let (mut dispatcher, events) = Dispatcher::new(backend);
        let mut home = dispatcher.mount();

        let mut feed = TransactionFeed::new();
        feed.begin_load();
        dispatcher.load_feed(&mut home);

        let state = AppState {
            screen: Screen::Home,
            dashboard,
            currency,
            feed,
            new_transaction: None,
            toast: None,
            base_url: String::new(),
            last_refresh: None,
        };

        Self {
            dispatcher,
            events,
            home,
            state,
            should_quit: false,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.state.base_url = base_url.into();
        self
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal);
        ui::restore_terminal(&mut terminal)?;
        result
    }

    fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(100);

        while !self.should_quit() {
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_action(ui::keymap::map_key(key));
                    }
                }
            }

            self.drain_events();
            self.state.expire_toast(Instant::now());
        }

        Ok(())
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.apply(event);
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn handle_action(&mut self, action: AppAction) {
        if action == AppAction::Quit {
            self.should_quit = true;
            return;
        }
        match self.state.screen {
            Screen::Home => self.handle_home(action),
            Screen::NewTransaction => self.handle_form(action),
        }
    }

    fn handle_home(&mut self, action: AppAction) {
        match action {
            AppAction::Input('q') => self.should_quit = true,
            AppAction::Input('n') | AppAction::Input('N') => self.open_form(),
            _ => {}
        }
    }

    fn open_form(&mut self) {
        self.state.new_transaction = Some(FormScreen {
            form: TransactionForm::new(),
            focus: FormFocus::Amount,
            lifetime: self.dispatcher.mount(),
        });
        self.state.screen = Screen::NewTransaction;
    }

    /// Leaves the form; the draft is discarded and any in-flight request is
    /// aborted with it.
    fn close_form(&mut self) {
        self.state.new_transaction = None;
        self.state.screen = Screen::Home;
    }

    fn handle_form(&mut self, action: AppAction) {
        let Some(screen) = self.state.new_transaction.as_mut() else {
            self.state.screen = Screen::Home;
            return;
        };

        match action {
            AppAction::Cancel => self.close_form(),
            AppAction::NextField => screen.focus = screen.focus.next(),
            AppAction::PrevField => screen.focus = screen.focus.prev(),
            AppAction::Left if screen.focus == FormFocus::Kind => {
                let kind = screen.form.draft().kind.prev();
                screen.form.select_kind(kind);
            }
            AppAction::Right | AppAction::Input(' ') if screen.focus == FormFocus::Kind => {
                let kind = screen.form.draft().kind.next();
                screen.form.select_kind(kind);
            }
            AppAction::Submit => self.submit_form(),
            AppAction::Backspace => {
                if let Some(field) = screen.focus.text_field() {
                    let mut value = screen.form.draft().text(field).to_string();
                    value.pop();
                    screen.form.set_field(field, value);
                }
            }
            AppAction::Input(ch) => {
                if let Some(field) = screen.focus.text_field() {
                    let current = screen.form.draft().text(field);
                    if field == Field::Description
                        && current.chars().count() >= DESCRIPTION_MAX_CHARS
                    {
                        return;
                    }
                    let mut value = current.to_string();
                    value.push(ch);
                    screen.form.set_field(field, value);
                }
            }
            _ => {}
        }
    }

    fn submit_form(&mut self) {
        let Some(screen) = self.state.new_transaction.as_mut() else {
            return;
        };

        match screen.form.begin_submit() {
            SubmitStart::Send(payload) => {
                tracing::info!("submitting {} {}", payload.kind, payload.amount);
                self.dispatcher.submit(&mut screen.lifetime, payload);
            }
            SubmitStart::Invalid => {
                if let Some((field, _)) = screen.form.errors().iter().next() {
                    screen.focus = match field {
                        Field::Amount => FormFocus::Amount,
                        Field::Kind => FormFocus::Kind,
                        Field::Description => FormFocus::Description,
                    };
                }
            }
            SubmitStart::Ignored => {}
        }
    }

    /// Applies a network result, unless the screen that asked for it is gone.
    pub fn apply(&mut self, event: NetEvent) {
        let target = event.screen();
        match event {
            NetEvent::FeedLoaded { result, .. } => {
                if target != self.home.id() {
                    tracing::debug!("dropping transaction list for {target:?}");
                    return;
                }
                self.state.feed.finish_load(result);
                self.state.last_refresh = Some(Local::now());
            }
            NetEvent::Submitted { result, .. } => {
                let Some(screen) = self
                    .state
                    .new_transaction
                    .as_mut()
                    .filter(|screen| screen.lifetime.id() == target)
                else {
                    tracing::debug!("dropping submit result for {target:?}");
                    return;
                };

                match screen.form.finish(result).clone() {
                    SubmissionState::Succeeded => {
                        self.close_form();
                        self.state.set_toast(SUCCESS_MESSAGE, ToastLevel::Success);
                    }
                    SubmissionState::Failed(message) => {
                        self.state.set_toast(message, ToastLevel::Error);
                    }
                    SubmissionState::Idle | SubmissionState::Submitting => {}
                }
            }
        }
    }

    /// Waits for the next network result and applies it.
    #[cfg(test)]
    async fn pump(&mut self) {
        if let Some(event) = self.events.recv().await {
            self.apply(event);
        }
    }
}
