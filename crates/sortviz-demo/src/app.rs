#![forbid(unsafe_code)]

//! Application state and the engine worker.
//!
//! The engine runs on its own thread: [`Engine`] owns a [`Controller`] there
//! and feeds it [`Command`]s. The controller's renderer is a
//! [`ChannelRenderer`], which forwards every frame and status back to the UI
//! thread as [`EngineEvent`]s. Stop and speed changes bypass the command
//! queue and go straight through the [`ControlHandle`], so they take effect
//! while a run is blocking the worker.
//!
//! Every queued start carries a ticket. A stop cancels every ticket issued so
//! far, including starts the worker has not picked up yet: such a run is
//! stopped as soon as it reports `Sorting`, before its first step.

use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{cursor, queue};
use sortviz_core::config::MAX_SIZE;
use sortviz_core::{AlgorithmId, Controls, EngineConfig, HighlightSet, Speed};
use sortviz_runtime::{
    ControlHandle, Controller, Driver, Renderer, RunStatus, SleepDriver, StartError, Status,
};

use crate::bars::{self, Area};
use crate::cli::{MIN_SIZE, Opts};

/// Width of the info panel, including its left border.
const PANEL_WIDTH: u16 = 36;
/// Bars added or removed by `[` and `]`.
const SIZE_STEP: usize = 5;
/// Speed range reachable with `+` and `-`.
const SPEED_MIN: f64 = 1.0;
const SPEED_MAX: f64 = 50.0;

// ---------------------------------------------------------------------------
// Engine worker
// ---------------------------------------------------------------------------

/// Requests the UI queues for the worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start { algorithm: AlgorithmId, ticket: u64 },
    Generate(usize),
    Shutdown,
}

/// What the worker reports back.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Frame {
        values: Vec<u32>,
        highlights: HighlightSet,
    },
    ClearHighlights,
    Status(Status),
    Finished(Result<RunStatus, StartError>),
}

/// Renderer that forwards everything over a channel.
///
/// It also enforces stops issued before the current run began: when the run
/// reports `Sorting` and its ticket is at or below the cancelled mark, the
/// run is stopped through the attached handle.
#[derive(Debug, Clone)]
pub struct ChannelRenderer {
    tx: Sender<EngineEvent>,
    cancelled_through: Arc<AtomicU64>,
    ticket: Option<u64>,
    handle: Option<ControlHandle>,
}

impl ChannelRenderer {
    pub fn new(tx: Sender<EngineEvent>, cancelled_through: Arc<AtomicU64>) -> Self {
        Self {
            tx,
            cancelled_through,
            ticket: None,
            handle: None,
        }
    }

    /// Handle used to stop cancelled runs.
    pub fn attach(&mut self, handle: ControlHandle) {
        self.handle = Some(handle);
    }

    /// Ticket of the run about to start.
    pub fn set_ticket(&mut self, ticket: u64) {
        self.ticket = Some(ticket);
    }

    fn cancel_if_stale(&self) {
        let Some(ticket) = self.ticket else {
            return;
        };
        if ticket <= self.cancelled_through.load(Ordering::SeqCst)
            && let Some(handle) = &self.handle
        {
            tracing::debug!(ticket, "run was stopped before it began");
            handle.stop();
        }
    }

    fn send(&self, event: EngineEvent) {
        // The UI hanging up means it is shutting down; frames are moot.
        let _ = self.tx.send(event);
    }
}

impl Renderer for ChannelRenderer {
    fn render(&mut self, sequence: &[u32], highlights: &HighlightSet) {
        self.send(EngineEvent::Frame {
            values: sequence.to_vec(),
            highlights: highlights.clone(),
        });
    }

    fn clear_highlights(&mut self) {
        self.send(EngineEvent::ClearHighlights);
    }

    fn status(&mut self, status: &Status) {
        if let Status::Sorting(_) = status {
            self.cancel_if_stale();
        }
        self.send(EngineEvent::Status(*status));
    }
}

/// Handle onto the engine thread.
#[derive(Debug)]
pub struct Engine {
    commands: Sender<Command>,
    events: Receiver<EngineEvent>,
    handle: ControlHandle,
    cancelled_through: Arc<AtomicU64>,
    last_ticket: u64,
    worker: Option<JoinHandle<()>>,
}

impl Engine {
    /// Spawn a real-time engine.
    pub fn spawn(config: EngineConfig) -> io::Result<Self> {
        Self::spawn_with(SleepDriver, config)
    }

    /// Spawn an engine with a custom driver.
    pub fn spawn_with<D>(driver: D, config: EngineConfig) -> io::Result<Self>
    where
        D: Driver + Send + 'static,
    {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let cancelled_through = Arc::new(AtomicU64::new(0));
        let renderer = ChannelRenderer::new(event_tx.clone(), Arc::clone(&cancelled_through));
        let mut controller = Controller::with_driver(renderer, driver, config);
        let handle = controller.handle();
        controller.renderer_mut().attach(handle.clone());
        let worker = thread::Builder::new()
            .name("sortviz-engine".into())
            .spawn(move || worker_loop(controller, &cmd_rx, &event_tx))?;
        Ok(Self {
            commands: cmd_tx,
            events: event_rx,
            handle,
            cancelled_through,
            last_ticket: 0,
            worker: Some(worker),
        })
    }

    /// Queue a command. Returns `false` if the worker is gone.
    pub fn send(&self, command: Command) -> bool {
        self.commands.send(command).is_ok()
    }

    /// Queue a run under a fresh ticket.
    pub fn start(&mut self, algorithm: AlgorithmId) -> bool {
        self.last_ticket += 1;
        self.send(Command::Start {
            algorithm,
            ticket: self.last_ticket,
        })
    }

    /// Stop the active run and every run queued so far.
    pub fn stop(&self) {
        self.cancelled_through
            .fetch_max(self.last_ticket, Ordering::SeqCst);
        self.handle.stop();
    }

    pub fn handle(&self) -> &ControlHandle {
        &self.handle
    }

    /// Next pending event, without blocking.
    pub fn try_event(&self) -> Option<EngineEvent> {
        self.events.try_recv().ok()
    }

    /// Next event, waiting up to `timeout`.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.events.recv_timeout(timeout).ok()
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        let _ = self.commands.send(Command::Shutdown);
        self.cancelled_through.store(u64::MAX, Ordering::SeqCst);
        self.handle.stop();
        let Some(worker) = self.worker.take() else {
            return;
        };
        if worker.join().is_err() {
            tracing::warn!("engine thread panicked");
        }
    }
}

fn worker_loop<D: Driver>(
    mut controller: Controller<ChannelRenderer, D>,
    commands: &Receiver<Command>,
    events: &Sender<EngineEvent>,
) {
    tracing::debug!("engine thread started");
    while let Ok(command) = commands.recv() {
        match command {
            Command::Start { algorithm, ticket } => {
                controller.renderer_mut().set_ticket(ticket);
                let result = controller.start(algorithm);
                if events.send(EngineEvent::Finished(result)).is_err() {
                    break;
                }
            }
            Command::Generate(size) => {
                controller.generate(size);
            }
            Command::Shutdown => break,
        }
    }
    tracing::debug!("engine thread exiting");
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A user action, independent of the key that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Select(AlgorithmId),
    NextAlgorithm,
    PrevAlgorithm,
    Start,
    Stop,
    Generate,
    Faster,
    Slower,
    Bigger,
    Smaller,
    Quit,
}

impl Input {
    /// Map a key press to an action.
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let input = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Self::Quit,
            KeyCode::Char(d @ '1'..='6') => {
                let idx = d as usize - '1' as usize;
                Self::Select(AlgorithmId::ALL[idx])
            }
            KeyCode::Right => Self::NextAlgorithm,
            KeyCode::Left => Self::PrevAlgorithm,
            KeyCode::Enter | KeyCode::Char(' ') => Self::Start,
            KeyCode::Esc | KeyCode::Char('s') => Self::Stop,
            KeyCode::Char('g') => Self::Generate,
            KeyCode::Char('+') | KeyCode::Char('=') => Self::Faster,
            KeyCode::Char('-') => Self::Slower,
            KeyCode::Char(']') => Self::Bigger,
            KeyCode::Char('[') => Self::Smaller,
            KeyCode::Char('q') => Self::Quit,
            _ => return None,
        };
        Some(input)
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// UI-side state: the last frame, the status line and the selections.
#[derive(Debug)]
pub struct App {
    algorithm: AlgorithmId,
    size: usize,
    values: Vec<u32>,
    highlights: HighlightSet,
    status: String,
    /// A start was queued and its `Finished` has not arrived yet.
    busy: bool,
    quit: bool,
    engine: Engine,
}

impl App {
    pub fn new(opts: &Opts, engine: Engine) -> Self {
        Self {
            algorithm: opts.algorithm,
            size: opts.size.clamp(MIN_SIZE, MAX_SIZE),
            values: Vec::new(),
            highlights: HighlightSet::none(),
            status: String::new(),
            busy: false,
            quit: false,
            engine,
        }
    }

    /// Engine configuration for `opts`.
    pub fn engine_config(opts: &Opts) -> EngineConfig {
        let config = EngineConfig::default()
            .with_size_bounds(MIN_SIZE..=MAX_SIZE)
            .with_initial_size(opts.size)
            .with_speed(opts.speed);
        match opts.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }

    /// Enabled actions. A queued start counts as running.
    pub fn controls(&self) -> Controls {
        Controls::for_running(self.busy || self.engine.handle().is_running())
    }

    pub fn algorithm(&self) -> AlgorithmId {
        self.algorithm
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn highlights(&self) -> &HighlightSet {
        &self.highlights
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn speed(&self) -> Speed {
        self.engine.handle().speed()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Apply a user action. Actions the current [`Controls`] disable are
    /// ignored. Returns whether anything visible may have changed.
    pub fn apply(&mut self, input: Input) -> bool {
        let controls = self.controls();
        match input {
            Input::Select(algorithm) => self.algorithm = algorithm,
            Input::NextAlgorithm => self.algorithm = self.algorithm.next(),
            Input::PrevAlgorithm => self.algorithm = self.algorithm.prev(),
            Input::Start if controls.start => {
                if self.engine.start(self.algorithm) {
                    self.busy = true;
                }
            }
            Input::Stop if controls.stop => self.engine.stop(),
            Input::Generate if controls.generate => {
                self.engine.send(Command::Generate(self.size));
            }
            Input::Faster => self.step_speed(1.0),
            Input::Slower => self.step_speed(-1.0),
            Input::Bigger | Input::Smaller => {
                self.size = if input == Input::Bigger {
                    (self.size + SIZE_STEP).min(MAX_SIZE)
                } else {
                    self.size.saturating_sub(SIZE_STEP).max(MIN_SIZE)
                };
                if controls.generate {
                    self.engine.send(Command::Generate(self.size));
                }
            }
            Input::Quit => {
                self.engine.stop();
                self.quit = true;
            }
            Input::Start | Input::Stop | Input::Generate => {
                tracing::trace!(?input, "ignored disabled action");
                return false;
            }
        }
        true
    }

    fn step_speed(&mut self, delta: f64) {
        let next = (self.speed().get().round() + delta).clamp(SPEED_MIN, SPEED_MAX);
        self.engine.handle().set_speed(next);
    }

    /// Fold one engine event into the UI state.
    pub fn on_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Frame { values, highlights } => {
                self.values = values;
                self.highlights = highlights;
            }
            EngineEvent::ClearHighlights => self.highlights.clear(),
            EngineEvent::Status(status) => self.status = status.to_string(),
            EngineEvent::Finished(result) => {
                self.busy = false;
                if let Err(err) = result {
                    tracing::warn!(%err, "run did not start");
                    self.status = err.to_string();
                }
            }
        }
    }

    /// Drain pending engine events. Returns whether any arrived.
    pub fn pump(&mut self) -> bool {
        let mut any = false;
        while let Some(event) = self.engine.try_event() {
            self.on_event(event);
            any = true;
        }
        any
    }

    /// Block until the engine is idle or `timeout` passes. Returns whether
    /// it went idle.
    pub fn wait_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.busy {
            let left = deadline.saturating_duration_since(Instant::now());
            match self.engine.recv_timeout(left) {
                Some(event) => self.on_event(event),
                None => return false,
            }
        }
        self.pump();
        true
    }

    // -----------------------------------------------------------------------
    // Drawing
    // -----------------------------------------------------------------------

    /// Queue a full frame for a `cols` x `rows` terminal.
    pub fn draw(&self, out: &mut impl Write, (cols, rows): (u16, u16)) -> io::Result<()> {
        queue!(out, Clear(ClearType::All))?;
        if rows < 4 || cols < PANEL_WIDTH + 10 {
            queue!(out, cursor::MoveTo(0, 0), Print("terminal too small"))?;
            return Ok(());
        }

        let chart_area = Area::new(1, 1, cols - PANEL_WIDTH - 2, rows - 2);
        let chart = bars::layout(&self.values, &self.highlights, chart_area);
        bars::draw(out, &chart, chart_area)?;

        let panel_x = cols - PANEL_WIDTH;
        for (row, line) in self.panel_lines().iter().enumerate().take(usize::from(rows)) {
            queue!(out, cursor::MoveTo(panel_x, row as u16))?;
            match line {
                PanelLine::Heading(text) => queue!(
                    out,
                    SetAttribute(Attribute::Bold),
                    Print(text),
                    SetAttribute(Attribute::Reset)
                )?,
                PanelLine::Text(text) => queue!(out, Print(text))?,
            }
        }
        Ok(())
    }

    fn panel_lines(&self) -> Vec<PanelLine> {
        let info = self.algorithm.info();
        let stats = self.engine.handle().stats();
        let controls = self.controls();
        let width = usize::from(PANEL_WIDTH - 2);

        let mut lines = vec![
            PanelLine::Heading(format!("│ {}", info.name)),
            PanelLine::Text(format!("│ Time:  {}", info.time_complexity)),
            PanelLine::Text(format!("│ Space: {}", info.space_complexity)),
            PanelLine::Text("│".into()),
        ];
        lines.extend(
            wrap(info.description, width)
                .into_iter()
                .map(|l| PanelLine::Text(format!("│ {l}"))),
        );
        lines.push(PanelLine::Text("│".into()));
        lines.push(PanelLine::Heading(format!("│ {}", self.status)));
        lines.push(PanelLine::Text(format!("│ Comparisons: {}", stats.comparisons)));
        lines.push(PanelLine::Text(format!("│ Swaps:       {}", stats.swaps)));
        lines.push(PanelLine::Text(format!("│ Speed:       {}", self.speed())));
        lines.push(PanelLine::Text(format!("│ Size:        {}", self.size)));
        lines.push(PanelLine::Text("│".into()));
        lines.push(PanelLine::Text(format!(
            "│ {}  {}  {}",
            key_hint("⏎ start", controls.start),
            key_hint("s stop", controls.stop),
            key_hint("g new", controls.generate),
        )));
        lines.push(PanelLine::Text("│ 1-6 ←→ algo  +/- speed".into()));
        lines.push(PanelLine::Text("│ [/] size     q quit".into()));
        lines
    }
}

enum PanelLine {
    Heading(String),
    Text(String),
}

fn key_hint(label: &str, enabled: bool) -> String {
    if enabled {
        label.to_string()
    } else {
        " ".repeat(label.chars().count())
    }
}

/// Greedy word wrap to `width` columns.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let needed = if line.is_empty() {
            word.chars().count()
        } else {
            line.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Run the interactive front end until the user quits.
pub fn run(opts: &Opts) -> io::Result<()> {
    let engine = Engine::spawn(App::engine_config(opts))?;
    let mut app = App::new(opts, engine);
    let session = crate::terminal::TerminalSession::new()?;
    let mut stdout = io::stdout();

    if opts.autostart {
        app.apply(Input::Start);
    }

    let frame = Duration::from_millis(16);
    let mut dirty = true;
    while !app.should_quit() {
        dirty |= app.pump();
        if dirty {
            app.draw(&mut stdout, session.size()?)?;
            stdout.flush()?;
            dirty = false;
        }
        match session.poll_event(frame)? {
            Some(crossterm::event::Event::Key(key)) => {
                if let Some(input) = Input::from_key(key) {
                    dirty |= app.apply(input);
                }
            }
            Some(crossterm::event::Event::Resize(..)) => dirty = true,
            _ => {}
        }
    }

    drop(session);
    Ok(())
}
