//! Game engine - the single owner of a game session
//!
//! The committed [`GameState`] lives in a `tokio::sync::watch` channel. Every
//! command clones the snapshot, applies one transition to the clone and, if
//! anything changed, replaces the snapshot wholesale. Commands are serialized
//! by a mutex that also guards the color picker, so a tick and a player move
//! can never interleave.
//!
//! The tick loop is a tokio task that sleeps for the tick interval, re-checks
//! its stop signal and the game-over flag after waking, then applies a tick.
//! The tick itself has no await point, so cancelling the task can never leave
//! a half-applied transition behind.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::EngineConfig;
use crate::core::{validate_catalog, ColorPicker, GameState, Grid, SimpleRng};
use crate::event_log::{EngineEvent, EventLog};
use crate::types::GameAction;

/// Lock a mutex, recovering the data if a previous holder panicked
fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// State shared between the engine handle and its tick task
struct Inner {
    state_tx: watch::Sender<GameState>,
    preview_tx: watch::Sender<Grid>,
    picker: Mutex<Box<dyn ColorPicker + Send>>,
    event_log: Option<EventLog>,
}

/// What a committed transition did, for logging after the state lock is released
#[derive(Debug, Default)]
struct Committed {
    events: Vec<EngineEvent>,
    game_over: Option<(u32, u32)>,
    dropped_cells: u32,
}

impl Inner {
    /// Apply `transition` to a copy of the state and commit it if it changed anything
    fn apply<F>(&self, transition: F) -> bool
    where
        F: FnOnce(&mut GameState, &mut dyn ColorPicker) -> bool,
    {
        self.apply_with(None, transition)
    }

    /// Like [`apply`](Self::apply), logging `lead` ahead of the transition's own events
    fn apply_with<F>(&self, lead: Option<EngineEvent>, transition: F) -> bool
    where
        F: FnOnce(&mut GameState, &mut dyn ColorPicker) -> bool,
    {
        let mut picker = lock(&self.picker);
        let mut committed = Committed::default();

        let changed = self.state_tx.send_if_modified(|state| {
            let mut next = state.clone();
            if !transition(&mut next, &mut **picker) {
                return false;
            }

            committed.events.extend(lead);
            describe(state, &mut next, &mut committed);
            *state = next;
            true
        });

        if changed {
            let preview = self.state_tx.borrow().preview_grid();
            self.preview_tx.send_if_modified(|current| {
                if *current == preview {
                    return false;
                }
                *current = preview;
                true
            });
        }
        drop(picker);

        self.report(committed);
        changed
    }

    fn report(&self, committed: Committed) {
        if committed.dropped_cells > 0 {
            eprintln!(
                "[Engine] lock dropped {} cells outside the grid",
                committed.dropped_cells
            );
        }
        if let Some((score, lines)) = committed.game_over {
            eprintln!("[Engine] Game over: score {}, lines {}", score, lines);
        }
        for event in &committed.events {
            self.record(event);
        }
    }

    fn record(&self, event: &EngineEvent) {
        if let Some(log) = &self.event_log {
            log.record(event);
        }
    }
}

/// Compare two consecutive states, consume `next`'s lock event and append what happened
fn describe(prev: &GameState, next: &mut GameState, committed: &mut Committed) {
    if let Some(event) = next.take_last_event() {
        committed.dropped_cells = event.dropped_cells;
        committed.events.push(EngineEvent::Locked {
            lines_cleared: event.lines_cleared,
            score_delta: event.score_delta,
            score: next.score(),
            dropped_cells: event.dropped_cells,
        });
    }

    if next.piece_id() != prev.piece_id() {
        if let Some(piece) = next.current_piece() {
            committed.events.push(EngineEvent::Spawned {
                piece_id: next.piece_id(),
                color: piece.color.as_str().to_string(),
                next_color: next.next_piece_color().as_str().to_string(),
            });
        }
    }

    if next.is_game_over() && !prev.is_game_over() {
        committed.game_over = Some((next.score(), next.lines_cleared()));
        committed.events.push(EngineEvent::GameOver {
            score: next.score(),
            lines_cleared: next.lines_cleared(),
        });
    }
}

/// Handle to the running tick task
struct TickTask {
    stop_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl TickTask {
    fn stop(self) {
        self.stop_tx.send_replace(true);
        self.handle.abort();
    }
}

async fn run_tick_loop(inner: Arc<Inner>, mut stop_rx: watch::Receiver<bool>) {
    loop {
        let (interval_ms, game_over) = {
            let state = inner.state_tx.borrow();
            (state.tick_interval_ms(), state.is_game_over())
        };
        if *stop_rx.borrow() || game_over {
            break;
        }

        tokio::select! {
            _ = tokio::time::sleep(Duration::from_millis(interval_ms)) => {}
            _ = stop_rx.changed() => break,
        }

        // Stop or game over may have happened while sleeping.
        if *stop_rx.borrow() || inner.state_tx.borrow().is_game_over() {
            break;
        }

        // Checked again under the command lock so a tick cannot follow stop_loop.
        inner.apply(|state, picker| !*stop_rx.borrow() && state.tick(picker));
    }
}

/// Controller for one game session
///
/// Construction spawns the first piece; call [`start_loop`](Self::start_loop)
/// from inside a tokio runtime to start gravity.
pub struct GameEngine {
    inner: Arc<Inner>,
    tick_task: Mutex<Option<TickTask>>,
}

impl GameEngine {
    /// Create an engine with a [`SimpleRng`] seeded from the config
    pub fn new(config: EngineConfig) -> Result<Self> {
        let seed = config.resolved_seed();
        Self::with_picker(config, Box::new(SimpleRng::new(seed)))
    }

    /// Create an engine with a custom color source
    pub fn with_picker(config: EngineConfig, mut picker: Box<dyn ColorPicker + Send>) -> Result<Self> {
        config.validate().context("invalid engine configuration")?;
        validate_catalog().context("piece catalog is invalid")?;

        let event_log = config
            .event_log_path
            .as_deref()
            .map(|path| EventLog::open(path))
            .transpose()?;

        let blank = GameState::new(&mut *picker, config.tick_interval_ms);
        let mut state = blank.clone();
        state.spawn_piece(&mut *picker);
        let mut initial = Committed::default();
        describe(&blank, &mut state, &mut initial);
        let preview = state.preview_grid();

        let (state_tx, _) = watch::channel(state);
        let (preview_tx, _) = watch::channel(preview);

        let inner = Arc::new(Inner {
            state_tx,
            preview_tx,
            picker: Mutex::new(picker),
            event_log,
        });
        inner.report(initial);

        Ok(Self {
            inner,
            tick_task: Mutex::new(None),
        })
    }

    /// Snapshot of the committed state
    pub fn current_game_state(&self) -> GameState {
        self.inner.state_tx.borrow().clone()
    }

    /// Stream of committed states
    pub fn subscribe(&self) -> watch::Receiver<GameState> {
        self.inner.state_tx.subscribe()
    }

    /// Snapshot of the next-piece preview grid
    pub fn current_preview_grid(&self) -> Grid {
        self.inner.preview_tx.borrow().clone()
    }

    /// Stream of preview grids
    pub fn subscribe_preview(&self) -> watch::Receiver<Grid> {
        self.inner.preview_tx.subscribe()
    }

    /// Start (or restart) the tick loop
    ///
    /// Does nothing after game over, or when called outside a tokio runtime.
    pub fn start_loop(&self) {
        let mut slot = lock(&self.tick_task);
        if let Some(task) = slot.take() {
            task.stop();
        }

        let tick_interval_ms = {
            let state = self.inner.state_tx.borrow();
            if state.is_game_over() {
                return;
            }
            state.tick_interval_ms()
        };

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                eprintln!("[Engine] start_loop called outside a tokio runtime; ignoring");
                return;
            }
        };

        let (stop_tx, stop_rx) = watch::channel(false);
        let handle = runtime.spawn(run_tick_loop(Arc::clone(&self.inner), stop_rx));
        *slot = Some(TickTask { stop_tx, handle });

        eprintln!("[Engine] Tick loop started ({}ms)", tick_interval_ms);
        self.inner
            .record(&EngineEvent::LoopStarted { tick_interval_ms });
    }

    /// Stop the tick loop; no tick runs after this returns
    pub fn stop_loop(&self) {
        let task = lock(&self.tick_task).take();
        if let Some(task) = task {
            task.stop();
            // Wait out a tick that is already applying.
            drop(lock(&self.inner.picker));
            eprintln!("[Engine] Tick loop stopped");
            self.inner.record(&EngineEvent::LoopStopped);
        }
    }

    /// Whether the tick task is alive
    pub fn is_loop_running(&self) -> bool {
        lock(&self.tick_task)
            .as_ref()
            .map(|task| !task.handle.is_finished())
            .unwrap_or(false)
    }

    /// Start a fresh game
    ///
    /// The tick loop restarts unless it was stopped with [`stop_loop`](Self::stop_loop).
    pub fn reset_game(&self) {
        self.inner.apply_with(Some(EngineEvent::Reset), |state, picker| {
            state.reset(picker);
            true
        });

        let restart = lock(&self.tick_task).is_some();
        if restart {
            self.start_loop();
        }
    }

    pub fn move_left(&self) -> bool {
        self.apply_action(GameAction::MoveLeft)
    }

    pub fn move_right(&self) -> bool {
        self.apply_action(GameAction::MoveRight)
    }

    pub fn soft_drop(&self) -> bool {
        self.apply_action(GameAction::SoftDrop)
    }

    pub fn rotate(&self) -> bool {
        self.apply_action(GameAction::Rotate)
    }

    pub fn hard_drop(&self) -> bool {
        self.apply_action(GameAction::HardDrop)
    }

    /// Apply one action, returning whether the state changed
    pub fn apply_action(&self, action: GameAction) -> bool {
        match action {
            GameAction::Reset => {
                self.reset_game();
                true
            }
            _ => self
                .inner
                .apply(|state, picker| state.apply_action(action, picker)),
        }
    }
}

impl Drop for GameEngine {
    fn drop(&mut self) {
        if let Some(task) = lock(&self.tick_task).take() {
            task.stop();
        }
    }
}
