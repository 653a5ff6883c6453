use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use bug_crossing::compute::{handle_input, init_state, tick};
use bug_crossing::display::{self, SCREEN_HEIGHT, SCREEN_WIDTH};
use bug_crossing::entities::GameState;
use bug_crossing::input::{is_quit, move_for};
use bug_crossing::settings::{settings_path, Settings};
use bug_crossing::sprites::{SpriteCache, SpriteId};

/// How long the reader thread waits for a key before re-checking for shutdown.
const INPUT_POLL: Duration = Duration::from_millis(50);

// ── Terminal ──────────────────────────────────────────────────────────────────

/// Restores the terminal on every exit path.
struct TerminalGuard {
    keyboard_enhanced: bool,
}

impl TerminalGuard {
    fn enter() -> anyhow::Result<Self> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        // From here on, dropping the guard undoes whatever was set up.
        let mut guard = Self {
            keyboard_enhanced: false,
        };
        let mut out = stdout();
        out.execute(terminal::EnterAlternateScreen)
            .context("failed to enter alternate screen")?;
        out.execute(cursor::Hide)?;

        // Release events let a move fire on key-up.  Terminals without the
        // kitty protocol refuse this and we fall back to key presses.
        guard.keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
            && out
                .execute(PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
                ))
                .is_ok();

        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = stdout();
        if self.keyboard_enhanced {
            let _ = out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = out.execute(cursor::Show);
        let _ = out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// The alternate screen owns stdout/stderr, so log lines go to a file.
fn init_logging(settings: &Settings) {
    let mut builder = env_logger::Builder::from_default_env();
    let path = settings.log_path();
    match File::create(&path) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(e) => {
            eprintln!("cannot open log file {}: {}", path.display(), e);
        }
    }
    let _ = builder.try_init();
}

// ── Input thread ──────────────────────────────────────────────────────────────

/// Forward terminal events into a bounded queue until `cancel` is set or the
/// receiver goes away.  A full queue blocks this thread, never the game loop.
fn spawn_reader(tx: SyncSender<Event>, cancel: Arc<AtomicBool>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while !cancel.load(Ordering::Relaxed) {
            match event::poll(INPUT_POLL) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => {
                    log::warn!("input poll failed: {}", e);
                    break;
                }
            }
            let ev = match event::read() {
                Ok(ev) => ev,
                Err(e) => {
                    log::warn!("input read failed: {}", e);
                    break;
                }
            };
            let mut pending = ev;
            loop {
                match tx.try_send(pending) {
                    Ok(()) => break,
                    Err(TrySendError::Full(ev)) => {
                        if cancel.load(Ordering::Relaxed) {
                            return;
                        }
                        pending = ev;
                        thread::sleep(INPUT_POLL);
                    }
                    Err(TrySendError::Disconnected(_)) => return,
                }
            }
        }
        log::debug!("input thread stopped");
    })
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Run ticks until `cancel` is set.
///
/// Each iteration drains queued key events into the player, advances the
/// simulation by the wall-clock time since the previous iteration, renders,
/// and sleeps out the rest of the frame budget.
fn game_loop<W: Write>(
    out: &mut W,
    mut state: GameState,
    sprites: &SpriteCache,
    rx: &Receiver<Event>,
    cancel: &AtomicBool,
    release_events: bool,
    frame: Duration,
) -> std::io::Result<GameState> {
    let mut rng = thread_rng();
    let mut last_time = Instant::now();

    while !cancel.load(Ordering::Relaxed) {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        loop {
            match rx.try_recv() {
                Ok(Event::Key(key)) => {
                    if is_quit(&key) {
                        cancel.store(true, Ordering::Relaxed);
                    } else if let Some(direction) = move_for(&key, release_events) {
                        state = handle_input(&state, direction);
                    }
                }
                Ok(_) => {}
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    log::warn!("input thread disconnected");
                    cancel.store(true, Ordering::Relaxed);
                    break;
                }
            }
        }
        if cancel.load(Ordering::Relaxed) {
            break;
        }

        let now = Instant::now();
        let dt = now.duration_since(last_time).as_secs_f64();
        state = tick(&state, dt, &mut rng);
        display::render(out, &state, sprites)?;
        last_time = now;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }

    Ok(state)
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let path = settings_path();
    let settings = Settings::load_or_default(&path);
    init_logging(&settings);
    log::info!("Bug Crossing starting (settings: {})", path.display());
    log::debug!("{:?}", settings);

    // Start-up barrier: every sprite the scene uses is resolved before the
    // first frame.
    let sprites = SpriteCache::load(&SpriteId::ALL);
    log::info!("{} sprites ready", sprites.len());

    let guard = TerminalGuard::enter()?;
    let (width, height) = terminal::size().context("failed to query terminal size")?;
    if width < SCREEN_WIDTH || height < SCREEN_HEIGHT {
        log::warn!(
            "terminal is {}x{}, the board needs {}x{}",
            width,
            height,
            SCREEN_WIDTH,
            SCREEN_HEIGHT
        );
    }

    let cancel = Arc::new(AtomicBool::new(false));
    let (tx, rx) = mpsc::sync_channel::<Event>(settings.input_queue);
    let reader = spawn_reader(tx, Arc::clone(&cancel));

    let mut out = BufWriter::new(stdout());
    let result = game_loop(
        &mut out,
        init_state(&settings),
        &sprites,
        &rx,
        &cancel,
        guard.keyboard_enhanced,
        Duration::from_millis(settings.frame_ms),
    );

    cancel.store(true, Ordering::Relaxed);
    drop(rx);
    if reader.join().is_err() {
        log::warn!("input thread panicked");
    }
    drop(guard);

    let state = result.context("render failed")?;
    log::info!(
        "Bug Crossing exiting after {} frames (wins {}, losses {})",
        state.frame,
        state.wins,
        state.losses
    );
    println!("Win/Lost score: {}/{}", state.wins, state.losses);
    Ok(())
}
