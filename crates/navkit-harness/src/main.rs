#![forbid(unsafe_code)]

//! navkit reference driver.
//!
//! Mounts the overlay over an in-memory router and plays a short scripted
//! session through virtual time, logging every phase change and navigation.
//!
//! # Running
//!
//! ```sh
//! cargo run -p navkit-harness -- --theme Ocean --state /tmp/navkit-state.json
//! NAVKIT_LOG=navkit_widgets=debug cargo run -p navkit-harness -- --json-logs
//! ```
//!
//! # Options
//!
//! - `--config <path>`: overlay config, TOML or JSON (by extension)
//! - `--state <path>`: theme state file; in-memory when omitted
//! - `--theme <name>`: select and save a theme before the session
//! - `--palette <name>`: apply a tester palette to the surface
//! - `--realtime`: pace frames with a wall clock instead of fixed steps
//! - `--json-logs`: emit logs as JSON lines
//!
//! `NAVKIT_LOG` takes an `EnvFilter` directive (default `info`).

use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use navkit::prelude::*;
use navkit::{
    FileStorage, FrameClock, MemoryStorage, PopupPhase, Severity, SpinningRing, StyleSurface,
    TesterPalette, ThemeCatalog, ThemeStorage, TokenSurface,
};
use tracing_subscriber::EnvFilter;

/// Fixed frame step used unless `--realtime` is given.
const FRAME: Duration = Duration::from_millis(16);
/// Upper bound on frames spent waiting for one phase.
const MAX_FRAMES: usize = 500;

#[derive(Debug, Default, Parser)]
#[command(
    name = "navkit-harness",
    about = "Scripted reference session for the navkit overlay",
    version
)]
struct Args {
    /// Overlay config, TOML or JSON (by extension).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Theme state file. In-memory when omitted.
    #[arg(long)]
    state: Option<PathBuf>,

    /// Select and save a theme before the session.
    #[arg(long)]
    theme: Option<String>,

    /// Apply a tester palette (e.g. "Blue") to the surface.
    #[arg(long)]
    palette: Option<String>,

    /// Pace frames with a wall clock instead of fixed steps.
    #[arg(long)]
    realtime: bool,

    /// Emit logs as JSON lines.
    #[arg(long = "json-logs")]
    json_logs: bool,
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_env("NAVKIT_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<OverlayConfig> {
    let Some(path) = path else {
        return Ok(OverlayConfig::default());
    };
    match OverlayConfig::from_file(path).and_then(OverlayConfig::validated) {
        Ok(config) => {
            tracing::info!(path = %path.display(), "config loaded");
            Ok(config)
        }
        Err(err) => {
            let err = Error::from(err);
            if err.severity() == Severity::Fallback {
                tracing::warn!(path = %path.display(), error = %err, "config rejected, using defaults");
                Ok(OverlayConfig::default())
            } else {
                Err(err)
            }
        }
    }
}

/// Drives the overlay frame by frame, with a logo ring ticking alongside.
struct Driver {
    clock: Option<FrameClock>,
    ring: SpinningRing,
    frames: usize,
}

impl Driver {
    fn new(realtime: bool) -> Self {
        let mut ring = SpinningRing::default();
        ring.start();
        Self {
            clock: realtime.then(FrameClock::new),
            ring,
            frames: 0,
        }
    }

    fn frame(&mut self, overlay: &mut NavOverlay) {
        let delta = match self.clock.as_mut() {
            Some(clock) => {
                std::thread::sleep(FRAME);
                clock.tick()
            }
            None => FRAME,
        };
        overlay.advance(delta);
        self.ring.advance(delta);
        self.frames += 1;
    }

    /// Run frames until the popup reaches `phase`. Returns `false` on timeout.
    fn run_until(&mut self, overlay: &mut NavOverlay, phase: PopupPhase) -> bool {
        for _ in 0..MAX_FRAMES {
            if overlay.popup().phase() == phase {
                return true;
            }
            self.frame(overlay);
        }
        overlay.popup().phase() == phase
    }
}

fn log_frame(overlay: &NavOverlay, router: &MemoryRouter) {
    let view = overlay.view();
    let active: Vec<&str> = view
        .bar
        .items
        .iter()
        .filter(|i| i.active)
        .map(|i| i.id.as_str())
        .collect();
    tracing::info!(
        path = %router.current_path(),
        active = ?active,
        menu_active = view.bar.menu_active,
        popup = overlay.popup().phase().as_str(),
        "frame"
    );
}

fn run(args: &Args) -> Result<()> {
    let config = load_config(args.config.as_ref())?;

    let storage: Rc<dyn ThemeStorage> = match &args.state {
        Some(path) => Rc::new(FileStorage::new(path)),
        None => Rc::new(MemoryStorage::new()),
    };
    let surface: Rc<dyn StyleSurface> = Rc::new(TokenSurface::new());
    let context = ThemeContext::new();
    context.provide(ThemeStore::with_surface(
        ThemeCatalog::builtin(),
        storage,
        Rc::clone(&surface),
    ));

    let store = context.store()?;
    if let Some(name) = &args.theme {
        store.select(name)?;
        store.save_theme()?;
    }
    tracing::info!(theme = %store.current_name(), dirty = store.is_dirty(), "theme ready");

    if let Some(name) = &args.palette {
        match TesterPalette::preset(name) {
            Some(palette) => palette.apply(surface.as_ref()),
            None => tracing::warn!(palette = %name, "unknown tester palette, skipped"),
        }
    }

    let router = Rc::new(MemoryRouter::new("/"));
    let resolver = ColorResolver::new(surface);
    let mut overlay = NavOverlay::with_router(&config, Rc::clone(&router))
        .resolver(resolver.clone())
        .theme_store(context.store()?)
        .on_close(|| tracing::info!("menu closed"));
    let mut driver = Driver::new(args.realtime);
    log_frame(&overlay, &router);

    // Bar link.
    overlay.press(1);
    log_frame(&overlay, &router);

    // Menu: open, let it settle, pick a destination.
    overlay.open_menu();
    if !driver.run_until(&mut overlay, PopupPhase::Open) {
        tracing::warn!("popup never settled open");
    }
    overlay.select_menu_id("discover");
    if !driver.run_until(&mut overlay, PopupPhase::Closed) {
        tracing::warn!("popup never unmounted");
    }
    log_frame(&overlay, &router);

    // Menu again, dismissed from the backdrop.
    overlay.open_menu();
    driver.frame(&mut overlay);
    overlay.backdrop_click();
    driver.run_until(&mut overlay, PopupPhase::Closed);
    log_frame(&overlay, &router);

    let ring = driver.ring.view(&resolver, Some(&store.current()));
    tracing::info!(
        glow_index = driver.ring.glow_index(),
        lit = ring.glyphs.iter().filter(|g| g.lit).count(),
        color = %ring.lit_color,
        "logo ring"
    );
    tracing::info!(
        frames = driver.frames,
        navigations = router.navigation_count(),
        history = ?router.history(),
        "session finished"
    );

    overlay.teardown();
    context.teardown();
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.json_logs);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(kind = err.error_type(), severity = %err.severity(), error = %err, "harness failed");
            ExitCode::FAILURE
        }
    }
}
