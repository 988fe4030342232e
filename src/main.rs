//! Gravity Sandbox entry point
//!
//! Runs a headless scripted session: the same event stream a windowed host
//! would feed in, tessellated into a vertex batch every frame.

use std::path::PathBuf;

use glam::DVec2;
use gravity_sandbox::SandboxConfig;
use gravity_sandbox::platform::{InputEvent, InputState, Key, PointerButton};
use gravity_sandbox::renderer::VertexBatch;
use gravity_sandbox::sim::{Engine, FrameReport, frame};

/// Environment variable naming an optional JSON config file
const CONFIG_ENV: &str = "GRAVITY_SANDBOX_CONFIG";
/// Simulated frame length (milliseconds)
const FRAME_MS: f64 = 1000.0 / 60.0;
/// Simulation time advanced per frame
const FRAME_DT: f64 = 1.0;
const SESSION_FRAMES: u64 = 240;

/// Session holding all state a host would keep
struct Session {
    engine: Engine,
    input: InputState,
    batch: VertexBatch,
    time_ms: f64,
    totals: FrameReport,
}

impl Session {
    fn new(config: SandboxConfig) -> Self {
        Self {
            engine: Engine::new(config),
            input: InputState::new(),
            batch: VertexBatch::new(),
            time_ms: 0.0,
            totals: FrameReport::default(),
        }
    }

    fn send(&mut self, event: InputEvent) {
        if let Some(index) = self.input.handle(&mut self.engine, event) {
            log::info!(
                "Launched particle {index} with velocity {}",
                self.engine.store.velocity(index)
            );
        }
    }

    /// Screen position at `offset` pixels from the screen center
    fn screen(&self, offset: DVec2) -> DVec2 {
        self.engine.arena_center + offset
    }

    /// Feed the scripted events for `frame_index`
    fn script(&mut self, frame_index: u64) {
        let time_ms = self.time_ms;
        match frame_index {
            10 => self.send(InputEvent::PointerDown {
                pos: self.screen(DVec2::new(-200.0, 0.0)),
                button: PointerButton::Primary,
                time_ms,
            }),
            14 => self.send(InputEvent::PointerUp {
                pos: self.screen(DVec2::new(-150.0, 20.0)),
                button: PointerButton::Primary,
                time_ms,
            }),
            30 => self.send(InputEvent::PointerDown {
                pos: self.screen(DVec2::new(150.0, -100.0)),
                button: PointerButton::Secondary,
                time_ms,
            }),
            40 => self.send(InputEvent::PointerUp {
                pos: self.screen(DVec2::new(100.0, -100.0)),
                button: PointerButton::Secondary,
                time_ms,
            }),
            60 => {
                self.send(InputEvent::PointerMoved {
                    pos: self.screen(DVec2::ZERO),
                });
                self.send(InputEvent::KeyDown(Key::Push));
            }
            90 => self.send(InputEvent::KeyUp(Key::Push)),
            100 => self.send(InputEvent::KeyDown(Key::Break)),
            103 => self.send(InputEvent::KeyUp(Key::Break)),
            120 => self.send(InputEvent::KeyDown(Key::ZoomIn)),
            150 => self.send(InputEvent::KeyUp(Key::ZoomIn)),
            160 => self.send(InputEvent::KeyDown(Key::Spawn)),
            161 => self.send(InputEvent::KeyUp(Key::Spawn)),
            200 => self.send(InputEvent::KeyDown(Key::Freeze)),
            201 => self.send(InputEvent::KeyUp(Key::Freeze)),
            _ => {}
        }
    }

    fn advance(&mut self, frame_index: u64) {
        self.script(frame_index);
        let input = self.input.frame_input();

        self.batch.clear();
        let report = frame(&mut self.engine, &input, FRAME_DT, &mut self.batch);
        self.time_ms += FRAME_MS;

        self.totals.merges += report.merges;
        self.totals.breaks += report.breaks;
        self.totals.wall_hits += report.wall_hits;
        self.totals.particles = report.particles;

        if frame_index % 60 == 0 {
            log::info!(
                "frame {frame_index}: {} particles, total mass {:.0}, zoom {:.1}, {} vertices ({} bytes)",
                report.particles,
                self.engine.store.total_mass(),
                self.engine.zoom,
                self.batch.vertices.len(),
                self.batch.as_bytes().len()
            );
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Gravity Sandbox (headless) starting...");

    let config_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let config = SandboxConfig::load_or_default(config_path.as_deref());

    let mut session = Session::new(config);
    log::info!("Session seeded with {}", session.engine.seed);

    for frame_index in 0..SESSION_FRAMES {
        session.advance(frame_index);
    }

    let totals = session.totals;
    log::info!(
        "Finished {} frames: {} merges, {} breaks, {} wall hits, {} particles, total mass {:.0}, {} vertices",
        session.engine.frame_count,
        totals.merges,
        totals.breaks,
        totals.wall_hits,
        totals.particles,
        session.engine.store.total_mass(),
        session.batch.vertices.len()
    );
}
