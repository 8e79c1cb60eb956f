//! Lane Bowl entry point
//!
//! Headless demo: a seeded auto-bowler plays a game on the Rapier lane and
//! prints the score lines. `RUST_LOG=debug` shows pin-by-pin detail.

use lane_bowl::Settings;
use lane_bowl::render::TraceRenderer;
use lane_bowl::session::{Session, score_line};
use lane_bowl::sim::{GameEvent, MeterZone, RapierWorld, ThrowPhase, meter_color};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Simulated display rate
const FRAME_DT: f64 = 1.0 / 60.0;
/// Hard stop so a stuck lane can't spin forever
const MAX_SESSION_SECS: f64 = 3600.0;

fn main() {
    env_logger::init();
    log::info!("Lane Bowl (headless) starting...");

    let settings = Settings::load();
    let frames = settings.demo_frames;
    let auto_reset = settings.auto_reset_secs;
    let mut rng = Pcg32::seed_from_u64(settings.demo_seed);
    log::info!("Auto-bowler seed: {}", settings.demo_seed);

    let world = RapierWorld::new(settings.gravity);
    let mut session = Session::new(world, settings);
    let mut renderer = TraceRenderer::default();

    let mut now = 0.0;
    let mut release_at: Option<f64> = None;
    let mut launched_at: Option<f64> = None;

    while session.state.frames_completed < frames && now < MAX_SESSION_SECS {
        match session.state.phase {
            ThrowPhase::Aiming => {
                session.press_launch();
                let hold_ms: u32 = rng.random_range(80..1200);
                release_at = Some(now + hold_ms as f64 / 1000.0);
            }
            ThrowPhase::Charging if release_at.is_some_and(|t| now >= t) => {
                session.release_launch();
                release_at = None;
            }
            ThrowPhase::Launched if launched_at.is_some_and(|t| now - t >= auto_reset) => {
                log::warn!("Nothing fell after {:.1}s, reracking", auto_reset);
                session.request_reset();
                launched_at = None;
            }
            _ => {}
        }

        for event in session.frame(now) {
            match &event {
                GameEvent::Launched { click_ms } => {
                    launched_at = Some(now);
                    println!(
                        "Launch: meter {} ms ({:?}), color {:?}",
                        click_ms,
                        MeterZone::for_click(*click_ms),
                        meter_color(*click_ms)
                    );
                }
                GameEvent::ManualReset => println!("Lane reset"),
                _ => {}
            }
            if let Some(line) = score_line(&event) {
                println!("{}", line);
            }
        }
        session.render(&mut renderer);
        now += FRAME_DT;
    }

    println!("{}", session.state.scorecard.summary());
    log::info!(
        "Done after {:.1}s simulated, {} draw calls",
        now,
        renderer.draws
    );
}
