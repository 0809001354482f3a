//! Chaos Battle headless runner
//!
//! Plays one scripted duel without a window and logs how it went. Handy for
//! checking a tuning file before handing it to the desktop client.

use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use chaos_battle::{
    FrameStatus, LaunchOptions, MatchDriver, PlayerId, RecordingSurface, FRAME_RATE, VERSION,
};

/// Give up after this many simulated seconds
const MAX_SECONDS: u32 = 120;

fn main() {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("Chaos Battle Sim v{}", VERSION);

    let options = LaunchOptions::from_env();
    let config = match options.game_config() {
        Ok(config) => config,
        Err(e) => {
            error!("Config rejected: {}", e);
            std::process::exit(1);
        }
    };
    let seed = options.seed.unwrap_or_else(clock_seed);

    let mut driver = match MatchDriver::new(config, seed) {
        Ok(driver) => driver,
        Err(e) => {
            error!("Could not start match: {}", e);
            std::process::exit(1);
        }
    };

    scripted_duel(&mut driver);
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Player one walks in firing; player two holds ground, hopping now and then.
fn scripted_duel(driver: &mut MatchDriver) {
    info!("=== Starting Scripted Duel ===");
    for id in PlayerId::ALL {
        info!("{} keys: {}", id, driver.bindings(id));
    }

    let p1 = *driver.bindings(PlayerId::ONE);
    let p2 = *driver.bindings(PlayerId::TWO);
    let frame_ms = 1_000 / FRAME_RATE as u64;
    let max_frames = MAX_SECONDS * FRAME_RATE;
    let mut surface = RecordingSurface::default();

    driver.key_down(p1.shoot);
    driver.key_down(p2.shoot);

    let mut outcome = FrameStatus::Running;
    for n in 0..max_frames {
        // Close the gap until the shooters are a fifth of the field apart
        let gap = driver.state().player(PlayerId::TWO).x - driver.state().player(PlayerId::ONE).x;
        if gap > driver.config().playfield.width / 5.0 {
            driver.key_down(p1.right);
        } else {
            driver.key_up(p1.right);
        }

        if n % 90 == 0 {
            driver.key_down(p2.jump);
        } else {
            driver.key_up(p2.jump);
        }

        outcome = driver.frame(n as u64 * frame_ms, &mut surface);

        if n % (FRAME_RATE * 5) == 0 {
            let state = driver.state();
            info!(
                "Tick {}: P1 {} hp, P2 {} hp, {} shots in flight",
                state.tick,
                state.player(PlayerId::ONE).health,
                state.player(PlayerId::TWO).health,
                state.projectiles.len()
            );
        }

        if outcome != FrameStatus::Running {
            break;
        }
    }

    info!("=== Duel Results ===");
    match outcome {
        FrameStatus::Finished { .. } | FrameStatus::Halted => {
            if let Some(text) = surface.winner() {
                info!("{} (after {} frames)", text, surface.frames);
            }
        }
        FrameStatus::Running => {
            warn!("No winner after {} seconds", MAX_SECONDS);
        }
    }
}
