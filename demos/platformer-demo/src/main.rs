//! Headless platformer run.
//!
//! Builds a small level (floor, wall, ladder, trap), feeds a scripted input
//! sequence through the fixed-step runner at a 60 Hz frame rate and logs the
//! player and camera.
//! Run with `cargo run -p platformer-demo -- --ticks 300 --log-level debug`.

mod game;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use zap_platformer::input::state::keys;
use zap_platformer::{GameRunner, InputEvent, PlatformerConfig, PlatformerError};

use crate::game::PlatformerDemo;

#[derive(Debug, Parser)]
#[command(name = "platformer-demo", about = "Scripted platformer movement run")]
struct Args {
    /// Number of host frames to simulate.
    #[arg(long, default_value_t = 360)]
    ticks: u32,

    /// Host frame rate. The simulation itself runs at the configured fixed step.
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// JSON file with `game`, `movement` and `camera` sections.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `info` or `zap_platformer=trace`. RUST_LOG wins if set.
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Log the player's state every N frames.
    #[arg(long, default_value_t = 30)]
    report_every: u32,
}

/// (frame, event): walk right, sprint, jump twice, then slide down the wall.
const SCRIPT: &[(u32, InputEvent)] = &[
    (0, InputEvent::KeyDown { key_code: keys::RIGHT }),
    (30, InputEvent::KeyDown { key_code: keys::SHIFT }),
    (40, InputEvent::KeyDown { key_code: keys::SPACE }),
    (41, InputEvent::KeyUp { key_code: keys::SPACE }),
    (55, InputEvent::KeyDown { key_code: keys::SPACE }),
    (56, InputEvent::KeyUp { key_code: keys::SPACE }),
    (70, InputEvent::KeyUp { key_code: keys::SHIFT }),
    (90, InputEvent::KeyDown { key_code: keys::SPACE }),
    (91, InputEvent::KeyUp { key_code: keys::SPACE }),
    (160, InputEvent::KeyUp { key_code: keys::RIGHT }),
    (170, InputEvent::KeyDown { key_code: keys::LEFT }),
    (240, InputEvent::KeyUp { key_code: keys::LEFT }),
];

fn run(args: &Args) -> Result<(), PlatformerError> {
    let config = match &args.config {
        Some(path) => PlatformerConfig::from_file(path)?,
        None => PlatformerConfig::default(),
    };

    let mut runner = GameRunner::new(PlatformerDemo::new(config));
    runner.init()?;
    let frame_dt = if args.fps.is_finite() && args.fps > 0.0 {
        1.0 / args.fps
    } else {
        runner.config().fixed_dt
    };
    let report_every = args.report_every.max(1);

    let mut steps = 0;
    for frame in 0..args.ticks {
        for (_, event) in SCRIPT.iter().filter(|(at, _)| *at == frame) {
            runner.push_input(*event);
        }
        steps += runner.tick(frame_dt);

        if frame % report_every == 0 {
            report(&runner, frame);
        }
    }
    report(&runner, args.ticks);
    log::info!("{} frames, {} fixed steps", args.ticks, steps);
    Ok(())
}

fn report(runner: &GameRunner<PlatformerDemo>, frame: u32) {
    let Some(player) = runner.game().player() else {
        return;
    };
    let ctx = runner.ctx();
    let pos = ctx.scene.position_of(player.entity()).unwrap_or_default();
    let vel = ctx.velocity(player.entity());
    let state = player.state();
    let camera = ctx.camera.center();
    log::info!(
        "frame {:>4} (+{:.2} step): pos ({:6.2}, {:6.2}) vel ({:6.2}, {:6.2}) {:?} \
         grounded={} jumps={} camera ({:6.2}, {:6.2})",
        frame,
        runner.alpha(),
        pos.x,
        pos.y,
        vel.x,
        vel.y,
        state.locomotion,
        state.grounded,
        player.jump_count(),
        camera.x,
        camera.y,
    );
}

fn main() -> ExitCode {
    let args = Args::parse();
    let env = env_logger::Env::default().default_filter_or(&args.log_level);
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
