//! Replays a recorded landmark trace through the pinch controller against
//! a simulated scene and logs the resulting commands.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use glam::Vec2;
use pinchgrab::landmark::{LandmarkPoint, PinchObservation};
use pinchgrab::manipulation::{Condition, ManipulationCommand, PinchController};
use pinchgrab::options::Options;
use pinchgrab::sim::{SimObject, SimScene};
use pinchgrab::trace::load_trace;
use pinchgrab::util::FrameTiming;
use rand::Rng;

/// Replay a recorded landmark trace against a simulated scene.
#[derive(Parser)]
#[command(name = "pinchgrab", version)]
struct Args {
    /// JSON-lines landmark trace, one observation per frame.
    trace: PathBuf,

    /// TOML options file.
    #[arg(long, conflicts_with = "preset")]
    options: Option<PathBuf>,

    /// Named options preset, resolved as `<preset-dir>/<name>.toml`.
    #[arg(long)]
    preset: Option<String>,

    /// Directory searched by `--preset`.
    #[arg(long, default_value = "presets")]
    preset_dir: PathBuf,

    /// TOML scene with `[[objects]]` tables. Defaults to one object in the
    /// middle of the view.
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Replay rate in frames per second (0 = as fast as possible).
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Uniform landmark noise added to every fingertip, in normalized units.
    #[arg(long, default_value_t = 0.0)]
    jitter: f32,
}

#[derive(Default)]
struct Tally {
    grabs: usize,
    moves: usize,
    releases: usize,
    missing: usize,
    misses: usize,
    forced: usize,
}

fn jittered<R: Rng>(
    observation: &PinchObservation,
    amount: f32,
    rng: &mut R,
) -> PinchObservation {
    let mut shake = |p: LandmarkPoint| {
        LandmarkPoint::new(
            p.x + rng.random_range(-amount..=amount),
            p.y + rng.random_range(-amount..=amount),
        )
    };
    PinchObservation {
        thumb_tip: observation.thumb_tip.map(&mut shake),
        index_tip: observation.index_tip.map(&mut shake),
    }
}

fn load_preset(dir: &Path, name: &str) -> anyhow::Result<Options> {
    let available = Options::list_presets(dir);
    if !available.iter().any(|preset| preset == name) {
        anyhow::bail!(
            "no preset '{name}' in {} (available: {})",
            dir.display(),
            if available.is_empty() {
                "none".to_owned()
            } else {
                available.join(", ")
            }
        );
    }
    let path = dir.join(format!("{name}.toml"));
    let options = Options::load(&path)
        .with_context(|| format!("loading preset {}", path.display()))?;
    log::info!("using preset '{name}'");
    Ok(options)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let args = Args::parse();

    let options = match (&args.options, &args.preset) {
        (Some(path), _) => Options::load(path)
            .with_context(|| format!("loading options {}", path.display()))?,
        (None, Some(name)) => load_preset(&args.preset_dir, name)?,
        (None, None) => Options::default(),
    };

    let mut scene = match &args.scene {
        Some(path) => SimScene::load(path)
            .with_context(|| format!("loading scene {}", path.display()))?,
        None => {
            let mut scene = SimScene::new();
            let center = Vec2::new(options.viewport.width, options.viewport.height) * 0.5;
            let _ = scene.insert(SimObject::new(center, 40.0));
            scene
        }
    };

    let frames = load_trace(&args.trace)
        .with_context(|| format!("loading trace {}", args.trace.display()))?;
    log::info!(
        "replaying {} frames against {} objects at {} fps",
        frames.len(),
        scene.len(),
        args.fps
    );

    let mut controller = PinchController::new(&options);
    let mut timing = FrameTiming::new(args.fps);
    let mut rng = rand::rng();
    let mut tally = Tally::default();

    for (index, frame) in frames.iter().enumerate() {
        let observation = if args.jitter > 0.0 {
            jittered(frame, args.jitter, &mut rng)
        } else {
            *frame
        };

        let outcome = controller.process_observation(&mut scene, &observation);
        for command in &outcome.commands {
            match command {
                ManipulationCommand::BeginGrab { .. } => tally.grabs += 1,
                ManipulationCommand::MoveTo { .. } => tally.moves += 1,
                ManipulationCommand::EndGrab { .. } => tally.releases += 1,
            }
            log::debug!("frame {index}: {command:?}");
        }
        match outcome.condition {
            Some(Condition::MissingLandmark) => tally.missing += 1,
            Some(Condition::NoTargetUnderPinch) => tally.misses += 1,
            Some(Condition::InvalidHandle) => tally.forced += 1,
            None => {}
        }

        timing.pace();
    }

    let _ = controller.release(&mut scene);

    log::info!(
        "{} grabs, {} moves, {} releases ({} forced); {} frames without a hand, {} pinches on empty space",
        tally.grabs,
        tally.moves,
        tally.releases,
        tally.forced,
        tally.missing,
        tally.misses
    );
    log::info!("replay rate {:.1} fps", timing.fps());
    for (id, object) in scene.iter() {
        log::info!(
            "object {} '{}' at {} height {} ({:?})",
            id.0,
            object.name,
            object.center,
            object.height,
            object.mode
        );
    }

    Ok(())
}
