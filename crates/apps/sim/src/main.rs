use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wallwalker_physics::Object;
use wallwalker_sim::{run, SimConfig};

/// Run a scripted wall-walking scenario and print what happened
#[derive(Parser, Debug)]
#[command(name = "wallwalker-sim", version, about)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the number of simulated frames
    #[arg(long)]
    frames: Option<u32>,

    /// Override the initial heading in degrees (0 faces the wall)
    #[arg(long)]
    yaw: Option<f32>,

    /// Override the distance to the wall face
    #[arg(long)]
    wall_distance: Option<f32>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimConfig::from_file(path)?,
        None => SimConfig::default(),
    };
    if let Some(frames) = args.frames {
        config.scenario.frames = frames;
    }
    if let Some(yaw) = args.yaw {
        config.scenario.start_yaw_degrees = yaw;
    }
    if let Some(distance) = args.wall_distance {
        config.scenario.wall_distance = distance;
    }

    let report = run(&config)?;

    println!("\n=== Transitions ===");
    for transition in &report.transitions {
        let p = transition.position;
        println!(
            "  frame {:>4}: {:?} at ({:.1}, {:.1}, {:.1})",
            transition.frame, transition.event, p.x, p.y, p.z
        );
    }

    let pose = &report.final_pose;
    let pos = pose.position();
    let fwd = pose.forward();
    println!("\n=== Final State ===");
    println!("Position: ({:.2}, {:.2}, {:.2})", pos.x, pos.y, pos.z);
    println!("Forward:  ({:.2}, {:.2}, {:.2})", fwd.x, fwd.y, fwd.z);
    println!("Wall walking: {}", report.wall_walking_at_end);
    println!(
        "Entries: {}, exits: {}, attached frames: {}",
        report.entries(),
        report.exits(),
        report.attached_frames
    );

    Ok(())
}
