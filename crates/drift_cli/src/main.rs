//! Drift CLI
//!
//! Run scroll step mapping, pointer following and scroll effects headlessly
//! to tune their timing constants.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use drift_core::Point;
use drift_motion::{CardStack, ScrollTween, VelocityFade};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod report;

use config::{DriftConfig, CONFIG_FILE};

#[derive(Parser)]
#[command(name = "drift")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Scroll step and pointer follow simulator", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory containing drift.toml
    #[arg(short, long, global = true, default_value = ".")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample step mapping across the progress range
    Steps {
        /// Override the configured step count
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Number of evenly spaced progress samples
        #[arg(short, long, default_value = "11")]
        samples: usize,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Simulate the pointer follower chasing a target
    Follow {
        /// Ticks to simulate after retargeting
        #[arg(short, long, default_value = "10")]
        ticks: u32,

        /// Position at activation (X,Y)
        #[arg(long, default_value = "0,0", value_parser = parse_point)]
        from: Point,

        /// Target position (X,Y)
        #[arg(long, value_parser = parse_point)]
        to: Point,

        #[arg(long)]
        json: bool,
    },

    /// Ticks each follower point needs to settle
    Settle {
        /// Check a single speed instead of the configured points
        #[arg(short, long)]
        speed: Option<f32>,

        /// Remaining fraction of the gap that counts as settled
        #[arg(short, long, default_value = "0.05")]
        tolerance: f32,
    },

    /// Card stack poses at a progress value
    Cards {
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Scroll progress in [0, 1]
        #[arg(short, long)]
        progress: f32,

        #[arg(long)]
        json: bool,
    },

    /// Trace a smooth scroll and its velocity fade
    Scroll {
        /// Destination scroll offset
        #[arg(long, default_value = "1000")]
        to: f32,

        /// Maximum ticks to simulate
        #[arg(short, long, default_value = "120")]
        ticks: u32,

        /// Frame rate of the simulated tick
        #[arg(long, default_value = "60")]
        fps: f32,

        #[arg(long)]
        json: bool,
    },

    /// Write a default drift.toml
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show version and default constants
    Info,
}

fn parse_point(s: &str) -> std::result::Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{}'", s))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad X '{}': {}", x, e))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad Y '{}': {}", y, e))?;
    let point = Point::new(x, y);
    if !point.is_finite() {
        return Err(format!("non-finite point '{}'", s));
    }
    Ok(point)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let load = || DriftConfig::load_from_dir(&cli.config);

    match cli.command {
        Commands::Steps {
            count,
            samples,
            json,
        } => cmd_steps(&load()?, count, samples, json),

        Commands::Follow {
            ticks,
            from,
            to,
            json,
        } => cmd_follow(&load()?, ticks, from, to, json),

        Commands::Settle { speed, tolerance } => cmd_settle(&load()?, speed, tolerance),

        Commands::Cards {
            count,
            progress,
            json,
        } => cmd_cards(&load()?, count, progress, json),

        Commands::Scroll {
            to,
            ticks,
            fps,
            json,
        } => cmd_scroll(&load()?, to, ticks, fps, json),

        Commands::Init { force } => cmd_init(&cli.config, force),

        Commands::Info => cmd_info(),
    }
}

fn print_json<T: Serialize>(rows: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(rows).context("Failed to serialize output")?
    );
    Ok(())
}

fn cmd_steps(config: &DriftConfig, count: Option<usize>, samples: usize, json: bool) -> Result<()> {
    let mut mapper = config.steps.mapper(count)?;
    info!(
        "Sampling {} steps at {} points",
        mapper.step_count(),
        samples
    );

    let rows = report::step_rows(&mut mapper, samples);
    if json {
        return print_json(&rows);
    }

    println!("progress  index  local   done   snap");
    for row in &rows {
        let snap = row
            .nearest_snap
            .map(|s| format!("{:.3}", s))
            .unwrap_or_else(|| "-".into());
        println!(
            "{:>8.3}  {:>5}  {:>5.3}  {:>5.2}  {:>5}",
            row.progress, row.active_index, row.local_progress, row.completion, snap
        );
    }
    Ok(())
}

fn cmd_follow(config: &DriftConfig, ticks: u32, from: Point, to: Point, json: bool) -> Result<()> {
    let mut follower = config.follower.follower()?;
    if !matches!(
        follower.capability(),
        drift_motion::PointerCapability::Fine
    ) {
        anyhow::bail!("Follower is configured for a coarse pointer and never activates");
    }
    info!(
        "Following from ({}, {}) to ({}, {}) for {} ticks",
        from.x, from.y, to.x, to.y, ticks
    );

    let rows = report::follow_rows(&mut follower, from, to, ticks);
    if json {
        return print_json(&rows);
    }

    println!("tick  point         x          y   distance");
    for row in &rows {
        println!(
            "{:>4}  {:<8} {:>10.3} {:>10.3} {:>10.3}",
            row.tick, row.point, row.x, row.y, row.distance
        );
    }
    Ok(())
}

fn cmd_settle(config: &DriftConfig, speed: Option<f32>, tolerance: f32) -> Result<()> {
    let points: Vec<(String, f32)> = match speed {
        Some(speed) => vec![("speed".to_string(), speed)],
        None => config
            .follower
            .points
            .iter()
            .map(|p| (p.name.clone(), p.speed))
            .collect(),
    };

    let rows = report::settle_rows(&points, tolerance)?;
    println!(
        "Ticks to settle within {:.1}% of the gap:",
        tolerance * 100.0
    );
    for row in &rows {
        println!("  {:<8} speed {:.3}: {} ticks", row.point, row.speed, row.ticks);
    }
    Ok(())
}

fn cmd_cards(config: &DriftConfig, count: Option<usize>, progress: f32, json: bool) -> Result<()> {
    let mapper = config.steps.mapper(count)?;
    let state = mapper
        .map(progress)
        .with_context(|| format!("Progress must be finite, got {}", progress))?;
    let stack = CardStack::new(config.cards.to_config());

    let rows = report::card_rows(&stack, &state);
    if json {
        return print_json(&rows);
    }

    println!(
        "Card {} of {} ({:.0}% into step)",
        state.active_index + 1,
        state.step_count,
        state.local_progress * 100.0
    );
    println!("card  translate_y  scale  opacity    z");
    for row in &rows {
        println!(
            "{:>3}{} {:>12.1} {:>6.3} {:>8.2} {:>4}",
            row.index,
            if row.active { '*' } else { ' ' },
            row.translate_y,
            row.scale,
            row.opacity,
            row.z_index
        );
    }
    Ok(())
}

fn cmd_scroll(config: &DriftConfig, to: f32, ticks: u32, fps: f32, json: bool) -> Result<()> {
    if !(fps.is_finite() && fps > 0.0) {
        anyhow::bail!("Invalid fps {}", fps);
    }
    let mut tween = ScrollTween::new(config.smooth_scroll.to_config(), 0.0)
        .context("Invalid [smooth_scroll] configuration")?;
    let fade = VelocityFade::new(config.fade.to_config());

    let rows = report::scroll_rows(&mut tween, &fade, to, ticks, 1.0 / fps);
    if json {
        return print_json(&rows);
    }

    println!("tick   position  velocity   blur  opacity");
    for row in &rows {
        println!(
            "{:>4} {:>10.2} {:>9.3} {:>6.3} {:>8.3}",
            row.tick, row.position, row.velocity, row.blur, row.opacity
        );
    }
    if tween.is_animating() {
        info!("Still animating after {} ticks", ticks);
    }
    Ok(())
}

fn cmd_init(dir: &std::path::Path, force: bool) -> Result<()> {
    let path = dir.join(CONFIG_FILE);
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let content = DriftConfig::default().to_toml()?;
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(())
}

fn cmd_info() -> Result<()> {
    let config = DriftConfig::default();

    println!("Drift");
    println!("=====");
    println!();
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Defaults:");
    println!("  - steps: {}", config.steps.count);
    for point in &config.follower.points {
        println!("  - follower '{}': speed {}", point.name, point.speed);
    }
    println!(
        "  - smooth scroll: {}s {:?}",
        config.smooth_scroll.duration, config.smooth_scroll.easing
    );
    println!(
        "  - fade: threshold {}, max blur {}",
        config.fade.threshold, config.fade.max_blur
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("10,20").unwrap(), Point::new(10.0, 20.0));
        assert_eq!(parse_point(" -1.5 , 3 ").unwrap(), Point::new(-1.5, 3.0));
        assert!(parse_point("10").is_err());
        assert!(parse_point("a,1").is_err());
        assert!(parse_point("inf,1").is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["drift", "follow", "--to", "100,100", "-t", "2"]).unwrap();
        match cli.command {
            Commands::Follow { ticks, from, to, .. } => {
                assert_eq!(ticks, 2);
                assert_eq!(from, Point::ZERO);
                assert_eq!(to, Point::new(100.0, 100.0));
            }
            _ => panic!("expected follow"),
        }
    }
}
