//! # Sfxkit CLI
//!
//! Command-line interface for sfxkit sound registries.
//!
//! ## Commands
//! - `list` - Show tracks and their sounds
//! - `keys` - Print every combined key
//! - `play` - Dry-run playback through the null backend
//! - `validate` - Load the manifest and build its indexes
//! - `init` - Write a starter manifest

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use sfxkit_audio::{AudioBackend, Manifest, NullBackend, Registry};

/// Sfxkit sound registry CLI
#[derive(Parser)]
#[command(name = "sfxkit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Registry manifest
    #[arg(short, long, global = true, default_value = "sfx.json")]
    pub manifest: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show tracks and their sounds
    List,

    /// Print every combined key, one per line
    Keys,

    /// Play a sound without an audio device
    Play {
        /// Combined key (Track_Sound)
        #[arg(conflicts_with_all = ["track", "sound"], required_unless_present = "track")]
        key: Option<String>,

        /// Track name
        #[arg(short, long, requires = "sound")]
        track: Option<String>,

        /// Sound name
        #[arg(short, long, requires = "track")]
        sound: Option<String>,

        /// Number of times to play
        #[arg(short, long, default_value = "1")]
        repeat: u32,
    },

    /// Load the manifest and build its indexes
    Validate,

    /// Write a starter manifest
    Init {
        /// Overwrite an existing manifest
        #[arg(long)]
        force: bool,
    },
}

/// Execute the CLI command
pub fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    run(&cli)
}

/// Run a parsed command without touching logger setup
pub fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::List => {
            let registry = load_registry(&cli.manifest, Arc::new(NullBackend::new()))?;
            log::info!("Registry '{}':", registry.name());
            for track in registry.tracks() {
                let bus = track.output_bus().unwrap_or("default");
                log::info!("  {} (bus: {})", track.name(), bus);
                for sound in track.sounds() {
                    log::info!(
                        "    {} -> {} (volume {}, pitch {}, pan {}, priority {}{})",
                        sound.name(),
                        sound.clip(),
                        sound.volume(),
                        sound.pitch(),
                        sound.pan(),
                        sound.priority(),
                        if sound.looping() { ", loop" } else { "" }
                    );
                }
            }
        }

        Commands::Keys => {
            let registry = load_registry(&cli.manifest, Arc::new(NullBackend::new()))?;
            for key in registry.keys() {
                println!("{key}");
            }
        }

        Commands::Play { key, track, sound, repeat } => {
            let voices = play(
                &cli.manifest,
                key.as_deref(),
                track.as_deref(),
                sound.as_deref(),
                *repeat,
            )?;
            log::info!("Played {} time(s); {} voice(s) created", repeat, voices);
        }

        Commands::Validate => {
            let registry = validate(&cli.manifest)?;
            log::info!(
                "Manifest '{}' is valid: {} tracks, {} sounds",
                registry.name(),
                registry.track_count(),
                registry.keys().len()
            );
        }

        Commands::Init { force } => {
            init(&cli.manifest, *force)?;
            log::info!("Wrote starter manifest to {}", cli.manifest.display());
        }
    }

    Ok(())
}

/// Play a key or a track/sound pair `repeat` times; returns the voices created
fn play(
    manifest: &Path,
    key: Option<&str>,
    track: Option<&str>,
    sound: Option<&str>,
    repeat: u32,
) -> Result<usize> {
    let backend = Arc::new(NullBackend::new());
    let registry = load_registry(manifest, backend.clone())?;

    for _ in 0..repeat {
        match (key, track, sound) {
            (Some(key), _, _) => registry.play_key(key)?,
            (None, Some(track), Some(sound)) => registry.play(track, sound)?,
            _ => bail!("Either a key or --track and --sound are required"),
        }
    }
    Ok(backend.voices_created())
}

fn validate(manifest: &Path) -> Result<Registry> {
    let registry = load_registry(manifest, Arc::new(NullBackend::new()))?;
    registry.build_indexes();
    Ok(registry)
}

fn init(manifest: &Path, force: bool) -> Result<()> {
    if manifest.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            manifest.display()
        );
    }
    let json = Manifest::sample().to_json_pretty()?;
    std::fs::write(manifest, json)
        .with_context(|| format!("Failed to write {}", manifest.display()))?;
    Ok(())
}

fn load_registry(path: &Path, backend: Arc<dyn AudioBackend>) -> Result<Registry> {
    let manifest =
        Manifest::load(path).with_context(|| format!("Failed to load {}", path.display()))?;
    Ok(manifest.into_registry(backend)?)
}
