//! `mpdline` — mpc-style status line renderer for mpd song data.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

mod cache;
mod config;
mod ctx;
mod render;
mod song;
mod status;
mod util;

use cache::LastText;
use config::Config;
use ctx::Ctx;
use song::Snapshot;

#[derive(Parser)]
#[command(name = "mpdline", about = "Render an mpc-style status line")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Print the status line for a player snapshot
    Status {
        /// Snapshot file, or `-` for stdin
        #[arg(long, default_value = "-")]
        songs: PathBuf,
        /// Template overriding the configured format
        #[arg(long)]
        format: Option<String>,
        /// Maximum characters before truncation
        #[arg(long)]
        max_width: Option<usize>,
        /// Print `key=value` lines including color and changed flag
        #[arg(long)]
        porcelain: bool,
    },

    /// Render a template without hiding or truncation
    Render {
        format: String,
        #[arg(long, default_value = "-")]
        songs: PathBuf,
        /// Also print whether any placeholder resolved
        #[arg(long)]
        found: bool,
    },

    /// Print a single resolved field (`next_` prefix supported)
    Field {
        name: String,
        #[arg(long, default_value = "-")]
        songs: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let ctx = Ctx::new().context("initialise context")?;
    let mut cfg = Config::load(&ctx.config_file).context("load config")?;

    match cli.cmd {
        Cmd::Status {
            songs,
            format,
            max_width,
            porcelain,
        } => {
            if let Some(format) = format {
                cfg.format = format;
            }
            if let Some(max_width) = max_width {
                cfg.max_width = max_width;
            }
            cmd_status(&ctx, &cfg, &songs, porcelain);
            Ok(())
        }

        Cmd::Render {
            format,
            songs,
            found,
        } => {
            let snapshot = load_snapshot(&songs)?;
            let songs = status::songs_for(snapshot, &cfg, ctx.locale);
            let (text, was_found) = render::render_songs(&format, &songs);
            println!("{text}");
            if found {
                println!("found={was_found}");
            }
            Ok(())
        }

        Cmd::Field { name, songs } => {
            let snapshot = load_snapshot(&songs)?;
            let songs = status::songs_for(snapshot, &cfg, ctx.locale);
            println!("{}", songs.resolve(&name));
            Ok(())
        }
    }
}

fn cmd_status(ctx: &Ctx, cfg: &Config, songs: &Path, porcelain: bool) {
    // A broken snapshot still produces a status line.
    let st = match load_snapshot(songs) {
        Ok(snapshot) => status::compose(snapshot, cfg, ctx.locale),
        Err(e) => {
            eprintln!("warn: {e:#}");
            status::failure(cfg)
        }
    };

    let mut last = LastText::open(&ctx.last_text_file);
    let changed = last.update(&st.text);
    if changed {
        if let Err(e) = last.persist() {
            eprintln!("warn: cache update failed: {e:#}");
        }
    }

    if !porcelain {
        println!("{}", st.text);
        return;
    }

    println!("full_text={}", st.text);
    if let Some(color) = &st.color {
        println!("color={color}");
    }
    println!("changed={changed}");
}

fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let src = util::read_source(path)?;
    Snapshot::parse(&src).with_context(|| format!("load snapshot {}", path.display()))
}
