//! incall-sim - replay an event script against the in-call screen.
//!
//! # Usage
//!
//! ```text
//! incall-sim [--config <path>] [--landscape] <script.jsonl>
//! ```
//!
//! Each script line is one host event (see [`script::ScriptEvent`]). Every
//! effect the screen emits is printed to stdout as one JSON object per line,
//! in emission order. Logs go to stderr so stdout stays machine-readable.

mod host;
mod script;

use std::env;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use incall_engine::{ScreenConfig, ScreenOptions, ScreenOrientation};

use crate::host::SimHost;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    config: Option<PathBuf>,
    landscape: bool,
    script: PathBuf,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut config = None;
        let mut landscape = false;
        let mut script = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    let path = args.next().context("--config needs a path")?;
                    config = Some(PathBuf::from(path));
                }
                "--landscape" => landscape = true,
                flag if flag.starts_with("--") => bail!("unknown flag: {flag}"),
                _ if script.is_some() => bail!("only one script may be given"),
                _ => script = Some(PathBuf::from(arg)),
            }
        }

        let Some(script) = script else {
            bail!("usage: incall-sim [--config <path>] [--landscape] <script.jsonl>");
        };
        Ok(Self {
            config,
            landscape,
            script,
        })
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<ScreenConfig> {
    match path {
        Some(path) => Ok(ScreenConfig::load_from(path)?),
        // A broken user config should not block a replay.
        None => Ok(ScreenConfig::load().unwrap_or_else(|err| {
            tracing::warn!(path = %err.path().display(), "Using default config: {err}");
            ScreenConfig::default()
        })),
    }
}

fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse(env::args().skip(1))?;
    let config = load_config(args.config.as_ref())?;
    let options = ScreenOptions {
        orientation: if args.landscape {
            ScreenOrientation::Landscape
        } else {
            ScreenOrientation::Portrait
        },
    };

    let content = fs::read_to_string(&args.script)
        .with_context(|| format!("failed to read script {}", args.script.display()))?;
    let events = script::parse_script(&content)?;
    tracing::info!(events = events.len(), "Replaying script");

    let mut host = SimHost::new(&config, options);
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for (index, event) in events.into_iter().enumerate() {
        tracing::debug!(index, ?event, "Dispatching");
        let effects = host
            .dispatch(event)
            .with_context(|| format!("event {} failed", index + 1))?;
        for effect in effects {
            serde_json::to_writer(&mut out, &effect)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}
