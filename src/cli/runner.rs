use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use super::{Cli, Commands};
use crate::app;
use crate::cli_cmds::*;

pub(crate) fn run() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = app::Config::load()?;

    match cli.command {
        Some(Commands::Extract {
            image,
            sensitivity,
            colors,
            json,
            no_fallback,
        }) => {
            let opts = config.extract_options(sensitivity, colors);
            cmd_extract(&image, &opts, json, !no_fallback)?;
        }
        Some(Commands::Pick { image, x, y }) => {
            cmd_pick(&image, x, y)?;
        }
        Some(Commands::Harmony { colors, json }) => {
            cmd_harmony(&colors, json)?;
        }
        Some(Commands::Analyze { colors, json }) => {
            cmd_analyze(&colors, json)?;
        }
        Some(Commands::Contrast { color_a, color_b }) => {
            cmd_contrast(&color_a, &color_b)?;
        }
        Some(Commands::Look {
            images,
            sensitivity,
            json,
        }) => {
            let opts = config.extract_options(sensitivity, None);
            cmd_look(&images, &opts, json)?;
        }
        None => {
            Cli::command().print_long_help()?;
        }
    }
    Ok(())
}

/// Logs go to stderr so `--json` output on stdout stays machine-readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
