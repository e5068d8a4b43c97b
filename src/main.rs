mod app;
mod cli;
mod cli_cmds;
mod color;
mod extract;
mod harmony;
mod utils;

use anyhow::Result;

fn main() -> Result<()> {
    cli::run()
}
