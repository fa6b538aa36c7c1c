//! Replays a JSON gesture script against a scaffold canvas and prints the
//! resulting layout.

mod script;

use clap::Parser;
use script::{render_output, write_output, Script, ScriptError};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "scaffold-replay", about = "Replay a scaffold drawing session headlessly")]
struct Cli {
    /// Gesture script (JSON).
    script: PathBuf,

    /// Include the display list of the final frame.
    #[arg(long)]
    display_list: bool,

    /// Write the result here instead of stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

fn run(cli: &Cli) -> Result<(), ScriptError> {
    let script = Script::load(&cli.script)?;
    let canvas = script.replay()?;
    let json = render_output(&canvas, cli.display_list)?;
    match &cli.output {
        Some(path) => write_output(path, &json),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    log::info!("Replaying {}", cli.script.display());

    match run(&cli) {
        Ok(()) => {
            log::info!("Replay finished");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
