//! hwhook CLI - inspect and exercise the hardware-parameter hook.

mod commands;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hwhook")]
#[command(author, version, about = "Hardware-parameter hook for loopback audio devices", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the negotiated parameters of a playback substream
    Params(commands::params::ParamsArgs),

    /// Render the open and close command lines
    Render(commands::render::RenderArgs),

    /// Run install, params-ready, params-freed and close against a substream
    Simulate(commands::simulate::SimulateArgs),

    /// List playback substreams and their parameters
    Devices(commands::devices::DevicesArgs),

    /// Print the ALSA configuration that loads the hook
    Asoundrc(commands::asoundrc::AsoundrcArgs),
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Params(args) => commands::params::run(args),
        Commands::Render(args) => commands::render::run(args),
        Commands::Simulate(args) => commands::simulate::run(args),
        Commands::Devices(args) => commands::devices::run(args),
        Commands::Asoundrc(args) => commands::asoundrc::run(args),
    }
}
