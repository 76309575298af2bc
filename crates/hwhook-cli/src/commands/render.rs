//! Render the hook's command lines without running them.

use clap::Args;
use hwhook_core::{HardwareParameters, render_close_command, render_open_command};

use super::common::CommandSourceArgs;

/// Render the open and close command lines.
#[derive(Args)]
pub struct RenderArgs {
    #[command(flatten)]
    source: CommandSourceArgs,

    /// Sample format passed to the open command
    #[arg(long, default_value = "S16_LE")]
    format: String,

    /// Sample rate passed to the open command
    #[arg(long, default_value_t = 48000)]
    rate: i32,

    /// Channel count passed to the open command
    #[arg(long, default_value_t = 2)]
    channels: i32,
}

/// Run the render command.
pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let state = args.source.resolve()?.validate()?;
    let params = HardwareParameters::new(args.format, args.rate, args.channels);

    println!("open:  {}", render_open_command(state.open_command(), &params).trim_end());
    println!("close: {}", render_close_command(state.close_command()));
    Ok(())
}
