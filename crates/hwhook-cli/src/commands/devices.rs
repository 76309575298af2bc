//! List playback substreams and their current parameters.

use std::path::PathBuf;

use clap::Args;
use hwhook_config::DEFAULT_PROC_ROOT;
use hwhook_core::{HardwareParameters, ParameterSource};
use hwhook_io::ProcfsSource;

/// List playback substreams.
#[derive(Args)]
pub struct DevicesArgs {
    /// Root of the per-card parameter descriptions
    #[arg(long, default_value = DEFAULT_PROC_ROOT)]
    proc_root: PathBuf,
}

/// Run the devices command.
pub fn run(args: DevicesArgs) -> anyhow::Result<()> {
    let source = ProcfsSource::new(&args.proc_root);
    let devices = source.list_playback_substreams()?;

    if devices.is_empty() {
        println!("No playback substreams found under {}.", args.proc_root.display());
        return Ok(());
    }

    println!("Playback Substreams");
    println!("===================\n");
    for device in &devices {
        let status = match source.read_lines(device) {
            Ok(lines) if lines.iter().any(|line| line.trim() == "closed") => "closed".to_string(),
            Ok(lines) => describe(&HardwareParameters::parse(&lines)),
            Err(e) => format!("unavailable ({e})"),
        };
        println!("  {device:<12} {status}");
    }
    println!();
    println!("Total: {} substream(s)", devices.len());
    Ok(())
}

fn describe(params: &HardwareParameters) -> String {
    if params.is_complete() {
        params.to_string()
    } else {
        format!("partial ({params})")
    }
}
