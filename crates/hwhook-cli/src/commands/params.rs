//! Show the parameters of a playback substream.

use std::path::PathBuf;

use clap::Args;
use hwhook_config::DEFAULT_PROC_ROOT;
use hwhook_io::ProcfsSource;

use super::common::DeviceArgs;

/// Show the negotiated parameters of a playback substream.
#[derive(Args)]
pub struct ParamsArgs {
    #[command(flatten)]
    device: DeviceArgs,

    /// Root of the per-card parameter descriptions
    #[arg(long, default_value = DEFAULT_PROC_ROOT)]
    proc_root: PathBuf,

    /// Print as JSON
    #[arg(long)]
    json: bool,
}

/// Run the params command.
pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    let source = ProcfsSource::new(&args.proc_root);
    let device = args.device.identity();
    let params = source.read_params(&device)?;

    if args.json {
        let value = serde_json::json!({
            "device": device.to_string(),
            "path": source.path_for(&device),
            "format": params.format,
            "rate": params.rate,
            "channels": params.channels,
            "complete": params.is_complete(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("Device:   {device}");
    println!("Source:   {}", source.path_for(&device).display());
    if params.is_complete() {
        println!("Format:   {}", params.format);
        println!("Rate:     {} Hz", params.rate);
        println!("Channels: {}", params.channels);
    } else {
        println!("Parameters not negotiated (substream closed or record incomplete)");
        println!("  format={:?} rate={} channels={}", params.format, params.rate, params.channels);
    }
    Ok(())
}
