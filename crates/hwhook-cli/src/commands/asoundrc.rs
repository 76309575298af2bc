//! Print the ALSA configuration stanza that loads the hook.

use clap::Args;
use hwhook_config::AsoundPcm;

use super::common::CommandSourceArgs;

/// Print the ALSA configuration that loads the hook.
#[derive(Args)]
pub struct AsoundrcArgs {
    #[command(flatten)]
    source: CommandSourceArgs,

    /// Name of the generated PCM
    #[arg(long, default_value = "loophook")]
    name: String,

    /// Slave PCM the hook wraps
    #[arg(long, default_value = "hw:Loopback,0")]
    slave: String,

    /// Module library providing the hook
    #[arg(long)]
    lib: Option<String>,
}

/// Run the asoundrc command.
pub fn run(args: AsoundrcArgs) -> anyhow::Result<()> {
    let config = args.source.resolve()?;
    let mut pcm = AsoundPcm::from_config(args.name, args.slave, &config)?;
    if let Some(lib) = args.lib {
        pcm = pcm.with_module_lib(lib);
    }
    print!("{}", pcm.render());
    Ok(())
}
