//! Drive a full hook lifecycle outside of the audio framework.

use std::path::PathBuf;
use std::rc::Rc;

use clap::Args;
use hwhook_core::{CommandRunner, ParamsHook, RecordingRunner, status_of};
use hwhook_io::{FixedStream, ProcfsSource, ShellRunner, SimulatedHost};

use super::common::{CommandSourceArgs, DeviceArgs};

/// Run install, params-ready, params-freed and close against a substream.
#[derive(Args)]
pub struct SimulateArgs {
    #[command(flatten)]
    source: CommandSourceArgs,

    #[command(flatten)]
    device: DeviceArgs,

    /// Override the procfs root from the configuration
    #[arg(long)]
    proc_root: Option<PathBuf>,

    /// Record commands instead of running them
    #[arg(long)]
    dry_run: bool,

    /// Number of params-ready/params-freed cycles
    #[arg(long, default_value_t = 1)]
    cycles: u32,
}

/// Run the simulate command.
pub fn run(args: SimulateArgs) -> anyhow::Result<()> {
    let config = args.source.resolve()?;
    let proc_root = args
        .proc_root
        .unwrap_or_else(|| config.io.proc_root.clone());

    let recorder = Rc::new(RecordingRunner::new());
    let runner: Box<dyn CommandRunner> = if args.dry_run {
        Box::new(Rc::clone(&recorder))
    } else {
        Box::new(ShellRunner::new(&config.io.shell))
    };

    let mut host = SimulatedHost::new();
    let mut hook = ParamsHook::install(
        &mut host,
        &config.hook_args,
        runner,
        ProcfsSource::new(&proc_root),
    )?;
    println!("install:      ok ({} handlers registered)", hook.registrations().len());

    let stream = FixedStream::device(args.device.identity());
    let mut failures = 0;
    for cycle in 1..=args.cycles {
        let ready = hook.on_params_ready(Some(&stream));
        report(cycle, "params-ready", &ready);
        let freed = hook.on_params_freed();
        report(cycle, "params-freed", &freed);
        failures += usize::from(ready.is_err()) + usize::from(freed.is_err());
    }

    hook.on_close();
    host.release_all();
    println!("close:        ok");

    if args.dry_run {
        println!();
        println!("Recorded commands:");
        for (idx, line) in recorder.calls().iter().enumerate() {
            println!("  [{idx}] {}", line.trim_end());
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} event(s) failed");
    }
    Ok(())
}

fn report(cycle: u32, event: &str, result: &hwhook_core::Result<()>) {
    match result {
        Ok(()) => println!("{event:<13} status 0 (cycle {cycle})"),
        Err(e) => println!("{event:<13} status {} (cycle {cycle}): {e}", status_of(result)),
    }
}
