//! Integration tests for the hook lifecycle.
//!
//! Drives install, params-ready, params-freed and teardown through test
//! doubles for the host, the parameter source and the command runner.

use std::cell::Cell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::time::{Duration, Instant};

use hwhook_core::{
    CommandRunner, ConfigLookup, ConfigSource, DeviceIdentity, HookError, HookHost, HookId,
    HookKind, HookPhase, ParameterSource, ParamsHook, PcmInfo, PcmStream, RecordingRunner,
    status_of,
};

// ---------------------------------------------------------------------------
// Test doubles
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct TestHost {
    next: u32,
    active: Vec<HookId>,
    removed: Vec<HookId>,
}

impl HookHost for TestHost {
    fn add_hook(&mut self, _kind: HookKind) -> Result<HookId, i32> {
        self.next += 1;
        let id = HookId(self.next);
        self.active.push(id);
        Ok(id)
    }

    fn remove_hook(&mut self, id: HookId) {
        self.active.retain(|active| *active != id);
        self.removed.push(id);
    }
}

#[derive(Debug, Default)]
struct MemorySource {
    records: HashMap<DeviceIdentity, &'static str>,
    reads: Cell<usize>,
}

impl MemorySource {
    fn with(device: DeviceIdentity, record: &'static str) -> Self {
        let mut source = Self::default();
        source.records.insert(device, record);
        source
    }
}

impl ParameterSource for MemorySource {
    fn read_lines(&self, device: &DeviceIdentity) -> hwhook_core::Result<Vec<String>> {
        self.reads.set(self.reads.get() + 1);
        self.records
            .get(device)
            .map(|record| record.lines().map(str::to_string).collect())
            .ok_or_else(|| {
                HookError::source_unavailable(device.hw_params_location(), "no such file")
            })
    }
}

enum TestStream {
    Device(i32, u32, u32),
    QueryError(i32),
}

impl PcmStream for TestStream {
    fn info(&self) -> Result<PcmInfo, i32> {
        match *self {
            TestStream::Device(card, device, subdevice) => Ok(PcmInfo {
                card,
                device,
                subdevice,
            }),
            TestStream::QueryError(code) => Err(code),
        }
    }
}

/// Configuration value that is a plain string rather than a compound.
struct ScalarConfig;

impl ConfigSource for ScalarConfig {
    fn is_compound(&self) -> bool {
        false
    }

    fn lookup(&self, _key: &str) -> ConfigLookup<'_> {
        ConfigLookup::Missing
    }
}

/// Compound whose `opencmd` is an integer.
struct IntegerOpenCommand;

impl ConfigSource for IntegerOpenCommand {
    fn is_compound(&self) -> bool {
        true
    }

    fn lookup(&self, key: &str) -> ConfigLookup<'_> {
        match key {
            "opencmd" => ConfigLookup::Other("integer"),
            _ => ConfigLookup::String("true"),
        }
    }
}

const RECORD: &str = "access: RW_INTERLEAVED\nformat: S16_LE\nsubformat: STD\n\
                      channels: 2\nrate: 48000 (48000/1)\nperiod_size: 1024\n";

fn config(open: &str, close: &str) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    map.insert("opencmd".to_string(), open.to_string());
    map.insert("closecmd".to_string(), close.to_string());
    map
}

fn loopback() -> DeviceIdentity {
    DeviceIdentity::new(1, 0, 0)
}

// ---------------------------------------------------------------------------
// Install
// ---------------------------------------------------------------------------

#[test]
fn install_copies_templates_verbatim() {
    let mut host = TestHost::default();
    let cfg = config("aloop-start --device hw:Loopback,1", "aloop-stop");
    let hook = ParamsHook::install(&mut host, &cfg, RecordingRunner::new(), MemorySource::default())
        .unwrap();

    assert_eq!(hook.state().open_command(), "aloop-start --device hw:Loopback,1");
    assert_eq!(hook.state().close_command(), "aloop-stop");
    assert_eq!(host.active.len(), 3);
    assert!(host.removed.is_empty());
}

#[test]
fn install_without_opencmd_fails_cleanly() {
    let mut host = TestHost::default();
    let mut cfg = config("open", "close");
    cfg.remove("opencmd");
    let runner = Rc::new(RecordingRunner::new());

    let err = ParamsHook::install(&mut host, &cfg, Rc::clone(&runner), MemorySource::default())
        .unwrap_err();

    assert_eq!(err, HookError::ConfigMissingKey("opencmd"));
    assert_eq!(err.code(), -22);
    assert!(host.active.is_empty());
    assert_eq!(host.next, 0, "no handler may be registered");
    assert_eq!(runner.call_count(), 0);
    assert_eq!(Rc::strong_count(&runner), 1, "runner must be released");
}

#[test]
fn install_without_closecmd_fails_cleanly() {
    let mut host = TestHost::default();
    let mut cfg = config("open", "close");
    cfg.remove("closecmd");

    let err = ParamsHook::install(&mut host, &cfg, RecordingRunner::new(), MemorySource::default())
        .unwrap_err();

    assert_eq!(err, HookError::ConfigMissingKey("closecmd"));
    assert!(host.active.is_empty());
}

#[test]
fn install_rejects_non_compound_config() {
    let mut host = TestHost::default();
    let err = ParamsHook::install(
        &mut host,
        &ScalarConfig,
        RecordingRunner::new(),
        MemorySource::default(),
    )
    .unwrap_err();
    assert_eq!(err, HookError::ConfigNotCompound);
}

#[test]
fn install_rejects_non_string_template() {
    let mut host = TestHost::default();
    let err = ParamsHook::install(
        &mut host,
        &IntegerOpenCommand,
        RecordingRunner::new(),
        MemorySource::default(),
    )
    .unwrap_err();
    assert!(matches!(err, HookError::ConfigInvalidValue { key: "opencmd", .. }));
}

// The priming run tolerates a positive exit status but aborts on a negative
// one. The later close-event path negates positives and reports them as
// failures. Both behaviours are kept as they are.

#[test]
fn priming_positive_status_does_not_abort_install() {
    let mut host = TestHost::default();
    let runner = RecordingRunner::new().script([1]);
    let hook = ParamsHook::install(&mut host, &config("open", "close"), runner, MemorySource::default());

    let hook = hook.expect("positive priming status must be tolerated");
    assert_eq!(hook.runner().calls(), vec!["close"]);
    assert_eq!(host.active.len(), 3);
}

#[test]
fn priming_negative_status_rolls_back_install() {
    let mut host = TestHost::default();
    let runner = Rc::new(RecordingRunner::new().script([-12]));

    let err = ParamsHook::install(
        &mut host,
        &config("open", "close"),
        Rc::clone(&runner),
        MemorySource::default(),
    )
    .unwrap_err();

    assert_eq!(err, HookError::CommandExecutionFailed(-12));
    assert_eq!(err.code(), -12);
    assert!(host.active.is_empty(), "registrations must be removed");
    assert_eq!(host.removed, vec![HookId(1), HookId(2), HookId(3)]);
    assert_eq!(Rc::strong_count(&runner), 1, "hook resources must be released");
}

#[test]
fn close_event_positive_status_is_reported() {
    let mut host = TestHost::default();
    let runner = RecordingRunner::new().script([1, 1]);
    let mut hook =
        ParamsHook::install(&mut host, &config("open", "close"), runner, MemorySource::default())
            .unwrap();

    let result = hook.on_params_freed();
    assert_eq!(result, Err(HookError::CommandExecutionFailed(-1)));
    assert_eq!(status_of(&result), -1);
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[test]
fn full_lifecycle_runs_expected_commands() {
    let mut host = TestHost::default();
    let source = MemorySource::with(loopback(), RECORD);
    let mut hook =
        ParamsHook::install(&mut host, &config("/bin/echo", "/bin/true"), RecordingRunner::new(), source)
            .unwrap();
    let stream = TestStream::Device(1, 0, 0);

    hook.on_params_ready(Some(&stream)).unwrap();
    assert_eq!(hook.phase(), HookPhase::ParamsReady);
    hook.on_params_freed().unwrap();
    assert_eq!(hook.phase(), HookPhase::ParamsFreed);
    hook.on_params_ready(Some(&stream)).unwrap();
    hook.on_params_freed().unwrap();

    assert_eq!(
        hook.runner().calls(),
        vec![
            "/bin/true",
            "/bin/echo S16_LE 48000 2\n",
            "/bin/true",
            "/bin/echo S16_LE 48000 2\n",
            "/bin/true",
        ]
    );
    hook.on_close();
}

#[test]
fn params_ready_rediscovers_every_time() {
    let mut host = TestHost::default();
    let source = MemorySource::with(loopback(), RECORD);
    let mut hook =
        ParamsHook::install(&mut host, &config("open", "close"), RecordingRunner::new(), &source)
            .unwrap();
    let stream = TestStream::Device(1, 0, 0);

    hook.on_params_ready(Some(&stream)).unwrap();
    hook.on_params_ready(Some(&stream)).unwrap();
    assert_eq!(source.reads.get(), 2);
}

#[test]
fn params_freed_does_not_read_parameters() {
    let mut host = TestHost::default();
    let source = MemorySource::with(loopback(), RECORD);
    let mut hook =
        ParamsHook::install(&mut host, &config("open", "close"), RecordingRunner::new(), &source)
            .unwrap();

    hook.on_params_freed().unwrap();
    assert_eq!(source.reads.get(), 0);
}

#[test]
fn open_command_exit_two_surfaces_as_minus_two() {
    let mut host = TestHost::default();
    let runner = RecordingRunner::new().script([0, 2]);
    let mut hook = ParamsHook::install(
        &mut host,
        &config("open", "close"),
        runner,
        MemorySource::with(loopback(), RECORD),
    )
    .unwrap();

    let result = hook.on_params_ready(Some(&TestStream::Device(1, 0, 0)));
    assert_eq!(status_of(&result), -2);
    assert_eq!(hook.phase(), HookPhase::Installed);
}

#[test]
fn missing_stream_handle_is_invalid() {
    let mut host = TestHost::default();
    let mut hook = ParamsHook::install(
        &mut host,
        &config("open", "close"),
        RecordingRunner::new(),
        MemorySource::default(),
    )
    .unwrap();

    assert_eq!(hook.on_params_ready(None), Err(HookError::InvalidHandle));
    assert_eq!(hook.runner().call_count(), 1);
}

#[test]
fn device_query_error_is_propagated() {
    let mut host = TestHost::default();
    let mut hook = ParamsHook::install(
        &mut host,
        &config("open", "close"),
        RecordingRunner::new(),
        MemorySource::default(),
    )
    .unwrap();

    let result = hook.on_params_ready(Some(&TestStream::QueryError(-77)));
    assert_eq!(status_of(&result), -77);
}

#[test]
fn unpopulated_source_reports_invalid_state() {
    let mut host = TestHost::default();
    let mut hook = ParamsHook::install(
        &mut host,
        &config("open", "close"),
        RecordingRunner::new(),
        MemorySource::with(loopback(), RECORD),
    )
    .unwrap();

    let result = hook.on_params_ready(Some(&TestStream::Device(1, 0, 1)));
    assert!(matches!(
        result,
        Err(HookError::ParameterSourceUnavailable { ref location, .. })
            if location == "card1/pcm0p/sub1/hw_params"
    ));
    assert_eq!(status_of(&result), -22);
}

#[test]
fn closed_record_still_dispatches_with_sentinels() {
    let mut host = TestHost::default();
    let mut hook = ParamsHook::install(
        &mut host,
        &config("notify", "close"),
        RecordingRunner::new(),
        MemorySource::with(loopback(), "closed\n"),
    )
    .unwrap();

    hook.on_params_ready(Some(&TestStream::Device(1, 0, 0))).unwrap();
    assert_eq!(hook.runner().calls()[1], "notify  -1 -1\n");
}

// ---------------------------------------------------------------------------
// Blocking execution
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct SlowRunner(Duration);

impl CommandRunner for SlowRunner {
    fn run(&self, _command_line: &str) -> i32 {
        std::thread::sleep(self.0);
        0
    }
}

/// Commands run synchronously with no timeout: a slow command stalls the
/// event handler for its whole duration.
#[test]
fn command_execution_blocks_the_handler() {
    let mut host = TestHost::default();
    let delay = Duration::from_millis(50);
    let mut hook = ParamsHook::install(
        &mut host,
        &config("open", "close"),
        SlowRunner(delay),
        MemorySource::default(),
    )
    .unwrap();

    let start = Instant::now();
    hook.on_params_freed().unwrap();
    assert!(start.elapsed() >= delay);
}
