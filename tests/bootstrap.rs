//! End-to-end coverage of the bootstrap sequence using recording fakes for
//! the host-thread and module-loading seams.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use beryl_proxy::core::error::ProxyError;
use beryl_proxy::core::host::{HostContext, ThreadControl};
use beryl_proxy::core::inject::{
    InjectionCoordinator, Outcome, RuntimeLoader, RuntimeModule, Stage, RUNTIME_ENTRY_SYMBOL,
};
use beryl_proxy::core::resolver::Layout;
use beryl_proxy::ProxyResult;

type CallLog = Rc<RefCell<Vec<&'static str>>>;

struct RecordingThreadControl {
    log: CallLog,
    primitive_available: bool,
}

impl ThreadControl for RecordingThreadControl {
    fn suspend(&self, _host: &HostContext) -> ProxyResult<()> {
        if !self.primitive_available {
            return Err(ProxyError::PrimitiveUnavailable {
                module: "ntdll.dll",
                symbol: "NtSuspendThread",
            });
        }
        self.log.borrow_mut().push("suspend");
        Ok(())
    }
}

struct RecordingLoader {
    log: CallLog,
    export_entry: bool,
}

impl RuntimeLoader for RecordingLoader {
    fn load(&self, path: &Path) -> ProxyResult<Box<dyn RuntimeModule>> {
        self.log.borrow_mut().push("load");
        Ok(Box::new(RecordingModule {
            log: self.log.clone(),
            export_entry: self.export_entry,
            path: path.to_path_buf(),
        }))
    }
}

struct RecordingModule {
    log: CallLog,
    export_entry: bool,
    path: PathBuf,
}

impl RuntimeModule for RecordingModule {
    fn invoke_entry(&self, _host: &HostContext) -> ProxyResult<()> {
        if !self.export_entry {
            return Err(ProxyError::MissingEntryPoint {
                path: self.path.clone(),
                symbol: RUNTIME_ENTRY_SYMBOL,
            });
        }
        self.log.borrow_mut().push("init");
        Ok(())
    }
}

struct Fixture {
    dir: tempfile::TempDir,
    log: CallLog,
    host: HostContext,
}

impl Fixture {
    fn new(config_body: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("launcher_config.json"), config_body).unwrap();
        Self {
            dir,
            log: Rc::new(RefCell::new(Vec::new())),
            host: HostContext {
                thread_id: 7,
                thread_handle: 0,
            },
        }
    }

    fn without_config() -> Self {
        let fixture = Self::new("{}");
        std::fs::remove_file(fixture.config_path()).unwrap();
        fixture
    }

    fn place_module(&self, relative: &str) {
        let path = self.dir.path().join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"stub").unwrap();
    }

    fn config_path(&self) -> PathBuf {
        self.dir.path().join("launcher_config.json")
    }

    fn thread_control(&self, primitive_available: bool) -> RecordingThreadControl {
        RecordingThreadControl {
            log: self.log.clone(),
            primitive_available,
        }
    }

    fn loader(&self, export_entry: bool) -> RecordingLoader {
        RecordingLoader {
            log: self.log.clone(),
            export_entry,
        }
    }

    fn calls(&self) -> Vec<&'static str> {
        self.log.borrow().clone()
    }
}

#[test]
fn vanilla_profile_performs_no_injection() {
    let fixture = Fixture::new(r#"{"runtime": "Vanilla"}"#);
    let threads = fixture.thread_control(true);
    let loader = fixture.loader(true);
    let mut coordinator = InjectionCoordinator::new(
        &fixture.host,
        &threads,
        &loader,
        fixture.config_path(),
        fixture.dir.path().to_path_buf(),
    );

    let outcome = coordinator.run().unwrap();
    assert!(matches!(outcome, Outcome::Vanilla));
    assert!(fixture.calls().is_empty());
    assert_eq!(coordinator.stage(), Stage::Resolved);
}

#[test]
fn handoff_runs_suspend_load_init_in_order() {
    let fixture = Fixture::new(r#"{"runtime": "Foo@1.2.3"}"#);
    fixture.place_module("mods/Foo@1.2.3/win-client/Foo.dll");
    let threads = fixture.thread_control(true);
    let loader = fixture.loader(true);
    let mut coordinator = InjectionCoordinator::new(
        &fixture.host,
        &threads,
        &loader,
        fixture.config_path(),
        fixture.dir.path().to_path_buf(),
    );

    let outcome = coordinator.run().unwrap();
    match outcome {
        Outcome::Handoff(resolved) => {
            assert_eq!(resolved.layout, Layout::Modern);
            assert!(resolved.path.ends_with("mods/Foo@1.2.3/win-client/Foo.dll"));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(fixture.calls(), vec!["suspend", "load", "init"]);
    assert_eq!(coordinator.stage(), Stage::EntryPointInvoked);
}

#[test]
fn legacy_layout_still_hands_off() {
    let fixture = Fixture::new(r#"{"runtime": "Foo@1.2.3"}"#);
    fixture.place_module("mods/Foo@1.2.3/Foo.dll");
    let threads = fixture.thread_control(true);
    let loader = fixture.loader(true);
    let mut coordinator = InjectionCoordinator::new(
        &fixture.host,
        &threads,
        &loader,
        fixture.config_path(),
        fixture.dir.path().to_path_buf(),
    );

    match coordinator.run().unwrap() {
        Outcome::Handoff(resolved) => assert_eq!(resolved.layout, Layout::Legacy),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn unversioned_runtime_fails_before_any_thread_control() {
    let fixture = Fixture::new(r#"{"runtime": "Bad"}"#);
    let threads = fixture.thread_control(true);
    let loader = fixture.loader(true);
    let mut coordinator = InjectionCoordinator::new(
        &fixture.host,
        &threads,
        &loader,
        fixture.config_path(),
        fixture.dir.path().to_path_buf(),
    );

    let err = coordinator.run().unwrap_err();
    assert!(matches!(err, ProxyError::InvalidRuntimeName(name) if name == "Bad"));
    assert!(fixture.calls().is_empty());
    assert_eq!(coordinator.stage(), Stage::ConfigLoaded);
}

#[test]
fn missing_module_fails_before_suspension() {
    let fixture = Fixture::new(r#"{"runtime": "Foo@1.2.3"}"#);
    let threads = fixture.thread_control(true);
    let loader = fixture.loader(true);
    let mut coordinator = InjectionCoordinator::new(
        &fixture.host,
        &threads,
        &loader,
        fixture.config_path(),
        fixture.dir.path().to_path_buf(),
    );

    let err = coordinator.run().unwrap_err();
    assert!(matches!(err, ProxyError::RuntimeNotFound { .. }));
    assert!(fixture.calls().is_empty());
}

#[test]
fn unavailable_primitive_prevents_the_load() {
    let fixture = Fixture::new(r#"{"runtime": "Foo@1.2.3"}"#);
    fixture.place_module("mods/Foo@1.2.3/win-client/Foo.dll");
    let threads = fixture.thread_control(false);
    let loader = fixture.loader(true);
    let mut coordinator = InjectionCoordinator::new(
        &fixture.host,
        &threads,
        &loader,
        fixture.config_path(),
        fixture.dir.path().to_path_buf(),
    );

    let err = coordinator.run().unwrap_err();
    assert!(matches!(err, ProxyError::PrimitiveUnavailable { .. }));
    assert!(fixture.calls().is_empty());
    assert_eq!(coordinator.stage(), Stage::Resolved);
}

#[test]
fn missing_entry_point_surfaces_after_the_load() {
    let fixture = Fixture::new(r#"{"runtime": "Foo@1.2.3"}"#);
    fixture.place_module("mods/Foo@1.2.3/win-client/Foo.dll");
    let threads = fixture.thread_control(true);
    let loader = fixture.loader(false);
    let mut coordinator = InjectionCoordinator::new(
        &fixture.host,
        &threads,
        &loader,
        fixture.config_path(),
        fixture.dir.path().to_path_buf(),
    );

    let err = coordinator.run().unwrap_err();
    match err {
        ProxyError::MissingEntryPoint { symbol, .. } => assert_eq!(symbol, "Init"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(fixture.calls(), vec!["suspend", "load"]);
    assert_eq!(coordinator.stage(), Stage::Injected);
}

#[test]
fn absent_config_fails_at_the_start() {
    let fixture = Fixture::without_config();
    let threads = fixture.thread_control(true);
    let loader = fixture.loader(true);
    let mut coordinator = InjectionCoordinator::new(
        &fixture.host,
        &threads,
        &loader,
        fixture.config_path(),
        fixture.dir.path().to_path_buf(),
    );

    let err = coordinator.run().unwrap_err();
    assert!(matches!(err, ProxyError::ConfigNotFound { .. }));
    assert_eq!(coordinator.stage(), Stage::Start);
}
