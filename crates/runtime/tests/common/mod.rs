//! Scripted collaborators shared by the runtime integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};
use runtime::{Runtime, RuntimeConfig};
use world_core::{
    DisplaySink, ManualClock, Notifier, SessionGate, SessionState, TransferResource, WorldFlags,
    WorldId, WorldInfo, WorldListProvider, WorldStatus,
};

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

pub struct FakeWorlds {
    worlds: Mutex<Option<Vec<WorldInfo>>>,
}

impl FakeWorlds {
    pub fn loaded(ids: &[u32]) -> Arc<Self> {
        let worlds = ids
            .iter()
            .map(|&id| WorldInfo::new(WorldId(id), WorldFlags::MEMBERS))
            .collect();
        Arc::new(Self {
            worlds: Mutex::new(Some(worlds)),
        })
    }

    pub fn not_loaded() -> Arc<Self> {
        Arc::new(Self {
            worlds: Mutex::new(None),
        })
    }

    pub fn load(&self, worlds: Vec<WorldInfo>) {
        *self.worlds.lock().unwrap() = Some(worlds);
    }
}

impl WorldListProvider for FakeWorlds {
    fn list_worlds(&self) -> Option<Vec<WorldInfo>> {
        self.worlds.lock().unwrap().clone()
    }
}

pub struct FakeSession {
    world: Mutex<WorldId>,
    state: Mutex<SessionState>,
    enabled: AtomicBool,
}

impl FakeSession {
    pub fn logged_in(world: u32) -> Arc<Self> {
        Arc::new(Self {
            world: Mutex::new(WorldId(world)),
            state: Mutex::new(SessionState::LoggedIn),
            enabled: AtomicBool::new(true),
        })
    }

    pub fn set_state(&self, state: SessionState) {
        *self.state.lock().unwrap() = state;
    }

    pub fn set_world(&self, world: WorldId) {
        *self.world.lock().unwrap() = world;
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }
}

impl SessionGate for FakeSession {
    fn current_world(&self) -> WorldId {
        *self.world.lock().unwrap()
    }

    fn session_state(&self) -> SessionState {
        *self.state.lock().unwrap()
    }

    fn is_transfer_feature_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }
}

/// Calls observed by a [`FakeSwitcher`].
#[derive(Debug, Default)]
pub struct SwitcherLog {
    pub probes: u32,
    pub prepares: u32,
    pub executed: Vec<WorldId>,
    pub changed: Vec<WorldId>,
    /// Set if two calls ever overlapped.
    pub overlapped: bool,
}

/// World switcher that turns ready on a given probe number.
pub struct FakeSwitcher {
    ready_on: Option<u32>,
    busy: AtomicBool,
    log: Arc<Mutex<SwitcherLog>>,
}

impl FakeSwitcher {
    pub fn never_ready() -> (Self, Arc<Mutex<SwitcherLog>>) {
        Self::build(None)
    }

    pub fn ready_on(probe: u32) -> (Self, Arc<Mutex<SwitcherLog>>) {
        Self::build(Some(probe))
    }

    fn build(ready_on: Option<u32>) -> (Self, Arc<Mutex<SwitcherLog>>) {
        let log = Arc::new(Mutex::new(SwitcherLog::default()));
        let switcher = Self {
            ready_on,
            busy: AtomicBool::new(false),
            log: Arc::clone(&log),
        };
        (switcher, log)
    }

    fn enter(&self) {
        if self.busy.swap(true, Ordering::SeqCst) {
            self.log.lock().unwrap().overlapped = true;
        }
        // Hold the busy flag across a reschedule point.
        std::thread::yield_now();
    }

    fn leave(&self) {
        self.busy.store(false, Ordering::SeqCst);
    }
}

impl TransferResource for FakeSwitcher {
    fn is_ready(&self) -> bool {
        self.enter();
        let probe = {
            let mut log = self.log.lock().unwrap();
            log.probes += 1;
            log.probes
        };
        self.leave();
        self.ready_on.is_some_and(|n| probe >= n)
    }

    fn prepare(&mut self) {
        self.enter();
        self.log.lock().unwrap().prepares += 1;
        self.leave();
    }

    fn execute(&mut self, target: WorldId) {
        self.enter();
        self.log.lock().unwrap().executed.push(target);
        self.leave();
    }

    fn change_world(&mut self, target: WorldId) {
        self.enter();
        self.log.lock().unwrap().changed.push(target);
        self.leave();
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_owned());
    }
}

#[derive(Default)]
pub struct RecordingDisplay {
    visible: AtomicBool,
    refreshes: Mutex<Vec<Vec<WorldStatus>>>,
}

impl RecordingDisplay {
    pub fn visible() -> Arc<Self> {
        let display = Self::default();
        display.visible.store(true, Ordering::SeqCst);
        Arc::new(display)
    }

    pub fn set_visible(&self, visible: bool) {
        self.visible.store(visible, Ordering::SeqCst);
    }

    pub fn refreshes(&self) -> Vec<Vec<WorldStatus>> {
        self.refreshes.lock().unwrap().clone()
    }
}

impl DisplaySink for RecordingDisplay {
    fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    fn refresh(&self, statuses: &[WorldStatus]) {
        self.refreshes.lock().unwrap().push(statuses.to_vec());
    }
}

/// Collaborators of one test runtime, kept for inspection.
pub struct Fixture {
    pub worlds: Arc<FakeWorlds>,
    pub session: Arc<FakeSession>,
    pub notifier: Arc<RecordingNotifier>,
    pub display: Arc<RecordingDisplay>,
    pub clock: Arc<ManualClock>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            worlds: FakeWorlds::loaded(&[301, 302, 303, 304]),
            session: FakeSession::logged_in(301),
            notifier: Arc::new(RecordingNotifier::default()),
            display: RecordingDisplay::visible(),
            clock: Arc::new(ManualClock::new(t0())),
        }
    }

    /// Starts a runtime with manual ticks around `switcher`.
    pub async fn start(&self, switcher: FakeSwitcher) -> Runtime {
        self.start_with(switcher, RuntimeConfig::default()).await
    }

    pub async fn start_with(&self, switcher: FakeSwitcher, config: RuntimeConfig) -> Runtime {
        Runtime::builder()
            .config(config)
            .manual_ticks()
            .world_list(self.worlds.clone())
            .session_gate(self.session.clone())
            .transfer_resource(switcher)
            .notifier(self.notifier.clone())
            .display_sink(self.display.clone())
            .clock(self.clock.clone())
            .build()
            .await
            .expect("runtime should build")
    }
}
