//! Simulated game collaborators for running the hopper without a game.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use world_core::{
    DisplaySink, Notifier, SessionGate, SessionState, TransferResource, WorldFlags, WorldId,
    WorldInfo, WorldListProvider, WorldStatus,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Fixed world list with a mix of tracked and transient worlds.
pub struct SimWorlds {
    worlds: Vec<WorldInfo>,
}

impl SimWorlds {
    pub fn new() -> Self {
        let members = WorldFlags::MEMBERS;
        let worlds = vec![
            WorldInfo::new(WorldId(301), WorldFlags::empty()),
            WorldInfo::new(WorldId(302), members),
            WorldInfo::new(WorldId(303), members),
            WorldInfo::new(WorldId(304), members),
            WorldInfo::new(WorldId(305), members | WorldFlags::PVP),
            WorldInfo::new(WorldId(306), members),
            WorldInfo::new(WorldId(309), members | WorldFlags::SKILL_TOTAL),
            WorldInfo::new(WorldId(318), members | WorldFlags::HIGH_RISK),
            WorldInfo::new(WorldId(319), members | WorldFlags::QUEST_SPEEDRUNNING),
            WorldInfo::new(WorldId(345), members | WorldFlags::DEADMAN),
            WorldInfo::new(WorldId(383), members | WorldFlags::PVP_ARENA),
            WorldInfo::new(WorldId(420), members),
            WorldInfo::new(WorldId(445), members | WorldFlags::FRESH_START),
            WorldInfo::new(WorldId(459), members | WorldFlags::TOURNAMENT),
            WorldInfo::new(WorldId(505), members),
        ];
        Self { worlds }
    }
}

impl WorldListProvider for SimWorlds {
    fn list_worlds(&self) -> Option<Vec<WorldInfo>> {
        Some(self.worlds.clone())
    }
}

/// Session whose state is driven by console commands.
pub struct SimSession {
    world: Mutex<WorldId>,
    state: Mutex<SessionState>,
    hop_enabled: bool,
}

impl SimSession {
    pub fn new(world: WorldId, hop_enabled: bool) -> Self {
        Self {
            world: Mutex::new(world),
            state: Mutex::new(SessionState::LoginScreen),
            hop_enabled,
        }
    }

    pub fn set_state(&self, state: SessionState) {
        *lock(&self.state) = state;
    }

    pub fn set_world(&self, world: WorldId) {
        *lock(&self.world) = world;
    }
}

impl SessionGate for SimSession {
    fn current_world(&self) -> WorldId {
        *lock(&self.world)
    }

    fn session_state(&self) -> SessionState {
        *lock(&self.state)
    }

    fn is_transfer_feature_enabled(&self) -> bool {
        self.hop_enabled
    }
}

/// World switcher that opens after a number of prepares.
pub struct SimSwitcher {
    session: Arc<SimSession>,
    ready_after: u32,
    prepared: u32,
}

impl SimSwitcher {
    pub fn new(session: Arc<SimSession>, ready_after: u32) -> Self {
        Self {
            session,
            ready_after,
            prepared: 0,
        }
    }
}

impl TransferResource for SimSwitcher {
    fn is_ready(&self) -> bool {
        self.prepared >= self.ready_after
    }

    fn prepare(&mut self) {
        self.prepared += 1;
        tracing::debug!(
            target: "hopper::sim",
            prepared = self.prepared,
            "World switcher opening"
        );
    }

    fn execute(&mut self, target: WorldId) {
        self.prepared = 0;
        self.session.set_world(target);
        self.session.set_state(SessionState::LoggedIn);
        println!("* Hopped to World {target}");
    }

    fn change_world(&mut self, target: WorldId) {
        self.session.set_world(target);
        println!("* Login world set to {target}");
    }
}

/// Prints notices to the console.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        println!("> {message}");
    }
}

/// Overlay stand-in that prints open or nearly open worlds on each redraw.
#[derive(Default)]
pub struct ConsoleDisplay {
    visible: AtomicBool,
}

impl ConsoleDisplay {
    pub fn set_visible(&self, visible: bool) {
        self.visible.store(visible, Ordering::Relaxed);
    }
}

impl DisplaySink for ConsoleDisplay {
    fn is_visible(&self) -> bool {
        self.visible.load(Ordering::Relaxed)
    }

    fn refresh(&self, statuses: &[WorldStatus]) {
        let line = statuses
            .iter()
            .filter(|status| !status.remaining.is_unknown())
            .map(|status| format!("{}={}", status.world, status.text))
            .collect::<Vec<_>>()
            .join("  ");

        if !line.is_empty() {
            println!("[overlay] {line}");
        }
    }
}
