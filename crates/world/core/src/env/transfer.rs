//! The stateful, single-threaded resource that performs world switches.
use crate::world::WorldId;

/// World switcher of the game client.
///
/// Methods take `&mut self`: whoever owns the resource is the only one able
/// to probe or drive it, which keeps probe-then-execute sequences atomic.
pub trait TransferResource: Send {
    /// Whether the world selector is open and able to execute a hop.
    fn is_ready(&self) -> bool;

    /// Opens or prepares the selector. Idempotent.
    fn prepare(&mut self);

    /// Performs the in-game transfer to `target`.
    fn execute(&mut self, target: WorldId);

    /// Switches the selected world while at the login screen.
    fn change_world(&mut self, target: WorldId);
}
