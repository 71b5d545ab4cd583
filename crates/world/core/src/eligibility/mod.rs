//! Eligibility windows: stored entries and the pure derivations over them.
//!
//! A [`WorldEntry`] records when a world's window next opens. Remaining time,
//! status tier, and display text are never stored; [`EligibilityClock`]
//! derives them from an entry and a reference "now" every time they are asked
//! for.
mod clock;
mod entry;

pub use clock::{EligibilityClock, Remaining, StatusTier, WorldStatus, format_remaining};
pub use entry::{Eligibility, WorldEntry};
