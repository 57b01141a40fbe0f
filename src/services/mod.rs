pub mod roster;

pub use roster::{CreateOutcome, ReconcileStats, RosterService, SlotChoice};
