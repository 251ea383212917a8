pub mod classify;
pub mod selector;
pub mod sweep;

pub use classify::classify;
pub use selector::{RandomSource, ThreadRandom, select_outcome};
pub use sweep::{Resolution, SweepReport, Sweeper};
