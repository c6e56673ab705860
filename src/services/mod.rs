pub mod challenge_resolver;
pub mod completion_barrier;
pub mod site_classifier;

pub use challenge_resolver::{ChallengeResolver, TerminalResolver};
pub use completion_barrier::{
    await_quiescence, warn_stale_downloads, BarrierOutcome, DownloadDir, LocalDownloadDir,
};
pub use site_classifier::classify;
