//! Audio/haptic cue seam. The core announces moments; hosts decide what a
//! cue sounds like, if anything.

/// Receiver for gameplay cues. Every hook defaults to a no-op so hosts
/// implement only the cues they voice.
pub trait CueSink {
    fn block_spawn(&mut self) {}
    fn catch(&mut self) {}
    fn success(&mut self) {}
    fn fail(&mut self) {}
    fn win(&mut self) {}
    fn select(&mut self) {}
    fn music_start(&mut self) {}
    fn music_stop(&mut self) {}
}

/// Silent sink for headless hosts and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullCues;

impl CueSink for NullCues {}
