//! Frame sources - the landmark detector boundary

use std::sync::mpsc::{sync_channel, Receiver, SendError, SyncSender};

use bodyscale_core::LandmarkSet;

/// One detector result
#[derive(Debug, Clone, PartialEq)]
pub enum FrameInput {
    Detected(LandmarkSet),
    /// The detector found no person in this frame
    NoDetection,
}

impl From<Option<LandmarkSet>> for FrameInput {
    fn from(value: Option<LandmarkSet>) -> Self {
        match value {
            Some(set) => FrameInput::Detected(set),
            None => FrameInput::NoDetection,
        }
    }
}

impl From<LandmarkSet> for FrameInput {
    fn from(set: LandmarkSet) -> Self {
        FrameInput::Detected(set)
    }
}

/// Pull-based frame stream. `None` ends the stream.
pub trait FrameSource {
    fn next_frame(&mut self) -> Option<FrameInput>;
}

/// Any iterator of frames
#[derive(Debug, Clone)]
pub struct IterSource<I> {
    frames: I,
}

impl<I> IterSource<I> {
    pub fn new(frames: I) -> Self {
        Self { frames }
    }
}

impl<I: Iterator<Item = FrameInput>> FrameSource for IterSource<I> {
    fn next_frame(&mut self) -> Option<FrameInput> {
        self.frames.next()
    }
}

/// Sending half of a single-slot frame channel, held by a capture thread
#[derive(Debug, Clone)]
pub struct FrameSender {
    tx: SyncSender<FrameInput>,
}

impl FrameSender {
    /// Blocks while the previous frame is still waiting to be processed
    pub fn send(&self, frame: FrameInput) -> Result<(), SendError<FrameInput>> {
        self.tx.send(frame)
    }
}

/// Receiving half of a single-slot frame channel
#[derive(Debug)]
pub struct ChannelSource {
    rx: Receiver<FrameInput>,
}

impl FrameSource for ChannelSource {
    fn next_frame(&mut self) -> Option<FrameInput> {
        self.rx.recv().ok()
    }
}

/// Single-slot channel: at most one frame waits while another is processed.
/// The stream ends when every sender is dropped.
pub fn frame_channel() -> (FrameSender, ChannelSource) {
    let (tx, rx) = sync_channel(1);
    (FrameSender { tx }, ChannelSource { rx })
}
