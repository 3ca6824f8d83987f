//! Frame scheduling
//!
//! The session asks for its next frame through [`FrameScheduler`]. In the
//! browser that is `requestAnimationFrame`; headless callers use
//! [`ManualScheduler`] and step frames themselves.

/// Platform hook that arranges for the next frame callback
pub trait FrameScheduler {
    /// Call back on the next display frame
    fn request_frame(&mut self);

    /// Call back once after a delay. Defaults to the next frame.
    fn request_frame_after(&mut self, delay_ms: u32) {
        let _ = delay_ms;
        self.request_frame();
    }
}

/// Scheduler that only records requests, for synchronous stepping
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    pending: bool,
    requests: usize,
    last_delay_ms: Option<u32>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the outstanding request, if any
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Total number of requests made
    pub fn requests(&self) -> usize {
        self.requests
    }

    /// Delay of the most recent delayed request
    pub fn last_delay_ms(&self) -> Option<u32> {
        self.last_delay_ms
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) {
        self.pending = true;
        self.requests += 1;
    }

    fn request_frame_after(&mut self, delay_ms: u32) {
        self.last_delay_ms = Some(delay_ms);
        self.request_frame();
    }
}
