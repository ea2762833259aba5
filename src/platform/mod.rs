//! Platform abstraction layer
//!
//! Host-provided collaborators of the frame loop:
//! - Frame scheduling (requestAnimationFrame on web, a frame budget natively)
//! - The ball counter display
//! - The drawing surface (see `renderer`)

#[cfg(not(target_arch = "wasm32"))]
pub mod native;
#[cfg(target_arch = "wasm32")]
pub mod web;

/// Receives the live ball count once per frame
pub trait CounterSink {
    fn publish(&mut self, live_count: u32);
}

/// Every published value, in order
impl CounterSink for Vec<u32> {
    fn publish(&mut self, live_count: u32) {
        self.push(live_count);
    }
}

/// Paces the frame loop
pub trait FrameScheduler {
    /// Wait for the next frame slot; `false` once the host stops scheduling
    fn next_frame(&mut self) -> bool;
}
