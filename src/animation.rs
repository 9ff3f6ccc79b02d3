//! Explicit, cancellable animation loop.
//!
//! The host calls back once per display refresh.  Each callback performs one
//! `step` + `render` and then asks for exactly one more callback, keeping the
//! handle of that request so [`AnimationLoop::stop`] can withdraw it.  After
//! `stop` returns no further frame runs, even if the host still delivers the
//! old handle.

use std::time::Duration;

use crate::field::ParticleField;
use crate::surface::FieldSurface;
use bevy::prelude::*;

/// Identifies one requested frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

/// Host-side "call me before the next repaint" service.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Single-slot scheduler serviced by a per-frame system: at most one request
/// is outstanding and [`FrameQueue::take_due`] hands it out once.
#[derive(Resource, Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: Option<FrameHandle>,
}

impl FrameQueue {
    /// Remove and return the outstanding request, if any.
    pub fn take_due(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

#[derive(Debug, Default)]
pub struct AnimationLoop {
    pending: Option<FrameHandle>,
    running: bool,
    frames: u64,
}

impl AnimationLoop {
    /// Begin animating.  Requests one frame unless one is already pending.
    pub fn start<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.running = true;
        if self.pending.is_none() {
            self.pending = Some(scheduler.request_frame());
        }
    }

    /// Stop animating and withdraw the pending request.
    pub fn stop<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.running = false;
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_frame(handle);
        }
    }

    /// Host callback.  Runs one frame if `handle` is the request this loop is
    /// waiting for, then re-arms.  Returns whether a frame ran.
    pub fn on_frame<S, F>(
        &mut self,
        handle: FrameHandle,
        field: &mut ParticleField,
        surface: &mut F,
        dt: Duration,
        scheduler: &mut S,
    ) -> bool
    where
        S: FrameScheduler + ?Sized,
        F: FieldSurface + ?Sized,
    {
        if !self.running || self.pending != Some(handle) {
            return false;
        }
        self.pending = None;

        field.step(dt);
        field.render(surface);
        self.frames += 1;

        self.pending = Some(scheduler.request_frame());
        true
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Frames run since creation.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
