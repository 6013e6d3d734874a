use std::time::Duration;
use thiserror::Error;

/// Opaque id of a pending frame callback (`requestAnimationFrame` handle).
pub type FrameHandle = i32;

/// Platform frame-callback primitive.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle, LoopError>;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

#[derive(Debug, Error, PartialEq)]
pub enum LoopError {
    #[error("frame request failed: {0}")]
    Request(String),
    #[error("frame callback is no longer installed")]
    Detached,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoopState {
    #[default]
    Stopped,
    Running {
        pending: Option<FrameHandle>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    AlreadyRunning,
    /// Reduced motion is set: the caller draws one still frame, nothing is
    /// scheduled.
    StaticFrame,
}

/// Self-rescheduling render loop expressed as a two-state machine.
///
/// `start` stores the pending handle so `stop` can cancel it; each fired
/// frame calls `begin_frame` then `schedule_next`.
#[derive(Debug, Default)]
pub struct AnimationLoop {
    state: LoopState,
    reduced_motion: bool,
}

impl AnimationLoop {
    pub fn new(reduced_motion: bool) -> Self {
        Self {
            state: LoopState::Stopped,
            reduced_motion,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running { .. })
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Changing to reduced motion does not stop a running loop by itself;
    /// callers pair this with [`AnimationLoop::stop`].
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
    }

    pub fn start<S: FrameScheduler + ?Sized>(
        &mut self,
        scheduler: &mut S,
    ) -> Result<StartOutcome, LoopError> {
        if self.reduced_motion {
            return Ok(StartOutcome::StaticFrame);
        }
        if self.is_running() {
            return Ok(StartOutcome::AlreadyRunning);
        }
        let handle = scheduler.request_frame()?;
        self.state = LoopState::Running {
            pending: Some(handle),
        };
        log::info!("[loop] started");
        Ok(StartOutcome::Started)
    }

    /// Mark the pending callback as delivered. Returns whether the frame
    /// should be rendered.
    pub fn begin_frame(&mut self) -> bool {
        match &mut self.state {
            LoopState::Running { pending } => {
                *pending = None;
                true
            }
            LoopState::Stopped => false,
        }
    }

    /// Request the following frame. A failed request leaves the loop stopped.
    pub fn schedule_next<S: FrameScheduler + ?Sized>(
        &mut self,
        scheduler: &mut S,
    ) -> Result<(), LoopError> {
        if let LoopState::Running { pending } = self.state {
            if pending.is_some() {
                return Ok(());
            }
            match scheduler.request_frame() {
                Ok(handle) => {
                    self.state = LoopState::Running {
                        pending: Some(handle),
                    };
                }
                Err(e) => {
                    self.state = LoopState::Stopped;
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    /// Cancel any pending callback and stop. Safe to call repeatedly.
    pub fn stop<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let LoopState::Running { pending } = self.state {
            if let Some(handle) = pending {
                scheduler.cancel_frame(handle);
            }
            log::info!("[loop] stopped");
        }
        self.state = LoopState::Stopped;
    }
}

/// Fixed-interval trigger fed with frame deltas.
#[derive(Clone, Debug)]
pub struct IntervalTimer {
    interval: Duration,
    accum: Duration,
}

impl IntervalTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            accum: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Advance by `dt`; true when an interval boundary was crossed. Fires at
    /// most once per call so a backgrounded tab does not flood the field.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if self.interval.is_zero() {
            return false;
        }
        self.accum += dt;
        if self.accum >= self.interval {
            let rem = self.accum.as_nanos() % self.interval.as_nanos();
            self.accum = Duration::from_nanos(rem as u64);
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.accum = Duration::ZERO;
    }
}
