use std::cell::Cell;
use std::rc::Rc;

/// Lifecycle of a [`RenderLoop`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    /// Created, no frame drawn yet.
    Idle,
    /// Each frame schedules the next one.
    Running,
    /// Cancelled; pending frames are dropped and nothing new is scheduled.
    Stopped,
}

/// Host facility that invokes the loop again "as soon as it can".
///
/// On desktop this is `Window::request_redraw`; the host coalesces requests
/// into one redraw per display refresh.
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

/// Cancel handle for a [`RenderLoop`].
///
/// Cloneable so input handlers can stop the loop without owning it.
/// Single-threaded by construction (`Rc`).
#[derive(Debug, Clone)]
pub struct LoopHandle {
    state: Rc<Cell<LoopState>>,
}

impl LoopHandle {
    /// Cancels the next scheduled frame. Idempotent.
    pub fn stop(&self) {
        if self.state.get() != LoopState::Stopped {
            log::debug!("render loop stopped");
        }
        self.state.set(LoopState::Stopped);
    }

    pub fn state(&self) -> LoopState {
        self.state.get()
    }

    pub fn is_running(&self) -> bool {
        self.state.get() == LoopState::Running
    }
}

/// Cooperative redraw loop.
///
/// Every invocation of [`run_frame`](Self::run_frame) performs one frame and,
/// if the loop is still running afterwards, requests exactly one future
/// invocation. A frame body never stops the loop by failing; only
/// [`LoopHandle::stop`] does.
#[derive(Debug)]
pub struct RenderLoop {
    state: Rc<Cell<LoopState>>,
    frame_index: u64,
    frame_pending: bool,
}

impl RenderLoop {
    pub fn new() -> Self {
        Self {
            state: Rc::new(Cell::new(LoopState::Idle)),
            frame_index: 0,
            frame_pending: false,
        }
    }

    pub fn handle(&self) -> LoopHandle {
        LoopHandle { state: Rc::clone(&self.state) }
    }

    pub fn state(&self) -> LoopState {
        self.state.get()
    }

    /// Frames completed so far; also the index of the next frame.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn has_pending_frame(&self) -> bool {
        self.frame_pending
    }

    /// `Idle -> Running`, requesting the first frame. Returns `false` if the
    /// loop was already started or stopped.
    pub fn start<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) -> bool {
        if self.state.get() != LoopState::Idle {
            return false;
        }
        self.state.set(LoopState::Running);
        self.schedule(scheduler);
        log::debug!("render loop started");
        true
    }

    pub fn stop(&self) {
        self.handle().stop();
    }

    /// Requests a frame outside the normal cadence (e.g. after a resize).
    ///
    /// Coalesced with an already pending request; ignored unless running.
    pub fn request_frame<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if self.state.get() == LoopState::Running && !self.frame_pending {
            self.schedule(scheduler);
        }
    }

    /// Runs one frame if the loop is running, then schedules the next.
    ///
    /// Returns `None` without calling `body` when the loop is idle or stopped.
    pub fn run_frame<S, F, R>(&mut self, scheduler: &mut S, body: F) -> Option<R>
    where
        S: FrameScheduler + ?Sized,
        F: FnOnce(u64) -> R,
    {
        self.frame_pending = false;
        if self.state.get() != LoopState::Running {
            return None;
        }

        let out = body(self.frame_index);
        self.frame_index = self.frame_index.wrapping_add(1);

        if self.state.get() == LoopState::Running {
            self.schedule(scheduler);
        }
        Some(out)
    }

    fn schedule<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        scheduler.request_frame();
        self.frame_pending = true;
    }
}

impl Default for RenderLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingScheduler {
        requests: u32,
    }

    impl FrameScheduler for CountingScheduler {
        fn request_frame(&mut self) {
            self.requests += 1;
        }
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn idle_loop_runs_nothing() {
        let mut lp = RenderLoop::new();
        let mut sched = CountingScheduler::default();

        assert_eq!(lp.run_frame(&mut sched, |_| ()), None);
        assert_eq!(sched.requests, 0);
        assert_eq!(lp.state(), LoopState::Idle);
    }

    #[test]
    fn start_requests_first_frame_once() {
        let mut lp = RenderLoop::new();
        let mut sched = CountingScheduler::default();

        assert!(lp.start(&mut sched));
        assert!(!lp.start(&mut sched));
        assert_eq!(sched.requests, 1);
        assert_eq!(lp.state(), LoopState::Running);
    }

    #[test]
    fn each_frame_requests_exactly_one_more() {
        let mut lp = RenderLoop::new();
        let mut sched = CountingScheduler::default();
        lp.start(&mut sched);

        for expected in 0..5 {
            let idx = lp.run_frame(&mut sched, |i| i);
            assert_eq!(idx, Some(expected));
        }
        assert_eq!(sched.requests, 1 + 5);
        assert_eq!(lp.frame_index(), 5);
    }

    // ── cancellation ──────────────────────────────────────────────────────

    #[test]
    fn stop_cancels_next_frame() {
        let mut lp = RenderLoop::new();
        let mut sched = CountingScheduler::default();
        lp.start(&mut sched);
        lp.handle().stop();

        let mut ran = false;
        assert_eq!(lp.run_frame(&mut sched, |_| ran = true), None);
        assert!(!ran);
        assert_eq!(sched.requests, 1);
    }

    #[test]
    fn stop_from_inside_frame_schedules_nothing() {
        let mut lp = RenderLoop::new();
        let mut sched = CountingScheduler::default();
        lp.start(&mut sched);
        let handle = lp.handle();

        lp.run_frame(&mut sched, |_| handle.stop());

        assert_eq!(sched.requests, 1);
        assert!(!lp.has_pending_frame());
        assert_eq!(handle.state(), LoopState::Stopped);
    }

    #[test]
    fn stopped_loop_cannot_restart() {
        let mut lp = RenderLoop::new();
        let mut sched = CountingScheduler::default();
        lp.stop();
        assert!(!lp.start(&mut sched));
        assert_eq!(sched.requests, 0);
    }

    // ── extra requests ────────────────────────────────────────────────────

    #[test]
    fn extra_requests_coalesce_with_pending_frame() {
        let mut lp = RenderLoop::new();
        let mut sched = CountingScheduler::default();
        lp.start(&mut sched);

        lp.request_frame(&mut sched);
        lp.request_frame(&mut sched);
        assert_eq!(sched.requests, 1);
    }

    #[test]
    fn failing_frame_keeps_loop_running() {
        let mut lp = RenderLoop::new();
        let mut sched = CountingScheduler::default();
        lp.start(&mut sched);

        let r: Option<Result<(), &str>> = lp.run_frame(&mut sched, |_| Err("draw skipped"));
        assert_eq!(r, Some(Err("draw skipped")));
        assert!(lp.handle().is_running());
        assert_eq!(sched.requests, 2);
    }
}
