// lifecycle.rs - Mount-scoped resources and the frame loop
//
// Scope collects teardown actions and runs them exactly once, in reverse
// acquisition order, either explicitly or on drop. FrameSession drives a
// RenderLoop through a FrameScheduler using fire-and-reschedule: a tick runs
// to completion and only then queues the next one. Dropping the pending
// handle cancels it; the running flag stops anything already in flight.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::render::Surface;
use crate::sim::RenderLoop;

/// Teardown actions tied to one mount
pub struct Scope {
    label: &'static str,
    teardowns: Vec<Box<dyn FnOnce()>>,
}

impl Scope {
    pub fn new(label: &'static str) -> Self {
        Self { label, teardowns: Vec::new() }
    }

    /// Run `f` on teardown
    pub fn defer(&mut self, f: impl FnOnce() + 'static) {
        self.teardowns.push(Box::new(f));
    }

    /// Keep `resource` alive until teardown, then drop it
    pub fn hold<T: 'static>(&mut self, resource: T) {
        self.defer(move || drop(resource));
    }

    pub fn len(&self) -> usize {
        self.teardowns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teardowns.is_empty()
    }

    /// Release everything; later calls are no-ops
    pub fn teardown(&mut self) {
        if self.teardowns.is_empty() {
            return;
        }
        log::debug!("{}: releasing {} resources", self.label, self.teardowns.len());
        while let Some(f) = self.teardowns.pop() {
            f();
        }
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Source of display-refresh callbacks
///
/// Dropping the returned handle must cancel the callback if it has not run.
pub trait FrameScheduler: 'static {
    type Handle: 'static;

    fn schedule(&self, callback: Box<dyn FnOnce(f64)>) -> Self::Handle;
}

#[derive(Default)]
struct ManualQueue {
    next_id: u64,
    pending: Vec<(u64, Box<dyn FnOnce(f64)>)>,
}

/// Scheduler advanced by hand; used natively and in tests
#[derive(Clone, Default)]
pub struct ManualFrames {
    queue: Rc<RefCell<ManualQueue>>,
}

pub struct ManualHandle {
    id: u64,
    queue: Weak<RefCell<ManualQueue>>,
}

impl Drop for ManualHandle {
    fn drop(&mut self) {
        if let Some(queue) = self.queue.upgrade() {
            queue.borrow_mut().pending.retain(|(id, _)| *id != self.id);
        }
    }
}

impl ManualFrames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Callbacks waiting for the next advance
    pub fn pending(&self) -> usize {
        self.queue.borrow().pending.len()
    }

    /// Run every callback queued before this call; returns how many ran
    ///
    /// Callbacks scheduled while advancing wait for the next advance, like
    /// requestAnimationFrame. A callback cancelled by an earlier one in the
    /// same batch does not run.
    pub fn advance(&self, timestamp: f64) -> usize {
        let due: Vec<u64> = self.queue.borrow().pending.iter().map(|(id, _)| *id).collect();
        let mut ran = 0;
        for id in due {
            let callback = {
                let mut queue = self.queue.borrow_mut();
                queue
                    .pending
                    .iter()
                    .position(|(pending, _)| *pending == id)
                    .map(|i| queue.pending.remove(i).1)
            };
            if let Some(callback) = callback {
                callback(timestamp);
                ran += 1;
            }
        }
        ran
    }
}

impl FrameScheduler for ManualFrames {
    type Handle = ManualHandle;

    fn schedule(&self, callback: Box<dyn FnOnce(f64)>) -> ManualHandle {
        let mut queue = self.queue.borrow_mut();
        let id = queue.next_id;
        queue.next_id += 1;
        queue.pending.push((id, callback));
        ManualHandle { id, queue: Rc::downgrade(&self.queue) }
    }
}

struct SessionShared<S: Surface, F: FrameScheduler> {
    scheduler: F,
    render: RefCell<RenderLoop<S>>,
    pending: RefCell<Option<F::Handle>>,
    running: Cell<bool>,
}

/// One drawing surface plus its frame loop
///
/// Created on mount, resized on viewport resize, stopped on unmount or drop.
pub struct FrameSession<S: Surface + 'static, F: FrameScheduler> {
    shared: Rc<SessionShared<S, F>>,
}

impl<S: Surface + 'static, F: FrameScheduler> FrameSession<S, F> {
    pub fn new(render: RenderLoop<S>, scheduler: F) -> Self {
        Self {
            shared: Rc::new(SessionShared {
                scheduler,
                render: RefCell::new(render),
                pending: RefCell::new(None),
                running: Cell::new(false),
            }),
        }
    }

    pub fn start(&self) {
        if self.shared.running.replace(true) {
            return;
        }
        schedule_next(&self.shared);
    }

    /// Cancel the pending tick; no draw happens after this returns
    pub fn stop(&self) {
        self.shared.running.set(false);
        // Dropping the handle cancels the frame and frees the callback,
        // which also breaks the callback -> session reference cycle.
        let pending = self.shared.pending.borrow_mut().take();
        drop(pending);
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.get()
    }

    pub fn resize(&self, w: u32, h: u32) {
        self.shared.render.borrow_mut().resize(w, h);
    }

    pub fn with_render<R>(&self, f: impl FnOnce(&RenderLoop<S>) -> R) -> R {
        f(&self.shared.render.borrow())
    }
}

impl<S: Surface + 'static, F: FrameScheduler> Drop for FrameSession<S, F> {
    fn drop(&mut self) {
        self.stop();
    }
}

fn schedule_next<S: Surface + 'static, F: FrameScheduler>(shared: &Rc<SessionShared<S, F>>) {
    let session = Rc::clone(shared);
    let handle = shared.scheduler.schedule(Box::new(move |_timestamp| {
        if !session.running.get() {
            return;
        }
        session.render.borrow_mut().tick();
        if session.running.get() {
            schedule_next(&session);
        }
    }));
    *shared.pending.borrow_mut() = Some(handle);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::DisplayList;
    use crate::sim::{Constellation, ConstellationPoint};

    fn session(frames: &ManualFrames) -> FrameSession<DisplayList, ManualFrames> {
        let mut points = Constellation::default();
        points.push(ConstellationPoint { x: 10.0, y: 10.0, radius: 1.0, vx: 0.1, vy: 0.1, opacity: 0.5 });
        points.push(ConstellationPoint { x: 40.0, y: 10.0, radius: 1.0, vx: -0.1, vy: 0.1, opacity: 0.5 });
        FrameSession::new(RenderLoop::new(DisplayList::new(200, 100), points), frames.clone())
    }

    #[test]
    fn test_scope_runs_in_reverse_once() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scope = Scope::new("test");
        for name in ["canvas", "resize", "pointer"] {
            let log = Rc::clone(&log);
            scope.defer(move || log.borrow_mut().push(name));
        }
        scope.teardown();
        scope.teardown();
        assert_eq!(*log.borrow(), vec!["pointer", "resize", "canvas"]);
        assert!(scope.is_empty());
    }

    #[test]
    fn test_scope_drop_releases() {
        let released = Rc::new(Cell::new(false));
        {
            let mut scope = Scope::new("test");
            let flag = Rc::clone(&released);
            scope.defer(move || flag.set(true));
        }
        assert!(released.get());
    }

    #[test]
    fn test_session_ticks_once_per_frame() {
        let frames = ManualFrames::new();
        let s = session(&frames);
        s.start();
        s.start();
        assert_eq!(frames.pending(), 1);

        for i in 0..10 {
            assert_eq!(frames.advance(i as f64 * 16.0), 1);
        }
        assert_eq!(s.with_render(|r| r.frames()), 10);
        assert_eq!(frames.pending(), 1);
    }

    #[test]
    fn test_stop_cancels_pending_frame() {
        let frames = ManualFrames::new();
        let s = session(&frames);
        s.start();
        frames.advance(0.0);
        s.stop();
        s.stop();

        assert_eq!(frames.pending(), 0);
        let before = s.with_render(|r| r.surface().mutations());
        for i in 0..100 {
            frames.advance(i as f64);
        }
        assert_eq!(s.with_render(|r| r.surface().mutations()), before);
        assert!(!s.is_running());
    }

    #[test]
    fn test_drop_stops_loop() {
        let frames = ManualFrames::new();
        {
            let s = session(&frames);
            s.start();
        }
        assert_eq!(frames.pending(), 0);
        assert_eq!(frames.advance(0.0), 0);
    }

    #[test]
    fn test_restart_after_stop() {
        let frames = ManualFrames::new();
        let s = session(&frames);
        s.start();
        s.stop();
        s.start();
        frames.advance(0.0);
        assert_eq!(s.with_render(|r| r.frames()), 1);
    }

    #[test]
    fn test_resize_reaches_surface() {
        let frames = ManualFrames::new();
        let s = session(&frames);
        s.resize(640, 480);
        assert_eq!(s.with_render(|r| r.surface().size()), (640, 480));
    }
}
