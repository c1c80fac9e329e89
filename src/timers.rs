//! Cancelable delayed tasks.
//!
//! Every pacing delay in the game (feedback pauses, the wait before leaving a
//! finished level) goes through a [`TimerScope`]. The scope belongs to the
//! current screen; replacing or dropping it cancels whatever it still has
//! pending, so a task never runs against a screen the player already left.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

pub type TimerId = u64;
pub type Task = Box<dyn FnOnce()>;

pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, task: Task) -> TimerId;
    fn cancel(&self, id: TimerId);
}

pub struct TimerScope {
    scheduler: Rc<dyn Scheduler>,
    live: Rc<RefCell<HashSet<TimerId>>>,
}

impl TimerScope {
    pub fn new(scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            scheduler,
            live: Rc::new(RefCell::new(HashSet::new())),
        }
    }

    /// Run `task` after `delay_ms`, unless this scope is cancelled or dropped first.
    pub fn set_timer(&self, delay_ms: u32, task: impl FnOnce() + 'static) -> TimerId {
        let live = Rc::downgrade(&self.live);
        let slot = Rc::new(Cell::new(None::<TimerId>));
        let own_id = slot.clone();
        let id = self.scheduler.schedule(
            delay_ms,
            Box::new(move || {
                let Some(live) = live.upgrade() else { return };
                let Some(id) = own_id.get() else { return };
                let still_live = live.borrow_mut().remove(&id);
                if still_live {
                    task();
                }
            }),
        );
        slot.set(Some(id));
        self.live.borrow_mut().insert(id);
        id
    }

    pub fn cancel(&self, id: TimerId) {
        if self.live.borrow_mut().remove(&id) {
            self.scheduler.cancel(id);
        }
    }

    pub fn cancel_all(&self) {
        let ids: Vec<TimerId> = self.live.borrow_mut().drain().collect();
        if !ids.is_empty() {
            log::debug!("cancelling {} pending timer(s)", ids.len());
        }
        for id in ids {
            self.scheduler.cancel(id);
        }
    }

    pub fn pending(&self) -> usize {
        self.live.borrow().len()
    }
}

impl Drop for TimerScope {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

// --- Manual clock (tests, native hosts) ---------------------------------------

#[derive(Default)]
struct ManualQueue {
    now: u64,
    next_id: TimerId,
    tasks: Vec<(u64, TimerId, Task)>,
}

/// Virtual clock. Nothing runs until [`ManualScheduler::advance`].
#[derive(Default)]
pub struct ManualScheduler {
    queue: RefCell<ManualQueue>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u64 {
        self.queue.borrow().now
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().tasks.len()
    }

    /// Move the clock forward, running due tasks one at a time in due order.
    /// Tasks scheduled while advancing run too if they fall inside the window.
    pub fn advance(&self, ms: u64) {
        let target = self.now() + ms;
        loop {
            let next = {
                let mut q = self.queue.borrow_mut();
                let due = q
                    .tasks
                    .iter()
                    .enumerate()
                    .filter(|(_, (at, _, _))| *at <= target)
                    .min_by_key(|(_, (at, id, _))| (*at, *id))
                    .map(|(pos, _)| pos);
                due.map(|pos| {
                    let (at, _, task) = q.tasks.remove(pos);
                    q.now = at;
                    task
                })
            };
            match next {
                Some(task) => task(),
                None => break,
            }
        }
        self.queue.borrow_mut().now = target;
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) -> TimerId {
        let mut q = self.queue.borrow_mut();
        q.next_id += 1;
        let id = q.next_id;
        let at = q.now + u64::from(delay_ms);
        q.tasks.push((at, id, task));
        id
    }

    fn cancel(&self, id: TimerId) {
        self.queue.borrow_mut().tasks.retain(|(_, tid, _)| *tid != id);
    }
}

// --- Browser ------------------------------------------------------------------

/// `window.setTimeout` / `window.clearTimeout`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) -> TimerId {
        let Some(win) = web_sys::window() else {
            log::warn!("no window, dropping timer");
            return 0;
        };
        let callback = Closure::once_into_js(move || task());
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        match win.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay) {
            Ok(handle) => handle as TimerId,
            Err(e) => {
                log::warn!("setTimeout failed: {e:?}");
                0
            }
        }
    }

    fn cancel(&self, id: TimerId) {
        if let Some(win) = web_sys::window() {
            win.clear_timeout_with_handle(id as i32);
        }
    }
}
