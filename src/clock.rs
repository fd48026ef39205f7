use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// One timed callback payload: elapsed/delta time in milliseconds plus the
/// clock's pause state at dispatch time.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TickEvent {
    /// Milliseconds since the previous tick.
    pub delta_ms: f64,
    /// Total unpaused milliseconds since the clock started.
    pub time_ms: f64,
    pub paused: bool,
}

/// Handle for a registered tick listener; used to unregister it later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub type TickListener = Box<dyn FnMut(&TickEvent)>;

/// A ticking clock that dispatches timed events to registered listeners.
///
/// Shared by every consumer in the process that was handed the same
/// instance: framerate changes made by one [`Player`] are observable by all
/// of them. Single-threaded by design — listeners run synchronously to
/// completion and must not suspend.
///
/// [`Player`]: crate::player::Player
pub trait Clock {
    fn framerate(&self) -> f64;

    fn set_framerate(&self, fps: f64);

    fn add_tick_listener(&self, listener: TickListener) -> ListenerId;

    /// Returns false when the id was not registered.
    fn remove_tick_listener(&self, id: ListenerId) -> bool;
}

/// Host-driven clock for single-threaded event loops and tests.
///
/// The host calls [`advance`] (or [`tick`] for one nominal frame) from its
/// own loop; the ticker stamps a [`TickEvent`] and dispatches it to every
/// registered listener. The listener list is snapshotted before dispatch so
/// listeners may register or unregister others mid-tick.
///
/// [`advance`]: LocalTicker::advance
/// [`tick`]: LocalTicker::tick
pub struct LocalTicker {
    framerate: Cell<f64>,
    paused: Cell<bool>,
    time_ms: Cell<f64>,
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(ListenerId, Rc<RefCell<TickListener>>)>>,
}

impl LocalTicker {
    pub fn new(framerate: f64) -> Self {
        Self {
            framerate: Cell::new(framerate),
            paused: Cell::new(false),
            time_ms: Cell::new(0.0),
            next_id: Cell::new(0),
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn paused(&self) -> bool {
        self.paused.get()
    }

    /// Pausing does not stop dispatch: ticks keep flowing with
    /// `paused = true` and a zero time advance, mirroring how authoring-tool
    /// clocks report pause state to their listeners.
    pub fn set_paused(&self, paused: bool) {
        self.paused.set(paused);
    }

    pub fn time_ms(&self) -> f64 {
        self.time_ms.get()
    }

    /// Advance the clock by `delta_ms` and dispatch one tick.
    pub fn advance(&self, delta_ms: f64) -> TickEvent {
        let paused = self.paused.get();
        let delta = if paused { 0.0 } else { delta_ms };
        self.time_ms.set(self.time_ms.get() + delta);
        let event = TickEvent {
            delta_ms: delta,
            time_ms: self.time_ms.get(),
            paused,
        };
        self.dispatch(&event);
        event
    }

    /// Advance by one nominal frame interval at the current framerate.
    pub fn tick(&self) -> TickEvent {
        let fps = self.framerate.get();
        let interval = if fps > 0.0 { 1000.0 / fps } else { 0.0 };
        self.advance(interval)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn dispatch(&self, event: &TickEvent) {
        let snapshot: Vec<_> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in snapshot {
            (*listener.borrow_mut())(event);
        }
    }
}

impl Default for LocalTicker {
    fn default() -> Self {
        Self::new(60.0)
    }
}

impl Clock for LocalTicker {
    fn framerate(&self) -> f64 {
        self.framerate.get()
    }

    fn set_framerate(&self, fps: f64) {
        self.framerate.set(fps);
    }

    fn add_tick_listener(&self, listener: TickListener) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.listeners
            .borrow_mut()
            .push((id, Rc::new(RefCell::new(listener))));
        id
    }

    fn remove_tick_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(lid, _)| *lid != id);
        listeners.len() != before
    }
}
