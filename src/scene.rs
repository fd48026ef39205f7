use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::{clock::TickEvent, error::StagehandResult};

/// Opaque, cheaply clonable handle to a renderer-side display object.
///
/// The adapter never looks inside: it only moves the handle from a
/// [`RootTimeline`] into the render application's stage graph. Hosts that
/// need the concrete node back can downcast.
#[derive(Clone)]
pub struct VisualNode(Rc<dyn Any>);

impl VisualNode {
    pub fn new<T: 'static>(value: T) -> Self {
        Self(Rc::new(value))
    }

    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }

    /// True when both handles wrap the same underlying node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for VisualNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VisualNode").finish()
    }
}

/// One instantiated root timeline object of a composition.
///
/// Instances live on the authoring side; each is paired with a
/// renderer-side visual counterpart exposed through [`visual`].
///
/// [`visual`]: RootTimeline::visual
pub trait RootTimeline {
    fn visual(&self) -> VisualNode;
}

/// The authoring-side synchronization root. Mutated every tick by the
/// external synchronizer: `update` propagates the tick's timing, pause and
/// frame-delta information into renderer-visible state.
pub trait SyncStage {
    fn add_child(&mut self, root: SharedRoot);

    fn update(&mut self, tick: &TickEvent) -> StagehandResult<()>;
}

pub type SharedRoot = Rc<RefCell<dyn RootTimeline>>;
pub type SharedStage = Rc<RefCell<dyn SyncStage>>;

/// Instantiates a fresh root timeline (the authoring tool's exported
/// root-class constructor, no arguments).
pub type RootFactory = dyn Fn() -> SharedRoot;

/// Instantiates a fresh synchronization stage.
pub type StageFactory = dyn Fn() -> SharedStage;
