#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use stagehand::{
    AssetLoader, Clock, CompositionRegistry, InMemoryRegistry, Library, LoadFuture, LoadOptions,
    LoadedLibrary, LocalTicker, PlayerContext, PrepareOptions, Properties, RenderApp,
    RenderBackend, RenderInit, RootTimeline, SharedRoot, SharedStage, StagehandError,
    StagehandResult, SyncStage, TickEvent, VisualContainer, VisualNode,
};

/// Shared recording of every collaborator side effect one player performs.
#[derive(Default)]
pub struct Probe {
    pub mounts: Cell<usize>,
    pub stops: Cell<usize>,
    pub renders: Cell<usize>,
    pub updates: Cell<usize>,
    pub configures: Cell<usize>,
    pub stage_configures: Cell<usize>,
    pub loads: Cell<usize>,
    pub last_tick: Cell<Option<TickEvent>>,
    pub last_init: RefCell<Option<RenderInit>>,
    pub last_load: RefCell<Option<(String, PathBuf)>>,
}

pub fn properties() -> Properties {
    Properties {
        id: "intro".into(),
        width: 400,
        height: 300,
        color: "#112233".into(),
        fps: 24.0,
    }
}

pub struct FakeRoot {
    visual: VisualNode,
}

impl FakeRoot {
    pub fn new() -> SharedRoot {
        Rc::new(RefCell::new(Self {
            visual: VisualNode::new("banner-sprite"),
        }))
    }
}

impl RootTimeline for FakeRoot {
    fn visual(&self) -> VisualNode {
        self.visual.clone()
    }
}

pub struct FakeStage {
    probe: Rc<Probe>,
    children: Vec<SharedRoot>,
}

impl FakeStage {
    pub fn new(probe: Rc<Probe>) -> SharedStage {
        Rc::new(RefCell::new(Self {
            probe,
            children: Vec::new(),
        }))
    }
}

impl SyncStage for FakeStage {
    fn add_child(&mut self, root: SharedRoot) {
        self.children.push(root);
    }

    fn update(&mut self, tick: &TickEvent) -> StagehandResult<()> {
        self.probe.updates.set(self.probe.updates.get() + 1);
        self.probe.last_tick.set(Some(*tick));
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeContainer {
    children: Vec<VisualNode>,
}

impl VisualContainer for FakeContainer {
    fn add_child(&mut self, node: VisualNode) {
        self.children.push(node);
    }

    fn child_count(&self) -> usize {
        self.children.len()
    }
}

pub struct FakeApp {
    probe: Rc<Probe>,
    stage: FakeContainer,
}

impl RenderApp for FakeApp {
    fn mount(&mut self) -> StagehandResult<()> {
        self.probe.mounts.set(self.probe.mounts.get() + 1);
        Ok(())
    }

    fn stop(&mut self) {
        self.probe.stops.set(self.probe.stops.get() + 1);
    }

    fn render(&mut self) -> StagehandResult<()> {
        self.probe.renders.set(self.probe.renders.get() + 1);
        Ok(())
    }

    fn stage(&self) -> &dyn VisualContainer {
        &self.stage
    }

    fn stage_mut(&mut self) -> &mut dyn VisualContainer {
        &mut self.stage
    }
}

pub struct FakeBackend {
    probe: Rc<Probe>,
}

impl RenderBackend for FakeBackend {
    fn create_app(&mut self, init: &RenderInit) -> StagehandResult<Box<dyn RenderApp>> {
        *self.probe.last_init.borrow_mut() = Some(init.clone());
        Ok(Box::new(FakeApp {
            probe: Rc::clone(&self.probe),
            stage: FakeContainer::default(),
        }))
    }
}

pub struct FakeLoader {
    probe: Rc<Probe>,
    properties: Properties,
}

impl AssetLoader for FakeLoader {
    fn configure(&mut self, _options: &PrepareOptions) {
        self.probe.configures.set(self.probe.configures.get() + 1);
    }

    fn configure_stage(&mut self, _options: &PrepareOptions) {
        self.probe
            .stage_configures
            .set(self.probe.stage_configures.get() + 1);
    }

    fn load_asset(&mut self, id: &str, basepath: &Path, _options: &LoadOptions) -> LoadFuture {
        self.probe.loads.set(self.probe.loads.get() + 1);
        *self.probe.last_load.borrow_mut() = Some((id.to_string(), basepath.to_path_buf()));

        let properties = self.properties.clone();
        let probe = Rc::clone(&self.probe);
        Box::pin(std::future::ready(Ok(LoadedLibrary {
            properties,
            stage: Rc::new(move || FakeStage::new(Rc::clone(&probe))),
        })))
    }
}

/// Loader whose async load always rejects.
pub struct FailingLoader;

impl AssetLoader for FailingLoader {
    fn configure(&mut self, _options: &PrepareOptions) {}

    fn configure_stage(&mut self, _options: &PrepareOptions) {}

    fn load_asset(&mut self, _id: &str, _basepath: &Path, _options: &LoadOptions) -> LoadFuture {
        Box::pin(std::future::ready(Err(StagehandError::load(
            "asset fetch failed",
        ))))
    }
}

/// Routes the crate's tracing events into the captured test output. Safe to
/// call from every test; only the first call installs the subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// One wired set of collaborators, with the concrete handles kept around
/// for inspection after the [`PlayerContext`] has been consumed.
pub struct Harness {
    pub registry: Rc<InMemoryRegistry>,
    pub clock: Rc<LocalTicker>,
    pub probe: Rc<Probe>,
}

impl Harness {
    pub fn new() -> Self {
        init_tracing();

        let mut registry = InMemoryRegistry::new();
        registry.insert("intro", Library::new(properties()).with_root("Banner", FakeRoot::new));

        Self {
            registry: Rc::new(registry),
            clock: Rc::new(LocalTicker::new(60.0)),
            probe: Rc::new(Probe::default()),
        }
    }

    pub fn context(&self) -> PlayerContext {
        self.context_with_loader(Box::new(FakeLoader {
            probe: Rc::clone(&self.probe),
            properties: properties(),
        }))
    }

    pub fn context_with_loader(&self, loader: Box<dyn AssetLoader>) -> PlayerContext {
        PlayerContext {
            registry: Rc::clone(&self.registry) as Rc<dyn CompositionRegistry>,
            clock: Rc::clone(&self.clock) as Rc<dyn Clock>,
            loader,
            backend: Box::new(FakeBackend {
                probe: Rc::clone(&self.probe),
            }),
        }
    }
}
