use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use crate::{
    clock::{Clock, ListenerId, TickEvent},
    error::{StagehandError, StagehandResult},
    loader::AssetLoader,
    model::{LoadOptions, PrepareOptions, Properties, RenderOptions},
    registry::CompositionRegistry,
    render::{RenderApp, RenderBackend, RenderInit},
    scene::{RootFactory, SharedRoot, SharedStage},
};

/// The collaborators a [`Player`] is wired to. The registry and clock may
/// be shared between players — framerate changes made by one player are
/// observable by every other consumer of the same clock.
pub struct PlayerContext {
    pub registry: Rc<dyn CompositionRegistry>,
    pub clock: Rc<dyn Clock>,
    pub loader: Box<dyn AssetLoader>,
    pub backend: Box<dyn RenderBackend>,
}

pub type SharedRenderApp = Rc<RefCell<Box<dyn RenderApp>>>;

/// Everything one successful [`Player::prepare`] produced: the instantiated
/// root timeline, the synchronization stage that owns it, and the loaded
/// properties bag. Hosts that want these reachable process-wide install
/// them at the call site; the player itself publishes nothing.
pub struct PreparedScene {
    pub root: SharedRoot,
    pub stage: SharedStage,
    pub properties: Properties,
}

/// Plays one authored composition through a retained-mode renderer.
///
/// Construction resolves the composition, builds and mounts the render
/// application and configures the shared clock. [`prepare`] loads assets
/// and builds the scene; [`play`]/[`stop`] register and unregister the
/// per-tick synchronization with the clock. There is no teardown: hosts
/// that need to remove the surface do so through [`app`].
///
/// [`prepare`]: Player::prepare
/// [`play`]: Player::play
/// [`stop`]: Player::stop
/// [`app`]: Player::app
pub struct Player {
    id: String,
    basepath: PathBuf,
    root_factory: Rc<RootFactory>,
    registry: Rc<dyn CompositionRegistry>,
    clock: Rc<dyn Clock>,
    loader: Box<dyn AssetLoader>,
    app: SharedRenderApp,
    // Shared with the registered tick listener so a re-prepare swaps the
    // stage out from under an active playback without re-registering.
    stage: Rc<RefCell<Option<SharedStage>>>,
    listener: Option<ListenerId>,
}

impl Player {
    /// Wire a player to one composition.
    ///
    /// Fails with [`StagehandError::CompositionNotFound`] /
    /// [`StagehandError::RootClassNotFound`] before any side effect. On
    /// success the render application is created from the merged options
    /// (derived width/height/background color take precedence), mounted,
    /// stopped and rendered once, the clock's framerate is set to the
    /// composition's declared fps, and `prepare_options` are forwarded to
    /// the loader's two configuration routines.
    pub fn new(
        ctx: PlayerContext,
        id: &str,
        root_name: &str,
        basepath: impl Into<PathBuf>,
        prepare_options: &PrepareOptions,
        render_options: RenderOptions,
    ) -> StagehandResult<Self> {
        let PlayerContext {
            registry,
            clock,
            mut loader,
            mut backend,
        } = ctx;

        let composition = registry
            .lookup(id)
            .ok_or_else(|| StagehandError::CompositionNotFound(id.to_string()))?;
        let library = composition.library();
        let root_factory =
            library
                .root(root_name)
                .ok_or_else(|| StagehandError::RootClassNotFound {
                    composition: id.to_string(),
                    class: root_name.to_string(),
                })?;

        let properties = library.properties().clone();
        properties.validate()?;
        let init = RenderInit::from_properties(&properties, render_options)?;

        let mut app = backend.create_app(&init)?;
        app.mount()?;
        app.stop();
        app.render()?;

        clock.set_framerate(properties.fps);

        loader.configure(prepare_options);
        loader.configure_stage(prepare_options);

        tracing::debug!(
            composition = id,
            root = root_name,
            width = init.width,
            height = init.height,
            fps = properties.fps,
            "player constructed"
        );

        Ok(Self {
            id: id.to_string(),
            basepath: basepath.into(),
            root_factory,
            registry,
            clock,
            loader,
            app: Rc::new(RefCell::new(app)),
            stage: Rc::new(RefCell::new(None)),
            listener: None,
        })
    }

    /// Load the composition's assets and build a fresh scene.
    ///
    /// Each call instantiates a brand-new root and stage, appends the root
    /// to the stage and the root's visual counterpart to the render stage
    /// graph, and notifies the registry. A previous scene is orphaned, not
    /// disposed: its visual stays in the render graph until the host
    /// removes it. Loader errors propagate unchanged.
    #[tracing::instrument(skip(self, options), fields(composition = %self.id))]
    pub async fn prepare(&mut self, options: &LoadOptions) -> StagehandResult<PreparedScene> {
        let library = self
            .loader
            .load_asset(&self.id, &self.basepath, options)
            .await?;

        let root = (self.root_factory)();
        let stage = (library.stage)();

        self.registry.composition_loaded(&library.properties.id);

        stage.borrow_mut().add_child(Rc::clone(&root));
        self.app
            .borrow_mut()
            .stage_mut()
            .add_child(root.borrow().visual());

        *self.stage.borrow_mut() = Some(Rc::clone(&stage));

        Ok(PreparedScene {
            root,
            stage,
            properties: library.properties,
        })
    }

    /// Start driving the scene: registers a tick listener on the clock that
    /// runs one stage update and one synchronous render per tick.
    ///
    /// Idempotent — calling `play` while already playing is a no-op, so a
    /// double registration can never double the per-tick work. Fails with
    /// [`StagehandError::NotPrepared`] when no scene has been prepared yet.
    pub fn play(&mut self) -> StagehandResult<&mut Self> {
        if self.listener.is_some() {
            return Ok(self);
        }
        if self.stage.borrow().is_none() {
            return Err(StagehandError::not_prepared(
                "play() requires a prepared stage; call prepare() first",
            ));
        }

        let stage = Rc::clone(&self.stage);
        let app = Rc::clone(&self.app);
        let id = self.clock.add_tick_listener(Box::new(move |tick| {
            if let Err(err) = drive_frame(&stage, &app, tick) {
                tracing::error!(error = %err, "tick synchronization failed");
            }
        }));
        self.listener = Some(id);
        tracing::debug!(composition = %self.id, "playback started");
        Ok(self)
    }

    /// Unregister the tick listener. No-op when not playing.
    pub fn stop(&mut self) -> &mut Self {
        if let Some(id) = self.listener.take() {
            self.clock.remove_tick_listener(id);
            tracing::debug!(composition = %self.id, "playback stopped");
        }
        self
    }

    pub fn is_playing(&self) -> bool {
        self.listener.is_some()
    }

    /// The owned render application, shared for resizing, overlays or
    /// host-driven teardown. The player itself never reassigns it.
    pub fn app(&self) -> SharedRenderApp {
        Rc::clone(&self.app)
    }
}

fn drive_frame(
    stage: &Rc<RefCell<Option<SharedStage>>>,
    app: &SharedRenderApp,
    tick: &TickEvent,
) -> StagehandResult<()> {
    let Some(stage) = stage.borrow().clone() else {
        return Err(StagehandError::not_prepared("tick before prepare resolved"));
    };
    stage.borrow_mut().update(tick)?;
    app.borrow_mut().render()
}
