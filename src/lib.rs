#![forbid(unsafe_code)]

//! Plays compositions authored in an animation authoring tool through a
//! retained-mode 2D scene graph renderer, by synchronizing the authoring
//! stage object model with the renderer's display tree once per tick.
//!
//! The heavy lifting — asset loading, timeline interpretation, display-list
//! diffing, rendering — lives behind four injected collaborator traits:
//! [`CompositionRegistry`], [`AssetLoader`], [`Clock`] and
//! [`RenderBackend`]. [`Player`] is the glue that wires them together.

pub mod clock;
pub mod error;
pub mod loader;
pub mod model;
pub mod player;
pub mod registry;
pub mod render;
pub mod scene;

pub use clock::{Clock, ListenerId, LocalTicker, TickEvent, TickListener};
pub use error::{StagehandError, StagehandResult};
pub use loader::{AssetLoader, LoadFuture, LoadedLibrary};
pub use model::{LoadOptions, PrepareOptions, Properties, RenderOptions};
pub use player::{Player, PlayerContext, PreparedScene, SharedRenderApp};
pub use registry::{Composition, CompositionRegistry, InMemoryRegistry, Library};
pub use render::{RenderApp, RenderBackend, RenderInit, VisualContainer};
pub use scene::{
    RootFactory, RootTimeline, SharedRoot, SharedStage, StageFactory, SyncStage, VisualNode,
};
