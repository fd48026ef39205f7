use crate::{
    error::StagehandResult,
    model::{Properties, RenderOptions},
    scene::VisualNode,
};

/// Merged construction options for a render application: the three values
/// derived from the composition's [`Properties`] (which take precedence)
/// plus every other caller-supplied option, passed through unchanged.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderInit {
    pub width: u32,
    pub height: u32,
    /// Packed `0xRRGGBB`, parsed from the composition's color string.
    pub background_color: u32,
    #[serde(default)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RenderInit {
    /// Derived keys win: caller-supplied `width`, `height` and
    /// `background_color` entries are discarded, the rest pass through.
    pub fn from_properties(
        properties: &Properties,
        options: RenderOptions,
    ) -> StagehandResult<Self> {
        let background_color = properties.background_color()?;
        let mut extra = options.0;
        extra.remove("width");
        extra.remove("height");
        extra.remove("background_color");
        Ok(Self {
            width: properties.width,
            height: properties.height,
            background_color,
            extra,
        })
    }
}

/// A mutable child-container root of the renderer's scene graph.
pub trait VisualContainer {
    fn add_child(&mut self, node: VisualNode);

    fn child_count(&self) -> usize;
}

/// The render application: owns the rendering surface and its scene graph,
/// and composites one frame on demand.
pub trait RenderApp {
    /// Attach the application's visual surface to the host document. Called
    /// eagerly at construction; not undoable through this API.
    fn mount(&mut self) -> StagehandResult<()>;

    /// Halt the application's internal automatic render loop. Frames are
    /// produced only by explicit [`render`] calls afterwards.
    ///
    /// [`render`]: RenderApp::render
    fn stop(&mut self);

    /// Composite exactly one frame, synchronously.
    fn render(&mut self) -> StagehandResult<()>;

    fn stage(&self) -> &dyn VisualContainer;

    fn stage_mut(&mut self) -> &mut dyn VisualContainer;
}

/// Constructs render applications from merged options. Injected into
/// [`Player::new`] in place of a concrete renderer dependency.
///
/// [`Player::new`]: crate::player::Player::new
pub trait RenderBackend {
    fn create_app(&mut self, init: &RenderInit) -> StagehandResult<Box<dyn RenderApp>>;
}
