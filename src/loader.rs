use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::rc::Rc;

use crate::{
    error::StagehandResult,
    model::{LoadOptions, PrepareOptions, Properties},
    scene::StageFactory,
};

/// The result of one asynchronous asset preparation: the factory for the
/// synchronization stage plus the composition's properties bag. Transient —
/// consumed by [`Player::prepare`] to build the stage and root.
///
/// [`Player::prepare`]: crate::player::Player::prepare
pub struct LoadedLibrary {
    pub properties: Properties,
    pub stage: Rc<StageFactory>,
}

pub type LoadFuture = Pin<Box<dyn Future<Output = StagehandResult<LoadedLibrary>>>>;

/// Asset preparation and loading, supplied by the host.
///
/// `configure` and `configure_stage` are opaque configuration-application
/// calls: the adapter forwards the caller's [`PrepareOptions`] to both at
/// construction time and consumes no return value. `load_asset` is the
/// adapter's single suspension point; its errors propagate to the caller
/// unchanged — no retry, no wrapping.
pub trait AssetLoader {
    /// Library-wide preparation of the loading pipeline.
    fn configure(&mut self, options: &PrepareOptions);

    /// Stage-synchronization defaults applied before any stage exists.
    fn configure_stage(&mut self, options: &PrepareOptions);

    fn load_asset(&mut self, id: &str, basepath: &Path, options: &LoadOptions) -> LoadFuture;
}
