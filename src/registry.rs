use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::{model::Properties, scene::RootFactory};

/// The exported library of one composition: its declared properties plus
/// the named root-class factories the authoring tool published.
pub struct Library {
    properties: Properties,
    roots: BTreeMap<String, Rc<RootFactory>>,
}

impl Library {
    pub fn new(properties: Properties) -> Self {
        Self {
            properties,
            roots: BTreeMap::new(),
        }
    }

    pub fn with_root(
        mut self,
        name: impl Into<String>,
        factory: impl Fn() -> crate::scene::SharedRoot + 'static,
    ) -> Self {
        self.roots.insert(name.into(), Rc::new(factory));
        self
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn root(&self, name: &str) -> Option<Rc<RootFactory>> {
        self.roots.get(name).cloned()
    }

    pub fn root_names(&self) -> impl Iterator<Item = &str> {
        self.roots.keys().map(String::as_str)
    }
}

/// One authored animation bundle as seen through the registry.
pub trait Composition {
    fn library(&self) -> &Library;
}

impl Composition for Library {
    fn library(&self) -> &Library {
        self
    }
}

/// Resolves composition ids and receives load-completion notifications.
///
/// Injected into [`Player::new`] rather than reached through process-wide
/// state, so hosts can scope registries as they see fit.
///
/// [`Player::new`]: crate::player::Player::new
pub trait CompositionRegistry {
    fn lookup(&self, id: &str) -> Option<&dyn Composition>;

    /// Called once per successful asset load of the named composition.
    fn composition_loaded(&self, id: &str);
}

/// Simple owned registry for hosts and tests.
#[derive(Default)]
pub struct InMemoryRegistry {
    compositions: BTreeMap<String, Box<dyn Composition>>,
    loaded: RefCell<Vec<String>>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, composition: impl Composition + 'static) {
        self.compositions.insert(id.into(), Box::new(composition));
    }

    /// Ids for which [`composition_loaded`] fired, in order.
    ///
    /// [`composition_loaded`]: CompositionRegistry::composition_loaded
    pub fn loaded_ids(&self) -> Vec<String> {
        self.loaded.borrow().clone()
    }
}

impl CompositionRegistry for InMemoryRegistry {
    fn lookup(&self, id: &str) -> Option<&dyn Composition> {
        self.compositions.get(id).map(Box::as_ref)
    }

    fn composition_loaded(&self, id: &str) {
        tracing::debug!(composition = id, "composition loaded");
        self.loaded.borrow_mut().push(id.to_string());
    }
}
