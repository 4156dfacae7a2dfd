use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use crate::markup::Markup;
use crate::{Container, ContainerResolver};

/// In-memory page: a set of containers keyed by element id.
///
/// Backs tests and headless rendering; the HTML of any container can be read
/// back with [`MemoryContainer::html`].
#[derive(Debug, Default)]
pub struct Document {
    containers: RwLock<HashMap<String, Arc<MemoryContainer>>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty, visible container. An existing container with the same
    /// id is returned unchanged; ids stay unique.
    pub fn insert(&self, id: &str) -> Arc<MemoryContainer> {
        let mut containers = self
            .containers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            containers
                .entry(id.to_string())
                .or_insert_with(|| Arc::new(MemoryContainer::new())),
        )
    }

    pub fn get(&self, id: &str) -> Option<Arc<MemoryContainer>> {
        self.containers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    pub fn remove(&self, id: &str) -> Option<Arc<MemoryContainer>> {
        self.containers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
    }
}

impl ContainerResolver for Document {
    fn resolve(&self, id: &str) -> Option<Arc<dyn Container>> {
        self.get(id).map(|c| c as Arc<dyn Container>)
    }
}

#[derive(Debug)]
pub struct MemoryContainer {
    surface: Mutex<Surface>,
}

#[derive(Debug)]
struct Surface {
    markup: Markup,
    visible: bool,
}

impl MemoryContainer {
    pub fn new() -> Self {
        Self {
            surface: Mutex::new(Surface {
                markup: Markup::empty(),
                visible: true,
            }),
        }
    }

    pub fn markup(&self) -> Markup {
        self.lock().markup.clone()
    }

    pub fn html(&self) -> String {
        self.lock().markup.to_html()
    }

    pub fn text(&self) -> String {
        self.lock().markup.text_content()
    }

    pub fn is_visible(&self) -> bool {
        self.lock().visible
    }

    fn lock(&self) -> MutexGuard<'_, Surface> {
        self.surface.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl Container for MemoryContainer {
    fn replace_content(&self, content: Markup) {
        self.lock().markup = content;
    }

    fn set_visible(&self, visible: bool) {
        self.lock().visible = visible;
    }
}
