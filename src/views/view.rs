//! The mountable view surface.

use std::fmt;
use std::sync::Arc;

/// A page-level UI surface the router can mount.
pub trait View: Send + Sync + fmt::Debug {
    /// Identifier of the view (e.g. "TrainingView").
    fn name(&self) -> &str;

    /// Human readable title.
    fn title(&self) -> &str;

    /// Render the view into its markup.
    fn render(&self) -> String;
}

/// Shared handle to a mounted view.
pub type ViewHandle = Arc<dyn View>;

/// A view backed by fixed markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticView {
    name: String,
    title: String,
    body: String,
}

impl StaticView {
    pub fn new(name: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn into_handle(self) -> ViewHandle {
        Arc::new(self)
    }
}

impl View for StaticView {
    fn name(&self) -> &str {
        &self.name
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn render(&self) -> String {
        format!("<section data-view=\"{}\"><h1>{}</h1>{}</section>", self.name, self.title, self.body)
    }
}
