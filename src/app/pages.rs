//! Page definitions for the trainer application.

use crate::views::{FnLoader, StaticView, ViewHandle, ViewLoader};

/// Static description of a deferred page.
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub path: &'static str,
    pub name: &'static str,
    pub view_name: &'static str,
    pub title: &'static str,
    /// Chunk file stem under the assets directory.
    pub chunk: &'static str,
    body: &'static str,
}

pub const LAZY_PAGES: &[Page] = &[
    Page {
        path: "/training",
        name: "training",
        view_name: "TrainingView",
        title: "Training",
        chunk: "training",
        body: "<p>Guided training sessions.</p>",
    },
    Page {
        path: "/simulation",
        name: "simulation",
        view_name: "SimulationView",
        title: "Simulation",
        chunk: "simulation",
        body: "<p>Run a simulated scenario.</p>",
    },
    Page {
        path: "/progress",
        name: "progress",
        view_name: "ProgressView",
        title: "Progress",
        chunk: "progress",
        body: "<p>Your results over time.</p>",
    },
    Page {
        path: "/about",
        name: "about",
        view_name: "AboutView",
        title: "About",
        chunk: "about",
        body: "<p>About this trainer.</p>",
    },
];

/// The landing page, available without any load.
pub fn home() -> ViewHandle {
    StaticView::new("HomeView", "Home", "<p>Welcome.</p>").into_handle()
}

/// In-process loader for a deferred page.
pub fn bundled_loader(page: &'static Page) -> impl ViewLoader {
    FnLoader::new(page.name, move || async move {
        // Deferred pages resolve on a later poll, like a fetched chunk.
        tokio::task::yield_now().await;
        Ok(StaticView::new(page.view_name, page.title, page.body).into_handle())
    })
}
