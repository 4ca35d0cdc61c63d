//! The trainer application's route table.
//!
//! `/` (home) is eager; training, simulation, progress and about are
//! deferred until first visited.

pub mod pages;

use std::path::Path;

use crate::config::RouterConfig;
use crate::history::WebHistory;
use crate::routing::{RouteTable, Router, TableError};
use crate::views::{ChunkLoader, Component};
use pages::LAZY_PAGES;

/// Build the application's five routes.
///
/// With `assets_dir` set, deferred pages are read from `<dir>/<chunk>.html`;
/// otherwise they come from in-process loaders.
pub fn routes(assets_dir: Option<&Path>) -> Result<RouteTable, Vec<TableError>> {
    let mut builder = RouteTable::builder().route("/", "home", Component::Eager(pages::home()));

    for page in LAZY_PAGES {
        let component = match assets_dir {
            Some(dir) => Component::lazy(ChunkLoader::new(dir, page.chunk, page.view_name, page.title)),
            None => Component::lazy(pages::bundled_loader(page)),
        };
        builder = builder.route(page.path, page.name, component);
    }

    builder.build()
}

/// Construct the router once at application entry.
pub fn create_router(base: &str, assets_dir: Option<&Path>) -> Result<Router, Vec<TableError>> {
    let table = routes(assets_dir)?;
    Ok(Router::new(table, WebHistory::new(base)))
}

/// Construct the router from validated configuration.
pub fn create_router_from_config(config: &RouterConfig) -> Result<Router, Vec<TableError>> {
    create_router(config.base_url.as_str(), config.assets_dir.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::pages::Page;

    #[test]
    fn test_declared_routes() {
        let table = routes(None).unwrap();
        let declared: Vec<_> = table.iter().map(|r| (r.path(), r.name(), r.component().is_lazy())).collect();
        assert_eq!(
            declared,
            vec![
                ("/", "home", false),
                ("/training", "training", true),
                ("/simulation", "simulation", true),
                ("/progress", "progress", true),
                ("/about", "about", true),
            ]
        );
    }

    #[test]
    fn test_page_metadata_is_consistent() {
        for Page { path, name, .. } in LAZY_PAGES {
            assert_eq!(*path, format!("/{name}"));
        }
    }
}
