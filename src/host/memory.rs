//! In-memory host backed by a [`Catalog`].
//!
//! The catalog is a plain serde document, so the same data can be written by
//! hand as JSON for the CLI or assembled in code for tests:
//!
//! ```json
//! {
//!   "libraries": [
//!     { "id": "…", "name": "Movies", "collection_type": "movies" }
//!   ],
//!   "items": [
//!     { "id": "…", "kind": "movie", "name": "Heat", "parent_id": "<library id>" }
//!   ],
//!   "intros": [ { "path": "/srv/intros/studio-logo.mkv" } ]
//! }
//! ```

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use introgate_common::{CollectionType, Error, ItemId, ItemKind, LibraryId, Result};

use super::{
    IntroManager, IntroReference, Item, ItemQuery, ItemStore, LibraryInfo, LibraryManager, User,
};

/// A library entry in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogLibrary {
    #[serde(flatten)]
    pub info: LibraryInfo,
    /// Queries scoped to an unavailable library fail with [`Error::Store`],
    /// which is how a broken or offline library looks to the filter.
    #[serde(default)]
    pub unavailable: bool,
}

/// Everything the in-memory host knows about.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub libraries: Vec<CatalogLibrary>,
    #[serde(default)]
    pub items: Vec<Item>,
    /// Intro pool handed out for every fetch.
    #[serde(default)]
    pub intros: Vec<IntroReference>,
}

impl Catalog {
    /// Read a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            Error::invalid_input(format!("invalid catalog {}: {e}", path.display()))
        })
    }

    /// Add a library and return its ID.
    pub fn add_library(
        &mut self,
        name: impl Into<String>,
        collection_type: Option<CollectionType>,
    ) -> LibraryId {
        let id = LibraryId::new();
        self.libraries.push(CatalogLibrary {
            info: LibraryInfo {
                id,
                name: name.into(),
                collection_type,
            },
            unavailable: false,
        });
        id
    }

    /// Add an item under `parent` and return a copy of it.
    pub fn add_item(
        &mut self,
        kind: ItemKind,
        name: impl Into<String>,
        parent: impl Into<ItemId>,
    ) -> Item {
        let item = Item::new(kind, name).with_parent(parent);
        self.items.push(item.clone());
        item
    }

    pub fn add_intro(&mut self, path: impl Into<PathBuf>) {
        self.intros.push(IntroReference::from_path(path));
    }

    /// Make every query scoped to `library` fail.
    pub fn mark_unavailable(&mut self, library: LibraryId) -> Result<()> {
        let entry = self
            .libraries
            .iter_mut()
            .find(|l| l.info.id == library)
            .ok_or_else(|| Error::not_found(format!("library {library}")))?;
        entry.unavailable = true;
        Ok(())
    }
}

/// Host implementation over a [`Catalog`].
///
/// Implements all three collaborator traits. The catalog is read-only once
/// the host is built; the only mutable state is the fetch counter.
#[derive(Debug)]
pub struct MemoryHost {
    libraries: Vec<CatalogLibrary>,
    items: HashMap<ItemId, Item>,
    intros: Vec<IntroReference>,
    fetches: AtomicUsize,
}

impl MemoryHost {
    pub fn new(catalog: Catalog) -> Self {
        let items = catalog
            .items
            .into_iter()
            .map(|item| (item.id, item))
            .collect();

        Self {
            libraries: catalog.libraries,
            items,
            intros: catalog.intros,
            fetches: AtomicUsize::new(0),
        }
    }

    /// Number of times [`IntroManager::fetch_intros`] has been called.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn library_for_root(&self, root: ItemId) -> Option<&CatalogLibrary> {
        self.libraries
            .iter()
            .find(|l| ItemId::from(l.info.id) == root)
    }

    /// Walk parent links upward from `item` looking for `ancestor`.
    fn has_ancestor(&self, item: &Item, ancestor: ItemId) -> bool {
        let mut seen = HashSet::new();
        let mut next = item.parent_id;

        while let Some(id) = next {
            if id == ancestor {
                return true;
            }
            // A malformed catalog may contain parent cycles.
            if !seen.insert(id) {
                return false;
            }
            next = self.items.get(&id).and_then(|parent| parent.parent_id);
        }

        false
    }
}

#[async_trait]
impl LibraryManager for MemoryHost {
    async fn libraries(&self) -> Result<Vec<LibraryInfo>> {
        Ok(self.libraries.iter().map(|l| l.info.clone()).collect())
    }
}

#[async_trait]
impl ItemStore for MemoryHost {
    async fn get_item(&self, id: ItemId) -> Result<Option<Item>> {
        Ok(self.items.get(&id).cloned())
    }

    async fn query_items(&self, query: &ItemQuery) -> Result<Vec<Item>> {
        if let Some(library) = self.library_for_root(query.ancestor_id) {
            if library.unavailable {
                return Err(Error::store(format!(
                    "library '{}' is unavailable",
                    library.info.name
                )));
            }
        }

        Ok(self
            .items
            .values()
            .filter(|item| query.accepts(item) && self.has_ancestor(item, query.ancestor_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl IntroManager for MemoryHost {
    async fn fetch_intros(&self, _item: &Item, _user: &User) -> Result<Vec<IntroReference>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.intros.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ancestor_query_finds_nested_items() {
        let mut catalog = Catalog::default();
        let movies = catalog.add_library("Movies", Some(CollectionType::Movies));
        let shows = catalog.add_library("Shows", Some(CollectionType::TvShows));
        let folder = catalog.add_item(ItemKind::Folder, "Heist", movies);
        let heat = catalog.add_item(ItemKind::Movie, "Heat", folder.id);
        let series = catalog.add_item(ItemKind::Series, "The Wire", shows);
        let episode = catalog.add_item(ItemKind::Episode, "The Target", series.id);
        let host = MemoryHost::new(catalog);

        let under_movies = host
            .query_items(&ItemQuery::descendants_of(movies))
            .await
            .unwrap();
        assert_eq!(under_movies.len(), 2);
        assert!(under_movies.iter().any(|i| i.id == heat.id));

        let heat_only = host
            .query_items(&ItemQuery::descendants_of(movies).with_item(heat.id))
            .await
            .unwrap();
        assert_eq!(heat_only, vec![heat.clone()]);

        let episode_in_movies = host
            .query_items(&ItemQuery::descendants_of(movies).with_item(episode.id))
            .await
            .unwrap();
        assert!(episode_in_movies.is_empty());
    }

    #[tokio::test]
    async fn unavailable_library_fails_queries() {
        let mut catalog = Catalog::default();
        let movies = catalog.add_library("Movies", Some(CollectionType::Movies));
        catalog.add_item(ItemKind::Movie, "Heat", movies);
        catalog.mark_unavailable(movies).unwrap();
        let host = MemoryHost::new(catalog);

        let err = host
            .query_items(&ItemQuery::descendants_of(movies))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Store(_)));
    }

    #[test]
    fn mark_unavailable_rejects_unknown_library() {
        let mut catalog = Catalog::default();
        catalog.add_library("Movies", Some(CollectionType::Movies));

        let err = catalog.mark_unavailable(LibraryId::new()).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert!(catalog.libraries.iter().all(|l| !l.unavailable));
    }

    #[tokio::test]
    async fn parent_cycle_terminates() {
        let mut a = Item::new(ItemKind::Folder, "a");
        let mut b = Item::new(ItemKind::Folder, "b");
        a.parent_id = Some(b.id);
        b.parent_id = Some(a.id);
        let catalog = Catalog {
            items: vec![a, b],
            ..Catalog::default()
        };
        let host = MemoryHost::new(catalog);

        let found = host
            .query_items(&ItemQuery::descendants_of(LibraryId::new()))
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn fetch_counts_calls() {
        let mut catalog = Catalog::default();
        catalog.add_intro("/intros/logo.mkv");
        let host = MemoryHost::new(catalog);
        let item = Item::new(ItemKind::Movie, "Heat");
        let user = User::new("alice");

        let intros = host.fetch_intros(&item, &user).await.unwrap();
        assert_eq!(intros, vec![IntroReference::from_path("/intros/logo.mkv")]);
        assert_eq!(host.fetch_count(), 1);
    }

    #[test]
    fn catalog_json_roundtrip_keeps_flattened_library() {
        let json = r#"{
            "libraries": [
                {
                    "id": "0b0f4a8e-5d7c-4c1e-8f43-2a1d9c6e7b10",
                    "name": "Movies",
                    "collection_type": "Movies",
                    "unavailable": true
                }
            ]
        }"#;
        let catalog: Catalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.libraries.len(), 1);
        assert!(catalog.libraries[0].unavailable);
        assert!(catalog.libraries[0].info.is_movie_library());
        assert!(catalog.items.is_empty());
    }

    #[test]
    fn load_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Catalog::load(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        let missing = Catalog::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(missing, Error::Io(_)));
    }
}
