//! Contracts for the host collaborators the intro filter calls into.
//!
//! The media server owns the library store, the item hierarchy, and the
//! actual intro selection. This module only describes what the filter needs
//! from them. Implementations are injected into
//! [`IntroFilterProvider`](crate::provider::IntroFilterProvider) at
//! construction; nothing here is looked up globally.
//!
//! - [`LibraryManager`] -- enumerates the host's libraries.
//! - [`ItemStore`] -- item lookups and ancestor-scoped queries.
//! - [`IntroManager`] -- the host's intro selection.
//! - [`memory`] -- an in-memory host backed by a JSON catalog.

pub mod memory;

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use introgate_common::{CollectionType, ItemId, ItemKind, LibraryId, Result, UserId};

pub use memory::{Catalog, MemoryHost};

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// A playable (or container) item in the host hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub kind: ItemKind,
    pub name: String,
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Parent in the hierarchy. For top-level items this is the library root.
    #[serde(default)]
    pub parent_id: Option<ItemId>,
}

impl Item {
    pub fn new(kind: ItemKind, name: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            kind,
            name: name.into(),
            path: None,
            parent_id: None,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<ItemId>) -> Self {
        self.parent_id = Some(parent.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn is_movie(&self) -> bool {
        self.kind.is_movie()
    }
}

/// A library as reported by [`LibraryManager::libraries`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryInfo {
    pub id: LibraryId,
    pub name: String,
    /// Mixed-content libraries may have no collection type at all.
    #[serde(default)]
    pub collection_type: Option<CollectionType>,
}

impl LibraryInfo {
    pub fn is_movie_library(&self) -> bool {
        self.collection_type
            .as_ref()
            .is_some_and(CollectionType::is_movies)
    }
}

/// The user an intro request is made for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub name: String,
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            name: name.into(),
        }
    }
}

/// A single intro to play before the main item.
///
/// Hosts address intros either by file path or by one of their own items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntroReference {
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub item_id: Option<ItemId>,
}

impl IntroReference {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            item_id: None,
        }
    }

    pub fn from_item(item_id: ItemId) -> Self {
        Self {
            path: None,
            item_id: Some(item_id),
        }
    }
}

/// Ancestor-scoped item query.
///
/// Matches items whose ancestor chain contains `ancestor_id`, optionally
/// narrowed to specific item IDs and kinds. Empty filters match everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemQuery {
    pub ancestor_id: ItemId,
    pub item_ids: Vec<ItemId>,
    pub kinds: Vec<ItemKind>,
}

impl ItemQuery {
    pub fn descendants_of(ancestor: impl Into<ItemId>) -> Self {
        Self {
            ancestor_id: ancestor.into(),
            item_ids: Vec::new(),
            kinds: Vec::new(),
        }
    }

    pub fn with_item(mut self, id: ItemId) -> Self {
        self.item_ids.push(id);
        self
    }

    pub fn with_kinds(mut self, kinds: impl IntoIterator<Item = ItemKind>) -> Self {
        self.kinds.extend(kinds);
        self
    }

    /// Whether `item` passes the ID and kind filters. Ancestry is checked by
    /// the store.
    pub fn accepts(&self, item: &Item) -> bool {
        (self.item_ids.is_empty() || self.item_ids.contains(&item.id))
            && (self.kinds.is_empty() || self.kinds.contains(&item.kind))
    }
}

// ---------------------------------------------------------------------------
// Collaborator traits
// ---------------------------------------------------------------------------

/// Enumerates the host's libraries.
#[async_trait]
pub trait LibraryManager: Send + Sync {
    /// All libraries, in whatever order the host keeps them. Callers must not
    /// assume the order is stable between calls.
    async fn libraries(&self) -> Result<Vec<LibraryInfo>>;
}

/// Read-only access to the host's item store.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Look up a single item. `Ok(None)` when it does not exist.
    async fn get_item(&self, id: ItemId) -> Result<Option<Item>>;

    /// Items transitively contained under `query.ancestor_id` that pass the
    /// query's filters.
    async fn query_items(&self, query: &ItemQuery) -> Result<Vec<Item>>;
}

/// The host's intro selection.
#[async_trait]
pub trait IntroManager: Send + Sync {
    /// Select intros to play before `item` for `user`.
    async fn fetch_intros(&self, item: &Item, user: &User) -> Result<Vec<IntroReference>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movie_library_detection() {
        let mut library = LibraryInfo {
            id: LibraryId::new(),
            name: "Movies".into(),
            collection_type: Some(CollectionType::Movies),
        };
        assert!(library.is_movie_library());

        library.collection_type = Some(CollectionType::TvShows);
        assert!(!library.is_movie_library());

        library.collection_type = None;
        assert!(!library.is_movie_library());
    }

    #[test]
    fn query_filters() {
        let movie = Item::new(ItemKind::Movie, "Heat");
        let episode = Item::new(ItemKind::Episode, "Pilot");
        let root = LibraryId::new();

        let any = ItemQuery::descendants_of(root);
        assert!(any.accepts(&movie));
        assert!(any.accepts(&episode));

        let movies_only = ItemQuery::descendants_of(root).with_kinds([ItemKind::Movie]);
        assert!(movies_only.accepts(&movie));
        assert!(!movies_only.accepts(&episode));

        let just_heat = ItemQuery::descendants_of(root).with_item(movie.id);
        assert!(just_heat.accepts(&movie));
        assert!(!just_heat.accepts(&episode));
    }

    #[test]
    fn item_deserializes_with_optional_fields() {
        let json = r#"{
            "id": "6f1c2a9e-0b7d-4c53-9a5e-3d2f8b1e4c70",
            "kind": "movie",
            "name": "Heat"
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert!(item.is_movie());
        assert!(item.path.is_none());
        assert!(item.parent_id.is_none());
    }
}
