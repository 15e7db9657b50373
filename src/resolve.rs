//! Finding the movie library an item lives in.

use introgate_common::{ItemKind, Result};

use crate::host::{Item, ItemQuery, ItemStore, LibraryInfo, LibraryManager};

/// Resolve the movie library containing `item`.
///
/// Libraries are checked in the order the host returns them and the first
/// one whose subtree contains the item wins. Only libraries with the
/// "movies" collection type are considered. Nothing prevents an item from
/// appearing in several libraries; the host's ordering decides which one is
/// reported.
///
/// Store errors are returned as-is; deciding what a failed lookup means is
/// the caller's job.
pub async fn resolve_library(
    libraries: &dyn LibraryManager,
    items: &dyn ItemStore,
    item: &Item,
) -> Result<Option<LibraryInfo>> {
    for library in libraries.libraries().await? {
        if !library.is_movie_library() {
            continue;
        }

        let query = ItemQuery::descendants_of(library.id)
            .with_item(item.id)
            .with_kinds([ItemKind::Movie]);
        let found = items.query_items(&query).await?;

        if found.iter().any(|candidate| candidate.id == item.id) {
            tracing::trace!(item = %item.id, library = %library.name, "resolved library");
            return Ok(Some(library));
        }
    }

    Ok(None)
}
