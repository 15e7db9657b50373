//! Shared test harness for integration tests.
//!
//! [`TestHarness`] builds an in-memory host with a small but realistic
//! catalog: a "Movies" library with a nested folder, an "Anime" movie
//! library, a TV library, and an "Archive" library that fails every query.
//! [`TestHarness::healthy`] leaves the archive reachable.

#![allow(dead_code)]

use std::sync::Arc;

use introgate::config::IntroConfig;
use introgate::host::{Catalog, Item, MemoryHost, User};
use introgate::IntroFilterProvider;
use introgate_common::{CollectionType, ItemKind, LibraryId};

pub struct TestHarness {
    pub host: Arc<MemoryHost>,
    pub movies: LibraryId,
    pub anime: LibraryId,
    pub shows: LibraryId,
    pub heat: Item,
    pub nested: Item,
    pub akira: Item,
    pub episode: Item,
    pub broken_movie: Item,
    pub orphan: Item,
    pub user: User,
}

impl TestHarness {
    /// Harness whose "Archive" library fails every query.
    pub fn new() -> Self {
        Self::build(true)
    }

    /// Harness where every library answers queries.
    pub fn healthy() -> Self {
        Self::build(false)
    }

    fn build(archive_unavailable: bool) -> Self {
        let mut catalog = Catalog::default();

        let shows = catalog.add_library("Shows", Some(CollectionType::TvShows));
        let anime = catalog.add_library("Anime", Some(CollectionType::Movies));
        let movies = catalog.add_library("Movies", Some(CollectionType::Movies));
        let broken = catalog.add_library("Archive", Some(CollectionType::Movies));

        let heat = catalog.add_item(ItemKind::Movie, "Heat", movies);
        let collection = catalog.add_item(ItemKind::Folder, "Nolan", movies);
        let nested = catalog.add_item(ItemKind::Movie, "Memento", collection.id);
        let akira = catalog.add_item(ItemKind::Movie, "Akira", anime);
        let series = catalog.add_item(ItemKind::Series, "The Wire", shows);
        let season = catalog.add_item(ItemKind::Season, "Season 1", series.id);
        let episode = catalog.add_item(ItemKind::Episode, "The Target", season.id);
        let broken_movie = catalog.add_item(ItemKind::Movie, "Lost Reel", broken);
        let orphan = catalog.add_item(ItemKind::Movie, "Orphan", LibraryId::new());

        if archive_unavailable {
            catalog
                .mark_unavailable(broken)
                .expect("archive library was just added");
        }
        catalog.add_intro("/srv/intros/studio-logo.mkv");
        catalog.add_intro("/srv/intros/trailer-1.mkv");

        Self {
            host: Arc::new(MemoryHost::new(catalog)),
            movies,
            anime,
            shows,
            heat,
            nested,
            akira,
            episode,
            broken_movie,
            orphan,
            user: User::new("alice"),
        }
    }

    /// Provider over this harness' host with the given `included_libraries`.
    pub fn provider(&self, included_libraries: &str) -> IntroFilterProvider {
        IntroFilterProvider::new(
            &IntroConfig::new(included_libraries),
            self.host.clone(),
            self.host.clone(),
            self.host.clone(),
        )
    }
}
