//! The intro filter provider.
//!
//! [`IntroFilterProvider`] sits in front of the host's [`IntroManager`] and
//! only lets intro requests through for movies that live in one of the
//! configured target libraries. The gate is fail-closed: if the item's
//! library cannot be determined, the item gets no intros.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::IntroConfig;
use crate::filter::TargetLibraries;
use crate::host::{IntroManager, IntroReference, Item, ItemStore, LibraryManager, User};
use crate::resolve::resolve_library;

/// The host's generic intro-provider extension contract.
#[async_trait]
pub trait IntroProvider: Send + Sync {
    /// Display name the host shows for this provider.
    fn name(&self) -> &str;

    /// Intros to play before `item` for `user`. Never fails; a provider that
    /// cannot answer returns an empty list.
    async fn get_intros(&self, item: &Item, user: &User) -> Vec<IntroReference>;

    /// Every intro file the provider could ever hand out.
    fn all_intro_files(&self) -> Vec<PathBuf> {
        Vec::new()
    }
}

/// Outcome of the library gate for one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Decision {
    /// The item is not a movie.
    NotAMovie,
    /// No target libraries are configured, so every movie is allowed.
    Unfiltered,
    /// The item's library is one of the targets.
    Matched { library: String },
    /// The item's library is not one of the targets.
    NotTargeted { library: String },
    /// No movie library contains the item.
    NoLibrary,
    /// The host failed while resolving the item's library.
    ResolutionFailed { reason: String },
}

impl Decision {
    /// Whether intros should be fetched for the item.
    pub fn allows(&self) -> bool {
        matches!(self, Self::Unfiltered | Self::Matched { .. })
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAMovie => write!(f, "skipped: not a movie"),
            Self::Unfiltered => write!(f, "allowed: no library filter configured"),
            Self::Matched { library } => write!(f, "allowed: library '{library}' is targeted"),
            Self::NotTargeted { library } => {
                write!(f, "skipped: library '{library}' is not targeted")
            }
            Self::NoLibrary => write!(f, "skipped: no movie library contains the item"),
            Self::ResolutionFailed { reason } => {
                write!(f, "skipped: library lookup failed ({reason})")
            }
        }
    }
}

/// Intro provider restricted to a configured set of movie libraries.
///
/// The target list is parsed once at construction and never changes, so a
/// single provider can serve concurrent requests without locking. Every
/// request is an independent, read-only pass over the host.
pub struct IntroFilterProvider {
    targets: TargetLibraries,
    libraries: Arc<dyn LibraryManager>,
    items: Arc<dyn ItemStore>,
    intros: Arc<dyn IntroManager>,
}

impl IntroFilterProvider {
    pub const NAME: &'static str = "Intro Library Filter";

    pub fn new(
        config: &IntroConfig,
        libraries: Arc<dyn LibraryManager>,
        items: Arc<dyn ItemStore>,
        intros: Arc<dyn IntroManager>,
    ) -> Self {
        Self::with_targets(config.target_libraries(), libraries, items, intros)
    }

    pub fn with_targets(
        targets: TargetLibraries,
        libraries: Arc<dyn LibraryManager>,
        items: Arc<dyn ItemStore>,
        intros: Arc<dyn IntroManager>,
    ) -> Self {
        Self {
            targets,
            libraries,
            items,
            intros,
        }
    }

    pub fn targets(&self) -> &TargetLibraries {
        &self.targets
    }

    /// Run the library gate for `item` without fetching anything.
    pub async fn evaluate(&self, item: &Item) -> Decision {
        if !item.is_movie() {
            return Decision::NotAMovie;
        }

        if self.targets.is_empty() {
            return Decision::Unfiltered;
        }

        // Re-read the item so the check runs against the store's view of it.
        let stored = match self.items.get_item(item.id).await {
            Ok(Some(stored)) => stored,
            Ok(None) => {
                return Decision::ResolutionFailed {
                    reason: format!("item {} not found in store", item.id),
                };
            }
            Err(e) => {
                return Decision::ResolutionFailed {
                    reason: e.to_string(),
                };
            }
        };

        if !stored.is_movie() {
            return Decision::ResolutionFailed {
                reason: format!("stored item is a {}, not a movie", stored.kind),
            };
        }

        match resolve_library(self.libraries.as_ref(), self.items.as_ref(), &stored).await {
            Ok(Some(library)) if self.targets.contains(&library.name) => Decision::Matched {
                library: library.name,
            },
            Ok(Some(library)) => Decision::NotTargeted {
                library: library.name,
            },
            Ok(None) => Decision::NoLibrary,
            Err(e) => Decision::ResolutionFailed {
                reason: e.to_string(),
            },
        }
    }

    /// Gate `item`, then delegate to the host's intro manager if allowed.
    ///
    /// The manager's result is returned unchanged. Every failure along the
    /// way yields an empty list.
    pub async fn decide(&self, item: &Item, user: &User) -> Vec<IntroReference> {
        self.decide_with_reason(item, user).await.1
    }

    /// Like [`decide`](Self::decide), also returning the gate's decision.
    pub async fn decide_with_reason(
        &self,
        item: &Item,
        user: &User,
    ) -> (Decision, Vec<IntroReference>) {
        let decision = self.evaluate(item).await;

        match &decision {
            Decision::ResolutionFailed { reason } => {
                tracing::warn!(
                    item = %item.id,
                    name = %item.name,
                    %reason,
                    "library lookup failed, skipping intros"
                );
            }
            _ => {
                tracing::debug!(item = %item.id, name = %item.name, %decision, "intro gate");
            }
        }

        if !decision.allows() {
            return (decision, Vec::new());
        }

        let intros = match self.intros.fetch_intros(item, user).await {
            Ok(intros) => {
                tracing::debug!(item = %item.id, count = intros.len(), "fetched intros");
                intros
            }
            Err(e) => {
                tracing::warn!(item = %item.id, error = %e, "intro fetch failed");
                Vec::new()
            }
        };

        (decision, intros)
    }
}

#[async_trait]
impl IntroProvider for IntroFilterProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn get_intros(&self, item: &Item, user: &User) -> Vec<IntroReference> {
        self.decide(item, user).await
    }
}

impl fmt::Debug for IntroFilterProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntroFilterProvider")
            .field("targets", &self.targets)
            .finish_non_exhaustive()
    }
}
