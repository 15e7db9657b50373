//! Item kinds and library collection types.
//!
//! Both serialize in lowercase, matching the tags Jellyfin-style hosts use.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Kind of host item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A single movie.
    Movie,
    /// A TV series (show).
    Series,
    /// A season within a series.
    Season,
    /// A single episode within a season.
    Episode,
    /// A plain folder inside a library.
    Folder,
    /// The root folder of a library.
    CollectionFolder,
    /// A trailer or other extra.
    Trailer,
    /// An audio track.
    Audio,
}

impl ItemKind {
    /// Only movies are eligible for intros.
    pub fn is_movie(self) -> bool {
        matches!(self, Self::Movie)
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movie => write!(f, "movie"),
            Self::Series => write!(f, "series"),
            Self::Season => write!(f, "season"),
            Self::Episode => write!(f, "episode"),
            Self::Folder => write!(f, "folder"),
            Self::CollectionFolder => write!(f, "collectionfolder"),
            Self::Trailer => write!(f, "trailer"),
            Self::Audio => write!(f, "audio"),
        }
    }
}

/// Collection type tag of a library.
///
/// Hosts report this as a free-form, case-insensitive string; unknown tags
/// are kept verbatim in [`CollectionType::Other`] so they never fail a
/// library listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CollectionType {
    Movies,
    TvShows,
    Music,
    Mixed,
    Other(String),
}

impl CollectionType {
    /// Whether this library holds movies.
    pub fn is_movies(&self) -> bool {
        matches!(self, Self::Movies)
    }
}

impl FromStr for CollectionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_input("empty collection type"));
        }
        Ok(match trimmed.to_lowercase().as_str() {
            "movies" => Self::Movies,
            "tvshows" => Self::TvShows,
            "music" => Self::Music,
            "mixed" => Self::Mixed,
            _ => Self::Other(trimmed.to_string()),
        })
    }
}

impl TryFrom<String> for CollectionType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CollectionType> for String {
    fn from(value: CollectionType) -> Self {
        value.to_string()
    }
}

impl fmt::Display for CollectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movies => write!(f, "movies"),
            Self::TvShows => write!(f, "tvshows"),
            Self::Music => write!(f, "music"),
            Self::Mixed => write!(f, "mixed"),
            Self::Other(tag) => write!(f, "{tag}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_kind_is_movie() {
        assert!(ItemKind::Movie.is_movie());
        assert!(!ItemKind::Episode.is_movie());
        assert!(!ItemKind::Trailer.is_movie());
    }

    #[test]
    fn test_collection_type_parse_is_case_insensitive() {
        assert_eq!("movies".parse::<CollectionType>().unwrap(), CollectionType::Movies);
        assert_eq!("MOVIES".parse::<CollectionType>().unwrap(), CollectionType::Movies);
        assert_eq!(" Movies ".parse::<CollectionType>().unwrap(), CollectionType::Movies);
        assert_eq!("TvShows".parse::<CollectionType>().unwrap(), CollectionType::TvShows);
        assert_eq!(
            "homevideos".parse::<CollectionType>().unwrap(),
            CollectionType::Other("homevideos".into())
        );
        assert!("".parse::<CollectionType>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&CollectionType::Movies).unwrap();
        assert_eq!(json, "\"movies\"");
        let kind: ItemKind = serde_json::from_str("\"episode\"").unwrap();
        assert_eq!(kind, ItemKind::Episode);
        let movies: CollectionType = serde_json::from_str("\"Movies\"").unwrap();
        assert_eq!(movies, CollectionType::Movies);
        let other: CollectionType = serde_json::from_str("\"boxsets\"").unwrap();
        assert_eq!(other, CollectionType::Other("boxsets".into()));
    }
}
