//! Introgate-Common: shared types for the intro filter and its host adapters.
//!
//! - **Typed IDs**: UUID wrappers for items, libraries, and users
//! - **Core Types**: item kinds and library collection types
//! - **Error Handling**: the error type host collaborators report with
//!
//! # Examples
//!
//! ```
//! use introgate_common::{CollectionType, Error, ItemId, ItemKind, Result};
//!
//! let item_id = ItemId::new();
//! assert!(ItemKind::Movie.is_movie());
//! assert_eq!("Movies".parse::<CollectionType>().unwrap(), CollectionType::Movies);
//!
//! fn lookup(id: ItemId) -> Result<()> {
//!     Err(Error::not_found(id.to_string()))
//! }
//! assert!(lookup(item_id).is_err());
//! ```

pub mod error;
pub mod ids;
pub mod types;

pub use error::{Error, Result};
pub use ids::*;
pub use types::*;
