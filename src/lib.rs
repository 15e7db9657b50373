//! Introgate - library-scoped intro provider for media servers
//!
//! Decides whether a movie should get intros (trailers, pre-rolls) based on
//! which library it lives in, then delegates the actual selection to the
//! host's intro manager.
//!
//! - [`host`] -- collaborator traits plus an in-memory host
//! - [`filter`] -- the configured target library list
//! - [`resolve`] -- locating an item's movie library
//! - [`provider`] -- the intro provider and its decision gate
//! - [`config`] -- TOML configuration

pub mod config;
pub mod filter;
pub mod host;
pub mod provider;
pub mod resolve;

pub use filter::TargetLibraries;
pub use provider::{Decision, IntroFilterProvider, IntroProvider};
