#![warn(clippy::all, missing_docs)]

//! Core domain logic for the gammon score tracker.
//!
//! This crate hosts the data models, configuration handling, the persistent
//! key/value store with its key-migration policy, the ranking aggregation
//! engine, and the session/match repository used by the UI frontends.
//! Frontends hold one [`Tracker`] instance and drive every mutation through
//! it; the tracker writes through to its store on each successful change.

pub mod config;
pub mod models;
pub mod ranking;
pub mod selection;
pub mod store;
pub mod tracker;

pub use config::AppConfig;
pub use models::{ColorScheme, Game, GameResult, Match, PlayerName, RankingEntry, Session};
pub use ranking::compute_ranking;
pub use selection::PairSelection;
pub use store::{FileStore, KvStore, MemoryStore, StoreKey};
pub use tracker::{Rejection, Tracker};
