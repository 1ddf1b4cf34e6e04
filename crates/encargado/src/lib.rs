//! `encargado` - A local incident tracker for work zones
//!
//! This library provides the document store, the pure mutation operations
//! that keep zones, events and the admin log consistent, and the formatting
//! used to share incidents. The `encargado` binary is a thin CLI over it.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod logging;
pub mod model;
pub mod ops;
pub mod photo;
pub mod query;
pub mod report;
pub mod storage;
pub mod tracker;
pub mod validate;

pub use config::Config;
pub use environment::{Environment, SequenceEnvironment, SystemEnvironment};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use model::{AdminLog, AppData, Event, LogType, Photo, PhotoDraft, Zone};
pub use ops::{Mutation, Outcome};
pub use storage::{DocumentStore, Storage, StorageStats};
pub use tracker::Tracker;
