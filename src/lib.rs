//! Encore: launch a fresh instance of an installed application.
//!
//! Most desktop apps focus the already-running instance when opened again;
//! Encore builds a filtered catalog of installed applications and asks the
//! OS for a brand-new, detached instance of the chosen one instead.

pub mod catalog;
pub mod config;
pub mod error;
pub mod exclusions;
pub mod launcher;
pub mod platform;
pub mod search;

pub use catalog::{build_catalog, AppDescriptor, CatalogState};
pub use config::Config;
pub use error::{EncoreError, EncoreResult};
pub use exclusions::{ExclusionPolicy, STANDARD_POLICY};
pub use launcher::{launch_new_instance, Notifier};
pub use platform::{AppRegistry, ProcessSpawner};
