//! Platform seams for OS-specific operations.
//!
//! Two capabilities are abstracted: querying the OS application registry
//! and spawning a detached process image. Both are read-or-fire operations
//! with no cross-call state, so implementations are expected to be cheap to
//! construct and safe to share.

pub mod macos;

use std::path::Path;

use crate::catalog::AppDescriptor;
use crate::error::EncoreResult;

/// Query the OS application registry.
///
/// Every call produces a fresh snapshot; implementations must not cache
/// across calls or substitute partial results on failure.
#[async_trait::async_trait]
pub trait AppRegistry: Send + Sync {
    /// All discoverable installed applications.
    async fn list_applications(&self) -> EncoreResult<Vec<AppDescriptor>>;

    /// The application currently owning input focus.
    async fn frontmost_application(&self) -> EncoreResult<AppDescriptor>;
}

/// Spawn a detached process image of an application.
///
/// The path must be passed to the OS as one literal argv element; no shell
/// interpretation is allowed anywhere on the way down.
#[async_trait::async_trait]
pub trait ProcessSpawner: Send + Sync {
    /// Ask the OS to start the application at `path`. With `force_new` the
    /// request must start a fresh instance even if one is already running,
    /// instead of focusing it. The spawned process is not tracked.
    async fn spawn_detached(&self, path: &Path, force_new: bool) -> Result<(), String>;
}

/// Registry implementation for the current OS.
pub fn current_registry() -> Box<dyn AppRegistry> {
    Box::new(macos::MacAppRegistry::new())
}

/// Spawner implementation for the current OS.
pub fn current_spawner() -> Box<dyn ProcessSpawner> {
    Box::new(macos::OpenSpawner)
}
