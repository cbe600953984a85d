//! The installed-application catalog.
//!
//! A catalog is a fresh snapshot of the applications the OS registry knows
//! about, normalized into [`AppDescriptor`] values and keyed by bundle path.
//! Nothing is cached between invocations: every build re-queries the OS.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::error::EncoreResult;
use crate::exclusions::ExclusionPolicy;
use crate::platform::AppRegistry;

/// Represents one installed application discovered on the system.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AppDescriptor {
    /// Display name of the application
    pub name: String,
    /// Absolute path to the application bundle; unique within one catalog
    pub path: PathBuf,
    /// Stable bundle identifier, absent for loose executables
    pub bundle_id: Option<String>,
}

/// Build a catalog snapshot from the OS registry.
///
/// De-duplicates by `path` (first occurrence wins, input order preserved)
/// and, when a policy is supplied, drops entries that must never be
/// multi-instanced. Pass `None` to get the unfiltered catalog.
pub async fn build_catalog(
    registry: &dyn AppRegistry,
    policy: Option<&ExclusionPolicy>,
) -> EncoreResult<Vec<AppDescriptor>> {
    let apps = registry.list_applications().await?;

    let mut seen = HashSet::new();
    let mut catalog: Vec<AppDescriptor> = apps
        .into_iter()
        .filter(|app| seen.insert(app.path.clone()))
        .collect();

    if let Some(policy) = policy {
        catalog.retain(|app| policy.is_eligible(app));
    }

    log::debug!("Built catalog with {} applications", catalog.len());
    Ok(catalog)
}

/// Explicit load result for hosts that render a list with loading and
/// error states.
#[derive(Debug, Clone)]
pub enum CatalogState {
    /// Query in flight, nothing to show yet
    Loading,
    /// Snapshot available
    Ready(Vec<AppDescriptor>),
    /// Query failed; hosts render an error state, never crash
    Failed(String),
}

impl CatalogState {
    /// Run one catalog build and fold the outcome into a state.
    pub async fn load(registry: &dyn AppRegistry, policy: Option<&ExclusionPolicy>) -> Self {
        match build_catalog(registry, policy).await {
            Ok(apps) => CatalogState::Ready(apps),
            Err(e) => CatalogState::Failed(e.to_string()),
        }
    }
}
