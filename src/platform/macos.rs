//! macOS platform implementation.
//!
//! - App discovery scans /Applications, /System/Applications and
//!   ~/Applications for .app bundles, reading each bundle's Info.plist
//!   through `plutil -convert json`.
//! - The frontmost application is resolved through System Events via
//!   `osascript`.
//! - Launching goes through `open`, with `-n` forcing a fresh instance
//!   instead of focusing a running one.

use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::catalog::AppDescriptor;
use crate::error::{EncoreError, EncoreResult};

use super::{AppRegistry, ProcessSpawner};

/// Application registry backed by .app bundle scanning.
pub struct MacAppRegistry;

impl MacAppRegistry {
    pub fn new() -> Self {
        Self
    }

    /// Directories scanned for application bundles.
    fn application_dirs() -> Vec<PathBuf> {
        let mut dirs_to_scan = vec![
            PathBuf::from("/Applications"),
            PathBuf::from("/System/Applications"),
        ];

        if let Some(home) = dirs::home_dir() {
            dirs_to_scan.push(home.join("Applications"));
        }

        dirs_to_scan
    }

    /// Scan a directory for .app bundles, recursing one level into plain
    /// subdirectories (for things like /Applications/Utilities).
    fn scan_applications_dir(dir: &Path, apps: &mut Vec<AppDescriptor>, seen: &mut HashSet<PathBuf>) {
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };

        for entry in entries.flatten() {
            let path = entry.path();

            if path.is_dir() && path.extension().is_some_and(|ext| ext == "app") {
                if let Some(app) = parse_app_bundle(&path) {
                    if seen.insert(app.path.clone()) {
                        apps.push(app);
                    }
                }
            } else if path.is_dir() {
                if let Ok(subentries) = fs::read_dir(&path) {
                    for subentry in subentries.flatten() {
                        let subpath = subentry.path();
                        if subpath.is_dir() && subpath.extension().is_some_and(|ext| ext == "app") {
                            if let Some(app) = parse_app_bundle(&subpath) {
                                if seen.insert(app.path.clone()) {
                                    apps.push(app);
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    fn scan_all() -> Vec<AppDescriptor> {
        let mut apps = Vec::new();
        let mut seen = HashSet::new();

        for dir in Self::application_dirs() {
            Self::scan_applications_dir(&dir, &mut apps, &mut seen);
        }

        apps.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

        log::info!("Discovered {} applications", apps.len());
        apps
    }
}

impl Default for MacAppRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AppRegistry for MacAppRegistry {
    async fn list_applications(&self) -> EncoreResult<Vec<AppDescriptor>> {
        // Bundle scanning is blocking filesystem work; keep it off the
        // async runtime's worker threads.
        tokio::task::spawn_blocking(Self::scan_all)
            .await
            .map_err(|e| EncoreError::Discovery(e.to_string()))
    }

    async fn frontmost_application(&self) -> EncoreResult<AppDescriptor> {
        let script = concat!(
            "tell application \"System Events\"\n",
            "  set frontApp to first application process whose frontmost is true\n",
            "  set appName to name of frontApp\n",
            "  set appPath to POSIX path of (application file of frontApp)\n",
            "  set appBundle to bundle identifier of frontApp\n",
            "end tell\n",
            "return appName & linefeed & appPath & linefeed & appBundle",
        );

        let output = tokio::process::Command::new("osascript")
            .args(["-e", script])
            .output()
            .await
            .map_err(|e| EncoreError::Discovery(format!("Failed to run osascript: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(EncoreError::Discovery(format!(
                "Frontmost application query failed: {}",
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_frontmost_reply(&stdout)
            .ok_or_else(|| EncoreError::Discovery("Unexpected osascript reply".to_string()))
    }
}

/// Parse the three-line name/path/bundle-id reply from System Events.
fn parse_frontmost_reply(reply: &str) -> Option<AppDescriptor> {
    let mut lines = reply.lines();
    let name = lines.next()?.trim().to_string();
    let path = lines.next()?.trim().trim_end_matches('/').to_string();
    let bundle_id = lines
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "missing value")
        .map(str::to_string);

    if name.is_empty() || path.is_empty() {
        return None;
    }

    Some(AppDescriptor {
        name,
        path: PathBuf::from(path),
        bundle_id,
    })
}

/// Parse an .app bundle's Info.plist to extract application metadata.
///
/// Falls back to the bundle file stem when the plist cannot be read, so a
/// bundle with a broken plist still shows up under its directory name.
fn parse_app_bundle(app_path: &Path) -> Option<AppDescriptor> {
    let info_plist = app_path.join("Contents/Info.plist");
    if !info_plist.exists() {
        return None;
    }

    let bundle_name = app_path
        .file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())?;

    let Some(plist) = read_plist_json(&info_plist) else {
        return Some(AppDescriptor {
            name: bundle_name,
            path: app_path.to_path_buf(),
            bundle_id: None,
        });
    };

    let name = plist
        .get("CFBundleDisplayName")
        .or_else(|| plist.get("CFBundleName"))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .unwrap_or(bundle_name);

    let bundle_id = plist
        .get("CFBundleIdentifier")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());

    Some(AppDescriptor {
        name,
        path: app_path.to_path_buf(),
        bundle_id,
    })
}

/// Read a plist as JSON using plutil.
fn read_plist_json(info_plist: &Path) -> Option<serde_json::Value> {
    let output = Command::new("plutil")
        .args(["-convert", "json", "-o", "-"])
        .arg(info_plist)
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    serde_json::from_slice(&output.stdout).ok()
}

/// Spawner backed by `open`.
///
/// `open` hands the request to Launch Services and exits once the request
/// has been accepted or rejected; the launched application is detached from
/// this process either way.
pub struct OpenSpawner;

/// Argument vector for the `open` invocation. The path is always one
/// literal element, never interpreted by a shell.
fn open_args(path: &Path, force_new: bool) -> Vec<OsString> {
    let mut args = Vec::new();
    if force_new {
        args.push(OsString::from("-n"));
    }
    args.push(path.as_os_str().to_os_string());
    args
}

#[async_trait::async_trait]
impl ProcessSpawner for OpenSpawner {
    async fn spawn_detached(&self, path: &Path, force_new: bool) -> Result<(), String> {
        let output = tokio::process::Command::new("open")
            .args(open_args(path, force_new))
            .output()
            .await
            .map_err(|e| format!("Failed to run open: {}", e))?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = stderr.trim();
            if message.is_empty() {
                Err(format!("open exited with {}", output.status))
            } else {
                Err(message.to_string())
            }
        }
    }
}

/// Reveal a bundle in the Finder.
pub async fn reveal_in_finder(path: &Path) -> Result<(), String> {
    let status = tokio::process::Command::new("open")
        .arg("-R")
        .arg(path)
        .status()
        .await
        .map_err(|e| format!("Failed to run open: {}", e))?;

    if status.success() {
        Ok(())
    } else {
        Err(format!("open exited with {}", status))
    }
}
