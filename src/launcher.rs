//! The instance launcher.
//!
//! Issues a "spawn a fresh process image, ignore running instances" request
//! for a chosen application and reports the lifecycle to the host through a
//! [`Notifier`]. The contract is strict: `progress` always fires first,
//! then exactly one of `success` (followed by `dismiss`) or `failure`.
//! There is no retry, no existence pre-check and no tracking of the spawned
//! process.

use crate::catalog::AppDescriptor;
use crate::error::{EncoreError, EncoreResult};
use crate::platform::ProcessSpawner;

/// Host-provided notification surface.
///
/// `dismiss` is the fire-and-forget "close the invoking UI" action; hosts
/// without a window (a terminal, say) implement it as a no-op.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn progress(&self, title: &str);
    async fn success(&self, title: &str);
    async fn failure(&self, title: &str, message: &str);
    async fn dismiss(&self);
}

/// Launch a brand-new instance of `app`, regardless of whether one is
/// already running.
///
/// On failure the OS error text is both reported through the notifier and
/// returned as [`EncoreError::Launch`]; the caller decides whether that
/// ends the invocation with a non-zero exit or an error view, but it must
/// not crash.
pub async fn launch_new_instance(
    app: &AppDescriptor,
    spawner: &dyn ProcessSpawner,
    notifier: &dyn Notifier,
) -> EncoreResult<()> {
    notifier
        .progress(&format!("Launching new instance of {}...", app.name))
        .await;

    match spawner.spawn_detached(&app.path, true).await {
        Ok(()) => {
            log::info!("Spawn request accepted for {}", app.path.display());
            notifier
                .success(&format!("Launched new instance of {}", app.name))
                .await;
            notifier.dismiss().await;
            Ok(())
        }
        Err(message) => {
            log::warn!("Spawn request failed for {}: {}", app.path.display(), message);
            notifier
                .failure("Failed to launch application", &message)
                .await;
            Err(EncoreError::Launch(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        Progress(String),
        Success(String),
        Failure(String, String),
        Dismiss,
    }

    #[derive(Default)]
    struct RecordingNotifier {
        events: Mutex<Vec<Event>>,
    }

    impl RecordingNotifier {
        fn events(&self) -> Vec<Event> {
            self.events.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl Notifier for RecordingNotifier {
        async fn progress(&self, title: &str) {
            self.events.lock().unwrap().push(Event::Progress(title.to_string()));
        }

        async fn success(&self, title: &str) {
            self.events.lock().unwrap().push(Event::Success(title.to_string()));
        }

        async fn failure(&self, title: &str, message: &str) {
            self.events
                .lock()
                .unwrap()
                .push(Event::Failure(title.to_string(), message.to_string()));
        }

        async fn dismiss(&self) {
            self.events.lock().unwrap().push(Event::Dismiss);
        }
    }

    /// Records the exact path handed to the OS, succeeding only when the
    /// path "exists" according to the test's fixture list.
    struct RecordingSpawner {
        existing: Vec<PathBuf>,
        calls: Mutex<Vec<(PathBuf, bool)>>,
    }

    impl RecordingSpawner {
        fn new(existing: &[&str]) -> Self {
            Self {
                existing: existing.iter().map(PathBuf::from).collect(),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl ProcessSpawner for RecordingSpawner {
        async fn spawn_detached(&self, path: &Path, force_new: bool) -> Result<(), String> {
            self.calls.lock().unwrap().push((path.to_path_buf(), force_new));
            if self.existing.iter().any(|p| p == path) {
                Ok(())
            } else {
                Err(format!("Unable to find application at {}", path.display()))
            }
        }
    }

    fn safari() -> AppDescriptor {
        AppDescriptor {
            name: "Safari".to_string(),
            path: PathBuf::from("/Applications/Safari.app"),
            bundle_id: Some("com.apple.Safari".to_string()),
        }
    }

    #[tokio::test]
    async fn happy_path_emits_progress_success_dismiss() {
        let spawner = RecordingSpawner::new(&["/Applications/Safari.app"]);
        let notifier = RecordingNotifier::default();

        launch_new_instance(&safari(), &spawner, &notifier).await.unwrap();

        assert_eq!(
            notifier.events(),
            vec![
                Event::Progress("Launching new instance of Safari...".to_string()),
                Event::Success("Launched new instance of Safari".to_string()),
                Event::Dismiss,
            ]
        );

        let calls = spawner.calls.lock().unwrap().clone();
        assert_eq!(calls, vec![(PathBuf::from("/Applications/Safari.app"), true)]);
    }

    #[tokio::test]
    async fn missing_application_emits_progress_then_failure_only() {
        let spawner = RecordingSpawner::new(&[]);
        let notifier = RecordingNotifier::default();
        let app = AppDescriptor {
            name: "Ghost".to_string(),
            path: PathBuf::from("/Applications/Ghost.app"),
            bundle_id: None,
        };

        let err = launch_new_instance(&app, &spawner, &notifier).await.unwrap_err();
        assert!(matches!(err, EncoreError::Launch(_)));

        let events = notifier.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], Event::Progress(_)));
        match &events[1] {
            Event::Failure(title, message) => {
                assert_eq!(title, "Failed to launch application");
                assert!(message.contains("/Applications/Ghost.app"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
        // No success and no dismissal on the error path.
        assert!(!events.iter().any(|e| matches!(e, Event::Success(_) | Event::Dismiss)));
    }

    #[tokio::test]
    async fn hostile_path_reaches_the_spawner_verbatim() {
        let hostile = "/Applications/Weird\"; rm -rf /.app";
        let spawner = RecordingSpawner::new(&[hostile]);
        let notifier = RecordingNotifier::default();
        let app = AppDescriptor {
            name: "Weird".to_string(),
            path: PathBuf::from(hostile),
            bundle_id: None,
        };

        launch_new_instance(&app, &spawner, &notifier).await.unwrap();

        let calls = spawner.calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, PathBuf::from(hostile));
    }
}
