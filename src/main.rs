//! Encore CLI frontend.

use std::process::ExitCode;

use encore::catalog::{AppDescriptor, CatalogState};
use encore::exclusions::{ExclusionPolicy, STANDARD_POLICY};
use encore::launcher::{launch_new_instance, Notifier};
use encore::platform::{self, macos};
use encore::{search, Config};

/// Toast surface for a terminal host. There is no window to dismiss, so
/// `dismiss` only leaves a trace in the debug log.
struct ConsoleNotifier;

#[async_trait::async_trait]
impl Notifier for ConsoleNotifier {
    async fn progress(&self, title: &str) {
        println!("{}", title);
    }

    async fn success(&self, title: &str) {
        println!("{}", title);
    }

    async fn failure(&self, title: &str, message: &str) {
        eprintln!("{}: {}", title, message);
    }

    async fn dismiss(&self) {
        log::debug!("Terminal host, nothing to dismiss");
    }
}

fn print_help() {
    println!("Encore - launch a fresh instance of an installed application");
    println!();
    println!("Usage: encore <COMMAND> [OPTIONS]");
    println!();
    println!("Commands:");
    println!("  list [--all]            List launchable applications");
    println!("  launch <query> [--all]  Launch a new instance of the matching application");
    println!("  current                 Launch a new instance of the frontmost application");
    println!("  reveal <query>          Reveal the application bundle in Finder");
    println!("  copy-path <query>       Copy the application path to the clipboard");
    println!("  copy-id <query>         Copy the bundle identifier to the clipboard");
    println!();
    println!("Options:");
    println!("  --all         Include system utilities normally filtered out");
    println!("  --help, -h    Show this help message");
}

/// Exclusion policy for this invocation, honoring config and `--all`.
fn effective_policy(config: &Config, all: bool) -> Option<&'static ExclusionPolicy> {
    if all || !config.filter.exclude_system_apps {
        None
    } else {
        Some(&STANDARD_POLICY)
    }
}

/// Build the catalog, rendering the error state on failure.
async fn load_catalog(policy: Option<&ExclusionPolicy>) -> Option<Vec<AppDescriptor>> {
    match CatalogState::load(platform::current_registry().as_ref(), policy).await {
        CatalogState::Ready(apps) => Some(apps),
        CatalogState::Failed(message) => {
            eprintln!("Failed to load applications: {}", message);
            None
        }
        CatalogState::Loading => unreachable!("load resolves to Ready or Failed"),
    }
}

/// Resolve a query against the catalog, reporting when nothing matches.
async fn resolve_app(query: &str, policy: Option<&ExclusionPolicy>) -> Option<AppDescriptor> {
    let catalog = load_catalog(policy).await?;
    match search::resolve(&catalog, query) {
        Some(app) => Some(app.clone()),
        None => {
            eprintln!("No application matching '{}'", query);
            None
        }
    }
}

fn copy_to_clipboard(content: &str) -> Result<(), String> {
    arboard::Clipboard::new()
        .and_then(|mut clipboard| clipboard.set_text(content))
        .map_err(|e| e.to_string())
}

async fn cmd_list(policy: Option<&ExclusionPolicy>) -> ExitCode {
    let Some(catalog) = load_catalog(policy).await else {
        return ExitCode::FAILURE;
    };

    if catalog.is_empty() {
        println!("No applications found");
        return ExitCode::SUCCESS;
    }

    for app in &catalog {
        let bundle_id = app.bundle_id.as_deref().unwrap_or("");
        println!("{}\t{}\t{}", app.name, app.path.display(), bundle_id);
    }
    ExitCode::SUCCESS
}

async fn cmd_launch(app: &AppDescriptor) -> ExitCode {
    let spawner = platform::current_spawner();
    match launch_new_instance(app, spawner.as_ref(), &ConsoleNotifier).await {
        Ok(()) => ExitCode::SUCCESS,
        // Already reported through the notifier.
        Err(_) => ExitCode::FAILURE,
    }
}

async fn cmd_current() -> ExitCode {
    let registry = platform::current_registry();
    match registry.frontmost_application().await {
        Ok(app) => cmd_launch(&app).await,
        Err(e) => {
            eprintln!("Failed to load applications: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return ExitCode::SUCCESS;
    }

    let config = Config::load();
    let all = args.iter().any(|a| a == "--all");
    let policy = effective_policy(&config, all);
    let query = args.get(1).filter(|a| !a.starts_with('-')).cloned();

    match args[0].as_str() {
        "list" => cmd_list(policy).await,

        "launch" => {
            let Some(query) = query else {
                eprintln!("Usage: encore launch <query> [--all]");
                return ExitCode::FAILURE;
            };
            match resolve_app(&query, policy).await {
                Some(app) => cmd_launch(&app).await,
                None => ExitCode::FAILURE,
            }
        }

        "current" => cmd_current().await,

        "reveal" => {
            let Some(query) = query else {
                eprintln!("Usage: encore reveal <query>");
                return ExitCode::FAILURE;
            };
            match resolve_app(&query, policy).await {
                Some(app) => match macos::reveal_in_finder(&app.path).await {
                    Ok(()) => ExitCode::SUCCESS,
                    Err(e) => {
                        eprintln!("Failed to reveal {}: {}", app.name, e);
                        ExitCode::FAILURE
                    }
                },
                None => ExitCode::FAILURE,
            }
        }

        "copy-path" | "copy-id" => {
            let command = args[0].as_str();
            let Some(query) = query else {
                eprintln!("Usage: encore {} <query>", command);
                return ExitCode::FAILURE;
            };
            let Some(app) = resolve_app(&query, policy).await else {
                return ExitCode::FAILURE;
            };

            let content = if command == "copy-path" {
                app.path.display().to_string()
            } else {
                match app.bundle_id {
                    Some(id) => id,
                    None => {
                        eprintln!("{} has no bundle identifier", app.name);
                        return ExitCode::FAILURE;
                    }
                }
            };

            match copy_to_clipboard(&content) {
                Ok(()) => {
                    println!("Copied {}", content);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Clipboard error: {}", e);
                    ExitCode::FAILURE
                }
            }
        }

        other => {
            eprintln!("Unknown command: {}", other);
            eprintln!("Run 'encore --help' for usage information");
            ExitCode::FAILURE
        }
    }
}
