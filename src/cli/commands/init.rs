use std::fs;

use serde_json::json;
use sqa_lib::{FileStore, ProjectRegistry, Result};
use tracing::info;

use crate::cli::InitArgs;
use crate::config::{CONFIG_FILE, CONFIG_TEMPLATE, Workspace};
use crate::format::print_json;

/// Execute the init command.
///
/// Creates the data directory and a commented config template, then opens
/// the store so it is seeded (with demo projects unless `--empty`).
///
/// # Errors
///
/// Returns an error if the directory or config file cannot be created.
pub fn execute(args: &InitArgs, workspace: &Workspace, json: bool) -> Result<()> {
    fs::create_dir_all(&workspace.data_dir)?;

    let config_path = workspace.data_dir.join(CONFIG_FILE);
    if !config_path.exists() {
        fs::write(&config_path, CONFIG_TEMPLATE)?;
    }

    let store = FileStore::new(workspace.store_path());
    let registry = if args.empty {
        ProjectRegistry::open_with_seed(store, Vec::new())
    } else {
        ProjectRegistry::open(store)
    };
    super::warn_if_degraded(&registry);

    let dir = workspace.display_dir();
    info!(dir = %dir.display(), projects = registry.projects().len(), "Initialized");

    if json {
        print_json(&json!({
            "dataDir": dir.display().to_string(),
            "projects": registry.projects().len(),
            "activeProjectId": registry.active_project_id(),
        }))?;
    } else {
        println!(
            "Initialized sqa in {} ({} projects)",
            dir.display(),
            registry.projects().len()
        );
    }
    Ok(())
}
