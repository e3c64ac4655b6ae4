//! Export command implementation.

use std::path::Path;

use sqa_lib::export::{self, ExportFormat};
use sqa_lib::{Result, SqaError, derive_view};

use crate::cli::ExportArgs;
use crate::config::Workspace;
use crate::format::{ExportReport, print_json};

/// Execute the export command.
///
/// Exports the same rows `list` would show for the given filters. An empty
/// selection prints a notice and writes no file.
///
/// # Errors
///
/// Returns an error if the format, a filter value, or the write fails.
pub fn execute(args: &ExportArgs, workspace: &Workspace, json: bool) -> Result<()> {
    let format: ExportFormat = args.format.parse()?;
    let (filters, tab) = super::build_filters(&args.filters)?;
    let sort = super::resolve_sort(&args.sort, &workspace.config)?;

    let registry = workspace.open_registry();
    let Some(project) = super::active_or_notice(&registry, json)? else {
        return Ok(());
    };

    let mut view = derive_view(&project.issues, &filters, tab);
    sort.apply(&mut view.issues);

    let path = args.output.clone().unwrap_or_else(|| {
        export::output_path(Path::new("."), &workspace.config.export_basename, format)
    });

    match export::export(&view.issues, format, &path) {
        Ok(written) => {
            let report = ExportReport {
                path: written.display().to_string(),
                format: format.to_string(),
                rows: view.issues.len(),
            };
            if json {
                print_json(&report)
            } else {
                println!("Exported {} issue(s) to {}", report.rows, report.path);
                Ok(())
            }
        }
        Err(SqaError::NothingToExport) => super::notice("No issues to export.", json),
        Err(e) => Err(e),
    }
}
