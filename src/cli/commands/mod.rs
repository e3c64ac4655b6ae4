//! Command implementations.
//!
//! Each command opens the registry, performs one action and renders the
//! result as text or JSON.

pub mod completions;
pub mod export;
pub mod init;
pub mod issue;
pub mod list;
pub mod project;
pub mod summary;
pub mod version;

use chrono::NaiveDate;
use sqa_lib::view::{FilterOptions, SortDirection, SortField, SortState, Tab};
use sqa_lib::{Category, KeyValueStore, Project, ProjectRegistry, Result, SqaError};
use tracing::warn;

use crate::cli::{FilterArgs, SortArgs};
use crate::config::Config;

/// Parse every value, failing on the first unknown one.
fn parse_all<C>(values: &[String]) -> Result<Vec<C>>
where
    C: Category + std::str::FromStr<Err = SqaError>,
{
    values
        .iter()
        .map(String::as_str)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::parse::<C>)
        .collect()
}

/// Convert filter flags into aggregator inputs.
pub(crate) fn build_filters(args: &FilterArgs) -> Result<(FilterOptions, Tab)> {
    let filters = FilterOptions {
        search: args.search.clone().unwrap_or_default(),
        statuses: parse_all(&args.status)?,
        severities: parse_all(&args.severity)?,
        priorities: parse_all(&args.priority)?,
        test_types: parse_all(&args.type_)?,
    };
    let tab = args.tab.as_deref().map_or(Ok(Tab::All), str::parse::<Tab>)?;
    Ok((filters, tab))
}

/// Sort flags layered over the configured default.
pub(crate) fn resolve_sort(args: &SortArgs, config: &Config) -> Result<SortState> {
    let mut state = config.sort_state()?;
    if let Some(field) = args.sort.as_deref() {
        let field: SortField = field.parse()?;
        if field != state.field {
            state = SortState::new(field, SortDirection::Ascending);
        }
    }
    if args.asc {
        state.direction = SortDirection::Ascending;
    } else if args.desc {
        state.direction = SortDirection::Descending;
    }
    Ok(state)
}

/// Parse a `YYYY-MM-DD` date flag.
pub(crate) fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| SqaError::InvalidValue {
        field,
        value: value.to_string(),
    })
}

/// Blank flag values mean "absent".
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn warn_if_degraded<S: KeyValueStore>(registry: &ProjectRegistry<S>) {
    if registry.is_degraded() {
        warn!("Changes are kept in memory only; the store could not be used");
        eprintln!("Warning: store unavailable, changes were not saved");
    }
}

/// Print a notice for an empty outcome (no active project, nothing to export).
pub(crate) fn notice(message: &str, json: bool) -> Result<()> {
    if json {
        crate::format::print_json(&serde_json::json!({ "notice": message }))?;
    } else {
        println!("{message}");
    }
    Ok(())
}

/// The active project, or a printed notice when there is none.
pub(crate) fn active_or_notice<'a, S: KeyValueStore>(
    registry: &'a ProjectRegistry<S>,
    json: bool,
) -> Result<Option<&'a Project>> {
    let project = registry.active_project();
    if project.is_none() {
        notice(
            "No active project. Create one with `sqa project create` or pick one with `sqa project select`.",
            json,
        )?;
    }
    Ok(project)
}
