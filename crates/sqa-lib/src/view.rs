//! Issue aggregation: filtering, summary counts and table sorting.
//!
//! Everything here is a pure function of its inputs. Callers re-derive
//! the view after every mutation instead of caching it.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::ops::Index;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::SqaError;
use crate::model::{Category, Issue, Priority, Project, Severity, Status, TestType, parse_category};

// ============================================================================
// Tallies
// ============================================================================

/// Count per value of a closed enumeration. Every key is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally<C: Category> {
    counts: Box<[usize]>,
    marker: PhantomData<C>,
}

impl<C: Category> Tally<C> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            counts: vec![0; C::ALL.len()].into_boxed_slice(),
            marker: PhantomData,
        }
    }

    pub fn increment(&mut self, key: C) {
        self.counts[key.ordinal()] += 1;
    }

    #[must_use]
    pub fn get(&self, key: C) -> usize {
        self.counts[key.ordinal()]
    }

    /// Sum over all keys.
    #[must_use]
    pub fn sum(&self) -> usize {
        self.counts.iter().sum()
    }

    /// `(key, count)` pairs in rank order, zeros included.
    pub fn iter(&self) -> impl Iterator<Item = (C, usize)> + '_ {
        C::ALL.iter().map(|&key| (key, self.get(key)))
    }
}

impl<C: Category> Default for Tally<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Category> Index<C> for Tally<C> {
    type Output = usize;

    fn index(&self, key: C) -> &usize {
        &self.counts[key.ordinal()]
    }
}

impl<C: Category> FromIterator<C> for Tally<C> {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        let mut tally = Self::new();
        for key in iter {
            tally.increment(key);
        }
        tally
    }
}

impl<C: Category> Serialize for Tally<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(C::ALL.len()))?;
        for (key, count) in self.iter() {
            map.serialize_entry(key.as_str(), &count)?;
        }
        map.end()
    }
}

/// Aggregate counts over a project's full issue list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total: usize,
    pub by_status: Tally<Status>,
    pub by_severity: Tally<Severity>,
    pub by_test_type: Tally<TestType>,
}

impl Summary {
    /// Single pass over `issues`.
    #[must_use]
    pub fn from_issues<'a, I>(issues: I) -> Self
    where
        I: IntoIterator<Item = &'a Issue>,
    {
        let mut summary = Self::default();
        for issue in issues {
            summary.total += 1;
            summary.by_status.increment(issue.status);
            summary.by_severity.increment(issue.severity);
            summary.by_test_type.increment(issue.test_type);
        }
        summary
    }
}

// ============================================================================
// Filters
// ============================================================================

/// Filter criteria for the issue table.
///
/// Dimensions combine with AND; values within one dimension combine with
/// OR. An empty list places no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    /// Case-insensitive substring over title, description and ID.
    #[serde(default)]
    pub search: String,
    #[serde(default, rename = "status")]
    pub statuses: Vec<Status>,
    #[serde(default, rename = "severity")]
    pub severities: Vec<Severity>,
    #[serde(default, rename = "priority")]
    pub priorities: Vec<Priority>,
    #[serde(default, rename = "testType")]
    pub test_types: Vec<TestType>,
}

impl FilterOptions {
    /// True when no dimension constrains anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
            && self.statuses.is_empty()
            && self.severities.is_empty()
            && self.priorities.is_empty()
            && self.test_types.is_empty()
    }

    /// Back to "no constraints".
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn matches(&self, issue: &Issue) -> bool {
        if !self.search.is_empty() && !matches_search(issue, &self.search.to_lowercase()) {
            return false;
        }
        if !self.statuses.is_empty() && !self.statuses.contains(&issue.status) {
            return false;
        }
        if !self.severities.is_empty() && !self.severities.contains(&issue.severity) {
            return false;
        }
        if !self.priorities.is_empty() && !self.priorities.contains(&issue.priority) {
            return false;
        }
        if !self.test_types.is_empty() && !self.test_types.contains(&issue.test_type) {
            return false;
        }
        true
    }
}

fn matches_search(issue: &Issue, needle_lower: &str) -> bool {
    issue.title.to_lowercase().contains(needle_lower)
        || issue
            .description
            .as_ref()
            .is_some_and(|d| d.to_lowercase().contains(needle_lower))
        || issue.id.to_lowercase().contains(needle_lower)
}

/// Test-type tab selector, independent of the multi-select filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tab {
    #[default]
    All,
    Only(TestType),
}

impl Tab {
    #[must_use]
    pub fn admits(self, issue: &Issue) -> bool {
        match self {
            Self::All => true,
            Self::Only(test_type) => issue.test_type == test_type,
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(test_type) => write!(f, "{test_type}"),
        }
    }
}

impl FromStr for Tab {
    type Err = SqaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        parse_category(s).map(Self::Only).ok_or_else(|| SqaError::InvalidValue {
            field: "tab",
            value: s.to_string(),
        })
    }
}

/// Issues admitted by both the tab and the filter criteria, in input order.
#[must_use]
pub fn filter_issues<'a>(issues: &'a [Issue], filters: &FilterOptions, tab: Tab) -> Vec<&'a Issue> {
    issues
        .iter()
        .filter(|issue| tab.admits(issue) && filters.matches(issue))
        .collect()
}

/// Filtered issue list plus summary over the unfiltered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedView<'a> {
    pub issues: Vec<&'a Issue>,
    pub summary: Summary,
}

/// Recompute both outputs from the current issues, filters and tab.
#[must_use]
pub fn derive_view<'a>(issues: &'a [Issue], filters: &FilterOptions, tab: Tab) -> DerivedView<'a> {
    DerivedView {
        issues: filter_issues(issues, filters, tab),
        summary: Summary::from_issues(issues),
    }
}

// ============================================================================
// Sorting
// ============================================================================

/// Column the issue table can be sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortField {
    Id,
    #[default]
    DateReported,
    Title,
    Severity,
    Priority,
    Status,
}

impl SortField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::DateReported => "date",
            Self::Title => "title",
            Self::Severity => "severity",
            Self::Priority => "priority",
            Self::Status => "status",
        }
    }

    fn compare(self, a: &Issue, b: &Issue) -> Ordering {
        match self {
            Self::Id => a.id.cmp(&b.id),
            Self::DateReported => a.date_reported.cmp(&b.date_reported),
            Self::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            Self::Severity => a.severity.cmp(&b.severity),
            Self::Priority => a.priority.cmp(&b.priority),
            Self::Status => a.status.cmp(&b.status),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = SqaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "id" => Ok(Self::Id),
            "date" | "date_reported" | "datereported" | "reported" => Ok(Self::DateReported),
            "title" | "issue_title" => Ok(Self::Title),
            "severity" => Ok(Self::Severity),
            "priority" => Ok(Self::Priority),
            "status" => Ok(Self::Status),
            _ => Err(SqaError::InvalidValue {
                field: "sort field",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Current table sort. Defaults to newest reports first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortState {
    #[must_use]
    pub const fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Header click: same field flips direction, another field starts ascending.
    pub fn toggle(&mut self, field: SortField) {
        if self.field == field {
            self.direction = self.direction.flipped();
        } else {
            self.field = field;
            self.direction = SortDirection::Ascending;
        }
    }

    pub fn apply(&self, issues: &mut [&Issue]) {
        sort_issues(issues, self.field, self.direction);
    }
}

/// Stable ascending sort; descending is its exact reverse.
pub fn sort_issues(issues: &mut [&Issue], field: SortField, direction: SortDirection) {
    issues.sort_by(|a, b| field.compare(a, b));
    if direction == SortDirection::Descending {
        issues.reverse();
    }
}

// ============================================================================
// Project overview
// ============================================================================

/// Per-project card on the projects overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectOverview {
    pub id: String,
    pub name: String,
    pub total: usize,
    pub by_status: Tally<Status>,
    /// Closed issues as a rounded percentage of all issues.
    pub completion_percent: u8,
}

impl ProjectOverview {
    #[must_use]
    pub fn from_project(project: &Project) -> Self {
        let by_status: Tally<Status> = project.issues.iter().map(|i| i.status).collect();
        let total = project.issues.len();
        Self {
            id: project.id.clone(),
            name: project.name.clone(),
            total,
            completion_percent: completion_percent(by_status.get(Status::Closed), total),
            by_status,
        }
    }
}

fn completion_percent(closed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let rounded = (closed * 100 + total / 2) / total;
    u8::try_from(rounded).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn issue(id: &str, title: &str) -> Issue {
        Issue {
            id: id.to_string(),
            title: title.to_string(),
            ..Default::default()
        }
    }

    fn dated(id: &str, y: i32, m: u32, d: u32) -> Issue {
        Issue {
            id: id.to_string(),
            title: id.to_string(),
            date_reported: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            ..Default::default()
        }
    }

    fn ids(issues: &[&Issue]) -> Vec<String> {
        issues.iter().map(|i| i.id.clone()).collect()
    }

    #[test]
    fn empty_filters_return_everything() {
        let issues = vec![issue("UI-001", "a"), issue("UI-002", "b")];
        let view = derive_view(&issues, &FilterOptions::default(), Tab::All);
        assert_eq!(view.issues.len(), 2);
        assert_eq!(view.summary.total, 2);
    }

    #[test]
    fn severity_scenario_counts() {
        let severities = [Severity::Critical, Severity::High, Severity::Critical];
        let issues: Vec<Issue> = severities
            .iter()
            .enumerate()
            .map(|(n, &severity)| Issue {
                id: format!("FUNC-00{}", n + 1),
                severity,
                ..Default::default()
            })
            .collect();

        let summary = Summary::from_issues(&issues);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.by_severity[Severity::Critical], 2);
        assert_eq!(summary.by_severity[Severity::High], 1);
        assert_eq!(summary.by_severity[Severity::Medium], 0);
        assert_eq!(summary.by_severity[Severity::Low], 0);
        assert_eq!(summary.by_status[Status::Open], 3);
        assert_eq!(summary.by_test_type.sum(), 3);
    }

    #[test]
    fn summary_ignores_filters() {
        let issues = vec![
            Issue {
                status: Status::Closed,
                ..issue("UI-001", "closed one")
            },
            issue("UI-002", "open one"),
        ];
        let filters = FilterOptions {
            statuses: vec![Status::Closed],
            ..Default::default()
        };
        let view = derive_view(&issues, &filters, Tab::All);
        assert_eq!(ids(&view.issues), vec!["UI-001"]);
        assert_eq!(view.summary.total, 2);
    }

    #[test]
    fn search_covers_title_description_and_id() {
        let issues = vec![
            issue("UI-001", "Login button misaligned"),
            Issue {
                description: Some("Checkout LOGIN redirect loops".to_string()),
                ..issue("FUNC-001", "Redirect bug")
            },
            issue("LOGIN-7", "unrelated"),
            issue("API-001", "Timeout"),
        ];
        let filters = FilterOptions {
            search: "login".to_string(),
            ..Default::default()
        };
        let found = filter_issues(&issues, &filters, Tab::All);
        assert_eq!(ids(&found), vec!["UI-001", "FUNC-001", "LOGIN-7"]);
    }

    #[test]
    fn dimensions_and_together_values_or_within() {
        let issues = vec![
            Issue {
                severity: Severity::Critical,
                status: Status::Open,
                ..issue("SEC-001", "a")
            },
            Issue {
                severity: Severity::High,
                status: Status::InProgress,
                ..issue("SEC-002", "b")
            },
            Issue {
                severity: Severity::Critical,
                status: Status::Closed,
                ..issue("SEC-003", "c")
            },
        ];
        let filters = FilterOptions {
            severities: vec![Severity::Critical, Severity::High],
            statuses: vec![Status::Open, Status::InProgress],
            ..Default::default()
        };
        let found = filter_issues(&issues, &filters, Tab::All);
        assert_eq!(ids(&found), vec!["SEC-001", "SEC-002"]);
    }

    #[test]
    fn tab_and_type_filter_both_apply() {
        let issues = vec![
            Issue {
                test_type: TestType::Api,
                ..issue("API-001", "a")
            },
            Issue {
                test_type: TestType::Ui,
                ..issue("UI-001", "b")
            },
        ];
        let filters = FilterOptions {
            test_types: vec![TestType::Ui],
            ..Default::default()
        };
        assert!(filter_issues(&issues, &filters, Tab::Only(TestType::Api)).is_empty());
        assert_eq!(
            ids(&filter_issues(&issues, &FilterOptions::default(), Tab::Only(TestType::Api))),
            vec!["API-001"]
        );
    }

    #[test]
    fn tab_parses_all_and_types() {
        assert_eq!("All".parse::<Tab>().unwrap(), Tab::All);
        assert_eq!("perf".parse::<Tab>().unwrap(), Tab::Only(TestType::Performance));
        assert!("nope".parse::<Tab>().is_err());
    }

    #[test]
    fn date_sort_is_chronological() {
        let issues = vec![
            dated("A", 2023, 10, 9),
            dated("B", 2023, 9, 30),
            dated("C", 2024, 1, 1),
        ];
        let mut refs: Vec<&Issue> = issues.iter().collect();
        sort_issues(&mut refs, SortField::DateReported, SortDirection::Ascending);
        assert_eq!(ids(&refs), vec!["B", "A", "C"]);
    }

    #[test]
    fn descending_is_exact_reverse_of_ascending() {
        let issues = vec![
            dated("A", 2023, 10, 1),
            dated("B", 2023, 10, 1),
            dated("C", 2023, 9, 1),
            dated("D", 2023, 10, 1),
        ];
        let mut asc: Vec<&Issue> = issues.iter().collect();
        sort_issues(&mut asc, SortField::DateReported, SortDirection::Ascending);
        let mut desc: Vec<&Issue> = issues.iter().collect();
        sort_issues(&mut desc, SortField::DateReported, SortDirection::Descending);

        let mut reversed = ids(&asc);
        reversed.reverse();
        assert_eq!(ids(&desc), reversed);
        assert_eq!(ids(&asc), vec!["C", "A", "B", "D"]);
    }

    #[test]
    fn severity_sorts_by_rank() {
        let issues = vec![
            Issue {
                severity: Severity::Low,
                ..issue("1", "x")
            },
            Issue {
                severity: Severity::Critical,
                ..issue("2", "x")
            },
            Issue {
                severity: Severity::Medium,
                ..issue("3", "x")
            },
        ];
        let mut refs: Vec<&Issue> = issues.iter().collect();
        sort_issues(&mut refs, SortField::Severity, SortDirection::Ascending);
        assert_eq!(ids(&refs), vec!["2", "3", "1"]);
    }

    #[test]
    fn toggle_flips_same_field_and_resets_other() {
        let mut state = SortState::default();
        assert_eq!(state.field, SortField::DateReported);
        assert_eq!(state.direction, SortDirection::Descending);

        state.toggle(SortField::DateReported);
        assert_eq!(state.direction, SortDirection::Ascending);

        state.toggle(SortField::Title);
        assert_eq!(state, SortState::new(SortField::Title, SortDirection::Ascending));

        state.toggle(SortField::Title);
        assert_eq!(state.direction, SortDirection::Descending);
    }

    #[test]
    fn sort_field_aliases() {
        assert_eq!("date_reported".parse::<SortField>().unwrap(), SortField::DateReported);
        assert_eq!("Title".parse::<SortField>().unwrap(), SortField::Title);
        assert!("color".parse::<SortField>().is_err());
    }

    #[test]
    fn tally_serializes_every_key() {
        let tally: Tally<Status> = [Status::Fixed].into_iter().collect();
        let json = serde_json::to_value(&tally).unwrap();
        assert_eq!(json["Open"], 0);
        assert_eq!(json["In Progress"], 0);
        assert_eq!(json["Fixed"], 1);
        assert_eq!(json["Closed"], 0);
    }

    #[test]
    fn completion_percent_rounds() {
        assert_eq!(completion_percent(0, 0), 0);
        assert_eq!(completion_percent(1, 3), 33);
        assert_eq!(completion_percent(2, 3), 67);
        assert_eq!(completion_percent(1, 2), 50);
        assert_eq!(completion_percent(4, 4), 100);
    }

    #[test]
    fn filter_options_reset() {
        let mut filters = FilterOptions {
            search: "x".to_string(),
            priorities: vec![Priority::P0],
            ..Default::default()
        };
        assert!(!filters.is_empty());
        filters.reset();
        assert!(filters.is_empty());
    }
}
