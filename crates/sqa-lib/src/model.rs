//! Core data types for sqa-lib.
//!
//! Field names and enumeration labels serialize exactly as the persisted
//! store layout expects (`issueTitle`, `"In Progress"`, `"Web App"`, ...).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SqaError;

/// A closed enumeration used as a filter dimension and as a summary key.
pub trait Category: Copy + Eq + fmt::Debug + 'static {
    /// Every value, in rank order.
    const ALL: &'static [Self];

    /// Name used in errors for values that fail to parse.
    const FIELD: &'static str;

    /// Display label (also the persisted form).
    fn as_str(self) -> &'static str;

    /// Dense position in `ALL`.
    fn ordinal(self) -> usize;

    /// Extra spellings accepted by `parse_category`.
    fn aliases(self) -> &'static [&'static str] {
        &[]
    }
}

fn normalize_label(s: &str) -> String {
    s.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Parse a category leniently: case, spaces, `_` and `-` are ignored.
#[must_use]
pub fn parse_category<C: Category>(input: &str) -> Option<C> {
    let wanted = normalize_label(input);
    if wanted.is_empty() {
        return None;
    }
    C::ALL.iter().copied().find(|value| {
        normalize_label(value.as_str()) == wanted
            || value.aliases().iter().any(|a| normalize_label(a) == wanted)
    })
}

fn parse_or_err<C: Category>(input: &str) -> Result<C, SqaError> {
    parse_category(input).ok_or_else(|| SqaError::InvalidValue {
        field: C::FIELD,
        value: input.to_string(),
    })
}

/// Testing discipline an issue was found under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum TestType {
    #[default]
    #[serde(rename = "UI Testing")]
    Ui,
    #[serde(rename = "Functional Testing")]
    Functional,
    #[serde(rename = "Smoke Testing")]
    Smoke,
    #[serde(rename = "Integration Testing")]
    Integration,
    #[serde(rename = "API Testing")]
    Api,
    #[serde(rename = "Performance Testing")]
    Performance,
    #[serde(rename = "Security Testing")]
    Security,
    #[serde(rename = "Regression Testing")]
    Regression,
}

impl TestType {
    /// Prefix used by the sequential issue ID scheme.
    #[must_use]
    pub const fn id_prefix(self) -> &'static str {
        match self {
            Self::Ui => "UI",
            Self::Functional => "FUNC",
            Self::Smoke => "SMK",
            Self::Integration => "INT",
            Self::Api => "API",
            Self::Performance => "PERF",
            Self::Security => "SEC",
            Self::Regression => "REG",
        }
    }
}

impl Category for TestType {
    const ALL: &'static [Self] = &[
        Self::Ui,
        Self::Functional,
        Self::Smoke,
        Self::Integration,
        Self::Api,
        Self::Performance,
        Self::Security,
        Self::Regression,
    ];
    const FIELD: &'static str = "test type";

    fn as_str(self) -> &'static str {
        match self {
            Self::Ui => "UI Testing",
            Self::Functional => "Functional Testing",
            Self::Smoke => "Smoke Testing",
            Self::Integration => "Integration Testing",
            Self::Api => "API Testing",
            Self::Performance => "Performance Testing",
            Self::Security => "Security Testing",
            Self::Regression => "Regression Testing",
        }
    }

    fn ordinal(self) -> usize {
        self as usize
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Ui => &["ui"],
            Self::Functional => &["func", "functional"],
            Self::Smoke => &["smk", "smoke"],
            Self::Integration => &["int", "integration"],
            Self::Api => &["api"],
            Self::Performance => &["perf", "performance"],
            Self::Security => &["sec", "security"],
            Self::Regression => &["reg", "regression"],
        }
    }
}

/// Issue severity, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Severity {
    Critical,
    High,
    #[default]
    Medium,
    Low,
}

impl Category for Severity {
    const ALL: &'static [Self] = &[Self::Critical, Self::High, Self::Medium, Self::Low];
    const FIELD: &'static str = "severity";

    fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    fn ordinal(self) -> usize {
        self as usize
    }
}

/// Issue priority (P0 = most urgent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Priority {
    P0,
    P1,
    #[default]
    P2,
    P3,
}

impl Category for Priority {
    const ALL: &'static [Self] = &[Self::P0, Self::P1, Self::P2, Self::P3];
    const FIELD: &'static str = "priority";

    fn as_str(self) -> &'static str {
        match self {
            Self::P0 => "P0",
            Self::P1 => "P1",
            Self::P2 => "P2",
            Self::P3 => "P3",
        }
    }

    fn ordinal(self) -> usize {
        self as usize
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::P0 => &["0"],
            Self::P1 => &["1"],
            Self::P2 => &["2"],
            Self::P3 => &["3"],
        }
    }
}

/// Issue workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Status {
    #[default]
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Fixed,
    Closed,
}

impl Category for Status {
    const ALL: &'static [Self] = &[Self::Open, Self::InProgress, Self::Fixed, Self::Closed];
    const FIELD: &'static str = "status";

    fn as_str(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Fixed => "Fixed",
            Self::Closed => "Closed",
        }
    }

    fn ordinal(self) -> usize {
        self as usize
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::InProgress => &["wip"],
            _ => &[],
        }
    }
}

/// Project lifecycle state. Archival is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum ProjectStatus {
    #[default]
    Active,
    Archived,
}

impl Category for ProjectStatus {
    const ALL: &'static [Self] = &[Self::Active, Self::Archived];
    const FIELD: &'static str = "project status";

    fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Archived => "Archived",
        }
    }

    fn ordinal(self) -> usize {
        self as usize
    }
}

/// Kind of software a project delivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum ProjectType {
    #[default]
    #[serde(rename = "Web App")]
    WebApp,
    #[serde(rename = "Mobile App")]
    MobileApp,
    #[serde(rename = "API")]
    Api,
    Desktop,
}

impl Category for ProjectType {
    const ALL: &'static [Self] = &[Self::WebApp, Self::MobileApp, Self::Api, Self::Desktop];
    const FIELD: &'static str = "project type";

    fn as_str(self) -> &'static str {
        match self {
            Self::WebApp => "Web App",
            Self::MobileApp => "Mobile App",
            Self::Api => "API",
            Self::Desktop => "Desktop",
        }
    }

    fn ordinal(self) -> usize {
        self as usize
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::WebApp => &["web"],
            Self::MobileApp => &["mobile"],
            Self::Api | Self::Desktop => &[],
        }
    }
}

macro_rules! category_text_impls {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl FromStr for $ty {
                type Err = SqaError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    parse_or_err(s)
                }
            }
        )+
    };
}

category_text_impls!(TestType, Severity, Priority, Status, ProjectStatus, ProjectType);

/// Serde adapter for optional values persisted as `""` when absent.
///
/// Blank strings read back become `None`.
mod blank {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::fmt::Display;
    use std::str::FromStr;

    #[allow(clippy::ref_option)]
    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        match value {
            Some(v) => serializer.collect_str(v),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            Some(s) if !s.trim().is_empty() => s
                .trim()
                .parse()
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}

/// A reported testing defect.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Identifier such as `API-001`. Empty on drafts.
    pub id: String,

    /// Owning project (lookup only).
    #[serde(default)]
    pub project_id: String,

    pub test_type: TestType,

    pub date_reported: NaiveDate,

    pub reporter: String,

    pub page_screen: String,

    pub test_case: String,

    #[serde(rename = "issueTitle")]
    pub title: String,

    #[serde(rename = "issueDescription", default, with = "blank")]
    pub description: Option<String>,

    #[serde(default, with = "blank")]
    pub steps_to_reproduce: Option<String>,

    #[serde(default, with = "blank")]
    pub expected_behavior: Option<String>,

    #[serde(default, with = "blank")]
    pub actual_behavior: Option<String>,

    #[serde(default)]
    pub severity: Severity,

    #[serde(default)]
    pub priority: Priority,

    #[serde(default)]
    pub status: Status,

    #[serde(default, with = "blank")]
    pub browser_device: Option<String>,

    #[serde(default, with = "blank")]
    pub screenshot_url: Option<String>,

    #[serde(default, with = "blank")]
    pub assigned_to: Option<String>,

    #[serde(default, with = "blank")]
    pub date_fixed: Option<NaiveDate>,

    #[serde(default, with = "blank")]
    pub comments: Option<String>,
}

impl Default for Issue {
    fn default() -> Self {
        Self {
            id: String::new(),
            project_id: String::new(),
            test_type: TestType::default(),
            date_reported: crate::util::today(),
            reporter: String::new(),
            page_screen: String::new(),
            test_case: String::new(),
            title: String::new(),
            description: None,
            steps_to_reproduce: None,
            expected_behavior: None,
            actual_behavior: None,
            severity: Severity::default(),
            priority: Priority::default(),
            status: Status::default(),
            browser_device: None,
            screenshot_url: None,
            assigned_to: None,
            date_fixed: None,
            comments: None,
        }
    }
}

/// A named container owning an ordered list of issues.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub created_date: NaiveDate,

    #[serde(default = "default_team_size")]
    pub team_size: u32,

    #[serde(default)]
    pub status: ProjectStatus,

    #[serde(rename = "type", default)]
    pub project_type: ProjectType,

    /// Insertion order is creation order.
    #[serde(default)]
    pub issues: Vec<Issue>,
}

const fn default_team_size() -> u32 {
    1
}

impl Project {
    #[must_use]
    pub fn is_archived(&self) -> bool {
        self.status == ProjectStatus::Archived
    }

    #[must_use]
    pub fn issue(&self, id: &str) -> Option<&Issue> {
        self.issues.iter().find(|issue| issue.id == id)
    }
}

/// Input for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
    pub team_size: u32,
    pub project_type: ProjectType,
}

impl NewProject {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl Default for NewProject {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            team_size: default_team_size(),
            project_type: ProjectType::default(),
        }
    }
}
