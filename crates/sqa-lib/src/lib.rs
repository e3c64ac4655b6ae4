//! `sqa-lib` - software quality assurance issue tracking.
//!
//! Projects own ordered lists of testing issues. The [`ProjectRegistry`]
//! holds every project plus the active selection and writes through to a
//! [`KeyValueStore`]. [`derive_view`] turns an issue list, filter criteria and
//! a tab into the visible rows plus summary counts.
//!
//! # Quick Start
//!
//! ```no_run
//! use sqa_lib::{FileStore, FilterOptions, Issue, NewProject, ProjectRegistry, Tab, TestType};
//!
//! let mut registry = ProjectRegistry::open(FileStore::new(".sqa/store.json"));
//! registry.add_project(NewProject::named("Alpha")).unwrap();
//!
//! let issue = registry
//!     .add_issue(Issue {
//!         title: "Login button misaligned".into(),
//!         reporter: "QA Team".into(),
//!         page_screen: "Login".into(),
//!         test_case: "TC-001".into(),
//!         test_type: TestType::Ui,
//!         ..Default::default()
//!     })
//!     .unwrap();
//! assert_eq!(issue.id, "UI-001");
//!
//! let project = registry.active_project().unwrap();
//! let view = sqa_lib::derive_view(&project.issues, &FilterOptions::default(), Tab::All);
//! println!("{} of {} issues shown", view.issues.len(), view.summary.total);
//! ```

pub mod error;
pub mod export;
pub mod kv;
pub mod model;
pub mod registry;
pub mod seed;
pub mod util;
pub mod validation;
pub mod view;

pub use error::{Result, SqaError, ValidationError};
pub use export::{ExportFormat, export};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use model::{
    Category, Issue, NewProject, Priority, Project, ProjectStatus, ProjectType, Severity, Status,
    TestType,
};
pub use registry::ProjectRegistry;
pub use view::{
    DerivedView, FilterOptions, ProjectOverview, SortDirection, SortField, SortState, Summary, Tab,
    Tally, derive_view, filter_issues, sort_issues,
};
