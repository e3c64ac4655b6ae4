//! Property tests for filtering, counting and sorting.

use chrono::NaiveDate;
use proptest::prelude::*;
use sqa_lib::{
    Category, FilterOptions, Issue, Priority, Severity, SortDirection, SortField, Status, Summary,
    Tab, TestType, filter_issues, sort_issues,
};

fn issue_strategy() -> impl Strategy<Value = Issue> {
    (
        0u32..1000,
        "[a-zA-Z ]{1,24}",
        proptest::option::of("[a-zA-Z ]{0,40}"),
        prop::sample::select(TestType::ALL),
        prop::sample::select(Severity::ALL),
        prop::sample::select(Priority::ALL),
        prop::sample::select(Status::ALL),
        0i64..365,
    )
        .prop_map(
            |(n, title, description, test_type, severity, priority, status, day)| {
                let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
                Issue {
                    id: format!("{}-{n:03}", test_type.id_prefix()),
                    title,
                    description,
                    reporter: "QA".to_string(),
                    page_screen: "Home".to_string(),
                    test_case: "TC-1".to_string(),
                    test_type,
                    severity,
                    priority,
                    status,
                    date_reported: base + chrono::Duration::days(day),
                    ..Default::default()
                }
            },
        )
}

fn sort_field_strategy() -> impl Strategy<Value = SortField> {
    prop::sample::select(vec![
        SortField::Id,
        SortField::DateReported,
        SortField::Title,
        SortField::Severity,
        SortField::Priority,
        SortField::Status,
    ])
}

fn searched(issue: &Issue, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    issue.title.to_lowercase().contains(&needle)
        || issue.id.to_lowercase().contains(&needle)
        || issue
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&needle))
}

proptest! {
    #[test]
    fn empty_filters_keep_everything(issues in prop::collection::vec(issue_strategy(), 0..30)) {
        let kept = filter_issues(&issues, &FilterOptions::default(), Tab::All);
        prop_assert_eq!(kept.len(), issues.len());
    }

    #[test]
    fn tallies_sum_to_total(issues in prop::collection::vec(issue_strategy(), 0..30)) {
        let summary = Summary::from_issues(&issues);
        prop_assert_eq!(summary.total, issues.len());
        prop_assert_eq!(summary.by_status.sum(), issues.len());
        prop_assert_eq!(summary.by_severity.sum(), issues.len());
        prop_assert_eq!(summary.by_test_type.sum(), issues.len());
    }

    #[test]
    fn search_is_sound_and_complete(
        issues in prop::collection::vec(issue_strategy(), 0..30),
        needle in "[a-zA-Z]{1,3}",
    ) {
        let filters = FilterOptions { search: needle.clone(), ..Default::default() };
        let kept = filter_issues(&issues, &filters, Tab::All);
        for issue in &kept {
            prop_assert!(searched(issue, &needle));
        }
        let expected = issues.iter().filter(|i| searched(i, &needle)).count();
        prop_assert_eq!(kept.len(), expected);
    }

    #[test]
    fn severity_filter_keeps_only_selected(
        issues in prop::collection::vec(issue_strategy(), 0..30),
        wanted in prop::sample::subsequence(Severity::ALL.to_vec(), 1..=4),
    ) {
        let filters = FilterOptions { severities: wanted.clone(), ..Default::default() };
        let kept = filter_issues(&issues, &filters, Tab::All);
        prop_assert!(kept.iter().all(|i| wanted.contains(&i.severity)));
        let expected = issues.iter().filter(|i| wanted.contains(&i.severity)).count();
        prop_assert_eq!(kept.len(), expected);
    }

    #[test]
    fn descending_reverses_ascending(
        issues in prop::collection::vec(issue_strategy(), 0..30),
        field in sort_field_strategy(),
    ) {
        let mut asc: Vec<&Issue> = issues.iter().collect();
        let mut desc = asc.clone();
        sort_issues(&mut asc, field, SortDirection::Ascending);
        sort_issues(&mut desc, field, SortDirection::Descending);
        desc.reverse();
        prop_assert_eq!(asc, desc);
    }
}
