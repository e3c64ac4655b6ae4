//! ID generation and date helpers.

use std::collections::HashSet;

use chrono::{DateTime, Local, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};

use crate::model::{Issue, TestType};

/// Prefix for opaque project IDs.
pub const PROJECT_ID_PREFIX: &str = "prj";

#[allow(clippy::expect_used)]
static SEQUENTIAL_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z]+)-(\d+)$").expect("sequential id pattern is valid"));

/// Hash characters in an opaque project ID.
const PROJECT_HASH_LENGTH: usize = 8;

/// Today's calendar date in local time.
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

// ============================================================================
// Issue IDs
// ============================================================================

/// Split a `PREFIX-NNN` style ID into prefix and sequence number.
fn split_sequential(id: &str) -> Option<(&str, u32)> {
    let captures = SEQUENTIAL_ID.captures(id)?;
    let prefix = captures.get(1)?.as_str();
    let number = captures.get(2)?.as_str().parse().ok()?;
    Some((prefix, number))
}

/// Sequence number of a `PREFIX-NNN` style ID, if it has that shape.
#[must_use]
pub fn sequence_number(id: &str) -> Option<u32> {
    split_sequential(id).map(|(_, number)| number)
}

/// Next type-scoped issue ID: `{PREFIX}-{N:03}`.
///
/// `N` is one past the highest sequence number among `existing` IDs that
/// carry the test type's prefix, whatever type those issues have now. The
/// result never equals an ID in `existing`.
#[must_use]
pub fn next_issue_id<'a, I>(test_type: TestType, existing: I) -> String
where
    I: IntoIterator<Item = &'a Issue>,
{
    let prefix = test_type.id_prefix();
    let taken: HashSet<&str> = existing.into_iter().map(|issue| issue.id.as_str()).collect();

    let highest = taken
        .iter()
        .filter_map(|id| split_sequential(id))
        .filter(|(p, _)| *p == prefix)
        .map(|(_, number)| number)
        .max()
        .unwrap_or(0);

    let mut number = highest.saturating_add(1);
    loop {
        let candidate = format!("{prefix}-{number:03}");
        if !taken.contains(candidate.as_str()) || number == u32::MAX {
            return candidate;
        }
        number += 1;
    }
}

// ============================================================================
// Project IDs
// ============================================================================

/// Generate an opaque project ID (`prj-<base36>`).
///
/// The hash covers name, description, creation time and a nonce; the nonce
/// is bumped until `exists` rejects no more.
#[must_use]
pub fn generate_project_id<F>(
    name: &str,
    description: Option<&str>,
    created_at: DateTime<Utc>,
    exists: F,
) -> String
where
    F: Fn(&str) -> bool,
{
    let mut nonce = 0u32;
    loop {
        let seed = generate_id_seed(name, description, created_at, nonce);
        let id = format!(
            "{PROJECT_ID_PREFIX}-{}",
            compute_id_hash(&seed, PROJECT_HASH_LENGTH)
        );
        if !exists(&id) || nonce == u32::MAX {
            return id;
        }
        nonce += 1;
    }
}

fn generate_id_seed(
    name: &str,
    description: Option<&str>,
    created_at: DateTime<Utc>,
    nonce: u32,
) -> String {
    format!(
        "{}|{}|{}|{}",
        name,
        description.unwrap_or(""),
        created_at.timestamp_nanos_opt().unwrap_or(0),
        nonce
    )
}

fn compute_id_hash(input: &str, length: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let result = hasher.finalize();

    let mut num = 0u64;
    for &byte in result.iter().take(8) {
        num = (num << 8) | u64::from(byte);
    }

    let mut encoded = base36_encode(num);
    if encoded.len() < length {
        encoded = format!("{encoded:0>length$}");
    }
    encoded.chars().take(length).collect()
}

fn base36_encode(mut num: u64) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if num == 0 {
        return "0".to_string();
    }
    let mut chars = Vec::new();
    while num > 0 {
        chars.push(ALPHABET[(num % 36) as usize] as char);
        num /= 36;
    }
    chars.into_iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(id: &str, test_type: TestType) -> Issue {
        Issue {
            id: id.to_string(),
            test_type,
            ..Default::default()
        }
    }

    #[test]
    fn first_issue_of_type_is_001() {
        let existing = vec![issue("UI-004", TestType::Ui)];
        assert_eq!(next_issue_id(TestType::Api, &existing), "API-001");
    }

    #[test]
    fn next_id_follows_highest_of_same_type() {
        let existing = vec![
            issue("API-001", TestType::Api),
            issue("API-007", TestType::Api),
            issue("UI-042", TestType::Ui),
        ];
        assert_eq!(next_issue_id(TestType::Api, &existing), "API-008");
        assert_eq!(next_issue_id(TestType::Ui, &existing), "UI-043");
    }

    #[test]
    fn non_sequential_ids_are_ignored() {
        let existing = vec![
            issue("3f2a9c1e-opaque", TestType::Smoke),
            issue("smk-12", TestType::Smoke),
        ];
        assert_eq!(next_issue_id(TestType::Smoke, &existing), "SMK-001");
    }

    #[test]
    fn numbers_past_padding_width_keep_counting() {
        let existing = vec![issue("REG-999", TestType::Regression)];
        assert_eq!(next_issue_id(TestType::Regression, &existing), "REG-1000");
        assert_eq!(sequence_number("REG-1000"), Some(1000));
    }

    #[test]
    fn project_id_format() {
        let id = generate_project_id("Alpha", None, Utc::now(), |_| false);
        assert!(id.starts_with("prj-"));
        assert_eq!(id.len(), "prj-".len() + PROJECT_HASH_LENGTH);
    }

    #[test]
    fn project_id_collision_handling() {
        let mut generated = HashSet::new();
        let now = Utc::now();
        let id1 = generate_project_id("Alpha", None, now, |id| generated.contains(id));
        generated.insert(id1.clone());
        let id2 = generate_project_id("Alpha", None, now, |id| generated.contains(id));
        assert_ne!(id1, id2);
    }

    #[test]
    fn project_id_retries_past_many_collisions() {
        let now = Utc::now();
        let mut generated = HashSet::new();
        for _ in 0..50 {
            let id = generate_project_id("Alpha", None, now, |id| generated.contains(id));
            assert!(generated.insert(id));
        }
    }

    #[test]
    fn retyped_issue_still_reserves_its_number() {
        // API-001 was later changed to UI Testing
        let existing = vec![issue("API-001", TestType::Ui)];
        assert_eq!(next_issue_id(TestType::Api, &existing), "API-002");
    }

    #[test]
    fn explicit_id_under_other_type_is_skipped() {
        let existing = vec![issue("API-001", TestType::Ui), issue("UI-001", TestType::Ui)];
        assert_eq!(next_issue_id(TestType::Api, &existing), "API-002");
        assert_eq!(next_issue_id(TestType::Ui, &existing), "UI-002");
    }
}
