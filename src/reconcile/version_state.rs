//! Per-gem freshness state derived from registry metadata
//!
//! A `VersionState` is built once from a dependency and the metadata fetched
//! for it, and never mutated afterwards. Classification and suggestion
//! compare version strings directly (exact equality and prefix matching);
//! they are deliberately not numeric comparisons, which affects ordering for
//! cases like "2.2.10" vs "2.2.1".

use crate::domain::{AgeBucket, Classification, Dependency};
use crate::registry::{RegistryMetadata, VersionRecord};
use chrono::{DateTime, Utc};
use std::fmt;

/// Immutable freshness state for one gem
pub struct VersionState<'a> {
    dependency: &'a Dependency,
    metadata: RegistryMetadata,
    prerelease: bool,
    available: Option<String>,
}

impl<'a> VersionState<'a> {
    /// Build the state for a dependency from fetched metadata
    pub fn new(dependency: &'a Dependency, metadata: RegistryMetadata) -> Self {
        // Gem convention: a letter anywhere in the version marks a prerelease
        let prerelease = dependency
            .locked
            .chars()
            .any(|c| c.is_ascii_alphabetic());

        // For prerelease gems the registry's "latest" is the latest stable,
        // which is the wrong yardstick; take the first prerelease entry of
        // the history instead, in whatever order the registry returned it.
        // Best-effort heuristic: history ordering is assumed, not verified.
        let available = if prerelease {
            metadata
                .history
                .iter()
                .find(|v| v.prerelease)
                .map(|v| v.number.clone())
        } else {
            Some(metadata.latest.clone())
        };

        Self {
            dependency,
            metadata,
            prerelease,
            available,
        }
    }

    /// The dependency this state describes
    pub fn dependency(&self) -> &Dependency {
        self.dependency
    }

    /// The version pinned in the lockfile
    pub fn locked(&self) -> &str {
        &self.dependency.locked
    }

    /// Whether the locked version is a prerelease
    pub fn is_prerelease(&self) -> bool {
        self.prerelease
    }

    /// Best version available according to the registry; absent when a
    /// prerelease gem has no prerelease entries in its history
    pub fn version_available(&self) -> Option<&str> {
        self.available.as_deref()
    }

    /// Classify the locked version against the available one
    ///
    /// Current iff the strings are equal; updatable iff the declared
    /// requirement admits the available version; obsolete otherwise,
    /// including when no available version could be determined.
    pub fn classify(&self) -> Classification {
        match self.available.as_deref() {
            Some(available) if available == self.dependency.locked => Classification::Current,
            Some(available) if self.dependency.requirement.matches(available) => {
                Classification::Updatable
            }
            _ => Classification::Obsolete,
        }
    }

    /// History record for an exact version string, if any
    pub fn version_data(&self, version: &str) -> Option<&VersionRecord> {
        self.metadata.history.iter().find(|v| v.number == version)
    }

    /// Build date for an exact version string, if the registry carries one
    pub fn release_date(&self, version: &str) -> Option<DateTime<Utc>> {
        self.version_data(version).and_then(|v| v.built_at)
    }

    /// Age bucket of the locked version relative to now
    pub fn build_age(&self) -> AgeBucket {
        self.build_age_at(Utc::now())
    }

    /// Age bucket of the locked version relative to a given instant
    pub fn build_age_at(&self, now: DateTime<Utc>) -> AgeBucket {
        let Some(built) = self.release_date(&self.dependency.locked) else {
            return AgeBucket::None;
        };
        let days = ((now - built).num_seconds() as f64 / 86_400.0).round() as i64;
        match days {
            d if d < 31 => AgeBucket::Month1,
            d if d < 182 => AgeBucket::Month6,
            d if d < 366 => AgeBucket::Year1,
            _ => AgeBucket::More,
        }
    }

    /// Best newer version within the locked version's branch
    ///
    /// With rails 3.0.8 locked and 3.1.0 current, the suggestion would be
    /// 3.0.10: the newest release sharing the "3.0" prefix. Returns None
    /// when the best branch match is the locked version itself or the
    /// available version, since those offer nothing extra.
    pub fn suggest(&self) -> Option<&str> {
        let locked = self.dependency.locked.as_str();
        let head = match locked.rfind('.') {
            Some(i) => &locked[..i],
            None => "",
        };

        // Newest first; entries without a build date sort as oldest
        let mut by_date: Vec<&VersionRecord> = self.metadata.history.iter().collect();
        by_date.sort_by(|a, b| b.built_at.cmp(&a.built_at));

        let found = by_date
            .iter()
            .find(|v| v.number.starts_with(head))
            .map(|v| v.number.as_str());
        match found {
            Some(v) if v == locked => None,
            Some(v) if Some(v) == self.available.as_deref() => None,
            other => other,
        }
    }
}

impl fmt::Display for VersionState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.prerelease { "*" } else { "" };
        write!(f, "{}{}", self.dependency, marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Requirement;
    use chrono::TimeZone;

    fn dep(name: &str, requirement: &str, locked: &str) -> Dependency {
        Dependency::new(
            name,
            Requirement::parse(requirement).unwrap(),
            locked,
            vec!["https://rubygems.org".to_string()],
        )
    }

    fn record(number: &str, built_at: Option<DateTime<Utc>>, prerelease: bool) -> VersionRecord {
        VersionRecord::new(number, built_at, prerelease)
    }

    fn day(n: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::days(n as i64)
    }

    fn metadata(latest: &str, history: Vec<VersionRecord>) -> RegistryMetadata {
        RegistryMetadata {
            latest: latest.to_string(),
            history,
        }
    }

    // Classification

    #[test]
    fn test_classify_current() {
        let dependency = dep("bar", ">= 0", "2.0.0");
        let state = VersionState::new(&dependency, metadata("2.0.0", Vec::new()));
        assert_eq!(state.classify(), Classification::Current);
    }

    #[test]
    fn test_classify_updatable_within_requirement() {
        let dependency = dep("foo", "~> 1.0.0", "1.0.0");
        let state = VersionState::new(&dependency, metadata("1.0.2", Vec::new()));
        assert_eq!(state.classify(), Classification::Updatable);
    }

    #[test]
    fn test_classify_obsolete_outside_requirement() {
        let dependency = dep("baz", "~> 1.0.0", "1.0.0");
        let state = VersionState::new(&dependency, metadata("3.0.0", Vec::new()));
        assert_eq!(state.classify(), Classification::Obsolete);
    }

    #[test]
    fn test_classify_is_exact_string_equality() {
        // "1.0" and "1.0.0" are the same version numerically but not as
        // strings; classification compares strings
        let dependency = dep("foo", ">= 0", "1.0");
        let state = VersionState::new(&dependency, metadata("1.0.0", Vec::new()));
        assert_ne!(state.classify(), Classification::Current);
    }

    #[test]
    fn test_classify_idempotent() {
        let dependency = dep("foo", "~> 1.0.0", "1.0.0");
        let state = VersionState::new(&dependency, metadata("1.0.2", Vec::new()));
        assert_eq!(state.classify(), state.classify());
    }

    // Prerelease handling

    #[test]
    fn test_prerelease_detection() {
        let stable = dep("rails", ">= 0", "7.0.4");
        let pre = dep("rails", ">= 0", "7.1.0.beta1");
        assert!(!VersionState::new(&stable, metadata("7.0.4", Vec::new())).is_prerelease());
        assert!(VersionState::new(&pre, metadata("7.0.4", Vec::new())).is_prerelease());
    }

    #[test]
    fn test_prerelease_available_is_first_prerelease_entry() {
        let dependency = dep("rails", ">= 0", "7.1.0.beta1");
        let history = vec![
            record("7.0.4", None, false),
            record("7.1.0.beta2", None, true),
            record("7.1.0.beta1", None, true),
        ];
        let state = VersionState::new(&dependency, metadata("7.0.4", history));
        assert_eq!(state.version_available(), Some("7.1.0.beta2"));
        assert_eq!(state.classify(), Classification::Updatable);
    }

    #[test]
    fn test_prerelease_with_no_prerelease_history_is_obsolete() {
        let dependency = dep("rails", ">= 0", "7.1.0.beta1");
        let history = vec![record("7.0.4", None, false)];
        let state = VersionState::new(&dependency, metadata("7.0.4", history));
        assert!(state.version_available().is_none());
        assert_eq!(state.classify(), Classification::Obsolete);
    }

    #[test]
    fn test_display_marks_prereleases() {
        let stable = dep("rails", ">= 0", "7.0.4");
        let pre = dep("sidekiq", ">= 0", "8.0.0.rc1");
        assert_eq!(
            VersionState::new(&stable, metadata("7.0.4", Vec::new())).to_string(),
            "rails (7.0.4)"
        );
        assert_eq!(
            VersionState::new(&pre, metadata("7.2.4", vec![record("8.0.0.rc1", None, true)]))
                .to_string(),
            "sidekiq (8.0.0.rc1)*"
        );
    }

    // Age buckets

    #[test]
    fn test_build_age_buckets() {
        let dependency = dep("foo", ">= 0", "1.0.0");
        let built = day(0);
        let history = vec![record("1.0.0", Some(built), false)];
        let state = VersionState::new(&dependency, metadata("1.0.0", history));

        assert_eq!(state.build_age_at(built + chrono::Duration::days(5)), AgeBucket::Month1);
        assert_eq!(state.build_age_at(built + chrono::Duration::days(100)), AgeBucket::Month6);
        assert_eq!(state.build_age_at(built + chrono::Duration::days(200)), AgeBucket::Year1);
        assert_eq!(state.build_age_at(built + chrono::Duration::days(400)), AgeBucket::More);
    }

    #[test]
    fn test_build_age_boundaries_are_exclusive() {
        let dependency = dep("foo", ">= 0", "1.0.0");
        let built = day(0);
        let history = vec![record("1.0.0", Some(built), false)];
        let state = VersionState::new(&dependency, metadata("1.0.0", history));

        // Exactly 31 days is outside the one-month bucket, and so on up
        assert_eq!(state.build_age_at(built + chrono::Duration::days(31)), AgeBucket::Month6);
        assert_eq!(state.build_age_at(built + chrono::Duration::days(182)), AgeBucket::Year1);
        assert_eq!(state.build_age_at(built + chrono::Duration::days(366)), AgeBucket::More);
        assert_eq!(state.build_age_at(built + chrono::Duration::days(30)), AgeBucket::Month1);
    }

    #[test]
    fn test_build_age_rounds_to_nearest_day() {
        let dependency = dep("foo", ">= 0", "1.0.0");
        let built = day(0);
        let history = vec![record("1.0.0", Some(built), false)];
        let state = VersionState::new(&dependency, metadata("1.0.0", history));

        // 30 days and 20 hours rounds up to 31
        let now = built + chrono::Duration::days(30) + chrono::Duration::hours(20);
        assert_eq!(state.build_age_at(now), AgeBucket::Month6);
        // 30 days and 2 hours rounds down to 30
        let now = built + chrono::Duration::days(30) + chrono::Duration::hours(2);
        assert_eq!(state.build_age_at(now), AgeBucket::Month1);
    }

    #[test]
    fn test_build_age_unknown_without_record() {
        let dependency = dep("foo", ">= 0", "1.0.0");
        let state = VersionState::new(&dependency, metadata("1.0.0", Vec::new()));
        assert_eq!(state.build_age(), AgeBucket::None);

        let history = vec![record("1.0.0", None, false)];
        let state = VersionState::new(&dependency, metadata("1.0.0", history));
        assert_eq!(state.build_age(), AgeBucket::None);
    }

    // Lookups

    #[test]
    fn test_version_data_empty_history() {
        let dependency = dep("foo", ">= 0", "1.0.0");
        let state = VersionState::new(&dependency, metadata("1.0.0", Vec::new()));
        assert!(state.version_data("1.0.0").is_none());
        assert!(state.release_date("1.0.0").is_none());
    }

    #[test]
    fn test_version_data_exact_match() {
        let dependency = dep("foo", ">= 0", "1.0.0");
        let history = vec![
            record("1.0.0", Some(day(1)), false),
            record("1.0.1", Some(day(2)), false),
        ];
        let state = VersionState::new(&dependency, metadata("1.0.1", history));
        assert_eq!(state.release_date("1.0.1"), Some(day(2)));
        assert!(state.version_data("1.0.10").is_none());
    }

    // Suggestions

    #[test]
    fn test_suggest_same_branch_patch() {
        let dependency = dep("rails", "~> 3.0.0", "3.0.8");
        let history = vec![
            record("3.1.0", Some(day(30)), false),
            record("3.0.10", Some(day(20)), false),
            record("3.0.9", Some(day(10)), false),
            record("3.0.8", Some(day(5)), false),
        ];
        let state = VersionState::new(&dependency, metadata("3.1.0", history));
        assert_eq!(state.suggest(), Some("3.0.10"));
    }

    #[test]
    fn test_suggest_none_when_best_is_locked() {
        let dependency = dep("rails", "~> 3.0.0", "3.0.10");
        let history = vec![
            record("3.0.10", Some(day(20)), false),
            record("3.0.9", Some(day(10)), false),
        ];
        let state = VersionState::new(&dependency, metadata("3.1.0", history));
        assert!(state.suggest().is_none());
    }

    #[test]
    fn test_suggest_none_when_match_is_available() {
        // Latest lives in the same branch as the locked version
        let dependency = dep("rack", "~> 2.2", "2.2.4");
        let history = vec![
            record("2.2.6", Some(day(20)), false),
            record("2.2.4", Some(day(10)), false),
        ];
        let state = VersionState::new(&dependency, metadata("2.2.6", history));
        assert!(state.suggest().is_none());
    }

    #[test]
    fn test_suggest_string_prefix_semantics() {
        // "1.0" is a string prefix of "1.0.2" and also of "1.01.0"; prefix
        // matching is the contract, numeric branch math is not
        let dependency = dep("baz", "~> 1.0.0", "1.0.0");
        let history = vec![
            record("3.0.0", Some(day(30)), false),
            record("1.0.2", Some(day(20)), false),
            record("1.0.1", Some(day(10)), false),
        ];
        let state = VersionState::new(&dependency, metadata("3.0.0", history));
        assert_eq!(state.suggest(), Some("1.0.2"));
    }

    #[test]
    fn test_suggest_missing_dates_sort_oldest() {
        let dependency = dep("foo", ">= 0", "2.1.0");
        let history = vec![
            record("2.1.9", None, false),
            record("2.1.5", Some(day(10)), false),
        ];
        let state = VersionState::new(&dependency, metadata("3.0.0", history));
        // 2.1.5 has a date, 2.1.9 does not; the dated one wins
        assert_eq!(state.suggest(), Some("2.1.5"));
    }

    #[test]
    fn test_suggest_empty_history() {
        let dependency = dep("foo", ">= 0", "1.0.0");
        let state = VersionState::new(&dependency, metadata("2.0.0", Vec::new()));
        assert!(state.suggest().is_none());
    }

    #[test]
    fn test_suggest_undotted_version_matches_anything() {
        // With no dot the head is empty and every entry shares the prefix;
        // the newest overall wins unless it is the locked or available one
        let dependency = dep("foo", ">= 0", "2");
        let history = vec![
            record("3", Some(day(30)), false),
            record("2", Some(day(10)), false),
        ];
        let state = VersionState::new(&dependency, metadata("4", history));
        assert_eq!(state.suggest(), Some("3"));
    }
}
