//! Assertion helpers for `TestSession` integration tests.

use crate::classify::EcoTier;
use crate::session::NoticeLevel;

use super::TestSession;

const EPSILON: f64 = 1e-9;

impl TestSession {
    // -----------------------------------------------------------------------
    // Assertions
    // -----------------------------------------------------------------------

    pub fn assert_entry_count(&self, expected: usize) {
        let count = self.log().len();
        assert_eq!(count, expected, "Expected {expected} log entries, got {count}");
    }

    /// Assert today's total carbon, baselines included.
    pub fn assert_carbon_total(&self, expected_kg: f64) {
        let total = self.carbon().total_kg;
        assert!(
            (total - expected_kg).abs() < EPSILON,
            "Expected carbon total {expected_kg} kg, got {total}"
        );
    }

    pub fn assert_water_used(&self, expected_liters: f64) {
        let used = self.water().used_liters();
        assert!(
            (used - expected_liters).abs() < EPSILON,
            "Expected {expected_liters} L used, got {used}"
        );
    }

    pub fn assert_carbon_tier(&self, expected: EcoTier) {
        let tier = self.carbon().budget.tier;
        assert_eq!(
            tier, expected,
            "Expected carbon budget tier {expected:?}, got {tier:?} ({:.1}%)",
            self.carbon().budget.percent
        );
    }

    /// Assert the newest notice has `level` and contains `fragment`.
    pub fn assert_last_notice(&self, level: NoticeLevel, fragment: &str) {
        let Some(notice) = self.last_notice() else {
            panic!("Expected a {level:?} notice containing {fragment:?}, got none");
        };
        assert_eq!(
            notice.level, level,
            "Expected {level:?} notice, got {:?}: {}",
            notice.level, notice.text
        );
        assert!(
            notice.text.contains(fragment),
            "Expected notice containing {fragment:?}, got {:?}",
            notice.text
        );
    }

    pub fn assert_no_error_notices(&self) {
        let errors: Vec<&str> = self
            .notices()
            .iter()
            .filter(|n| n.level == NoticeLevel::Error)
            .map(|n| n.text.as_str())
            .collect();
        assert!(errors.is_empty(), "Unexpected error notices: {errors:?}");
    }
}
