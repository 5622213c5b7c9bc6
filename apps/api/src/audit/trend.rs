//! Week-over-week deltas for the weekly report.
//!
//! Only differences are computed here, never tiers. When any previous value
//! is zero, ratios are undefined and `ratios_suppressed` tells every renderer
//! downstream to leave out percentages and multipliers entirely.

use serde::Serialize;

/// Unit suffixes per metric.
pub const VISITS_UNIT: &str = "人";
pub const CLICKS_UNIT: &str = "回";
pub const APPLICATIONS_UNIT: &str = "件";

/// Signed difference rendering: `±0`, `+N`, `-N`.
pub fn format_delta(current: u32, previous: u32) -> String {
    let diff = i64::from(current) - i64::from(previous);
    match diff {
        0 => "±0".to_string(),
        d if d > 0 => format!("+{d}"),
        d => format!("{d}"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Delta {
    pub current: u32,
    pub previous: u32,
}

impl Delta {
    pub fn new(current: u32, previous: u32) -> Self {
        Self { current, previous }
    }

    pub fn difference(&self) -> i64 {
        i64::from(self.current) - i64::from(self.previous)
    }

    pub fn previous_is_zero(&self) -> bool {
        self.previous == 0
    }

    /// `"+5人"`, `"±0回"`, ...
    pub fn render(&self, unit: &str) -> String {
        format!("{}{unit}", format_delta(self.current, self.previous))
    }

    /// Whole-percent change versus the previous value; `None` when previous is zero.
    pub fn percent_change(&self) -> Option<i64> {
        if self.previous_is_zero() {
            return None;
        }
        let prev = i64::from(self.previous);
        let scaled = self.difference() * 100;
        // round half away from zero
        let rounded = if scaled >= 0 {
            (scaled + prev / 2) / prev
        } else {
            (scaled - prev / 2) / prev
        };
        Some(rounded)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendDeltas {
    pub visits: Delta,
    pub clicks: Delta,
    pub applications: Option<u32>,
    /// True when any previous value is zero.
    pub ratios_suppressed: bool,
}

pub fn classify_with_trend(
    visits_current: u32,
    clicks_current: u32,
    visits_previous: u32,
    clicks_previous: u32,
    applications: Option<u32>,
) -> TrendDeltas {
    let visits = Delta::new(visits_current, visits_previous);
    let clicks = Delta::new(clicks_current, clicks_previous);
    TrendDeltas {
        ratios_suppressed: visits.previous_is_zero() || clicks.previous_is_zero(),
        visits,
        clicks,
        applications,
    }
}

/// Minimum click increase that counts as success next week.
///
/// 0–2 clicks: +1 or more. 3–9: +2 or more. 10 and up: +10% of this week,
/// rounded up to a whole click.
pub fn success_threshold(clicks_current: u32, ratios_suppressed: bool) -> String {
    match clicks_current {
        0..=2 => format!("+1{CLICKS_UNIT}以上"),
        3..=9 => format!("+2{CLICKS_UNIT}以上"),
        c => {
            let needed = c.div_ceil(10);
            if ratios_suppressed {
                format!("+{needed}{CLICKS_UNIT}以上")
            } else {
                format!("+{needed}{CLICKS_UNIT}以上（今週比+10%）")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_delta_signs() {
        assert_eq!(format_delta(10, 10), "±0");
        assert_eq!(format_delta(15, 10), "+5");
        assert_eq!(format_delta(7, 10), "-3");
        assert_eq!(format_delta(0, u32::MAX), format!("-{}", u32::MAX));
    }

    #[test]
    fn test_delta_render_appends_unit() {
        assert_eq!(Delta::new(15, 10).render(VISITS_UNIT), "+5人");
        assert_eq!(Delta::new(3, 3).render(CLICKS_UNIT), "±0回");
        assert_eq!(Delta::new(1, 4).render(CLICKS_UNIT), "-3回");
    }

    #[test]
    fn test_percent_change_undefined_for_zero_previous() {
        assert_eq!(Delta::new(5, 0).percent_change(), None);
        assert_eq!(Delta::new(15, 10).percent_change(), Some(50));
        assert_eq!(Delta::new(7, 10).percent_change(), Some(-30));
        assert_eq!(Delta::new(2, 3).percent_change(), Some(-33));
    }

    #[test]
    fn test_any_zero_previous_suppresses_ratios() {
        assert!(classify_with_trend(10, 1, 0, 2, None).ratios_suppressed);
        assert!(classify_with_trend(10, 1, 8, 0, None).ratios_suppressed);
        assert!(!classify_with_trend(10, 1, 8, 2, Some(1)).ratios_suppressed);
    }

    #[test]
    fn test_success_threshold_buckets() {
        assert_eq!(success_threshold(0, false), "+1回以上");
        assert_eq!(success_threshold(1, true), "+1回以上");
        assert_eq!(success_threshold(2, false), "+1回以上");
        assert_eq!(success_threshold(3, false), "+2回以上");
        assert_eq!(success_threshold(9, false), "+2回以上");
        assert_eq!(success_threshold(10, false), "+1回以上（今週比+10%）");
        assert_eq!(success_threshold(25, false), "+3回以上（今週比+10%）");
        assert_eq!(success_threshold(25, true), "+3回以上");
    }
}
