//! Basic-tier classification: three ordered rules over this week's visits and clicks.
//!
//! Rules are evaluated top-down and the first match wins. The last rule always
//! matches, so every input lands in exactly one tier.

use serde::{Deserialize, Serialize};

use crate::models::form::SourceChannel;

/// Below this many visits the listing is not being seen enough to judge its content.
pub const MIN_VISITS_FOR_CONTENT_JUDGEMENT: u32 = 20;

/// Response rate threshold, in clicks per hundred visits.
pub const MIN_CLICKS_PER_HUNDRED: u64 = 1;

/// Signature line closing every audit report.
pub const REPORT_SIGNATURE: &str = "（REMEDORA Web監査役）";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    EntryIssue,
    ContentIssue,
    OnTrack,
}

impl Tier {
    pub fn label(&self) -> &'static str {
        match self {
            Tier::EntryIssue => "入口に課題",
            Tier::ContentIssue => "中身に課題",
            Tier::OnTrack => "順調",
        }
    }
}

/// Outcome of one classification pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub tier: Tier,
    /// clicks / visits; `None` when there were no visits.
    pub response_rate: Option<f64>,
    /// People reacting per hundred visits, one decimal (`"2.0"`).
    pub rate_per_hundred: Option<String>,
    pub narrative: String,
    pub next_action: String,
}

struct Rule {
    tier: Tier,
    applies: fn(u32, u32) -> bool,
}

const RULES: &[Rule] = &[
    Rule {
        tier: Tier::EntryIssue,
        applies: |visits, _| visits < MIN_VISITS_FOR_CONTENT_JUDGEMENT,
    },
    Rule {
        tier: Tier::ContentIssue,
        // clicks / visits < 1%  <=>  100 * clicks < visits
        applies: |visits, clicks| {
            visits > 0 && 100 * u64::from(clicks) < MIN_CLICKS_PER_HUNDRED * u64::from(visits)
        },
    },
    Rule {
        tier: Tier::OnTrack,
        applies: |_, _| true,
    },
];

/// Returns the tier of the first matching rule.
pub fn tier_for(visits: u32, clicks: u32) -> Tier {
    RULES
        .iter()
        .find(|rule| (rule.applies)(visits, clicks))
        .map(|rule| rule.tier)
        .unwrap_or(Tier::OnTrack)
}

/// clicks / visits, or `None` when there were no visits.
pub fn response_rate(visits: u32, clicks: u32) -> Option<f64> {
    (visits > 0).then(|| f64::from(clicks) / f64::from(visits))
}

/// `round(1000 * clicks / visits) / 10`, rendered with one decimal.
/// Half-up rounding in integer arithmetic so `"2.0"` never turns into `"1.9"`.
pub fn rate_per_hundred(visits: u32, clicks: u32) -> Option<String> {
    if visits == 0 {
        return None;
    }
    let visits = u64::from(visits);
    let per_mille = (u64::from(clicks) * 1000 + visits / 2) / visits;
    Some(format!("{}.{}", per_mille / 10, per_mille % 10))
}

/// Classifies this week's numbers and writes the narrative and next action.
pub fn classify(visits: u32, clicks: u32, source: SourceChannel) -> ClassificationResult {
    let tier = tier_for(visits, clicks);
    let rate_per_hundred = rate_per_hundred(visits, clicks);

    let (narrative, next_action) = match tier {
        Tier::EntryIssue => (
            format!(
                "今週、求人ページまでたどり着いたのは{visits}人のみです。\
                 中身が良いか悪いか判断する以前に、そもそも知られていません。"
            ),
            format!(
                "来週は「{}」に掲載している写真またはタイトル（見出し）を1箇所だけ変更し、\
                 クリックされる数を増やします。",
                source.label()
            ),
        ),
        Tier::ContentIssue => (
            format!(
                "今週は{visits}人がページを見ましたが、ボタンを押したのは{clicks}人でした。\
                 興味を持って訪れたものの、「何かが違う」と感じて帰っています。"
            ),
            "来週は求人ページの冒頭にある「給与」または「休日」の表記を、\
             より分かりやすく具体的に書き直します。"
                .to_string(),
        ),
        Tier::OnTrack => (
            format!(
                "今週は{visits}人が見て、そのうち{clicks}人が興味を持ってボタンを押しました。\
                 100人が見れば{}人が反応する計算で、地域の平均以上の成果が出ています。",
                rate_per_hundred.as_deref().unwrap_or("0.0")
            ),
            "現在の内容を変に触るとバランスが崩れます。来週は変更を加えず、\
             応募があった際に「どこを見て連絡したか」を電話口で聞くことだけ徹底してください。"
                .to_string(),
        ),
    };

    ClassificationResult {
        tier,
        response_rate: response_rate(visits, clicks),
        rate_per_hundred,
        narrative,
        next_action,
    }
}

/// Renders the locally generated three-section report.
pub fn render_basic_report(result: &ClassificationResult) -> String {
    format!(
        "【今週の結論】\n{}\n\n【事実の可視化】\n{}\n\n【次の一手】\n{}\n\n{}",
        result.tier.label(),
        result.narrative,
        result.next_action,
        REPORT_SIGNATURE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_visits_is_entry_issue_regardless_of_clicks() {
        for visits in 0..MIN_VISITS_FOR_CONTENT_JUDGEMENT {
            for clicks in [0, 1, 5, 19, 1000] {
                assert_eq!(
                    classify(visits, clicks, SourceChannel::Indeed).tier,
                    Tier::EntryIssue,
                    "visits={visits} clicks={clicks}"
                );
            }
        }
    }

    #[test]
    fn test_zero_visits_guards_division() {
        let r = classify(0, 0, SourceChannel::Sns);
        assert_eq!(r.tier, Tier::EntryIssue);
        assert_eq!(r.response_rate, None);
        assert_eq!(r.rate_per_hundred, None);
    }

    #[test]
    fn test_rate_below_one_percent_is_content_issue() {
        assert_eq!(tier_for(100, 0), Tier::ContentIssue);
        assert_eq!(tier_for(101, 1), Tier::ContentIssue);
        assert_eq!(tier_for(250, 2), Tier::ContentIssue);
    }

    #[test]
    fn test_rate_at_one_percent_is_on_track() {
        assert_eq!(tier_for(100, 1), Tier::OnTrack);
        assert_eq!(tier_for(20, 1), Tier::OnTrack);
        assert_eq!(tier_for(200, 2), Tier::OnTrack);
    }

    #[test]
    fn test_tiers_match_rate_over_a_grid() {
        for visits in MIN_VISITS_FOR_CONTENT_JUDGEMENT..300 {
            for clicks in 0..10 {
                let expected = if (clicks as f64) / (visits as f64) < 0.01 {
                    Tier::ContentIssue
                } else {
                    Tier::OnTrack
                };
                assert_eq!(tier_for(visits, clicks), expected, "visits={visits} clicks={clicks}");
            }
        }
    }

    #[test]
    fn test_rate_per_hundred_rounds_half_up() {
        assert_eq!(rate_per_hundred(50, 1).as_deref(), Some("2.0"));
        assert_eq!(rate_per_hundred(30, 1).as_deref(), Some("3.3"));
        assert_eq!(rate_per_hundred(3, 2).as_deref(), Some("66.7"));
        assert_eq!(rate_per_hundred(2000, 1).as_deref(), Some("0.1")); // 0.05 -> 0.1
        assert_eq!(rate_per_hundred(20, 20).as_deref(), Some("100.0"));
    }

    #[test]
    fn test_scenario_low_visits_changes_one_creative() {
        let r = classify(15, 0, SourceChannel::Indeed);
        assert_eq!(r.tier, Tier::EntryIssue);
        assert!(r.narrative.contains("15人"));
        assert!(r.next_action.contains("「Indeed」"));
        assert!(r.next_action.contains("写真またはタイトル"));
        assert!(r.next_action.contains("1箇所だけ"));
    }

    #[test]
    fn test_scenario_fifty_visits_one_click_is_on_track() {
        let r = classify(50, 1, SourceChannel::Flyer);
        assert_eq!(r.tier, Tier::OnTrack);
        assert_eq!(r.response_rate, Some(0.02));
        assert!(r.narrative.contains("100人が見れば2.0人"));
    }

    #[test]
    fn test_scenario_hundred_visits_no_clicks_is_content_issue() {
        let r = classify(100, 0, SourceChannel::Indeed);
        assert_eq!(r.tier, Tier::ContentIssue);
        assert_eq!(r.response_rate, Some(0.0));
        assert!(r.next_action.contains("「給与」または「休日」"));
    }

    #[test]
    fn test_basic_report_has_three_sections_and_signature() {
        let report = render_basic_report(&classify(100, 0, SourceChannel::Indeed));
        assert!(report.starts_with("【今週の結論】\n中身に課題\n"));
        assert!(report.contains("【事実の可視化】"));
        assert!(report.contains("【次の一手】"));
        assert!(report.ends_with(REPORT_SIGNATURE));
    }

    #[test]
    fn test_tier_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&Tier::EntryIssue).unwrap(),
            "\"entry_issue\""
        );
    }
}
