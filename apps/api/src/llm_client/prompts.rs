// Shared prompt fragments.
// Each module that talks to the generator keeps its own prompts.rs;
// this file holds the pieces every prompt reuses.

/// Terms the auditor persona must never use: analytics jargon the owner
/// does not know, and alarming words that read as a verdict on the business.
pub const FORBIDDEN_TERMS: &[&str] = &[
    "CVR",
    "CTR",
    "セッション",
    "エンゲージメント",
    "インプレッション",
    "コンバージョン",
    "最悪",
    "致命的",
    "危機",
    "絶望的",
    "失敗",
];

/// Safety block embedded in every rescue-tool system instruction.
pub const SAFETY_INSTRUCTION: &str = "\
厳守事項：
- 「日本一」「絶対」「必ず」「業界No.1」「100%」などの最上級・断定表現は使わない。
- 事実として確認できないことを書かない。
- 依頼されていない年齢・性別・国籍などの属性で対象を絞り込む表現は使わない。";

/// Renders the forbidden-term list as a single instruction line.
pub fn forbidden_terms_instruction() -> String {
    format!(
        "次の言葉は一切使用禁止です：{}",
        FORBIDDEN_TERMS.join("、")
    )
}

/// Forbidden terms present in `text`.
///
/// Used only to report non-compliant generator output; the text itself is
/// passed through unchanged.
pub fn find_forbidden_terms(text: &str) -> Vec<&'static str> {
    let upper = text.to_uppercase();
    FORBIDDEN_TERMS
        .iter()
        .copied()
        .filter(|term| upper.contains(&term.to_uppercase()))
        .collect()
}
