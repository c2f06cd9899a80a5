//! Anchored section extraction — re-derives a field's value straight from
//! the original posting text.
//!
//! Japanese postings label their sections with bracketed headings
//! (`【給与】`, `【開発環境】`, …). Each recoverable field carries one rule:
//! the heading alternatives that introduce its section plus a post-processing
//! step. The capture runs to the next heading or the end of the text, across
//! lines. A missing anchor is an expected outcome, not an error; the caller
//! leaves the sentinel in place.

use std::sync::LazyLock;

use regex::Regex;

use crate::extraction::schema;

/// Post-processing applied to a captured section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostProcess {
    /// Collapse whitespace runs to single spaces.
    Collapse,
    /// Reduce the capture to a short technology list: the first captured
    /// line, or a token pass over the first few lines when the first line
    /// names no technologies.
    TechList,
}

/// One extraction rule: field → heading alternatives → post-processing.
struct SectionRule {
    field: &'static str,
    anchors: &'static [&'static str],
    post: PostProcess,
}

const SECTION_RULES: &[SectionRule] = &[
    SectionRule {
        field: schema::DESCRIPTION,
        anchors: &["仕事内容", "業務内容"],
        post: PostProcess::Collapse,
    },
    SectionRule {
        field: schema::LOCATION,
        anchors: &["勤務地", "場所"],
        post: PostProcess::Collapse,
    },
    SectionRule {
        field: schema::HOURS,
        anchors: &["勤務時間"],
        post: PostProcess::Collapse,
    },
    SectionRule {
        field: schema::REQUIRED_SKILLS,
        anchors: &["必須スキル", "必須"],
        post: PostProcess::Collapse,
    },
    SectionRule {
        field: schema::TITLE,
        anchors: &["案件タイトル", "案件名"],
        post: PostProcess::Collapse,
    },
    SectionRule {
        field: schema::CONTENT,
        anchors: &["案件内容", "案件概要"],
        post: PostProcess::Collapse,
    },
    SectionRule {
        field: schema::PREFERRED_SKILLS,
        anchors: &["歓迎スキル", "尚可スキル", "尚可"],
        post: PostProcess::Collapse,
    },
    SectionRule {
        field: schema::COMPENSATION,
        anchors: &["給与", "単価", "報酬"],
        post: PostProcess::Collapse,
    },
    SectionRule {
        field: schema::TECH_STACK,
        anchors: &["開発環境", "環境"],
        post: PostProcess::TechList,
    },
    SectionRule {
        field: schema::EMPLOYMENT_TYPE,
        anchors: &["雇用形態", "契約形態"],
        post: PostProcess::Collapse,
    },
    SectionRule {
        field: schema::INDUSTRY,
        anchors: &["業界"],
        post: PostProcess::Collapse,
    },
    SectionRule {
        field: schema::POSITION,
        anchors: &["ポジション"],
        post: PostProcess::Collapse,
    },
    SectionRule {
        field: schema::PRODUCT,
        anchors: &["商材"],
        post: PostProcess::Collapse,
    },
    SectionRule {
        field: schema::DURATION,
        anchors: &["作業期間", "期間"],
        post: PostProcess::Collapse,
    },
    SectionRule {
        field: schema::UTILIZATION,
        anchors: &["稼働率", "稼働"],
        post: PostProcess::Collapse,
    },
    SectionRule {
        field: schema::WORK_STYLE,
        anchors: &["作業形態", "勤務形態"],
        post: PostProcess::Collapse,
    },
    SectionRule {
        field: schema::CANDIDATE_PROFILE,
        anchors: &["求める人物像", "求める人材"],
        post: PostProcess::Collapse,
    },
    SectionRule {
        field: schema::NOTES,
        anchors: &["備考"],
        post: PostProcess::Collapse,
    },
];

struct CompiledRule {
    field: &'static str,
    pattern: Regex,
    post: PostProcess,
}

// The regex crate has no lookahead, so "capture until the next heading" is
// a negated character class rather than `(?=【)`.
static COMPILED_RULES: LazyLock<Vec<CompiledRule>> = LazyLock::new(|| {
    SECTION_RULES
        .iter()
        .map(|rule| CompiledRule {
            field: rule.field,
            pattern: Regex::new(&format!("【(?:{})】([^【]*)", rule.anchors.join("|")))
                .expect("section anchor pattern"),
            post: rule.post,
        })
        .collect()
});

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Latin technology tokens: `Java`, `Vue.js`, `C#`, `C++`, `scikit-learn`.
static TECH_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z][A-Za-z0-9.#+-]*").unwrap());

/// Attempts to recover `field` from the posting text.
///
/// `None` when the field has no rule, its anchor is absent, or the capture
/// post-processes down to nothing.
pub fn recover(field: &str, source_text: &str) -> Option<String> {
    let rule = COMPILED_RULES.iter().find(|r| r.field == field)?;
    let captured = rule
        .pattern
        .captures(source_text)
        .and_then(|caps| caps.get(1))?
        .as_str();

    let cleaned = match rule.post {
        PostProcess::Collapse => collapse_whitespace(captured),
        PostProcess::TechList => tech_list(captured)?,
    };

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Normalizes a line-wrapped capture into a single display line.
fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
}

/// Prose bleeds into tech-stack captures easily. Keep the first captured
/// line when it already names technologies, otherwise pull latin tokens out
/// of the first few lines.
fn tech_list(captured: &str) -> Option<String> {
    let trimmed = captured.trim();
    let first = trimmed.lines().next().unwrap_or("");
    if TECH_TOKEN.is_match(first) {
        let collapsed = collapse_whitespace(first);
        if !collapsed.is_empty() {
            return Some(collapsed);
        }
    }

    let tokens: Vec<&str> = trimmed
        .lines()
        .take(3)
        .flat_map(|line| TECH_TOKEN.find_iter(line).map(|m| m.as_str()))
        .collect();
    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(", "))
    }
}
