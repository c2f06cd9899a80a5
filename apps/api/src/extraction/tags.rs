//! Tag splitting and enrichment.
//!
//! The タグ column drives a Notion multi-select, and postings routinely come
//! back with one tag or none. Sparse tag sets are topped up from the other
//! repaired fields using a fixed technology vocabulary, then padded with
//! generic fallbacks so every page lands with between three and five tags.

use crate::extraction::record::{FieldValue, Record};
use crate::extraction::repair::{self, SENTINEL};
use crate::extraction::schema::{self, SCHEMA_FIELDS};

const MIN_TAGS: usize = 3;
const MAX_TAGS: usize = 5;

/// Canonical tag spellings, scanned in order. Matches are case-insensitive
/// but the vocabulary casing is what gets written.
const TAG_VOCABULARY: &[&str] = &[
    "Java",
    "Python",
    "Ruby",
    "PHP",
    "JavaScript",
    "TypeScript",
    "Go",
    "Rust",
    "Swift",
    "Kotlin",
    "Scala",
    "C#",
    "C++",
    "React",
    "Vue.js",
    "Angular",
    "Node.js",
    "Rails",
    "Spring",
    "Django",
    "Laravel",
    "Flutter",
    "Unity",
    "AWS",
    "Azure",
    "GCP",
    "Docker",
    "Kubernetes",
    "Terraform",
    "MySQL",
    "PostgreSQL",
    "Oracle",
    "MongoDB",
    "Redis",
    "SQL",
    "Linux",
    "iOS",
    "Android",
    "インフラ",
    "クラウド",
    "機械学習",
    "データ分析",
    "セキュリティ",
    "ゲーム",
    "金融",
    "医療",
    "EC",
    "Web",
];

/// Appended when the scan still leaves fewer than [`MIN_TAGS`] entries.
const FALLBACK_TAGS: &[&str] = &["システム開発", "エンジニア", "IT"];

/// Splits a raw tag cell on `,` and `、`, dropping blanks, the sentinel, and
/// case-insensitive duplicates. Order of first appearance is kept.
pub fn split_tags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for part in raw.split(|c| c == ',' || c == '、') {
        let tag = part.trim();
        if tag.is_empty() || tag == SENTINEL {
            continue;
        }
        if !contains_ci(&tags, tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

/// Brings the タグ field up to between three and five tags.
///
/// A cell that already holds enough tags passes through untouched apart from
/// the five-tag cap. Sparse cells are topped up by scanning every other
/// field (名前 excluded, a person's name is not a technology signal) for
/// vocabulary mentions, then padded with [`FALLBACK_TAGS`].
///
/// Enrichment runs after field repair, so every write-back goes through
/// [`repair::truncate`] to keep the field length cap intact.
pub fn enrich_tags(record: &mut Record) {
    let raw = record
        .get(schema::TAGS)
        .map(FieldValue::flatten)
        .unwrap_or_default();
    let mut tags = split_tags(&raw);

    if tags.len() >= MIN_TAGS {
        if tags.len() > MAX_TAGS {
            tags.truncate(MAX_TAGS);
            record.set(schema::TAGS, repair::truncate(tags.join(", ")));
        }
        return;
    }

    let corpus: Vec<String> = SCHEMA_FIELDS
        .iter()
        .filter(|&&field| field != schema::NAME && field != schema::TAGS)
        .filter_map(|&field| record.get(field).map(FieldValue::flatten))
        .filter(|text| text != SENTINEL)
        .map(|text| text.to_lowercase())
        .collect();

    for vocab in TAG_VOCABULARY {
        if tags.len() >= MAX_TAGS {
            break;
        }
        if contains_ci(&tags, vocab) {
            continue;
        }
        let needle = vocab.to_lowercase();
        if corpus.iter().any(|text| mentions(text, &needle)) {
            tags.push(vocab.to_string());
        }
    }

    for fallback in FALLBACK_TAGS {
        if tags.len() >= MIN_TAGS {
            break;
        }
        if !contains_ci(&tags, fallback) {
            tags.push(fallback.to_string());
        }
    }

    tags.truncate(MAX_TAGS);
    record.set(schema::TAGS, repair::truncate(tags.join(", ")));
}

fn contains_ci(tags: &[String], candidate: &str) -> bool {
    tags.iter().any(|tag| tag.eq_ignore_ascii_case(candidate))
}

/// Case-folded containment with ASCII word boundaries, so `go` does not fire
/// inside `django` or `mongodb`. Japanese entries have no boundary concept
/// and match by plain containment.
fn mentions(lowered: &str, needle: &str) -> bool {
    if !needle.is_ascii() {
        return lowered.contains(needle);
    }
    let mut from = 0;
    while let Some(pos) = lowered[from..].find(needle) {
        let begin = from + pos;
        let end = begin + needle.len();
        let standalone_before = lowered[..begin]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_ascii_alphanumeric());
        let standalone_after = lowered[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_ascii_alphanumeric());
        if standalone_before && standalone_after {
            return true;
        }
        from = end;
    }
    false
}
