//! Record schema — the fixed, ordered set of Notion database columns.
//!
//! Order matters: header-less model output is mapped onto these fields
//! positionally, and the transform prompt lists the columns in this order.

pub const NAME: &str = "名前";
pub const TAGS: &str = "タグ";
pub const DESCRIPTION: &str = "仕事内容";
pub const LOCATION: &str = "勤務地";
pub const HOURS: &str = "勤務時間";
pub const REQUIRED_SKILLS: &str = "必須スキル";
pub const TITLE: &str = "案件タイトル";
pub const CONTENT: &str = "案件内容";
pub const PREFERRED_SKILLS: &str = "歓迎スキル";
pub const COMPENSATION: &str = "給与";
pub const TECH_STACK: &str = "開発環境";
pub const EMPLOYMENT_TYPE: &str = "雇用形態";
pub const INDUSTRY: &str = "業界";
pub const POSITION: &str = "ポジション";
pub const PRODUCT: &str = "商材";
pub const DURATION: &str = "作業期間";
pub const UTILIZATION: &str = "稼働率";
pub const WORK_STYLE: &str = "作業形態";
pub const CANDIDATE_PROFILE: &str = "求める人物像";
pub const NOTES: &str = "備考";

/// All record fields in CSV column order.
pub const SCHEMA_FIELDS: [&str; 20] = [
    NAME,
    TAGS,
    DESCRIPTION,
    LOCATION,
    HOURS,
    REQUIRED_SKILLS,
    TITLE,
    CONTENT,
    PREFERRED_SKILLS,
    COMPENSATION,
    TECH_STACK,
    EMPLOYMENT_TYPE,
    INDUSTRY,
    POSITION,
    PRODUCT,
    DURATION,
    UTILIZATION,
    WORK_STYLE,
    CANDIDATE_PROFILE,
    NOTES,
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_schema_has_twenty_fields() {
        assert_eq!(SCHEMA_FIELDS.len(), 20);
    }

    #[test]
    fn test_schema_field_names_are_unique() {
        let unique: HashSet<&str> = SCHEMA_FIELDS.iter().copied().collect();
        assert_eq!(unique.len(), SCHEMA_FIELDS.len());
    }

    #[test]
    fn test_schema_leads_with_name_then_tags() {
        // Header recognition compares the first two cells against these.
        assert_eq!(SCHEMA_FIELDS[0], NAME);
        assert_eq!(SCHEMA_FIELDS[1], TAGS);
    }
}
