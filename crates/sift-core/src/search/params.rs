use crate::domain::{PostId, UserId};
use serde::{Serialize, Serializer};
use std::fmt;

/// Which document field a record's terms are matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TermsType {
    Plain,
    Title,
    Tag,
    Body,
    /// Reserved for "similar posts" lookups; never produced by the parser.
    Similar,
    /// Reserved for linked-post lookups; never produced by the parser.
    Link,
}

impl TermsType {
    pub fn as_str(self) -> &'static str {
        match self {
            TermsType::Plain => "plain",
            TermsType::Title => "title",
            TermsType::Tag => "tag",
            TermsType::Body => "body",
            TermsType::Similar => "similar",
            TermsType::Link => "link",
        }
    }
}

impl fmt::Display for TermsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    Question,
    Answer,
}

impl PostType {
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("question") {
            Some(PostType::Question)
        } else if raw.eq_ignore_ascii_case("answer") {
            Some(PostType::Answer)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PostType::Question => "question",
            PostType::Answer => "answer",
        }
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One typed search request handed to the search backend.
///
/// Records produced from the same query differ only in `terms`, `excluded_terms`
/// and `terms_type`; every other field is a filter shared by all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParameters {
    pub terms: String,
    pub excluded_terms: String,
    /// `None` only on the filter-only record emitted when a query has no terms.
    #[serde(serialize_with = "or_empty")]
    pub terms_type: Option<TermsType>,
    #[serde(serialize_with = "or_empty")]
    pub post_type: Option<PostType>,
    #[serde(serialize_with = "or_empty")]
    pub user: Option<UserId>,
    #[serde(serialize_with = "or_empty")]
    pub parent: Option<PostId>,
    pub ids: Vec<PostId>,
    pub min_votes: Option<i64>,
    pub max_votes: Option<i64>,
    pub min_answers: Option<i64>,
    pub max_answers: Option<i64>,
    #[serde(serialize_with = "or_empty")]
    pub from_date: Option<String>,
    #[serde(serialize_with = "or_empty")]
    pub to_date: Option<String>,
    pub time_zone_offset: i32,
}

impl SearchParameters {
    /// True when any filter other than the time zone is set.
    pub fn has_scalar_filters(&self) -> bool {
        self.post_type.is_some()
            || self.user.is_some()
            || self.parent.is_some()
            || !self.ids.is_empty()
            || self.min_votes.is_some()
            || self.max_votes.is_some()
            || self.from_date.is_some()
            || self.to_date.is_some()
            || self.min_answers.is_some()
            || self.max_answers.is_some()
    }

    /// Compares every field except the terms and their category.
    pub fn same_filters(&self, other: &Self) -> bool {
        self.post_type == other.post_type
            && self.user == other.user
            && self.parent == other.parent
            && self.ids == other.ids
            && self.min_votes == other.min_votes
            && self.max_votes == other.max_votes
            && self.min_answers == other.min_answers
            && self.max_answers == other.max_answers
            && self.from_date == other.from_date
            && self.to_date == other.to_date
            && self.time_zone_offset == other.time_zone_offset
    }

    pub(crate) fn with_terms(&self, terms_type: TermsType, terms: &str, excluded: &str) -> Self {
        Self {
            terms: terms.to_string(),
            excluded_terms: excluded.to_string(),
            terms_type: Some(terms_type),
            ..self.clone()
        }
    }
}

fn or_empty<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match value {
        Some(inner) => inner.serialize(serializer),
        None => serializer.serialize_str(""),
    }
}

#[cfg(test)]
mod tests {
    use super::{PostType, SearchParameters, TermsType};
    use serde_json::json;

    #[test]
    fn post_type_parse() {
        assert_eq!(PostType::parse("question"), Some(PostType::Question));
        assert_eq!(PostType::parse("Answer"), Some(PostType::Answer));
        assert_eq!(PostType::parse("comment"), None);
        assert_eq!(PostType::parse(""), None);
    }

    #[test]
    fn default_has_no_filters() {
        let params = SearchParameters {
            time_zone_offset: 3600,
            ..SearchParameters::default()
        };
        assert!(!params.has_scalar_filters());
    }

    #[test]
    fn same_filters_ignores_terms() {
        let base = SearchParameters {
            min_votes: Some(2),
            ..SearchParameters::default()
        };
        let plain = base.with_terms(TermsType::Plain, "a", "");
        let tag = base.with_terms(TermsType::Tag, "b", "c");
        assert!(plain.same_filters(&tag));
        assert!(!plain.same_filters(&SearchParameters::default()));
    }

    #[test]
    fn serializes_camel_case_with_empty_strings() {
        let params = SearchParameters {
            terms: "tag1".to_string(),
            excluded_terms: "tag2".to_string(),
            terms_type: Some(TermsType::Tag),
            post_type: Some(PostType::Question),
            min_votes: Some(3),
            ..SearchParameters::default()
        };
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(
            value,
            json!({
                "terms": "tag1",
                "excludedTerms": "tag2",
                "termsType": "tag",
                "postType": "question",
                "user": "",
                "parent": "",
                "ids": [],
                "minVotes": 3,
                "maxVotes": null,
                "minAnswers": null,
                "maxAnswers": null,
                "fromDate": "",
                "toDate": "",
                "timeZoneOffset": 0
            })
        );
    }

    #[test]
    fn reserved_terms_types_serialize() {
        assert_eq!(
            serde_json::to_value(TermsType::Similar).unwrap(),
            json!("similar")
        );
        assert_eq!(TermsType::Link.to_string(), "link");
    }
}
