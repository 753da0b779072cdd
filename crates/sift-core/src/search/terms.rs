use crate::search::flags::SearchWord;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static TAG_TERM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#\p{L}[\p{L}\d_]*[\p{L}\d]$").expect("valid tag regex"));

/// Space-joined search terms, partitioned by kind and exclusion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TermBuckets {
    pub plain: String,
    pub excluded_plain: String,
    pub tags: String,
    pub excluded_tags: String,
}

impl TermBuckets {
    pub fn has_tags(&self) -> bool {
        !self.tags.is_empty() || !self.excluded_tags.is_empty()
    }

    pub fn has_plain(&self) -> bool {
        !self.plain.is_empty() || !self.excluded_plain.is_empty()
    }
}

pub fn is_tag_term(word: &str) -> bool {
    TAG_TERM.is_match(word)
}

pub fn classify_words(words: &[SearchWord]) -> TermBuckets {
    let mut buckets = TermBuckets::default();

    for word in words {
        let (bucket, term) = if is_tag_term(&word.value) {
            let term = &word.value[1..];
            if word.excluded {
                (&mut buckets.excluded_tags, term)
            } else {
                (&mut buckets.tags, term)
            }
        } else if word.excluded {
            (&mut buckets.excluded_plain, word.value.as_str())
        } else {
            (&mut buckets.plain, word.value.as_str())
        };
        push_term(bucket, term);
    }

    buckets
}

pub(crate) fn push_term(bucket: &mut String, term: &str) {
    if term.is_empty() {
        return;
    }
    if !bucket.is_empty() {
        bucket.push(' ');
    }
    bucket.push_str(term);
}
