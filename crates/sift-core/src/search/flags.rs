use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

static PUNCT_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^[^\p{L}\d\s#"]+"#).expect("valid leading punctuation regex"));

static PUNCT_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[^\p{L}\d\s*"]+$"#).expect("valid trailing punctuation regex"));

static HASH_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{2,}").expect("valid hash run regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagName {
    Is,
    User,
    MinVotes,
    MaxVotes,
    Body,
    From,
    To,
    MinAnswers,
    MaxAnswers,
    Title,
    InQuestion,
}

impl FlagName {
    pub const ALL: [FlagName; 11] = [
        FlagName::Is,
        FlagName::User,
        FlagName::MinVotes,
        FlagName::MaxVotes,
        FlagName::Body,
        FlagName::From,
        FlagName::To,
        FlagName::MinAnswers,
        FlagName::MaxAnswers,
        FlagName::Title,
        FlagName::InQuestion,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FlagName::Is => "is",
            FlagName::User => "user",
            FlagName::MinVotes => "minvotes",
            FlagName::MaxVotes => "maxvotes",
            FlagName::Body => "body",
            FlagName::From => "from",
            FlagName::To => "to",
            FlagName::MinAnswers => "minanswers",
            FlagName::MaxAnswers => "maxanswers",
            FlagName::Title => "title",
            FlagName::InQuestion => "inquestion",
        }
    }

    /// Case-insensitive lookup; the first allow-list entry that matches wins.
    pub fn lookup(raw: &str) -> Option<FlagName> {
        Self::ALL
            .into_iter()
            .find(|name| raw.eq_ignore_ascii_case(name.as_str()))
    }
}

impl fmt::Display for FlagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flag {
    pub name: FlagName,
    pub value: String,
    pub excluded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchWord {
    pub value: String,
    pub excluded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Emit,
    SkipNext,
}

pub fn extract_flags(tokens: &[&str]) -> (Vec<SearchWord>, Vec<Flag>) {
    let mut words = Vec::new();
    let mut flags = Vec::new();
    let mut index = 0;

    while index < tokens.len() {
        let token = tokens[index];
        let next = tokens.get(index + 1).copied();

        let step = match parse_flag(token, next) {
            Some((flag, step)) => {
                flags.push(flag);
                step
            }
            None => {
                words.extend(search_word(token));
                Step::Emit
            }
        };

        index += match step {
            Step::Emit => 1,
            Step::SkipNext => 2,
        };
    }

    (words, flags)
}

fn parse_flag(token: &str, next: Option<&str>) -> Option<(Flag, Step)> {
    let (prefix, suffix) = token.split_once(':')?;
    let (raw_name, excluded) = match prefix.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (prefix, false),
    };
    let name = FlagName::lookup(raw_name)?;

    let (value, step) = if !suffix.is_empty() {
        (suffix, Step::Emit)
    } else {
        (next?, Step::SkipNext)
    };

    let flag = Flag {
        name,
        value: unquote(value).to_string(),
        excluded,
    };
    Some((flag, step))
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(value)
}

/// Normalizes a non-flag token, or `None` if nothing is left after stripping.
pub fn search_word(token: &str) -> Option<SearchWord> {
    let excluded = token.starts_with('-');
    let stripped = PUNCT_START.replace(token, "");
    let stripped = PUNCT_END.replace(&stripped, "");
    let value = HASH_RUN.replace(&stripped, "#");
    if value.is_empty() {
        return None;
    }
    Some(SearchWord {
        value: value.into_owned(),
        excluded,
    })
}

#[cfg(test)]
mod tests {
    use super::{extract_flags, search_word, Flag, FlagName, SearchWord};

    fn word(value: &str, excluded: bool) -> SearchWord {
        SearchWord {
            value: value.to_string(),
            excluded,
        }
    }

    fn flag(name: FlagName, value: &str, excluded: bool) -> Flag {
        Flag {
            name,
            value: value.to_string(),
            excluded,
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(FlagName::lookup("MinVotes"), Some(FlagName::MinVotes));
        assert_eq!(FlagName::lookup("INQUESTION"), Some(FlagName::InQuestion));
        assert_eq!(FlagName::lookup("channel"), None);
        assert_eq!(FlagName::lookup(""), None);
    }

    #[test]
    fn inline_flag_value() {
        let (words, flags) = extract_flags(&["user:abc", "rust"]);
        assert_eq!(flags, vec![flag(FlagName::User, "abc", false)]);
        assert_eq!(words, vec![word("rust", false)]);
    }

    #[test]
    fn flag_consumes_next_token() {
        let (words, flags) = extract_flags(&["title:", "\"hello world\"", "rust"]);
        assert_eq!(flags, vec![flag(FlagName::Title, "hello world", false)]);
        assert_eq!(words, vec![word("rust", false)]);
    }

    #[test]
    fn trailing_flag_without_value_is_a_word() {
        let (words, flags) = extract_flags(&["rust", "title:"]);
        assert!(flags.is_empty());
        assert_eq!(words, vec![word("rust", false), word("title", false)]);
    }

    #[test]
    fn excluded_flag() {
        let (words, flags) = extract_flags(&["-Body:unsafe"]);
        assert!(words.is_empty());
        assert_eq!(flags, vec![flag(FlagName::Body, "unsafe", true)]);
    }

    #[test]
    fn value_splits_on_first_colon_only() {
        let (_, flags) = extract_flags(&["body:a:b"]);
        assert_eq!(flags, vec![flag(FlagName::Body, "a:b", false)]);
    }

    #[test]
    fn unknown_flag_is_a_word() {
        let (words, flags) = extract_flags(&["in:town", "http://example.com"]);
        assert!(flags.is_empty());
        assert_eq!(
            words,
            vec![word("in:town", false), word("http://example.com", false)]
        );
    }

    #[test]
    fn consumed_value_is_not_reinterpreted() {
        let (words, flags) = extract_flags(&["body:", "title:x", "y"]);
        assert_eq!(flags, vec![flag(FlagName::Body, "title:x", false)]);
        assert_eq!(words, vec![word("y", false)]);
    }

    #[test]
    fn strips_surrounding_punctuation() {
        assert_eq!(search_word("(hello),"), Some(word("hello", false)));
        assert_eq!(search_word("¿qué?"), Some(word("qué", false)));
    }

    #[test]
    fn keeps_wildcard_and_hash() {
        assert_eq!(search_word("rust*."), Some(word("rust*", false)));
        assert_eq!(search_word("(#rust)"), Some(word("#rust", false)));
    }

    #[test]
    fn collapses_hash_runs_after_stripping() {
        assert_eq!(search_word("###rust"), Some(word("#rust", false)));
        assert_eq!(search_word("-##rust"), Some(word("#rust", true)));
        assert_eq!(search_word("!##rust"), Some(word("#rust", false)));
    }

    #[test]
    fn exclusion_is_read_before_stripping() {
        assert_eq!(search_word("-rust"), Some(word("rust", true)));
        assert_eq!(search_word("--rust"), Some(word("rust", true)));
        assert_eq!(search_word("!-rust"), Some(word("rust", false)));
    }

    #[test]
    fn quotes_stay_on_phrases() {
        assert_eq!(
            search_word("-\"hello world\""),
            Some(word("\"hello world\"", true))
        );
    }

    #[test]
    fn pure_punctuation_is_dropped() {
        assert_eq!(search_word("-"), None);
        assert_eq!(search_word("..."), None);
        let (words, flags) = extract_flags(&["-", "&&", "rust"]);
        assert!(flags.is_empty());
        assert_eq!(words, vec![word("rust", false)]);
    }
}
