mod backend;
pub mod builder;
pub mod flags;
mod params;
pub mod terms;
pub mod tokenizer;

pub use backend::{SearchBackend, SearchHits};
pub use builder::build_parameters;
pub use flags::{extract_flags, Flag, FlagName, SearchWord};
pub use params::{PostType, SearchParameters, TermsType};
pub use terms::{classify_words, TermBuckets};
pub use tokenizer::split_words;

use tracing::trace;

pub fn parse_search(query: &str, time_zone_offset: i32) -> Vec<SearchParameters> {
    let tokens = split_words(query);
    let (words, flags) = extract_flags(&tokens);
    let buckets = classify_words(&words);
    let params = build_parameters(&flags, &buckets, time_zone_offset);
    trace!(
        tokens = tokens.len(),
        words = words.len(),
        flags = flags.len(),
        records = params.len(),
        "parsed search query"
    );
    params
}
