use crate::domain::PostId;
use crate::search::params::SearchParameters;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchHits {
    pub post_ids: Vec<PostId>,
    pub total_count: u64,
}

/// Full-text search engine that executes one parsed record at a time.
///
/// Records from one query may be executed in any order or in parallel; ranking and
/// merging the hits is up to the caller. Raw `from_date`/`to_date` values are
/// expected to be resolved with [`crate::time::resolve_date_range`].
pub trait SearchBackend {
    type Error;

    fn execute(&self, params: &SearchParameters) -> Result<SearchHits, Self::Error>;
}
