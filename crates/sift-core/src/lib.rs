pub mod domain;
pub mod error;
pub mod search;
pub mod time;

pub use domain::*;
pub use error::CoreError;
pub use search::{
    parse_search, PostType, SearchBackend, SearchHits, SearchParameters, TermsType,
};
