pub mod ids;

pub use ids::{is_valid_id, PostId, UserId, ID_LENGTH};
