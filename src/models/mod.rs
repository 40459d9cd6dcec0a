pub mod list;
pub mod recommendation;

pub use list::{List, MediaItem, MediaType, NewMediaItem};
pub use recommendation::{CommunityRating, MediaResult, OmdbRating, OmdbTitle, Preferences};
