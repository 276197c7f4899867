mod archive;
pub mod http_feed;

pub use archive::{is_zip, read_entries};
pub use http_feed::HttpCandidateFeed;
