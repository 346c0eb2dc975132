pub mod movie;
pub mod search_result;
pub mod summary;
pub mod watched;

pub use movie::MovieDetail;
pub use search_result::SearchResult;
pub use summary::WatchSummary;
pub use watched::WatchedMovie;
