mod ids;
mod track;

pub use ids::TrackId;
pub use track::{ProducerRef, Track};
