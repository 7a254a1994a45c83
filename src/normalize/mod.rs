pub mod image;
pub mod link;
pub mod order;
pub mod projector;
pub mod record;
pub mod status;
pub mod time;

pub use image::ImageCanonicalizer;
pub use link::canonical_link;
pub use order::order_records;
pub use projector::{Projector, UNKNOWN_LEAGUE};
pub use record::{CanonicalRecord, Score, UNPLAYED_SCORE};
pub use status::{MatchPhase, Status, StatusTable};
pub use time::{KickoffEncoding, NormalizedTime, TimeNormalizer, TBD};

#[cfg(test)]
mod tests;
