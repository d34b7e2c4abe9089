pub mod classification;
pub mod decade;
pub mod mood;
pub mod rubric;
pub mod rules;
pub mod scoring;

pub use classification::{classify_on_create, PriorViewing, ViewingFlags};
pub use decade::decade_for_year;
pub use mood::Mood;
pub use rules::RuleViolation;
pub use scoring::{weighted_score, WeightedRating};
