pub mod entity;
pub mod filter;
pub mod invariants;
pub mod tags;

pub use entity::{Coordinate, PhotoReference, TrailEntry};
pub use filter::DraftFilter;
pub use invariants::validate_entry;
pub use tags::{normalize_tags, parse_tags, TagMode};
