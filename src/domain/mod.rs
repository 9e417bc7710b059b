pub mod markers;
pub mod product;
pub mod review;

pub use markers::{EntryDecision, ResumeCursor, VisitedMarkers, PAGE_START};
pub use product::{DetailAggregates, ListingFields, ProductRecord};
pub use review::{DateBucket, ReviewPage, ReviewRecord};
