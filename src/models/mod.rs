pub mod evaluation;
pub mod feed;
pub mod job;
pub mod offer;
pub mod user;
