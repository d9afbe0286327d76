pub mod evaluation_service;
pub mod feed_service;
pub mod job_service;
pub mod offer_service;
pub mod user_service;
