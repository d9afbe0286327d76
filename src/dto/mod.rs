pub mod evaluation_dto;
pub mod feed_dto;
pub mod job_dto;
pub mod offer_dto;
