pub mod endpoints;
pub mod errors;
pub mod mappers;
pub mod requests;
pub mod responses;
