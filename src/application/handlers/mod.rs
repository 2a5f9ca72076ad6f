pub mod job_consumer;
pub mod message_processor;
