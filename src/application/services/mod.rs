pub mod health;
pub mod job_queue;
pub mod sender;
pub mod template;
