pub mod campaigns;
pub mod customers;
pub mod health;
pub mod messages;
pub mod root;
