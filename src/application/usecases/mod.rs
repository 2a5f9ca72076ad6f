pub mod check_health;
pub mod create_campaign;
pub mod create_customer;
pub mod delete_customer;
pub mod get_campaign;
pub mod get_customer;
pub mod list_campaign_messages;
pub mod list_campaigns;
pub mod preview_message;
pub mod retry_message;
pub mod send_campaign;
