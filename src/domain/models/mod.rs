pub mod campaign;
pub mod channel;
pub mod customer;
pub mod message;

pub use campaign::{Campaign, CampaignFilter, CampaignStats, CampaignStatus, CampaignWithStats};
pub use channel::Channel;
pub use customer::{CUSTOMER_ATTRIBUTES, Customer};
pub use message::{MessageStatus, OutboundMessage};
