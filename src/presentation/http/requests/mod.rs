use chrono::{DateTime, Utc};
use poem_openapi::Object;
use uuid::Uuid;

use crate::presentation::models::ChannelKind;

#[derive(Object, Debug)]
pub struct CreateCampaignRequestDto {
    #[oai(validator(min_length = 1, max_length = 255))]
    pub name: String,
    pub channel: ChannelKind,
    #[oai(validator(min_length = 1))]
    pub base_template: String,
    pub scheduled_at: Option<DateTime<Utc>>,
}

#[derive(Object, Debug)]
pub struct SendCampaignRequestDto {
    pub customer_ids: Vec<Uuid>,
}

#[derive(Object, Debug)]
pub struct PreviewMessageRequestDto {
    pub customer_id: Uuid,
    pub override_template: Option<String>,
}

#[derive(Object, Debug)]
pub struct CreateCustomerRequestDto {
    #[oai(validator(min_length = 1, max_length = 32))]
    pub phone: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub location: Option<String>,
    pub preferred_product: Option<String>,
}
