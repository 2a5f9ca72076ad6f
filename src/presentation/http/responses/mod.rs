use std::collections::HashMap;

use poem_openapi::{ApiResponse, Object, payload::Json};
use uuid::Uuid;

use crate::presentation::models::{CampaignStatusDto, ChannelKind, MessageStatusDto};

#[derive(Object)]
pub struct CampaignDto {
    pub id: Uuid,
    pub name: String,
    pub channel: ChannelKind,
    pub status: CampaignStatusDto,
    pub base_template: String,
    pub scheduled_at: Option<String>,
    pub created_at: String,
}

#[derive(Object)]
pub struct CampaignStatsDto {
    pub total: u64,
    pub pending: u64,
    pub sent: u64,
    pub failed: u64,
}

#[derive(Object)]
pub struct CampaignDetailsDto {
    pub campaign: CampaignDto,
    pub stats: CampaignStatsDto,
}

#[derive(Object)]
pub struct PaginationDto {
    pub page: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u64,
}

#[derive(Object)]
pub struct CampaignListDto {
    pub data: Vec<CampaignDto>,
    pub pagination: PaginationDto,
}

#[derive(Object)]
pub struct SendCampaignResponseDto {
    pub campaign_id: Uuid,
    pub messages_queued: u64,
    pub status: CampaignStatusDto,
}

#[derive(Object)]
pub struct CustomerPreviewDto {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

#[derive(Object)]
pub struct PreviewMessageResponseDto {
    pub rendered_message: String,
    pub used_template: String,
    pub customer: CustomerPreviewDto,
}

#[derive(Object)]
pub struct CustomerDto {
    pub id: Uuid,
    pub phone: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub location: Option<String>,
    pub preferred_product: Option<String>,
    pub created_at: String,
}

#[derive(Object)]
pub struct OutboundMessageDto {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub customer_id: Uuid,
    pub status: MessageStatusDto,
    pub rendered_content: String,
    pub last_error: Option<String>,
    pub retry_count: u32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Object)]
pub struct HealthDto {
    pub status: String,
    pub services: HashMap<String, String>,
}

#[derive(ApiResponse)]
pub enum HealthResponse {
    #[oai(status = 200)]
    Healthy(Json<HealthDto>),
    #[oai(status = 503)]
    Unhealthy(Json<HealthDto>),
}

#[derive(ApiResponse)]
pub enum CreatedCampaignResponse {
    #[oai(status = 201)]
    Created(Json<CampaignDto>),
}

#[derive(ApiResponse)]
pub enum CreatedCustomerResponse {
    #[oai(status = 201)]
    Created(Json<CustomerDto>),
}

#[derive(ApiResponse)]
pub enum SendCampaignAccepted {
    #[oai(status = 202)]
    Accepted(Json<SendCampaignResponseDto>),
}

#[derive(ApiResponse)]
pub enum RetryMessageResponse {
    #[oai(status = 202)]
    Accepted(Json<OutboundMessageDto>),
}

#[derive(ApiResponse)]
pub enum DeletedResponse {
    #[oai(status = 204)]
    NoContent,
}
