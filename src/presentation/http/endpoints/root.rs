use std::sync::Arc;

use poem_openapi::Tags;

use crate::{
    application::usecases::{
        check_health::CheckHealthUseCase, create_campaign::CreateCampaignUseCase,
        create_customer::CreateCustomerUseCase, delete_customer::DeleteCustomerUseCase,
        get_campaign::GetCampaignUseCase, get_customer::GetCustomerUseCase,
        list_campaign_messages::ListCampaignMessagesUseCase,
        list_campaigns::ListCampaignsUseCase, preview_message::PreviewMessageUseCase,
        retry_message::RetryMessageUseCase, send_campaign::SendCampaignUseCase,
    },
    presentation::http::endpoints::{
        campaigns::CampaignsEndpoints, customers::CustomersEndpoints, health::HealthEndpoints,
        messages::MessagesEndpoints,
    },
};

#[derive(Clone)]
pub struct ApiState {
    pub create_campaign_usecase: Arc<CreateCampaignUseCase>,
    pub get_campaign_usecase: Arc<GetCampaignUseCase>,
    pub list_campaigns_usecase: Arc<ListCampaignsUseCase>,
    pub send_campaign_usecase: Arc<SendCampaignUseCase>,
    pub preview_message_usecase: Arc<PreviewMessageUseCase>,
    pub list_campaign_messages_usecase: Arc<ListCampaignMessagesUseCase>,
    pub create_customer_usecase: Arc<CreateCustomerUseCase>,
    pub get_customer_usecase: Arc<GetCustomerUseCase>,
    pub delete_customer_usecase: Arc<DeleteCustomerUseCase>,
    pub retry_message_usecase: Arc<RetryMessageUseCase>,
    pub check_health_usecase: Arc<CheckHealthUseCase>,
}

/// Enum of API sections (tags)
#[derive(Tags)]
pub enum EndpointsTags {
    Health,
    Campaigns,
    Customers,
    Messages,
}

pub type Endpoints = (
    HealthEndpoints,
    CampaignsEndpoints,
    CustomersEndpoints,
    MessagesEndpoints,
);

pub fn endpoints(state: Arc<ApiState>) -> Endpoints {
    (
        HealthEndpoints::new(state.clone()),
        CampaignsEndpoints::new(state.clone()),
        CustomersEndpoints::new(state.clone()),
        MessagesEndpoints::new(state),
    )
}
