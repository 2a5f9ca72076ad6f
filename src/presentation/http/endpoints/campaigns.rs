use std::sync::Arc;

use poem::Result as PoemResult;
use poem_openapi::{
    OpenApi,
    param::{Path, Query},
    payload::Json,
};
use uuid::Uuid;

use crate::{
    application::usecases::{
        create_campaign::CreateCampaignRequest, preview_message::PreviewMessageRequest,
        send_campaign::SendCampaignRequest,
    },
    domain::models::CampaignFilter,
    presentation::{
        http::{
            endpoints::root::{ApiState, EndpointsTags},
            errors::map_domain_error,
            mappers::{
                map_campaign, map_campaign_details, map_campaign_page, map_message, map_preview,
                map_send_result,
            },
            requests::{
                CreateCampaignRequestDto, PreviewMessageRequestDto, SendCampaignRequestDto,
            },
            responses::{
                CampaignDetailsDto, CampaignListDto, CreatedCampaignResponse, OutboundMessageDto,
                PreviewMessageResponseDto, SendCampaignAccepted,
            },
        },
        models::{CampaignStatusDto, ChannelKind},
    },
};

#[derive(Clone)]
pub struct CampaignsEndpoints {
    state: Arc<ApiState>,
}

impl CampaignsEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl CampaignsEndpoints {
    #[oai(path = "/campaigns", method = "post", tag = EndpointsTags::Campaigns)]
    pub async fn create_campaign(
        &self,
        request: Json<CreateCampaignRequestDto>,
    ) -> PoemResult<CreatedCampaignResponse> {
        let request = request.0;
        let campaign = self
            .state
            .create_campaign_usecase
            .execute(CreateCampaignRequest {
                name: request.name,
                channel: request.channel.into(),
                base_template: request.base_template,
                scheduled_at: request.scheduled_at,
            })
            .await
            .map_err(map_domain_error)?;

        Ok(CreatedCampaignResponse::Created(Json(map_campaign(
            &campaign,
        ))))
    }

    #[oai(path = "/campaigns", method = "get", tag = EndpointsTags::Campaigns)]
    pub async fn list_campaigns(
        &self,
        status: Query<Option<CampaignStatusDto>>,
        channel: Query<Option<ChannelKind>>,
        page: Query<Option<u32>>,
        page_size: Query<Option<u32>>,
    ) -> PoemResult<Json<CampaignListDto>> {
        let filter = CampaignFilter {
            status: status.0.map(Into::into),
            channel: channel.0.map(Into::into),
            page: page.0.unwrap_or(1),
            page_size: page_size.0.unwrap_or(CampaignFilter::DEFAULT_PAGE_SIZE),
        };

        let page = self
            .state
            .list_campaigns_usecase
            .execute(filter)
            .await
            .map_err(map_domain_error)?;

        Ok(Json(map_campaign_page(&page)))
    }

    #[oai(path = "/campaigns/:id", method = "get", tag = EndpointsTags::Campaigns)]
    pub async fn get_campaign(&self, id: Path<Uuid>) -> PoemResult<Json<CampaignDetailsDto>> {
        let details = self
            .state
            .get_campaign_usecase
            .execute(id.0)
            .await
            .map_err(map_domain_error)?;

        Ok(Json(map_campaign_details(&details)))
    }

    /// Creates one pending message per known recipient and queues them
    #[oai(path = "/campaigns/:id/send", method = "post", tag = EndpointsTags::Campaigns)]
    pub async fn send_campaign(
        &self,
        id: Path<Uuid>,
        request: Json<SendCampaignRequestDto>,
    ) -> PoemResult<SendCampaignAccepted> {
        let result = self
            .state
            .send_campaign_usecase
            .execute(SendCampaignRequest {
                campaign_id: id.0,
                customer_ids: request.0.customer_ids,
            })
            .await
            .map_err(map_domain_error)?;

        Ok(SendCampaignAccepted::Accepted(Json(map_send_result(&result))))
    }

    #[oai(
        path = "/campaigns/:id/personalized-preview",
        method = "post",
        tag = EndpointsTags::Campaigns
    )]
    pub async fn preview_message(
        &self,
        id: Path<Uuid>,
        request: Json<PreviewMessageRequestDto>,
    ) -> PoemResult<Json<PreviewMessageResponseDto>> {
        let request = request.0;
        let preview = self
            .state
            .preview_message_usecase
            .execute(PreviewMessageRequest {
                campaign_id: id.0,
                customer_id: request.customer_id,
                override_template: request.override_template,
            })
            .await
            .map_err(map_domain_error)?;

        Ok(Json(map_preview(&preview)))
    }

    #[oai(path = "/campaigns/:id/messages", method = "get", tag = EndpointsTags::Campaigns)]
    pub async fn list_campaign_messages(
        &self,
        id: Path<Uuid>,
    ) -> PoemResult<Json<Vec<OutboundMessageDto>>> {
        let messages = self
            .state
            .list_campaign_messages_usecase
            .execute(id.0)
            .await
            .map_err(map_domain_error)?;

        Ok(Json(messages.iter().map(map_message).collect()))
    }
}
