use crate::{
    application::usecases::{
        check_health::HealthReport, list_campaigns::CampaignPage,
        preview_message::PreviewMessageResponse, send_campaign::SendCampaignResponse,
    },
    domain::models::{Campaign, CampaignStats, CampaignWithStats, Customer, OutboundMessage},
    presentation::http::responses::{
        CampaignDetailsDto, CampaignDto, CampaignListDto, CampaignStatsDto, CustomerDto,
        CustomerPreviewDto, HealthDto, HealthResponse, OutboundMessageDto, PaginationDto,
        PreviewMessageResponseDto, SendCampaignResponseDto,
    },
};

pub fn map_campaign(campaign: &Campaign) -> CampaignDto {
    CampaignDto {
        id: campaign.id,
        name: campaign.name.clone(),
        channel: campaign.channel.into(),
        status: campaign.status.into(),
        base_template: campaign.base_template.clone(),
        scheduled_at: campaign.scheduled_at.map(|at| at.to_rfc3339()),
        created_at: campaign.created_at.to_rfc3339(),
    }
}

fn map_stats(stats: &CampaignStats) -> CampaignStatsDto {
    CampaignStatsDto {
        total: stats.total,
        pending: stats.pending,
        sent: stats.sent,
        failed: stats.failed,
    }
}

pub fn map_campaign_details(details: &CampaignWithStats) -> CampaignDetailsDto {
    CampaignDetailsDto {
        campaign: map_campaign(&details.campaign),
        stats: map_stats(&details.stats),
    }
}

pub fn map_campaign_page(page: &CampaignPage) -> CampaignListDto {
    CampaignListDto {
        data: page.campaigns.iter().map(map_campaign).collect(),
        pagination: PaginationDto {
            page: page.page,
            page_size: page.page_size,
            total_count: page.total_count,
            total_pages: page.total_pages,
        },
    }
}

pub fn map_send_result(result: &SendCampaignResponse) -> SendCampaignResponseDto {
    SendCampaignResponseDto {
        campaign_id: result.campaign_id,
        messages_queued: result.queued_count as u64,
        status: result.status.into(),
    }
}

pub fn map_preview(preview: &PreviewMessageResponse) -> PreviewMessageResponseDto {
    let customer = &preview.customer;
    PreviewMessageResponseDto {
        rendered_message: preview.rendered_message.clone(),
        used_template: preview.used_template.clone(),
        customer: CustomerPreviewDto {
            id: customer.id,
            first_name: customer.first_name.clone().unwrap_or_default(),
            last_name: customer.last_name.clone().unwrap_or_default(),
            phone: customer.phone.clone(),
        },
    }
}

pub fn map_customer(customer: &Customer) -> CustomerDto {
    CustomerDto {
        id: customer.id,
        phone: customer.phone.clone(),
        first_name: customer.first_name.clone(),
        last_name: customer.last_name.clone(),
        location: customer.location.clone(),
        preferred_product: customer.preferred_product.clone(),
        created_at: customer.created_at.to_rfc3339(),
    }
}

pub fn map_message(message: &OutboundMessage) -> OutboundMessageDto {
    OutboundMessageDto {
        id: message.id,
        campaign_id: message.campaign_id,
        customer_id: message.customer_id,
        status: message.status.into(),
        rendered_content: message.rendered_content.clone(),
        last_error: message.last_error.clone(),
        retry_count: message.retry_count,
        created_at: message.created_at.to_rfc3339(),
        updated_at: message.updated_at.to_rfc3339(),
    }
}

pub fn map_health(report: &HealthReport) -> HealthResponse {
    let services = report
        .services
        .iter()
        .map(|(name, up)| {
            let state = if *up { "healthy" } else { "unhealthy" };
            (name.to_string(), state.to_string())
        })
        .collect();

    if report.healthy {
        HealthResponse::Healthy(poem_openapi::payload::Json(HealthDto {
            status: "healthy".to_string(),
            services,
        }))
    } else {
        HealthResponse::Unhealthy(poem_openapi::payload::Json(HealthDto {
            status: "unhealthy".to_string(),
            services,
        }))
    }
}
