use poem_openapi::Enum;

use crate::domain::models::{CampaignStatus, Channel, MessageStatus};

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum ChannelKind {
    #[oai(rename = "sms")]
    Sms,
    #[oai(rename = "chat")]
    Chat,
}

impl From<ChannelKind> for Channel {
    fn from(value: ChannelKind) -> Self {
        match value {
            ChannelKind::Sms => Channel::Sms,
            ChannelKind::Chat => Channel::Chat,
        }
    }
}

impl From<Channel> for ChannelKind {
    fn from(value: Channel) -> Self {
        match value {
            Channel::Sms => ChannelKind::Sms,
            Channel::Chat => ChannelKind::Chat,
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum CampaignStatusDto {
    #[oai(rename = "draft")]
    Draft,
    #[oai(rename = "scheduled")]
    Scheduled,
    #[oai(rename = "sending")]
    Sending,
    #[oai(rename = "sent")]
    Sent,
    #[oai(rename = "failed")]
    Failed,
}

impl From<CampaignStatusDto> for CampaignStatus {
    fn from(value: CampaignStatusDto) -> Self {
        match value {
            CampaignStatusDto::Draft => CampaignStatus::Draft,
            CampaignStatusDto::Scheduled => CampaignStatus::Scheduled,
            CampaignStatusDto::Sending => CampaignStatus::Sending,
            CampaignStatusDto::Sent => CampaignStatus::Sent,
            CampaignStatusDto::Failed => CampaignStatus::Failed,
        }
    }
}

impl From<CampaignStatus> for CampaignStatusDto {
    fn from(value: CampaignStatus) -> Self {
        match value {
            CampaignStatus::Draft => CampaignStatusDto::Draft,
            CampaignStatus::Scheduled => CampaignStatusDto::Scheduled,
            CampaignStatus::Sending => CampaignStatusDto::Sending,
            CampaignStatus::Sent => CampaignStatusDto::Sent,
            CampaignStatus::Failed => CampaignStatusDto::Failed,
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum MessageStatusDto {
    #[oai(rename = "pending")]
    Pending,
    #[oai(rename = "sent")]
    Sent,
    #[oai(rename = "failed")]
    Failed,
}

impl From<MessageStatus> for MessageStatusDto {
    fn from(value: MessageStatus) -> Self {
        match value {
            MessageStatus::Pending => MessageStatusDto::Pending,
            MessageStatus::Sent => MessageStatusDto::Sent,
            MessageStatus::Failed => MessageStatusDto::Failed,
        }
    }
}
