use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::channel::Channel;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Draft,
    Scheduled,
    Sending,
    Sent,
    Failed,
}

impl CampaignStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Draft => "draft",
            CampaignStatus::Scheduled => "scheduled",
            CampaignStatus::Sending => "sending",
            CampaignStatus::Sent => "sent",
            CampaignStatus::Failed => "failed",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(CampaignStatus::Draft),
            "scheduled" => Some(CampaignStatus::Scheduled),
            "sending" => Some(CampaignStatus::Sending),
            "sent" => Some(CampaignStatus::Sent),
            "failed" => Some(CampaignStatus::Failed),
            _ => None,
        }
    }
}

impl std::fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: Uuid,
    pub name: String,
    pub channel: Channel,
    pub status: CampaignStatus,
    pub base_template: String,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Campaign {
    /// Only draft and scheduled campaigns accept a send; this is what keeps
    /// a campaign from being dispatched twice.
    pub fn can_be_sent(&self) -> bool {
        matches!(
            self.status,
            CampaignStatus::Draft | CampaignStatus::Scheduled
        )
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CampaignStats {
    pub total: u64,
    pub pending: u64,
    pub sent: u64,
    pub failed: u64,
}

impl CampaignStats {
    /// Final campaign status implied by these counts, or `None` while any
    /// message is still pending.
    ///
    /// Counts only ever move from pending towards sent/failed, so every
    /// snapshot taken after the last message settles yields the same answer.
    pub fn final_status(&self) -> Option<CampaignStatus> {
        if self.pending > 0 {
            return None;
        }
        if self.failed > 0 && self.sent == 0 {
            Some(CampaignStatus::Failed)
        } else {
            Some(CampaignStatus::Sent)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignWithStats {
    pub campaign: Campaign,
    pub stats: CampaignStats,
}

#[derive(Debug, Clone, Default)]
pub struct CampaignFilter {
    pub status: Option<CampaignStatus>,
    pub channel: Option<Channel>,
    pub page: u32,
    pub page_size: u32,
}

impl CampaignFilter {
    pub const DEFAULT_PAGE_SIZE: u32 = 20;
    pub const MAX_PAGE_SIZE: u32 = 100;

    pub fn normalized(mut self) -> Self {
        if self.page < 1 {
            self.page = 1;
        }
        if self.page_size < 1 {
            self.page_size = Self::DEFAULT_PAGE_SIZE;
        }
        self.page_size = self.page_size.min(Self::MAX_PAGE_SIZE);
        self
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn stats(pending: u64, sent: u64, failed: u64) -> CampaignStats {
        CampaignStats {
            total: pending + sent + failed,
            pending,
            sent,
            failed,
        }
    }

    #[test]
    fn pending_messages_keep_campaign_open() {
        assert_eq!(stats(3, 2, 0).final_status(), None);
        assert_eq!(stats(1, 0, 4).final_status(), None);
    }

    #[test]
    fn all_failed_means_failed() {
        assert_eq!(stats(0, 0, 5).final_status(), Some(CampaignStatus::Failed));
    }

    #[test]
    fn partial_success_counts_as_sent() {
        assert_eq!(stats(0, 3, 2).final_status(), Some(CampaignStatus::Sent));
        assert_eq!(stats(0, 5, 0).final_status(), Some(CampaignStatus::Sent));
    }

    #[test]
    fn only_draft_and_scheduled_are_sendable() {
        let mut campaign = Campaign {
            id: Uuid::new_v4(),
            name: "launch".to_string(),
            channel: Channel::Sms,
            status: CampaignStatus::Draft,
            base_template: "Hi {first_name}".to_string(),
            scheduled_at: None,
            created_at: Utc::now(),
        };
        assert!(campaign.can_be_sent());
        campaign.status = CampaignStatus::Scheduled;
        assert!(campaign.can_be_sent());
        for status in [
            CampaignStatus::Sending,
            CampaignStatus::Sent,
            CampaignStatus::Failed,
        ] {
            campaign.status = status;
            assert!(!campaign.can_be_sent(), "{status} must not be sendable");
        }
    }

    #[test]
    fn filter_defaults_and_clamps_page_size() {
        let filter = CampaignFilter::default().normalized();
        assert_eq!(filter.page, 1);
        assert_eq!(filter.page_size, 20);
        assert_eq!(filter.offset(), 0);

        let filter = CampaignFilter {
            page: 3,
            page_size: 500,
            ..Default::default()
        }
        .normalized();
        assert_eq!(filter.page_size, 100);
        assert_eq!(filter.offset(), 200);
    }

    proptest! {
        /// Any settled mix of outcomes resolves to failed iff nothing was sent.
        #[test]
        fn settled_campaign_fails_only_when_nothing_sent(sent in 0u64..50, failed in 0u64..50) {
            prop_assume!(sent + failed > 0);
            let status = stats(0, sent, failed).final_status();
            if sent == 0 {
                prop_assert_eq!(status, Some(CampaignStatus::Failed));
            } else {
                prop_assert_eq!(status, Some(CampaignStatus::Sent));
            }
        }
    }
}
