use crate::{APIResponse, BaseClient};
use agenda_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Runs the reminder dispatcher once
    pub async fn send_due(&self) -> APIResponse<send_reminders::APIResponse> {
        self.base
            .post((), "reminders/send".into(), StatusCode::OK)
            .await
    }

    /// Same as `send_due` but through the endpoint meant for cron jobs
    pub async fn trigger_cron(&self) -> APIResponse<cron_send_reminders::APIResponse> {
        self.base.get("cron/reminders".into(), StatusCode::OK).await
    }
}
