use crate::{APIResponse, BaseClient, ID};
use agenda_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct NotificationClient {
    base: Arc<BaseClient>,
}

pub struct MarkNotificationReadInput {
    pub user_id: ID,
    pub notification_id: ID,
}

impl NotificationClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn get_by_user(&self, user_id: ID) -> APIResponse<get_notifications::APIResponse> {
        self.base
            .get(format!("user/{}/notifications", user_id), StatusCode::OK)
            .await
    }

    pub async fn mark_read(
        &self,
        input: MarkNotificationReadInput,
    ) -> APIResponse<mark_notification_read::APIResponse> {
        self.base
            .put(
                (),
                format!(
                    "user/{}/notifications/{}/read",
                    input.user_id, input.notification_id
                ),
                StatusCode::OK,
            )
            .await
    }

    pub async fn mark_all_read(
        &self,
        user_id: ID,
    ) -> APIResponse<mark_all_notifications_read::APIResponse> {
        self.base
            .put(
                (),
                format!("user/{}/notifications/read", user_id),
                StatusCode::OK,
            )
            .await
    }
}
