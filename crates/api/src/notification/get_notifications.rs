use crate::{
    error::AgendaError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use agenda_api_structs::get_notifications::*;
use agenda_domain::{Notification, ID};
use agenda_infra::AgendaContext;

fn handle_error(e: UseCaseErrors) -> AgendaError {
    match e {
        UseCaseErrors::StorageError(_) => AgendaError::InternalError,
    }
}

pub async fn get_notifications_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, AgendaError> {
    let usecase = GetNotificationsUseCase {
        user_id: path_params.user_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|(notifications, unread_count)| {
            HttpResponse::Ok().json(APIResponse::new(notifications, unread_count))
        })
        .map_err(handle_error)
}

/// The latest `Notification`s of a `User` together with the unread count,
/// which is what the dashboard notification bell shows
#[derive(Debug)]
pub struct GetNotificationsUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    StorageError(String),
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetNotificationsUseCase {
    type Response = (Vec<Notification>, i64);

    type Errors = UseCaseErrors;

    const NAME: &'static str = "GetNotifications";

    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Errors> {
        let notifications = ctx
            .repos
            .notifications
            .find_by_user(&self.user_id, ctx.config.notifications_query_limit)
            .await
            .map_err(|e| UseCaseErrors::StorageError(e.to_string()))?;
        let unread_count = ctx
            .repos
            .notifications
            .count_unread(&self.user_id)
            .await
            .map_err(|e| UseCaseErrors::StorageError(e.to_string()))?;

        Ok((notifications, unread_count))
    }
}
