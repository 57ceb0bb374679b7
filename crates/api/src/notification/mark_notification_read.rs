use crate::{
    error::AgendaError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use agenda_api_structs::mark_notification_read::*;
use agenda_domain::{Notification, ID};
use agenda_infra::AgendaContext;

fn handle_error(e: UseCaseErrors) -> AgendaError {
    match e {
        UseCaseErrors::NotFound(notification_id) => AgendaError::NotFound(format!(
            "The notification with id: {}, was not found.",
            notification_id
        )),
        UseCaseErrors::StorageError(_) => AgendaError::InternalError,
    }
}

pub async fn mark_notification_read_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, AgendaError> {
    let usecase = MarkNotificationReadUseCase {
        user_id: path_params.user_id.clone(),
        notification_id: path_params.notification_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|notification| HttpResponse::Ok().json(APIResponse::new(notification)))
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct MarkNotificationReadUseCase {
    pub user_id: ID,
    pub notification_id: ID,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    NotFound(ID),
    StorageError(String),
}

#[async_trait::async_trait(?Send)]
impl UseCase for MarkNotificationReadUseCase {
    type Response = Notification;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "MarkNotificationRead";

    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Errors> {
        ctx.repos
            .notifications
            .mark_read(&self.user_id, &self.notification_id)
            .await
            .map_err(|e| UseCaseErrors::StorageError(e.to_string()))?
            .ok_or_else(|| UseCaseErrors::NotFound(self.notification_id.clone()))
    }
}
