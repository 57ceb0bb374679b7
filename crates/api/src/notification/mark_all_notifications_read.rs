use crate::{
    error::AgendaError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use agenda_api_structs::mark_all_notifications_read::*;
use agenda_domain::ID;
use agenda_infra::AgendaContext;

fn handle_error(e: UseCaseErrors) -> AgendaError {
    match e {
        UseCaseErrors::StorageError(_) => AgendaError::InternalError,
    }
}

pub async fn mark_all_notifications_read_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<AgendaContext>,
) -> Result<HttpResponse, AgendaError> {
    let usecase = MarkAllNotificationsReadUseCase {
        user_id: path_params.user_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|updated| HttpResponse::Ok().json(APIResponse { updated }))
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct MarkAllNotificationsReadUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    StorageError(String),
}

#[async_trait::async_trait(?Send)]
impl UseCase for MarkAllNotificationsReadUseCase {
    type Response = u64;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "MarkAllNotificationsRead";

    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Errors> {
        ctx.repos
            .notifications
            .mark_all_read(&self.user_id)
            .await
            .map_err(|e| UseCaseErrors::StorageError(e.to_string()))
    }
}
