use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use agenda_api_structs::{cron_send_reminders, dtos::ReminderResultDTO, send_reminders::*};
use agenda_domain::{Appointment, Notification, Reminder, ReminderKind, User, ID};
use agenda_infra::AgendaContext;
use std::collections::HashMap;
use tracing::{debug, error, warn};

pub async fn send_reminders_controller(ctx: web::Data<AgendaContext>) -> HttpResponse {
    match execute(SendRemindersUseCase, &ctx).await {
        Ok(outcomes) => HttpResponse::Ok().json(to_api_response(outcomes)),
        Err(UseCaseErrors::StorageError(e)) => {
            HttpResponse::InternalServerError().json(APIErrorResponse::new(e))
        }
    }
}

/// Answers bare `OPTIONS` requests. Real CORS preflights are answered by the
/// `Cors` middleware before they reach this route.
pub async fn send_reminders_preflight_controller() -> HttpResponse {
    HttpResponse::Ok().body("ok")
}

/// Entry point for external schedulers
pub async fn cron_send_reminders_controller(ctx: web::Data<AgendaContext>) -> HttpResponse {
    match execute(SendRemindersUseCase, &ctx).await {
        Ok(outcomes) => HttpResponse::Ok().json(to_api_response(outcomes)),
        Err(UseCaseErrors::StorageError(error)) => HttpResponse::InternalServerError()
            .json(cron_send_reminders::APIErrorResponse { error }),
    }
}

fn to_api_response(outcomes: Vec<ReminderOutcome>) -> APIResponse {
    APIResponse::new(outcomes.into_iter().map(|o| o.into_dto()).collect())
}

/// Creates a `Notification` for every due `Reminder` and marks it as sent
#[derive(Debug)]
pub struct SendRemindersUseCase;

#[derive(Debug)]
pub enum UseCaseErrors {
    /// The due reminders could not be fetched, nothing was processed
    StorageError(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReminderOutcome {
    pub reminder_id: ID,
    pub notification_id: Option<ID>,
    pub error: Option<String>,
}

impl ReminderOutcome {
    pub fn success(&self) -> bool {
        self.error.is_none()
    }

    fn into_dto(self) -> ReminderResultDTO {
        ReminderResultDTO {
            success: self.success(),
            id: self.reminder_id,
            notification_id: self.notification_id,
            error: self.error,
        }
    }
}

#[derive(Debug)]
struct DueReminder {
    reminder: Reminder,
    appointment: Option<Appointment>,
    user: Option<User>,
}

async fn fetch_due_reminders(now: i64, ctx: &AgendaContext) -> anyhow::Result<Vec<DueReminder>> {
    let reminders = ctx.repos.reminders.find_due(now).await?;
    if reminders.is_empty() {
        return Ok(Vec::new());
    }

    let appointment_ids = reminders
        .iter()
        .map(|r| r.appointment_id.clone())
        .collect::<Vec<_>>();
    let appointment_lookup = ctx
        .repos
        .appointments
        .find_many(&appointment_ids)
        .await?
        .into_iter()
        .map(|a| (a.id.clone(), a))
        .collect::<HashMap<_, _>>();

    let user_ids = appointment_lookup
        .values()
        .map(|a| a.user_id.clone())
        .collect::<Vec<_>>();
    let user_lookup = ctx
        .repos
        .users
        .find_many(&user_ids)
        .await?
        .into_iter()
        .map(|u| (u.id.clone(), u))
        .collect::<HashMap<_, _>>();

    Ok(reminders
        .into_iter()
        .map(|reminder| {
            // Several reminders may point to the same appointment
            let appointment = appointment_lookup.get(&reminder.appointment_id).cloned();
            let user = appointment
                .as_ref()
                .and_then(|a| user_lookup.get(&a.user_id).cloned());
            DueReminder {
                reminder,
                appointment,
                user,
            }
        })
        .collect())
}

async fn process_due_reminders(
    due_reminders: Vec<DueReminder>,
    now: i64,
    ctx: &AgendaContext,
) -> Vec<ReminderOutcome> {
    let stale_before = now - ctx.config.reminder_claim_timeout;
    let mut outcomes = Vec::with_capacity(due_reminders.len());

    for due in due_reminders {
        let reminder = due.reminder;
        let appointment = match (due.appointment, due.user) {
            (Some(appointment), Some(_user)) => appointment,
            _ => {
                debug!(
                    "Skipping reminder: {} as its appointment or user could not be found",
                    reminder.id
                );
                continue;
            }
        };

        match ctx.repos.reminders.claim(&reminder.id, now, stale_before).await {
            Ok(true) => (),
            Ok(false) => {
                debug!("Reminder: {} is handled by another run", reminder.id);
                continue;
            }
            Err(e) => {
                outcomes.push(ReminderOutcome {
                    reminder_id: reminder.id,
                    notification_id: None,
                    error: Some(e.to_string()),
                });
                continue;
            }
        }

        if let ReminderKind::Unknown(reminder_type) = reminder.kind() {
            warn!(
                "Reminder: {} has unknown type: {}, sending it as a 1 hour reminder",
                reminder.id, reminder_type
            );
        }

        let notification = Notification::for_reminder(&reminder, &appointment, now);
        if let Err(e) = ctx.repos.notifications.insert(&notification).await {
            if let Err(release_error) = ctx.repos.reminders.release(&reminder.id).await {
                error!(
                    "Unable to release claim on reminder: {}. Error: {:?}",
                    reminder.id, release_error
                );
            }
            outcomes.push(ReminderOutcome {
                reminder_id: reminder.id,
                notification_id: None,
                error: Some(e.to_string()),
            });
            continue;
        }

        let error = ctx
            .repos
            .reminders
            .mark_sent(&reminder.id)
            .await
            .err()
            .map(|e| e.to_string());
        outcomes.push(ReminderOutcome {
            reminder_id: reminder.id,
            notification_id: Some(notification.id),
            error,
        });
    }

    outcomes
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendRemindersUseCase {
    type Response = Vec<ReminderOutcome>;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "SendReminders";

    async fn execute(&mut self, ctx: &AgendaContext) -> Result<Self::Response, Self::Errors> {
        let now = ctx.sys.get_timestamp_millis();

        let due_reminders = fetch_due_reminders(now, ctx)
            .await
            .map_err(|e| UseCaseErrors::StorageError(e.to_string()))?;

        Ok(process_due_reminders(due_reminders, now, ctx).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_utils::{FailingNotificationRepo, StaticTimeSys};
    use actix_web::{
        http::{Method, StatusCode},
        test, App,
    };
    use agenda_infra::{Config, IReminderRepo};
    use std::sync::Arc;

    const NOW: i64 = 1613862000000; // Sun Feb 21 2021 00:00:00 GMT+0100 (Central European Standard Time)
    const HOUR: i64 = 1000 * 60 * 60;

    /// Delegates to the real repo but can be told to fail some operations
    struct FaultyReminderRepo {
        inner: Arc<dyn IReminderRepo>,
        fail_find_due: bool,
        fail_mark_sent: bool,
    }

    #[async_trait::async_trait]
    impl IReminderRepo for FaultyReminderRepo {
        async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
            self.inner.insert(reminder).await
        }
        async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
            self.inner.find(reminder_id).await
        }
        async fn find_due(&self, now: i64) -> anyhow::Result<Vec<Reminder>> {
            if self.fail_find_due {
                anyhow::bail!("Connection refused");
            }
            self.inner.find_due(now).await
        }
        async fn claim(&self, reminder_id: &ID, now: i64, stale_before: i64) -> anyhow::Result<bool> {
            self.inner.claim(reminder_id, now, stale_before).await
        }
        async fn release(&self, reminder_id: &ID) -> anyhow::Result<()> {
            self.inner.release(reminder_id).await
        }
        async fn mark_sent(&self, reminder_id: &ID) -> anyhow::Result<()> {
            if self.fail_mark_sent {
                anyhow::bail!("Update rejected");
            }
            self.inner.mark_sent(reminder_id).await
        }
    }

    struct TestContext {
        ctx: AgendaContext,
        user: User,
        appointment: Appointment,
    }

    async fn setup() -> TestContext {
        let mut ctx = AgendaContext::create_inmemory(Config::default());
        ctx.sys = Arc::new(StaticTimeSys(NOW));

        let user = User::new(Some("owner@example.com".into()));
        ctx.repos.users.insert(&user).await.unwrap();
        let appointment = Appointment::new(user.id.clone(), "Haircut", NOW + 24 * HOUR);
        ctx.repos.appointments.insert(&appointment).await.unwrap();

        TestContext {
            ctx,
            user,
            appointment,
        }
    }

    async fn insert_reminder(
        ctx: &AgendaContext,
        appointment: &Appointment,
        reminder_type: &str,
        scheduled_for: i64,
    ) -> Reminder {
        let reminder = Reminder::new(
            appointment.id.clone(),
            appointment.user_id.clone(),
            ReminderKind::parse(reminder_type),
            scheduled_for,
            scheduled_for - HOUR,
        );
        ctx.repos.reminders.insert(&reminder).await.unwrap();
        reminder
    }

    async fn notifications_of(ctx: &AgendaContext, user: &User) -> Vec<Notification> {
        ctx.repos
            .notifications
            .find_by_user(&user.id, 100)
            .await
            .unwrap()
    }

    #[actix_web::test]
    async fn nothing_due_gives_empty_result() {
        let TestContext { ctx, .. } = setup().await;

        let res = execute(SendRemindersUseCase, &ctx).await.unwrap();
        assert!(res.is_empty());

        let res = to_api_response(res);
        assert!(res.success);
        assert_eq!(res.processed, 0);
        assert!(res.results.is_empty());
    }

    #[actix_web::test]
    async fn sends_day_before_reminder() {
        let TestContext {
            ctx,
            user,
            appointment,
        } = setup().await;
        let reminder = insert_reminder(&ctx, &appointment, "24h", NOW - 1000).await;

        let res = execute(SendRemindersUseCase, &ctx).await.unwrap();
        assert_eq!(res.len(), 1);
        assert_eq!(res[0].reminder_id, reminder.id);
        assert!(res[0].success());

        let notifications = notifications_of(&ctx, &user).await;
        assert_eq!(notifications.len(), 1);
        let notification = &notifications[0];
        assert_eq!(res[0].notification_id, Some(notification.id.clone()));
        assert_eq!(notification.title, "Appointment Reminder");
        assert!(notification.message.contains("tomorrow"));
        assert!(notification.message.contains("Haircut"));
        assert_eq!(notification.related_id, Some(appointment.id.clone()));
        assert!(!notification.is_read);

        assert!(ctx.repos.reminders.find(&reminder.id).await.unwrap().sent);
    }

    #[actix_web::test]
    async fn sends_hour_before_reminder() {
        let TestContext {
            ctx,
            user,
            appointment,
        } = setup().await;
        let reminder = insert_reminder(&ctx, &appointment, "1h", NOW).await;

        let res = execute(SendRemindersUseCase, &ctx).await.unwrap();
        assert_eq!(res.len(), 1);

        let notifications = notifications_of(&ctx, &user).await;
        assert_eq!(notifications.len(), 1);
        assert!(notifications[0].message.contains("in 1 hour"));
        assert!(!notifications[0].message.contains("tomorrow"));
        assert!(ctx.repos.reminders.find(&reminder.id).await.unwrap().sent);
    }

    #[actix_web::test]
    async fn unknown_reminder_type_is_sent_as_hour_before() {
        let TestContext {
            ctx,
            user,
            appointment,
        } = setup().await;
        insert_reminder(&ctx, &appointment, "30m", NOW).await;

        let res = execute(SendRemindersUseCase, &ctx).await.unwrap();
        assert_eq!(res.len(), 1);
        assert!(res[0].success());
        assert!(notifications_of(&ctx, &user).await[0]
            .message
            .contains("in 1 hour"));
    }

    #[actix_web::test]
    async fn skips_reminders_without_appointment_or_user() {
        let TestContext { ctx, user, .. } = setup().await;

        let orphan_appointment = Appointment::new(user.id.clone(), "Massage", NOW);
        // Never stored
        let orphan = insert_reminder(&ctx, &orphan_appointment, "24h", NOW - 1000).await;

        let ownerless_appointment = Appointment::new(ID::new(), "Nails", NOW);
        ctx.repos
            .appointments
            .insert(&ownerless_appointment)
            .await
            .unwrap();
        let ownerless = insert_reminder(&ctx, &ownerless_appointment, "1h", NOW - 1000).await;

        let res = execute(SendRemindersUseCase, &ctx).await.unwrap();
        assert!(res.is_empty());
        assert!(notifications_of(&ctx, &user).await.is_empty());

        for id in [&orphan.id, &ownerless.id] {
            let reminder = ctx.repos.reminders.find(id).await.unwrap();
            assert!(!reminder.sent);
            assert_eq!(reminder.claimed_at, None);
        }
    }

    #[actix_web::test]
    async fn failed_notification_insert_keeps_reminder_unsent() {
        let TestContext {
            mut ctx,
            appointment,
            ..
        } = setup().await;
        ctx.repos.notifications = Arc::new(FailingNotificationRepo);
        let reminder = insert_reminder(&ctx, &appointment, "24h", NOW - 1000).await;

        let res = execute(SendRemindersUseCase, &ctx).await.unwrap();
        assert_eq!(res.len(), 1);
        assert!(!res[0].success());
        assert_eq!(res[0].notification_id, None);
        assert_eq!(
            res[0].error.as_deref(),
            Some("Notification insert rejected")
        );

        let reminder = ctx.repos.reminders.find(&reminder.id).await.unwrap();
        assert!(!reminder.sent);
        // Claim is released so the next run retries right away
        assert_eq!(reminder.claimed_at, None);

        let dto = to_api_response(res).results.remove(0);
        assert!(!dto.success);
        assert_eq!(dto.id, reminder.id);
        assert!(dto.error.is_some());
    }

    #[actix_web::test]
    async fn failed_mark_sent_is_reported_with_notification() {
        let TestContext {
            mut ctx,
            user,
            appointment,
        } = setup().await;
        ctx.repos.reminders = Arc::new(FaultyReminderRepo {
            inner: ctx.repos.reminders.clone(),
            fail_find_due: false,
            fail_mark_sent: true,
        });
        insert_reminder(&ctx, &appointment, "24h", NOW - 1000).await;

        let res = execute(SendRemindersUseCase, &ctx).await.unwrap();
        assert_eq!(res.len(), 1);
        assert!(!res[0].success());
        assert_eq!(res[0].error.as_deref(), Some("Update rejected"));

        let notifications = notifications_of(&ctx, &user).await;
        assert_eq!(notifications.len(), 1);
        assert_eq!(res[0].notification_id, Some(notifications[0].id.clone()));
    }

    #[actix_web::test]
    async fn failed_fetch_aborts_the_run() {
        let TestContext {
            mut ctx,
            user,
            appointment,
        } = setup().await;
        ctx.repos.reminders = Arc::new(FaultyReminderRepo {
            inner: ctx.repos.reminders.clone(),
            fail_find_due: true,
            fail_mark_sent: false,
        });
        insert_reminder(&ctx, &appointment, "24h", NOW - 1000).await;

        match execute(SendRemindersUseCase, &ctx).await {
            Err(UseCaseErrors::StorageError(e)) => assert_eq!(e, "Connection refused"),
            Ok(res) => panic!("Expected the run to fail, got: {:?}", res),
        }
        assert!(notifications_of(&ctx, &user).await.is_empty());
    }

    #[actix_web::test]
    async fn future_reminders_are_not_fetched() {
        let TestContext {
            ctx,
            user,
            appointment,
        } = setup().await;
        let reminder = insert_reminder(&ctx, &appointment, "1h", NOW + 1).await;

        let res = execute(SendRemindersUseCase, &ctx).await.unwrap();
        assert!(res.is_empty());
        assert!(notifications_of(&ctx, &user).await.is_empty());
        assert!(!ctx.repos.reminders.find(&reminder.id).await.unwrap().sent);
    }

    #[actix_web::test]
    async fn processes_in_fetch_order() {
        let TestContext {
            ctx, appointment, ..
        } = setup().await;
        let late = insert_reminder(&ctx, &appointment, "1h", NOW - 1000).await;
        let early = insert_reminder(&ctx, &appointment, "24h", NOW - 24 * HOUR).await;

        let res = execute(SendRemindersUseCase, &ctx).await.unwrap();
        let ids = res.into_iter().map(|o| o.reminder_id).collect::<Vec<_>>();
        assert_eq!(ids, vec![early.id, late.id]);
    }

    #[actix_web::test]
    async fn second_run_sends_nothing() {
        let TestContext {
            ctx,
            user,
            appointment,
        } = setup().await;
        insert_reminder(&ctx, &appointment, "24h", NOW - 1000).await;

        assert_eq!(execute(SendRemindersUseCase, &ctx).await.unwrap().len(), 1);
        assert!(execute(SendRemindersUseCase, &ctx).await.unwrap().is_empty());
        assert_eq!(notifications_of(&ctx, &user).await.len(), 1);
    }

    #[actix_web::test]
    async fn overlapping_runs_create_one_notification() {
        let TestContext {
            ctx,
            user,
            appointment,
        } = setup().await;
        let reminder = insert_reminder(&ctx, &appointment, "24h", NOW - 1000).await;

        // Both runs fetch before either of them has processed anything
        let first_fetch = fetch_due_reminders(NOW, &ctx).await.unwrap();
        let second_fetch = fetch_due_reminders(NOW, &ctx).await.unwrap();
        assert_eq!(first_fetch.len(), 1);
        assert_eq!(second_fetch.len(), 1);

        let first = process_due_reminders(first_fetch, NOW, &ctx).await;
        let second = process_due_reminders(second_fetch, NOW, &ctx).await;
        assert_eq!(first.len(), 1);
        assert!(first[0].success());
        assert!(second.is_empty());

        assert_eq!(notifications_of(&ctx, &user).await.len(), 1);
        assert!(ctx.repos.reminders.find(&reminder.id).await.unwrap().sent);
    }

    #[actix_web::test]
    async fn abandoned_claims_are_taken_over() {
        let TestContext {
            ctx,
            user,
            appointment,
        } = setup().await;
        let reminder = insert_reminder(&ctx, &appointment, "24h", NOW - 1000).await;

        // A crashed run claimed the reminder long ago
        let claimed_at = NOW - ctx.config.reminder_claim_timeout - 1;
        assert!(ctx
            .repos
            .reminders
            .claim(&reminder.id, claimed_at, 0)
            .await
            .unwrap());

        let res = execute(SendRemindersUseCase, &ctx).await.unwrap();
        assert_eq!(res.len(), 1);
        assert!(res[0].success());
        assert_eq!(notifications_of(&ctx, &user).await.len(), 1);
    }

    #[actix_web::test]
    async fn failed_fetch_responds_with_error_body() {
        let TestContext {
            mut ctx,
            appointment,
            ..
        } = setup().await;
        ctx.repos.reminders = Arc::new(FaultyReminderRepo {
            inner: ctx.repos.reminders.clone(),
            fail_find_due: true,
            fail_mark_sent: false,
        });
        insert_reminder(&ctx, &appointment, "24h", NOW - 1000).await;

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ctx))
                .service(web::scope("/api/v1").configure(crate::configure_server_api)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/reminders/send")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(
            body,
            serde_json::json!({ "success": false, "error": "Connection refused" })
        );

        let req = test::TestRequest::get()
            .uri("/api/v1/cron/reminders")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body, serde_json::json!({ "error": "Connection refused" }));
    }

    #[actix_web::test]
    async fn bare_options_request_is_answered() {
        let TestContext { ctx, .. } = setup().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ctx))
                .service(web::scope("/api/v1").configure(crate::configure_server_api)),
        )
        .await;

        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/api/v1/reminders/send")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, "ok");
    }
}
