use crate::{
    reminder::send_reminders::SendRemindersUseCase,
    shared::usecase::execute,
};
use actix_web::rt::time::{interval, sleep_until, Instant};
use agenda_infra::AgendaContext;
use std::time::Duration;
use tracing::info;

/// Seconds to wait from `now_ts` (millis) until `secs_before_min` seconds
/// before the next whole minute
pub fn get_start_delay(now_ts: i64, secs_before_min: i64) -> u64 {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    let delay = if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    };
    delay as u64
}

pub fn start_send_reminders_job(ctx: AgendaContext) {
    let interval_secs = ctx.config.send_reminders_interval_secs;
    if interval_secs == 0 {
        info!("In-process reminder dispatching is disabled");
        return;
    }

    actix_web::rt::spawn(async move {
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now, 0);
        let start = Instant::now() + Duration::from_secs(secs_to_next_run);

        sleep_until(start).await;
        let mut send_interval = interval(Duration::from_secs(interval_secs));
        loop {
            send_interval.tick().await;
            // Runs are awaited one after another so they never overlap
            send_reminders(&ctx).await;
        }
    });
}

async fn send_reminders(ctx: &AgendaContext) {
    // Failures are already logged by `execute`
    if let Ok(outcomes) = execute(SendRemindersUseCase, ctx).await {
        let failed = outcomes.iter().filter(|o| !o.success()).count();
        info!(
            processed = outcomes.len(),
            failed, "Dispatched due reminders"
        );
    }
}
