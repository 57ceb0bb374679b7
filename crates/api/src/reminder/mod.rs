pub mod send_reminders;

use actix_web::{http::Method, web};
use send_reminders::{
    cron_send_reminders_controller, send_reminders_controller,
    send_reminders_preflight_controller,
};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/reminders/send", web::post().to(send_reminders_controller));
    cfg.route(
        "/reminders/send",
        web::method(Method::OPTIONS).to(send_reminders_preflight_controller),
    );
    cfg.route(
        "/cron/reminders",
        web::get().to(cron_send_reminders_controller),
    );
}
