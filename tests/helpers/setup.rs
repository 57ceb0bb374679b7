use agenda_api::Application;
use agenda_infra::{AgendaContext, Config};
use agenda_sdk::AgendaSDK;

pub struct TestApp {
    pub ctx: AgendaContext,
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, AgendaSDK, String) {
    let config = Config {
        port: 0, // Random port
        database_url: None,
        send_reminders_interval_secs: 0,
        ..Config::default()
    };
    let ctx = AgendaContext::create_inmemory(config);

    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp { ctx };
    let sdk = AgendaSDK::new(address.clone());
    (app, sdk, address)
}
