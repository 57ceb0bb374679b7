mod telemetry;

use agenda_api::Application;
use agenda_infra::{run_migration, setup_context, Config};
use telemetry::{get_subscriber, init_subscriber};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    openssl_probe::init_ssl_cert_env_vars();

    let subscriber = get_subscriber("agenda_server".into(), "info".into());
    init_subscriber(subscriber);

    // `agenda migrate` only applies the migrations
    if std::env::args().nth(1).as_deref() == Some("migrate") {
        let connection_string = Config::new()
            .database_url
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL has to be set to run migrations"))?;
        run_migration(&connection_string).await?;
        return Ok(());
    }

    let context = setup_context().await?;

    let app = Application::new(context).await?;
    app.start().await?;
    Ok(())
}
