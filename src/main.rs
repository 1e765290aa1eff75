use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use mongodb::Client;
use tracing_subscriber::EnvFilter;

use evensplit::{server, settings::Settings, store::GroupStore};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("evensplit={}", settings.log.level))),
        )
        .init();

    tracing::info!("Using database {}", settings.mongodb.database);
    let client = Client::with_uri_str(&settings.mongodb.uri).await?;
    let store = GroupStore::new(client, settings.mongodb.database);
    tracing::info!("Connected");

    let bind = (settings.server.bind, settings.server.port);
    tracing::info!("Listening on {}:{}", bind.0, bind.1);
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(web::Data::new(store.clone()))
            .configure(server::configure)
            .configure(server::configure_groups)
    })
    .bind(bind)?
    .run()
    .await?;

    Ok(())
}
