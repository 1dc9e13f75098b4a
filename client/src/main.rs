use actix::Actor;
use client::client_actors::location_tracker::LocationTracker;
use client::client_actors::screen_flow::ScreenFlow;
use client::client_actors::session_manager::SessionManager;
use client::client_actors::ui_handler::{UIHandler, welcome_banner};
use client::config::AppConfig;
use colored::Color;
use common::catalog::RestaurantCatalog;
use common::gateways::{JsonFileStore, KeyValueStore, LocalAuthGateway, SimulatedLocationProvider};
use common::logger::Logger;
use std::sync::Arc;
use tokio::signal::ctrl_c;

#[actix::main]
async fn main() -> std::io::Result<()> {
    let logger = Logger::new("Foodie", Color::BrightRed);

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            logger.error(e.to_string());
            std::process::exit(2);
        }
    };

    let catalog = match &config.catalog_path {
        Some(path) => RestaurantCatalog::load(path).await,
        None => RestaurantCatalog::bundled(),
    };
    let catalog = match catalog {
        Ok(catalog) => Arc::new(catalog),
        Err(e) => {
            logger.error(format!("Could not load the restaurant catalog: {}", e));
            std::process::exit(1);
        }
    };
    if catalog.unlocated_count() > 0 {
        logger.warn(format!(
            "{} restaurants have unreadable coordinates and will never show up nearby",
            catalog.unlocated_count()
        ));
    }

    let file_store = JsonFileStore::new(config.storage_path());
    logger.debug(format!("Storage file: {}", file_store.path().display()));
    let store: Arc<dyn KeyValueStore> = Arc::new(file_store);
    let sensor = SimulatedLocationProvider::new(config.permission, config.device_location)
        .with_jitter(config.jitter_meters)
        .with_failure_probability(config.failure_probability);

    let tracker = LocationTracker::new(Arc::new(sensor.clone())).start();
    let session = SessionManager::new(
        Arc::new(LocalAuthGateway::with_cost(config.bcrypt_cost)),
        store.clone(),
    )
    .start();
    let flow = ScreenFlow::new(store, session.clone()).start();

    println!("{}", welcome_banner());

    let mut ui = UIHandler::new(catalog, sensor, tracker, session, flow);
    tokio::select! {
        result = ui.run() => {
            if let Err(e) = result {
                logger.error(e.to_string());
            }
        }
        _ = ctrl_c() => {
            logger.info("Ctrl-C received, shutting down...");
        }
    }
    actix::System::current().stop();
    Ok(())
}
