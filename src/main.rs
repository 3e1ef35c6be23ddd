mod errors;
mod logging;
mod initialization;
mod handlers;
mod dashboard;
mod daily_forecast;
mod weather_converter;
mod manager_catalog;
mod manager_forecast;
mod manager_owm;
mod manager_store;

use std::sync::Arc;
use actix_web::{web, App, HttpServer};
use tokio::sync::Mutex;
use log::info;
use crate::dashboard::{spawn_fetch, Dashboard};
use crate::errors::UnrecoverableError;
use crate::initialization::config;
use crate::manager_catalog::CityCatalog;
use crate::manager_forecast::run_forecasts;
use crate::manager_owm::OWM;
use crate::manager_store::Store;

struct AppState {
    dashboard: Arc<Mutex<Dashboard>>,
    owm: OWM,
}

#[actix_web::main]
async fn main() -> Result<(), UnrecoverableError> {
    let config = config()?;

    let store = Store::new(&config.store.db_path, config.store.ttl_days)?;
    let owm = OWM::new(&config.weather)?;
    let mut dashboard = Dashboard::new(
        store,
        CityCatalog::default(),
        &config.catalog.path,
        config.default_city.clone(),
    );

    let ticket = dashboard.startup();
    let dashboard = Arc::new(Mutex::new(dashboard));

    spawn_fetch(dashboard.clone(), owm.clone(), ticket);

    let (d, o) = (dashboard.clone(), owm.clone());
    tokio::spawn(run_forecasts(d, o, config.weather.refresh_interval_secs));

    info!("listening on {}:{}", config.web_server.bind_address, config.web_server.bind_port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(AppState { dashboard: dashboard.clone(), owm: owm.clone() }))
            .configure(handlers::routes)
    })
        .bind((config.web_server.bind_address, config.web_server.bind_port))?
        .run()
        .await?;

    Ok(())
}
