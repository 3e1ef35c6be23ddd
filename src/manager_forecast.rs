use std::sync::Arc;
use log::info;
use tokio::sync::Mutex;
use crate::dashboard::{run_fetch, Dashboard};
use crate::manager_owm::OWM;

/// Forecast refresh loop, refetches whatever city is selected at each tick
///
/// # Arguments
///
/// * 'dashboard' - the shared dashboard
/// * 'owm' - weather client
/// * 'interval_secs' - seconds between refreshes
pub async fn run_forecasts(dashboard: Arc<Mutex<Dashboard>>, owm: OWM, interval_secs: u64) {
    let mut interval = tokio::time::interval(tokio::time::Duration::from_secs(interval_secs.max(1)));

    // first tick is immediate and startup already fetched
    interval.tick().await;

    loop {
        interval.tick().await;

        let ticket = dashboard.lock().await.begin_fetch();
        info!("refreshing weather for {}", ticket.city);

        run_fetch(&dashboard, &owm, ticket).await;
    }
}
