use actix_web::{get, post, web, HttpResponse, Responder};
use log::{error, info, warn};
use serde::Deserialize;
use crate::dashboard::{spawn_fetch, FetchTicket};
use crate::AppState;

#[derive(Deserialize, Debug)]
struct CityParams {
    name: String,
}

#[derive(Deserialize, Debug)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

/// Runs the fetch in its own task and waits for it. If the request is dropped while
/// waiting, the task still records the outcome.
async fn await_fetch(data: &web::Data<AppState>, ticket: FetchTicket) {
    let handle = spawn_fetch(data.dashboard.clone(), data.owm.clone(), ticket);
    if let Err(e) = handle.await {
        error!("fetch task failed: {}", e);
    }
}

#[get("/dashboard")]
async fn dashboard_view(data: web::Data<AppState>) -> impl Responder {
    let view = data.dashboard.lock().await.view();

    HttpResponse::Ok().json(view)
}

#[post("/city")]
async fn select_city(params: web::Query<CityParams>, data: web::Data<AppState>) -> impl Responder {
    info!("{:?}", params);

    let ticket = data.dashboard.lock().await.select_city(&params.name);
    await_fetch(&data, ticket).await;

    HttpResponse::Ok().json(data.dashboard.lock().await.view())
}

#[post("/refresh")]
async fn refresh(data: web::Data<AppState>) -> impl Responder {
    let ticket = data.dashboard.lock().await.begin_fetch();
    await_fetch(&data, ticket).await;

    HttpResponse::Ok().json(data.dashboard.lock().await.view())
}

#[get("/favorites")]
async fn favorites(data: web::Data<AppState>) -> impl Responder {
    let favorites = data.dashboard.lock().await.favorites().to_vec();

    HttpResponse::Ok().json(favorites)
}

#[post("/favorites/add")]
async fn add_favorite(params: web::Query<CityParams>, data: web::Data<AppState>) -> impl Responder {
    info!("{:?}", params);

    let mut dashboard = data.dashboard.lock().await;
    if dashboard.add_favorite(&params.name) {
        HttpResponse::Ok().json(dashboard.favorites())
    } else {
        warn!("refused to add unknown city {}", params.name);
        HttpResponse::NotFound().finish()
    }
}

#[post("/favorites/remove")]
async fn remove_favorite(params: web::Query<CityParams>, data: web::Data<AppState>) -> impl Responder {
    info!("{:?}", params);

    let mut dashboard = data.dashboard.lock().await;
    dashboard.remove_favorite(&params.name);

    HttpResponse::Ok().json(dashboard.favorites())
}

#[post("/menu/toggle")]
async fn toggle_menu(data: web::Data<AppState>) -> impl Responder {
    let mut dashboard = data.dashboard.lock().await;
    dashboard.toggle_menu();

    HttpResponse::Ok().json(dashboard.view())
}

#[post("/search/toggle")]
async fn toggle_search(data: web::Data<AppState>) -> impl Responder {
    let mut dashboard = data.dashboard.lock().await;
    dashboard.toggle_search();

    HttpResponse::Ok().json(dashboard.view())
}

#[get("/search")]
async fn search(params: web::Query<SearchParams>, data: web::Data<AppState>) -> impl Responder {
    let results = data.dashboard.lock().await.search(&params.q);

    HttpResponse::Ok().json(results)
}

/// Registers every dashboard endpoint
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(dashboard_view)
        .service(select_city)
        .service(refresh)
        .service(favorites)
        .service(add_favorite)
        .service(remove_favorite)
        .service(toggle_menu)
        .service(toggle_search)
        .service(search);
}
