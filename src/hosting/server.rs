use super::*;
use crate::TableId;
use crate::config::Config;
use crate::protocol::RawFrame;
use crate::session::Connection;
use crate::session::Services;
use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::middleware::Logger;
use actix_web::web;
use std::sync::Arc;

pub struct Server;

impl Server {
    pub async fn run(config: &Config, services: Services) -> Result<(), std::io::Error> {
        let lobby = web::Data::from(Arc::new(Lobby::default()));
        let services = web::Data::new(services);
        log::info!("starting gateway on {}", config.bind);
        HttpServer::new(move || {
            App::new()
                .wrap(Logger::new("%r %s %Ts"))
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header(),
                )
                .app_data(lobby.clone())
                .app_data(services.clone())
                .route("/ws", web::get().to(connect))
                .route("/push", web::post().to(broadcast))
                .route("/push/{conn_id}", web::post().to(push))
                .route("/push/table/{table_id}", web::post().to(push_table))
                .route("/health", web::get().to(health))
        })
        .workers(config.workers)
        .bind(&config.bind)?
        .run()
        .await
    }
}

async fn health(lobby: web::Data<Lobby>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "connections": lobby.len().await }))
}

async fn broadcast(lobby: web::Data<Lobby>, frame: web::Json<RawFrame>) -> impl Responder {
    let delivered = lobby.broadcast(frame.into_inner().typed()).await;
    HttpResponse::Ok().json(serde_json::json!({ "delivered": delivered }))
}

async fn push_table(
    lobby: web::Data<Lobby>,
    path: web::Path<TableId>,
    frame: web::Json<RawFrame>,
) -> impl Responder {
    let table = path.into_inner();
    let delivered = lobby.broadcast_table(table, frame.into_inner().typed()).await;
    HttpResponse::Ok().json(serde_json::json!({ "delivered": delivered }))
}

async fn push(
    lobby: web::Data<Lobby>,
    path: web::Path<String>,
    frame: web::Json<RawFrame>,
) -> impl Responder {
    let id = path.into_inner();
    match lobby.deliver(&id, frame.into_inner().typed()).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "delivered": 1 })),
        Err(e) => HttpResponse::NotFound().body(e.to_string()),
    }
}

async fn connect(
    lobby: web::Data<Lobby>,
    services: web::Data<Services>,
    body: web::Payload,
    req: HttpRequest,
) -> impl Responder {
    match actix_ws::handle(&req, body) {
        Ok((response, session, stream)) => {
            let (reader, writer) = Socket::split(session, stream);
            let handle = Connection::spawn(reader, writer, services.get_ref().clone());
            lobby.into_inner().admit(handle).await;
            response.map_into_left_body()
        }
        Err(e) => HttpResponse::InternalServerError()
            .body(e.to_string())
            .map_into_right_body(),
    }
}
