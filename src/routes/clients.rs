use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::dto::client::ClientsQuery;
use crate::dto::pagination::PageQuery;
use crate::forms::client::ClientForm;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::clients as clients_service;

#[get("/clients")]
/// Paginated client list with optional search.
pub async fn list_clients(
    repo: web::Data<DieselRepository>,
    query: web::Query<ClientsQuery>,
) -> impl Responder {
    match clients_service::list_clients(repo.get_ref(), query.into_inner()) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(err),
    }
}

#[post("/clients")]
pub async fn create_client(
    repo: web::Data<DieselRepository>,
    form: web::Json<ClientForm>,
) -> impl Responder {
    match clients_service::create_client(repo.get_ref(), form.into_inner()) {
        Ok(client) => HttpResponse::Ok().json(client),
        Err(err) => error_response(err),
    }
}

#[get("/clients/{client_id}")]
pub async fn show_client(
    repo: web::Data<DieselRepository>,
    client_id: web::Path<i32>,
) -> impl Responder {
    match clients_service::get_client(repo.get_ref(), client_id.into_inner()) {
        Ok(client) => HttpResponse::Ok().json(client),
        Err(err) => error_response(err),
    }
}

#[put("/clients/{client_id}")]
pub async fn update_client(
    repo: web::Data<DieselRepository>,
    client_id: web::Path<i32>,
    form: web::Json<ClientForm>,
) -> impl Responder {
    match clients_service::update_client(repo.get_ref(), client_id.into_inner(), form.into_inner())
    {
        Ok(client) => HttpResponse::Ok().json(client),
        Err(err) => error_response(err),
    }
}

#[delete("/clients/{client_id}")]
/// Deletes the client and every appointment booked for it.
pub async fn delete_client(
    repo: web::Data<DieselRepository>,
    client_id: web::Path<i32>,
) -> impl Responder {
    match clients_service::delete_client(repo.get_ref(), client_id.into_inner()) {
        Ok(confirmation) => HttpResponse::Ok().json(confirmation),
        Err(err) => error_response(err),
    }
}

#[get("/clients/{client_id}/appointments")]
pub async fn list_client_appointments(
    repo: web::Data<DieselRepository>,
    client_id: web::Path<i32>,
    query: web::Query<PageQuery>,
) -> impl Responder {
    match clients_service::list_client_appointments(
        repo.get_ref(),
        client_id.into_inner(),
        query.into_inner(),
    ) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(err),
    }
}
