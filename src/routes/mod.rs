//! HTTP handlers and the glue mapping service results onto responses.

use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;

use crate::services::ServiceError;

pub mod appointments;
pub mod clients;

/// JSON body used for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Maps a service failure onto a status code and a JSON detail message.
pub fn error_response(err: ServiceError) -> HttpResponse {
    let status = match &err {
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::Conflict(_) => StatusCode::CONFLICT,
        ServiceError::Form(_) | ServiceError::TypeConstraint(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ServiceError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    HttpResponse::build(status).json(ErrorBody::new(err.to_string()))
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::UnprocessableEntity().json(ErrorBody::new(err.to_string()));
    InternalError::from_response(err, response).into()
}

fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::UnprocessableEntity().json(ErrorBody::new(err.to_string()));
    InternalError::from_response(err, response).into()
}

/// Registers every endpoint on the given scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(clients::list_clients)
        .service(clients::create_client)
        .service(clients::show_client)
        .service(clients::update_client)
        .service(clients::delete_client)
        .service(clients::list_client_appointments)
        .service(appointments::list_appointments)
        .service(appointments::create_appointment)
        .service(appointments::show_appointment)
        .service(appointments::update_appointment)
        .service(appointments::delete_appointment);
}
