use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::dto::appointment::AppointmentsQuery;
use crate::forms::appointment::{AddAppointmentForm, UpdateAppointmentForm};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::appointments as appointments_service;

#[get("/appointments")]
/// Paginated appointment list with client details, filterable by date range,
/// status and client name.
pub async fn list_appointments(
    repo: web::Data<DieselRepository>,
    query: web::Query<AppointmentsQuery>,
) -> impl Responder {
    match appointments_service::list_appointments(repo.get_ref(), query.into_inner()) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(err),
    }
}

#[post("/appointments")]
pub async fn create_appointment(
    repo: web::Data<DieselRepository>,
    form: web::Json<AddAppointmentForm>,
) -> impl Responder {
    match appointments_service::create_appointment(repo.get_ref(), form.into_inner()) {
        Ok(appointment) => HttpResponse::Created().json(appointment),
        Err(err) => error_response(err),
    }
}

#[get("/appointments/{appointment_id}")]
pub async fn show_appointment(
    repo: web::Data<DieselRepository>,
    appointment_id: web::Path<i32>,
) -> impl Responder {
    match appointments_service::get_appointment(repo.get_ref(), appointment_id.into_inner()) {
        Ok(appointment) => HttpResponse::Ok().json(appointment),
        Err(err) => error_response(err),
    }
}

#[put("/appointments/{appointment_id}")]
pub async fn update_appointment(
    repo: web::Data<DieselRepository>,
    appointment_id: web::Path<i32>,
    form: web::Json<UpdateAppointmentForm>,
) -> impl Responder {
    match appointments_service::update_appointment(
        repo.get_ref(),
        appointment_id.into_inner(),
        form.into_inner(),
    ) {
        Ok(appointment) => HttpResponse::Ok().json(appointment),
        Err(err) => error_response(err),
    }
}

#[delete("/appointments/{appointment_id}")]
pub async fn delete_appointment(
    repo: web::Data<DieselRepository>,
    appointment_id: web::Path<i32>,
) -> impl Responder {
    match appointments_service::delete_appointment(repo.get_ref(), appointment_id.into_inner()) {
        Ok(confirmation) => HttpResponse::Ok().json(confirmation),
        Err(err) => error_response(err),
    }
}
