//! Appointment workflows.

use validator::Validate;

use crate::domain::appointment::{
    Appointment, AppointmentWithClient, NewAppointment, UpdateAppointment,
};
use crate::domain::types::AppointmentId;
use crate::dto::DeleteConfirmation;
use crate::dto::appointment::AppointmentsQuery;
use crate::forms::FormError;
use crate::forms::appointment::{AddAppointmentForm, UpdateAppointmentForm};
use crate::pagination::Paginated;
use crate::repository::{AppointmentListQuery, AppointmentReader, AppointmentWriter, ClientReader};
use crate::services::clients::CLIENT_NOT_FOUND;
use crate::services::{ServiceError, ServiceResult};

pub const APPOINTMENT_NOT_FOUND: &str = "Appointment not found";

fn not_found() -> ServiceError {
    ServiceError::NotFound(APPOINTMENT_NOT_FOUND.to_string())
}

fn require_appointment<R>(repo: &R, appointment_id: i32) -> ServiceResult<AppointmentWithClient>
where
    R: AppointmentReader + ?Sized,
{
    let appointment_id = AppointmentId::new(appointment_id).map_err(|_| not_found())?;
    repo.get_appointment_by_id(appointment_id)?
        .ok_or_else(not_found)
}

/// Returns one page of appointments with their clients, narrowed by the
/// supplied filters.
pub fn list_appointments<R>(
    repo: &R,
    query: AppointmentsQuery,
) -> ServiceResult<Paginated<AppointmentWithClient>>
where
    R: AppointmentReader + ?Sized,
{
    query.validate()?;

    let pagination = query.page_query().pagination();
    let mut list_query =
        AppointmentListQuery::new().paginate(pagination.page, pagination.page_size);
    if let Some(start_date) = query.start_date {
        list_query = list_query.start_date(start_date);
    }
    if let Some(end_date) = query.end_date {
        list_query = list_query.end_date(end_date);
    }
    if let Some(status) = query.status {
        list_query = list_query.status(status);
    }
    if let Some(term) = query.search {
        list_query = list_query.search(term);
    }

    repo.list_appointments(list_query).map_err(|err| {
        log::error!("Failed to list appointments: {err}");
        err.into()
    })
}

pub fn get_appointment<R>(repo: &R, appointment_id: i32) -> ServiceResult<AppointmentWithClient>
where
    R: AppointmentReader + ?Sized,
{
    require_appointment(repo, appointment_id)
}

/// Books a new appointment for an existing client.
pub fn create_appointment<R>(repo: &R, form: AddAppointmentForm) -> ServiceResult<Appointment>
where
    R: ClientReader + AppointmentWriter + ?Sized,
{
    form.validate()?;
    // A non-positive id cannot name a stored client.
    let new_appointment = NewAppointment::try_from(form).map_err(|err| match err {
        FormError::InvalidClientId => ServiceError::NotFound(CLIENT_NOT_FOUND.to_string()),
        other => other.into(),
    })?;

    if repo.get_client_by_id(new_appointment.client_id)?.is_none() {
        return Err(ServiceError::NotFound(CLIENT_NOT_FOUND.to_string()));
    }

    repo.create_appointment(&new_appointment).map_err(|err| {
        log::error!(
            "Failed to create appointment for client {}: {err}",
            new_appointment.client_id
        );
        err.into()
    })
}

/// Replaces time, status and notes of an appointment; omitted fields become null.
pub fn update_appointment<R>(
    repo: &R,
    appointment_id: i32,
    form: UpdateAppointmentForm,
) -> ServiceResult<Appointment>
where
    R: AppointmentReader + AppointmentWriter + ?Sized,
{
    let existing = require_appointment(repo, appointment_id)?;
    let id = existing.appointment.id;
    let updates = UpdateAppointment::from(form);

    repo.update_appointment(id, &updates).map_err(|err| {
        log::error!("Failed to update appointment {id}: {err}");
        err.into()
    })
}

pub fn delete_appointment<R>(repo: &R, appointment_id: i32) -> ServiceResult<DeleteConfirmation>
where
    R: AppointmentReader + AppointmentWriter + ?Sized,
{
    let existing = require_appointment(repo, appointment_id)?;
    let id = existing.appointment.id;

    repo.delete_appointment(id).map_err(|err| {
        log::error!("Failed to delete appointment {id}: {err}");
        ServiceError::from(err)
    })?;

    Ok(DeleteConfirmation::new("Appointment deleted successfully"))
}
