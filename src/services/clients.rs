//! Client workflows: listing, lookup, creation, overwrite and removal.

use validator::Validate;

use crate::domain::appointment::Appointment;
use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::types::ClientId;
use crate::dto::DeleteConfirmation;
use crate::dto::client::ClientsQuery;
use crate::dto::pagination::PageQuery;
use crate::forms::client::ClientForm;
use crate::pagination::Paginated;
use crate::repository::{
    AppointmentListQuery, AppointmentReader, ClientListQuery, ClientReader, ClientWriter,
};
use crate::services::{ServiceError, ServiceResult};

pub const CLIENT_NOT_FOUND: &str = "Client not found";
pub const EMAIL_TAKEN: &str = "Email already registered";

fn not_found() -> ServiceError {
    ServiceError::NotFound(CLIENT_NOT_FOUND.to_string())
}

/// Loads an existing client or fails with [`ServiceError::NotFound`].
fn require_client<R>(repo: &R, client_id: i32) -> ServiceResult<Client>
where
    R: ClientReader + ?Sized,
{
    let client_id = ClientId::new(client_id).map_err(|_| not_found())?;
    repo.get_client_by_id(client_id)?.ok_or_else(not_found)
}

/// Returns one page of clients, optionally narrowed by a search term.
pub fn list_clients<R>(repo: &R, query: ClientsQuery) -> ServiceResult<Paginated<Client>>
where
    R: ClientReader + ?Sized,
{
    query.validate()?;

    let pagination = query.page_query().pagination();
    let mut list_query = ClientListQuery::new().paginate(pagination.page, pagination.page_size);
    if let Some(term) = query.search {
        list_query = list_query.search(term);
    }

    repo.list_clients(list_query).map_err(|err| {
        log::error!("Failed to list clients: {err}");
        err.into()
    })
}

/// Fetches a single client by id.
pub fn get_client<R>(repo: &R, client_id: i32) -> ServiceResult<Client>
where
    R: ClientReader + ?Sized,
{
    require_client(repo, client_id)
}

/// Returns one page of the appointments booked for the client.
pub fn list_client_appointments<R>(
    repo: &R,
    client_id: i32,
    query: PageQuery,
) -> ServiceResult<Paginated<Appointment>>
where
    R: ClientReader + AppointmentReader + ?Sized,
{
    query.validate()?;

    let client = require_client(repo, client_id)?;
    let pagination = query.pagination();
    let list_query = AppointmentListQuery::new()
        .client(client.id)
        .paginate(pagination.page, pagination.page_size);

    let appointments = repo.list_appointments(list_query).map_err(|err| {
        log::error!("Failed to list appointments of client {}: {err}", client.id);
        ServiceError::from(err)
    })?;

    Ok(appointments.map(|item| item.appointment))
}

/// Persists a new client after making sure the email is not taken.
pub fn create_client<R>(repo: &R, form: ClientForm) -> ServiceResult<Client>
where
    R: ClientReader + ClientWriter + ?Sized,
{
    form.validate()?;
    let new_client = NewClient::try_from(form)?;

    if repo.get_client_by_email(&new_client.email)?.is_some() {
        return Err(ServiceError::Conflict(EMAIL_TAKEN.to_string()));
    }

    repo.create_client(&new_client).map_err(|err| {
        log::error!("Failed to create client: {err}");
        err.into()
    })
}

/// Overwrites name, email and phone of an existing client.
pub fn update_client<R>(repo: &R, client_id: i32, form: ClientForm) -> ServiceResult<Client>
where
    R: ClientReader + ClientWriter + ?Sized,
{
    form.validate()?;
    let updates = UpdateClient::try_from(form)?;
    let client = require_client(repo, client_id)?;

    let owner = repo.get_client_by_email(&updates.email)?;
    if owner.is_some_and(|owner| owner.id != client.id) {
        return Err(ServiceError::Conflict(EMAIL_TAKEN.to_string()));
    }

    repo.update_client(client.id, &updates).map_err(|err| {
        log::error!("Failed to update client {}: {err}", client.id);
        err.into()
    })
}

/// Removes the client along with every appointment booked for it.
pub fn delete_client<R>(repo: &R, client_id: i32) -> ServiceResult<DeleteConfirmation>
where
    R: ClientReader + ClientWriter + ?Sized,
{
    let client = require_client(repo, client_id)?;

    repo.delete_client(client.id).map_err(|err| {
        log::error!("Failed to delete client {}: {err}", client.id);
        ServiceError::from(err)
    })?;

    Ok(DeleteConfirmation::new("Client deleted successfully"))
}
