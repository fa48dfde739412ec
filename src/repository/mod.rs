use chrono::NaiveDate;

use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::appointment::{
    Appointment, AppointmentStatus, AppointmentWithClient, NewAppointment, UpdateAppointment,
};
use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::types::{AppointmentId, ClientEmail, ClientId};
use crate::pagination::{Paginated, Pagination};
use crate::repository::errors::RepositoryResult;

pub mod appointment;
pub mod client;
pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;

#[derive(Debug, Clone, Default)]
pub struct ClientListQuery {
    pub search: Option<String>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Default)]
pub struct AppointmentListQuery {
    pub client_id: Option<ClientId>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<AppointmentStatus>,
    /// Matched against the owning client's name.
    pub search: Option<String>,
    pub pagination: Pagination,
}

/// Drops blank search terms; anything else is matched exactly as sent.
fn normalize_search(search: String) -> Option<String> {
    (!search.trim().is_empty()).then_some(search)
}

impl ClientListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = normalize_search(term.into());
        self
    }

    pub fn paginate(mut self, page: i64, page_size: i64) -> Self {
        self.pagination = Pagination::new(page, page_size);
        self
    }
}

impl AppointmentListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn client(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn end_date(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    pub fn status(mut self, status: AppointmentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = normalize_search(term.into());
        self
    }

    pub fn paginate(mut self, page: i64, page_size: i64) -> Self {
        self.pagination = Pagination::new(page, page_size);
        self
    }
}

pub trait ClientReader {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
    fn get_client_by_email(&self, email: &ClientEmail) -> RepositoryResult<Option<Client>>;
    fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<Paginated<Client>>;
}

pub trait ClientWriter {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
    fn update_client(&self, client_id: ClientId, updates: &UpdateClient)
    -> RepositoryResult<Client>;
    /// Removes the client together with its appointments.
    fn delete_client(&self, client_id: ClientId) -> RepositoryResult<()>;
}

pub trait AppointmentReader {
    fn get_appointment_by_id(
        &self,
        id: AppointmentId,
    ) -> RepositoryResult<Option<AppointmentWithClient>>;
    fn list_appointments(
        &self,
        query: AppointmentListQuery,
    ) -> RepositoryResult<Paginated<AppointmentWithClient>>;
}

pub trait AppointmentWriter {
    fn create_appointment(&self, new_appointment: &NewAppointment)
    -> RepositoryResult<Appointment>;
    fn update_appointment(
        &self,
        appointment_id: AppointmentId,
        updates: &UpdateAppointment,
    ) -> RepositoryResult<Appointment>;
    fn delete_appointment(&self, appointment_id: AppointmentId) -> RepositoryResult<()>;
}

/// Diesel-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}
