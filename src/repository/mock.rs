//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::appointment::{
    Appointment, AppointmentWithClient, NewAppointment, UpdateAppointment,
};
use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::types::{AppointmentId, ClientEmail, ClientId};
use crate::pagination::Paginated;
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    AppointmentListQuery, AppointmentReader, AppointmentWriter, ClientListQuery, ClientReader,
    ClientWriter,
};

mock! {
    pub Repository {}

    impl ClientReader for Repository {
        fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
        fn get_client_by_email(&self, email: &ClientEmail) -> RepositoryResult<Option<Client>>;
        fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<Paginated<Client>>;
    }

    impl ClientWriter for Repository {
        fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
        fn update_client(
            &self,
            client_id: ClientId,
            updates: &UpdateClient,
        ) -> RepositoryResult<Client>;
        fn delete_client(&self, client_id: ClientId) -> RepositoryResult<()>;
    }

    impl AppointmentReader for Repository {
        fn get_appointment_by_id(
            &self,
            id: AppointmentId,
        ) -> RepositoryResult<Option<AppointmentWithClient>>;
        fn list_appointments(
            &self,
            query: AppointmentListQuery,
        ) -> RepositoryResult<Paginated<AppointmentWithClient>>;
    }

    impl AppointmentWriter for Repository {
        fn create_appointment(
            &self,
            new_appointment: &NewAppointment,
        ) -> RepositoryResult<Appointment>;
        fn update_appointment(
            &self,
            appointment_id: AppointmentId,
            updates: &UpdateAppointment,
        ) -> RepositoryResult<Appointment>;
        fn delete_appointment(&self, appointment_id: AppointmentId) -> RepositoryResult<()>;
    }
}
