//! Diesel models for stored appointments.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::appointment::{
    Appointment as DomainAppointment, NewAppointment as DomainNewAppointment,
    UpdateAppointment as DomainUpdateAppointment,
};
use crate::domain::types::TypeConstraintError;
use crate::models::client::Client;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Client, foreign_key = client_id))]
#[diesel(table_name = crate::schema::appointments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Appointment {
    pub id: i32,
    pub client_id: i32,
    pub time: Option<NaiveDateTime>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::appointments)]
pub struct NewAppointment<'a> {
    pub client_id: i32,
    pub time: NaiveDateTime,
    pub status: &'static str,
    pub notes: Option<&'a str>,
    pub created_at: NaiveDateTime,
}

/// Every base column is written, so omitted values become `NULL`.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::appointments)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateAppointment<'a> {
    pub time: Option<NaiveDateTime>,
    pub status: Option<&'static str>,
    pub notes: Option<&'a str>,
    pub updated_at: Option<NaiveDateTime>,
}

impl TryFrom<Appointment> for DomainAppointment {
    type Error = TypeConstraintError;

    fn try_from(appointment: Appointment) -> Result<Self, Self::Error> {
        DomainAppointment::try_new(
            appointment.id,
            appointment.client_id,
            appointment.time,
            appointment.status,
            appointment.notes,
            appointment.created_at,
            appointment.updated_at,
        )
    }
}

impl<'a> NewAppointment<'a> {
    pub fn from_domain(appointment: &'a DomainNewAppointment, created_at: NaiveDateTime) -> Self {
        Self {
            client_id: appointment.client_id.get(),
            time: appointment.time,
            status: appointment.status.as_str(),
            notes: appointment.notes.as_deref(),
            created_at,
        }
    }
}

impl<'a> UpdateAppointment<'a> {
    pub fn from_domain(
        appointment: &'a DomainUpdateAppointment,
        updated_at: NaiveDateTime,
    ) -> Self {
        Self {
            time: appointment.time,
            status: appointment.status.map(|status| status.as_str()),
            notes: appointment.notes.as_deref(),
            updated_at: Some(updated_at),
        }
    }
}
