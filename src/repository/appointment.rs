use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::db::unicode_lower;
use crate::domain::appointment::{
    Appointment, AppointmentWithClient, NewAppointment, UpdateAppointment,
};
use crate::domain::types::{AppointmentId, TypeConstraintError};
use crate::models::appointment::{
    Appointment as DbAppointment, NewAppointment as DbNewAppointment,
    UpdateAppointment as DbUpdateAppointment,
};
use crate::models::client::Client as DbClient;
use crate::pagination::Paginated;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    AppointmentListQuery, AppointmentReader, AppointmentWriter, DieselRepository,
};
use crate::schema::{appointments, clients};

/// First instant of `date`.
fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Last microsecond of `date`, inclusive.
fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_micro_opt(23, 59, 59, 999_999)
        .unwrap_or(NaiveDateTime::MAX)
}

fn with_client(
    (appointment, client): (DbAppointment, DbClient),
) -> Result<AppointmentWithClient, TypeConstraintError> {
    Ok(AppointmentWithClient {
        appointment: appointment.try_into()?,
        client: client.try_into()?,
    })
}

impl AppointmentReader for DieselRepository {
    fn get_appointment_by_id(
        &self,
        id: AppointmentId,
    ) -> RepositoryResult<Option<AppointmentWithClient>> {
        let mut conn = self.conn()?;
        let row = appointments::table
            .inner_join(clients::table)
            .filter(appointments::id.eq(id.get()))
            .first::<(DbAppointment, DbClient)>(&mut conn)
            .optional()?;

        Ok(row.map(with_client).transpose()?)
    }

    fn list_appointments(
        &self,
        query: AppointmentListQuery,
    ) -> RepositoryResult<Paginated<AppointmentWithClient>> {
        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = appointments::table
                .inner_join(clients::table)
                .into_boxed::<Sqlite>();

            if let Some(client_id) = query.client_id {
                items = items.filter(appointments::client_id.eq(client_id.get()));
            }
            if let Some(start_date) = query.start_date {
                items = items.filter(appointments::time.ge(start_of_day(start_date)));
            }
            if let Some(end_date) = query.end_date {
                items = items.filter(appointments::time.le(end_of_day(end_date)));
            }
            if let Some(status) = query.status {
                items = items.filter(appointments::status.eq(status.as_str()));
            }
            if let Some(term) = &query.search {
                let pattern = format!("%{}%", term.to_lowercase());
                items = items.filter(unicode_lower(clients::name.nullable()).like(pattern));
            }
            items
        };

        // Get the total count before applying pagination
        let total = query_builder().count().get_result::<i64>(&mut conn)?;
        let window = query.pagination.window(total);

        let items = query_builder()
            .order(appointments::id.asc())
            .offset(window.offset())
            .limit(window.limit())
            .load::<(DbAppointment, DbClient)>(&mut conn)?
            .into_iter()
            .map(with_client)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Paginated::new(items, window))
    }
}

impl AppointmentWriter for DieselRepository {
    fn create_appointment(
        &self,
        new_appointment: &NewAppointment,
    ) -> RepositoryResult<Appointment> {
        let mut conn = self.conn()?;
        let insertable = DbNewAppointment::from_domain(new_appointment, Utc::now().naive_utc());

        let created = conn.transaction::<_, RepositoryError, _>(|conn| {
            Ok(diesel::insert_into(appointments::table)
                .values(&insertable)
                .get_result::<DbAppointment>(conn)?)
        })?;

        Ok(created.try_into()?)
    }

    fn update_appointment(
        &self,
        appointment_id: AppointmentId,
        updates: &UpdateAppointment,
    ) -> RepositoryResult<Appointment> {
        let mut conn = self.conn()?;
        let changeset = DbUpdateAppointment::from_domain(updates, Utc::now().naive_utc());

        let updated = conn.transaction::<_, RepositoryError, _>(|conn| {
            Ok(diesel::update(appointments::table.find(appointment_id.get()))
                .set(&changeset)
                .get_result::<DbAppointment>(conn)?)
        })?;

        Ok(updated.try_into()?)
    }

    fn delete_appointment(&self, appointment_id: AppointmentId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let deleted =
                diesel::delete(appointments::table.find(appointment_id.get())).execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }
            Ok(())
        })
    }
}
