use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::db::unicode_lower;
use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::types::{ClientEmail, ClientId};
use crate::models::client::{
    Client as DbClient, NewClient as DbNewClient, UpdateClient as DbUpdateClient,
};
use crate::pagination::Paginated;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ClientListQuery, ClientReader, ClientWriter, DieselRepository};
use crate::schema::{appointments, clients};

impl ClientReader for DieselRepository {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>> {
        let mut conn = self.conn()?;
        let client = clients::table
            .find(id.get())
            .first::<DbClient>(&mut conn)
            .optional()?;

        Ok(client.map(Client::try_from).transpose()?)
    }

    fn get_client_by_email(&self, email: &ClientEmail) -> RepositoryResult<Option<Client>> {
        let mut conn = self.conn()?;
        let client = clients::table
            .filter(clients::email.eq(email.as_str()))
            .first::<DbClient>(&mut conn)
            .optional()?;

        Ok(client.map(Client::try_from).transpose()?)
    }

    fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<Paginated<Client>> {
        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = clients::table.into_boxed::<Sqlite>();

            if let Some(term) = &query.search {
                let pattern = format!("%{}%", term.to_lowercase());
                items = items.filter(
                    unicode_lower(clients::name.nullable())
                        .like(pattern.clone())
                        .or(unicode_lower(clients::email.nullable()).like(pattern.clone()))
                        .or(unicode_lower(clients::phone).like(pattern)),
                );
            }
            items
        };

        // Get the total count before applying pagination
        let total = query_builder().count().get_result::<i64>(&mut conn)?;
        let window = query.pagination.window(total);

        let items = query_builder()
            .order(clients::id.asc())
            .offset(window.offset())
            .limit(window.limit())
            .load::<DbClient>(&mut conn)?
            .into_iter()
            .map(Client::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Paginated::new(items, window))
    }
}

impl ClientWriter for DieselRepository {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client> {
        let mut conn = self.conn()?;
        let insertable = DbNewClient::from_domain(new_client, Utc::now().naive_utc());

        let created = conn.transaction::<_, RepositoryError, _>(|conn| {
            Ok(diesel::insert_into(clients::table)
                .values(&insertable)
                .get_result::<DbClient>(conn)?)
        })?;

        Ok(created.try_into()?)
    }

    fn update_client(
        &self,
        client_id: ClientId,
        updates: &UpdateClient,
    ) -> RepositoryResult<Client> {
        let mut conn = self.conn()?;
        let changeset = DbUpdateClient::from_domain(updates, Utc::now().naive_utc());

        let updated = conn.transaction::<_, RepositoryError, _>(|conn| {
            Ok(diesel::update(clients::table.find(client_id.get()))
                .set(&changeset)
                .get_result::<DbClient>(conn)?)
        })?;

        Ok(updated.try_into()?)
    }

    fn delete_client(&self, client_id: ClientId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            diesel::delete(appointments::table.filter(appointments::client_id.eq(client_id.get())))
                .execute(conn)?;
            let deleted = diesel::delete(clients::table.find(client_id.get())).execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }
            Ok(())
        })
    }
}
