//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Pages are ordered by `id`; each page and its total are read in one
//! read-only repeatable-read transaction so they describe the same snapshot.
//! The unique index on `users.email` is the final
//! arbiter of email uniqueness: a unique violation on insert or update is
//! reported as [`UserPersistenceError::DuplicateEmail`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt;
use pagination::{Page, PageRequest};
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, NewUser, User, UserId};

use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => UserPersistenceError::query("record not found"),
        DieselError::QueryBuilderError(_) => UserPersistenceError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        _ => UserPersistenceError::query("database error"),
    }
}

/// Map a write failure, reporting unique violations against `email`.
fn map_write_error(error: diesel::result::Error, email: &EmailAddress) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            debug!(
                constraint = info.constraint_name(),
                "unique violation while writing user"
            );
            UserPersistenceError::duplicate_email(email.to_string())
        }
        other => map_diesel_error(other),
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let id = row.id;
    User::try_from_parts(row.id, row.first_name, row.last_name, row.email).map_err(|err| {
        UserPersistenceError::query(format!("invalid user record {id} in database: {err}"))
    })
}

fn rows_to_page(
    rows: Vec<UserRow>,
    request: PageRequest,
    total: i64,
) -> Result<Page<User>, UserPersistenceError> {
    let users = rows
        .into_iter()
        .map(row_to_user)
        .collect::<Result<Vec<_>, _>>()?;
    let total_elements = u64::try_from(total)
        .map_err(|_| UserPersistenceError::query(format!("negative row count {total}")))?;
    Ok(Page::new(users, request, total_elements))
}

/// Offset and limit for `request` as Diesel expects them.
fn bounds(request: PageRequest) -> Result<(i64, i64), UserPersistenceError> {
    let offset = i64::try_from(request.offset())
        .map_err(|_| UserPersistenceError::query("page offset out of range"))?;
    Ok((offset, i64::from(request.size())))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_all(&self, request: PageRequest) -> Result<Page<User>, UserPersistenceError> {
        let (offset, limit) = bounds(request)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (total, rows) = conn
            .build_transaction()
            .read_only()
            .repeatable_read()
            .run(|conn| {
                async move {
                    let total: i64 = users::table.count().get_result(conn).await?;
                    let rows: Vec<UserRow> = users::table
                        .select(UserRow::as_select())
                        .order(users::id.asc())
                        .offset(offset)
                        .limit(limit)
                        .load(conn)
                        .await?;
                    Ok::<_, diesel::result::Error>((total, rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        rows_to_page(rows, request, total)
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(
            users::table.filter(users::email.eq(email.as_str())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn find_by_first_name(
        &self,
        first_name: &str,
        request: PageRequest,
    ) -> Result<Option<Page<User>>, UserPersistenceError> {
        let (offset, limit) = bounds(request)?;
        let name = first_name.to_owned();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (total, rows) = conn
            .build_transaction()
            .read_only()
            .repeatable_read()
            .run(|conn| {
                async move {
                    let total: i64 = users::table
                        .filter(users::first_name.eq(&name))
                        .count()
                        .get_result(conn)
                        .await?;
                    let rows: Vec<UserRow> = users::table
                        .filter(users::first_name.eq(&name))
                        .select(UserRow::as_select())
                        .order(users::id.asc())
                        .offset(offset)
                        .limit(limit)
                        .load(conn)
                        .await?;
                    Ok::<_, diesel::result::Error>((total, rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        rows_to_page(rows, request, total).map(Some)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .find(id.value())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewUserRow {
            first_name: user.first_name.as_str(),
            last_name: user.last_name.as_str(),
            email: user.email.as_str(),
        };
        let row: UserRow = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_write_error(err, &user.email))?;
        row_to_user(row)
    }

    async fn update(&self, user: &User) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = UserUpdate {
            first_name: user.first_name().as_str(),
            last_name: user.last_name().as_str(),
            email: user.email().as_str(),
        };
        let row: Option<UserRow> = diesel::update(users::table.find(user.id().value()))
            .set(&changes)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_write_error(err, user.email()))?;
        match row {
            Some(stored) => row_to_user(stored),
            None => Err(UserPersistenceError::query(format!(
                "user {} not stored",
                user.id()
            ))),
        }
    }

    async fn delete(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::delete(users::table.find(user.id().value()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}
