use sqlx::PgPool;

use crate::db::models::Dashboard;

const DASHBOARD_COLUMNS: &str = "id, name, created_by, date, modules";

/// Which views a listing covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ViewFilter {
    All,
    CreatedBy(Vec<String>),
}

impl ViewFilter {
    fn creators(&self) -> Option<&[String]> {
        match self {
            Self::All => None,
            Self::CreatedBy(users) => Some(users.as_slice()),
        }
    }
}

pub(crate) async fn read(
    pool: &PgPool,
    filter: &ViewFilter,
    limit: i64,
    skip: i64,
) -> Result<Vec<Dashboard>, sqlx::Error> {
    sqlx::query_as::<_, Dashboard>(&format!(
        "SELECT {DASHBOARD_COLUMNS} FROM dashboards
         WHERE ($1::text[] IS NULL OR created_by = ANY($1))
         ORDER BY date DESC, id
         LIMIT $2 OFFSET $3"
    ))
    .bind(filter.creators())
    .bind(limit)
    .bind(skip)
    .fetch_all(pool)
    .await
}

pub(crate) async fn count(pool: &PgPool, filter: &ViewFilter) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM dashboards WHERE ($1::text[] IS NULL OR created_by = ANY($1))",
    )
    .bind(filter.creators())
    .fetch_one(pool)
    .await
}
