//! SeaORM-backed stored procedure invocation.
//!
//! Two call shapes are issued:
//!
//! - queries (`get`) must return a result set whose columns decode as a
//!   [`UserRecord`];
//! - commands (`create`, `update`, `delete`) report how many rows they
//!   touched in a column named `affected`.
//!
//! On Postgres a command is a scalar function call aliased to `affected`, so
//! any function returning an integer satisfies the contract. On MySQL both
//! shapes are `CALL`, and command procedures must end with a
//! `SELECT ... AS affected`.

use async_trait::async_trait;
use sea_orm::{
    ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, FromQueryResult, SqlErr,
    Statement, Value,
};
use uuid::Uuid;

use common::{AppError, AppResult};

use crate::repository::entities::UserRecord;
use crate::repository::{ProcedureDriver, ProcedureName};

/// Column the command procedures report their row count in.
const AFFECTED_COLUMN: &str = "affected";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CallShape {
    Query,
    Command,
}

/// [`ProcedureDriver`] over a SeaORM connection pool.
///
/// Every invocation borrows one pooled connection for a single statement;
/// the pool takes it back when the statement future completes or is dropped.
pub struct SeaOrmProcedureDriver {
    db: DatabaseConnection,
}

impl SeaOrmProcedureDriver {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn statement(
        &self,
        shape: CallShape,
        procedure: &ProcedureName,
        id: Uuid,
        payload: Option<String>,
    ) -> AppResult<Statement> {
        let backend = self.db.get_database_backend();
        let sql = call_sql(backend, shape, procedure)?;

        let values: [Value; 2] = [id.into(), payload.into()];
        Ok(Statement::from_sql_and_values(backend, sql, values))
    }
}

/// SQL invoking `procedure` with an id and a payload parameter.
///
/// `procedure` is spliced into the SQL; it is safe only because
/// [`ProcedureName`] admits identifier characters alone.
fn call_sql(backend: DatabaseBackend, shape: CallShape, procedure: &ProcedureName) -> AppResult<String> {
    match (backend, shape) {
        (DatabaseBackend::Postgres, CallShape::Query) => {
            Ok(format!("SELECT * FROM {}($1, $2)", procedure))
        }
        (DatabaseBackend::Postgres, CallShape::Command) => Ok(format!(
            "SELECT {}($1, $2)::bigint AS {}",
            procedure, AFFECTED_COLUMN
        )),
        (DatabaseBackend::MySql, _) => Ok(format!("CALL {}(?, ?)", procedure)),
        (other, _) => Err(AppError::persistence(format!(
            "stored procedures are not supported on {:?}",
            other
        ))),
    }
}

/// Row count of a command. A command returning no row touched nothing.
fn affected_rows(procedure: &ProcedureName, affected: Option<i64>) -> AppResult<u64> {
    let affected = affected.unwrap_or(0);

    u64::try_from(affected).map_err(|_| {
        AppError::persistence(format!("{} reported {} affected rows", procedure, affected))
    })
}

fn is_unique_violation(err: Option<SqlErr>) -> bool {
    matches!(err, Some(SqlErr::UniqueConstraintViolation(_)))
}

fn classify(err: DbErr) -> AppError {
    if is_unique_violation(err.sql_err()) {
        AppError::conflict("User")
    } else {
        AppError::Database(err)
    }
}

#[async_trait]
impl ProcedureDriver for SeaOrmProcedureDriver {
    async fn query(
        &self,
        procedure: &ProcedureName,
        id: Uuid,
        payload: Option<String>,
    ) -> AppResult<Option<UserRecord>> {
        tracing::debug!(%procedure, %id, "Invoking query procedure");
        let statement = self.statement(CallShape::Query, procedure, id, payload)?;

        UserRecord::find_by_statement(statement)
            .one(&self.db)
            .await
            .map_err(classify)
    }

    async fn execute(
        &self,
        procedure: &ProcedureName,
        id: Uuid,
        payload: Option<String>,
    ) -> AppResult<u64> {
        tracing::debug!(%procedure, %id, "Invoking command procedure");
        let statement = self.statement(CallShape::Command, procedure, id, payload)?;

        let affected = match self.db.query_one(statement).await.map_err(classify)? {
            Some(row) => Some(row.try_get::<i64>("", AFFECTED_COLUMN).map_err(classify)?),
            None => None,
        };

        affected_rows(procedure, affected)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use sea_orm::{MockDatabase, RuntimeErr};

    use super::*;

    fn name(raw: &str) -> ProcedureName {
        ProcedureName::parse(raw).unwrap()
    }

    fn driver_over(db: MockDatabase) -> SeaOrmProcedureDriver {
        SeaOrmProcedureDriver::new(db.into_connection())
    }

    fn affected_row(count: i64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([(AFFECTED_COLUMN, Value::from(count))])
    }

    #[test]
    fn test_postgres_call_shapes() {
        let get = call_sql(DatabaseBackend::Postgres, CallShape::Query, &name("get_user")).unwrap();
        let delete = call_sql(DatabaseBackend::Postgres, CallShape::Command, &name("delete_user")).unwrap();

        assert_eq!(get, "SELECT * FROM get_user($1, $2)");
        assert_eq!(delete, "SELECT delete_user($1, $2)::bigint AS affected");
    }

    #[test]
    fn test_mysql_call_shapes() {
        for shape in [CallShape::Query, CallShape::Command] {
            let sql = call_sql(DatabaseBackend::MySql, shape, &name("update_user")).unwrap();
            assert_eq!(sql, "CALL update_user(?, ?)");
        }
    }

    #[test]
    fn test_sqlite_is_unsupported() {
        let result = call_sql(DatabaseBackend::Sqlite, CallShape::Query, &name("get_user"));

        assert!(matches!(&result, Err(e) if e.is_persistence()));
    }

    #[test]
    fn test_affected_rows_decoding() {
        let procedure = name("update_user");

        assert_eq!(affected_rows(&procedure, Some(1)).unwrap(), 1);
        assert_eq!(affected_rows(&procedure, Some(0)).unwrap(), 0);
        assert_eq!(affected_rows(&procedure, None).unwrap(), 0);

        let negative = affected_rows(&procedure, Some(-1));
        assert!(matches!(&negative, Err(e) if e.is_persistence()));
    }

    #[test]
    fn test_only_unique_violations_are_conflicts() {
        assert!(is_unique_violation(Some(SqlErr::UniqueConstraintViolation(
            "duplicate key value violates unique constraint \"users_pkey\"".to_string()
        ))));
        assert!(!is_unique_violation(Some(SqlErr::ForeignKeyConstraintViolation(
            "users_team_fkey".to_string()
        ))));
        assert!(!is_unique_violation(None));

        let err = classify(DbErr::Custom("connection reset".to_string()));
        assert!(matches!(err, AppError::Database(_)));

        let err = classify(DbErr::Query(RuntimeErr::Internal("timeout".to_string())));
        assert!(err.is_persistence());
    }

    #[tokio::test]
    async fn test_execute_reads_affected_column() {
        let driver = driver_over(
            MockDatabase::new(DatabaseBackend::Postgres).append_query_results([vec![affected_row(1)]]),
        );

        let affected = driver
            .execute(&name("delete_user"), Uuid::new_v4(), None)
            .await
            .unwrap();
        assert_eq!(affected, 1);
    }

    #[tokio::test]
    async fn test_execute_without_row_touched_nothing() {
        let driver = driver_over(
            MockDatabase::new(DatabaseBackend::MySql)
                .append_query_results([Vec::<BTreeMap<&'static str, Value>>::new()]),
        );

        let affected = driver
            .execute(&name("delete_user"), Uuid::new_v4(), None)
            .await
            .unwrap();
        assert_eq!(affected, 0);
    }

    #[tokio::test]
    async fn test_execute_rejects_negative_count() {
        let driver = driver_over(
            MockDatabase::new(DatabaseBackend::Postgres).append_query_results([vec![affected_row(-3)]]),
        );

        let result = driver
            .execute(&name("update_user"), Uuid::new_v4(), Some("{}".to_string()))
            .await;
        assert!(matches!(&result, Err(e) if e.is_persistence()));
    }

    #[tokio::test]
    async fn test_execute_without_affected_column_fails() {
        // A missing count must not read as zero rows
        let row = BTreeMap::from([("rows", Value::from(1i64))]);
        let driver = driver_over(MockDatabase::new(DatabaseBackend::Postgres).append_query_results([vec![row]]));

        let result = driver.execute(&name("delete_user"), Uuid::new_v4(), None).await;
        assert!(matches!(result, Err(AppError::Database(_))));
    }

    #[tokio::test]
    async fn test_query_decodes_user_row() {
        let id = Uuid::new_v4();
        let row = BTreeMap::from([
            ("id", Value::from(id)),
            ("name", Value::from("Ramsay")),
            ("phone", Value::from("9876543456")),
            ("email", Value::from("abc@def.com")),
            ("administrator", Value::from(false)),
        ]);
        let driver = driver_over(MockDatabase::new(DatabaseBackend::Postgres).append_query_results([vec![row]]));

        let record = driver.query(&name("get_user"), id, None).await.unwrap().unwrap();
        assert_eq!(record.id, id);
        assert_eq!(record.name, "Ramsay");
        assert!(!record.administrator);
    }

    #[tokio::test]
    async fn test_query_surfaces_database_errors() {
        let driver = driver_over(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_errors([DbErr::Custom("connection reset".to_string())]),
        );

        let result = driver.query(&name("get_user"), Uuid::new_v4(), None).await;
        assert!(matches!(&result, Err(e) if e.is_persistence()));
    }

    #[tokio::test]
    async fn test_unsupported_backend_never_reaches_the_database() {
        // No results queued: any statement sent would fail differently
        let driver = driver_over(MockDatabase::new(DatabaseBackend::Sqlite));

        let result = driver.execute(&name("delete_user"), Uuid::new_v4(), None).await;
        assert!(matches!(result, Err(AppError::Persistence(_))));
    }
}
