//! Database connection and query execution.

use crate::{DbError, QueryResult, Row, Value};
use rusqlite::params_from_iter;
use serde::de::DeserializeOwned;
use std::path::Path;

/// SQLite database connection.
///
/// Provides type-safe query execution with automatic result
/// deserialization. The connection enforces foreign keys from open.
pub struct Db {
    conn: rusqlite::Connection,
}

impl Db {
    /// Open (or create) a SQLite database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DbError> {
        let conn = rusqlite::Connection::open(path)
            .map_err(|e| DbError::OpenError(e.to_string()))?;
        Self::configure(conn)
    }

    /// Open an in-memory SQLite database.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = rusqlite::Connection::open_in_memory()
            .map_err(|e| DbError::OpenError(e.to_string()))?;
        Self::configure(conn)
    }

    fn configure(conn: rusqlite::Connection) -> Result<Self, DbError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|e| DbError::OpenError(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Execute a SQL statement that doesn't return rows.
    ///
    /// Use this for INSERT, UPDATE, DELETE, etc. Returns the number of
    /// affected rows.
    pub fn execute(&self, sql: &str, params: &[Value]) -> Result<usize, DbError> {
        let bound: Vec<rusqlite::types::Value> =
            params.iter().cloned().map(Into::into).collect();
        Ok(self.conn.execute(sql, params_from_iter(bound))?)
    }

    /// Execute one or more semicolon-separated statements without
    /// parameters. Used for schema setup.
    pub fn execute_batch(&self, sql: &str) -> Result<(), DbError> {
        Ok(self.conn.execute_batch(sql)?)
    }

    /// Execute a SQL query and return raw results.
    pub fn query(&self, sql: &str, params: &[Value]) -> Result<QueryResult, DbError> {
        let bound: Vec<rusqlite::types::Value> =
            params.iter().cloned().map(Into::into).collect();

        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let mut rows = stmt.query(params_from_iter(bound))?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(columns.len());
            for i in 0..columns.len() {
                values.push(Value::from(row.get_ref(i)?));
            }
            out.push(Row::new(columns.clone(), values));
        }

        Ok(QueryResult::new(columns, out))
    }

    /// Execute a SQL query and deserialize each row into `T` by column
    /// name.
    pub fn query_as<T: DeserializeOwned>(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Vec<T>, DbError> {
        let result = self.query(sql, params)?;
        result
            .iter()
            .map(|row| serde_json::from_value(row.to_json()).map_err(DbError::from))
            .collect()
    }

    /// Execute a SQL query expected to return exactly one row.
    ///
    /// Returns `DbError::NotFound` when the query matches nothing.
    pub fn query_one_as<T: DeserializeOwned>(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<T, DbError> {
        self.query_as(sql, params)?
            .into_iter()
            .next()
            .ok_or(DbError::NotFound)
    }

    /// Row id assigned by the most recent successful INSERT.
    pub fn last_insert_id(&self) -> i64 {
        self.conn.last_insert_rowid()
    }

    /// Run `f` inside a single immediate transaction.
    ///
    /// The transaction commits when `f` returns Ok and rolls back when it
    /// returns Err. BEGIN IMMEDIATE takes the write lock up front, so a
    /// read-merge-write sequence inside `f` cannot lose an update to a
    /// concurrent writer.
    pub fn with_transaction<T, E>(
        &self,
        f: impl FnOnce(&Db) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<DbError>,
    {
        self.execute_batch("BEGIN IMMEDIATE")?;
        match f(self) {
            Ok(value) => {
                self.execute_batch("COMMIT")?;
                Ok(value)
            }
            Err(e) => {
                let _ = self.execute_batch("ROLLBACK");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct TestRow {
        id: i64,
        title: String,
    }

    fn test_db() -> Db {
        let db = Db::open_in_memory().unwrap();
        db.execute_batch(
            "CREATE TABLE t (id INTEGER PRIMARY KEY AUTOINCREMENT, title TEXT NOT NULL UNIQUE)",
        )
        .unwrap();
        db
    }

    #[test]
    fn test_execute_and_query() {
        let db = test_db();
        db.execute("INSERT INTO t (title) VALUES (?)", params!["one"])
            .unwrap();
        db.execute("INSERT INTO t (title) VALUES (?)", params!["two"])
            .unwrap();

        let result = db.query("SELECT id, title FROM t ORDER BY id", &[]).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(
            result.first().and_then(|r| r.get("title")).and_then(Value::as_text),
            Some("one")
        );
    }

    #[test]
    fn test_query_as() {
        let db = test_db();
        db.execute("INSERT INTO t (title) VALUES (?)", params!["one"])
            .unwrap();

        let rows: Vec<TestRow> = db.query_as("SELECT id, title FROM t", &[]).unwrap();
        assert_eq!(
            rows,
            vec![TestRow {
                id: 1,
                title: "one".to_string()
            }]
        );
    }

    #[test]
    fn test_query_one_as_not_found() {
        let db = test_db();
        let err = db
            .query_one_as::<TestRow>("SELECT id, title FROM t WHERE id = ?", params![99])
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound));
    }

    #[test]
    fn test_last_insert_id() {
        let db = test_db();
        db.execute("INSERT INTO t (title) VALUES (?)", params!["one"])
            .unwrap();
        assert_eq!(db.last_insert_id(), 1);
    }

    #[test]
    fn test_constraint_violation_is_distinguished() {
        let db = test_db();
        db.execute("INSERT INTO t (title) VALUES (?)", params!["one"])
            .unwrap();
        let err = db
            .execute("INSERT INTO t (title) VALUES (?)", params!["one"])
            .unwrap_err();
        assert!(err.is_constraint());
    }

    #[test]
    fn test_transaction_commits_on_ok() {
        let db = test_db();
        db.with_transaction::<_, DbError>(|db| {
            db.execute("INSERT INTO t (title) VALUES (?)", params!["one"])?;
            Ok(())
        })
        .unwrap();

        let rows: Vec<TestRow> = db.query_as("SELECT id, title FROM t", &[]).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_transaction_rolls_back_on_err() {
        let db = test_db();
        let result: Result<(), DbError> = db.with_transaction(|db| {
            db.execute("INSERT INTO t (title) VALUES (?)", params!["one"])?;
            Err(DbError::QueryError("boom".to_string()))
        });
        assert!(result.is_err());

        let rows: Vec<TestRow> = db.query_as("SELECT id, title FROM t", &[]).unwrap();
        assert!(rows.is_empty());
    }
}
