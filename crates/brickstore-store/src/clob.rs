//! CLOB handle over a SQLite text cell
//!
//! SQLite returns text inline, but the mapping layer reads large columns
//! through [`Clob`] so the converter decides how they are materialized.
//! SQL `length()` and `substr()` count characters and `substr()` is
//! 1-indexed, which matches the [`Clob`] contract.

#![allow(clippy::result_large_err)]

use brickstore_core::convert::Clob;
use rusqlite::Connection;

use crate::errors::{from_rusqlite, Result};
use crate::repo::sql::quote_ident;

/// One text cell, addressed by table, column and rowid
pub struct SqliteClob<'conn> {
    conn: &'conn Connection,
    length_sql: String,
    substr_sql: String,
    rowid: i64,
}

impl<'conn> SqliteClob<'conn> {
    pub fn new(conn: &'conn Connection, table: &str, column: &str, rowid: i64) -> Self {
        let table = quote_ident(table);
        let column = quote_ident(column);
        Self {
            conn,
            length_sql: format!("SELECT length({column}) FROM {table} WHERE rowid = ?1"),
            substr_sql: format!("SELECT substr({column}, ?1, ?2) FROM {table} WHERE rowid = ?3"),
            rowid,
        }
    }
}

impl Clob for SqliteClob<'_> {
    fn length(&self) -> Result<u64> {
        let length: Option<i64> = self
            .conn
            .query_row(&self.length_sql, [self.rowid], |row| row.get(0))
            .map_err(from_rusqlite)?;

        Ok(length.map_or(0, |l| l.max(0) as u64))
    }

    fn sub_string(&self, pos: u64, len: u32) -> Result<String> {
        let pos = i64::try_from(pos).unwrap_or(i64::MAX);
        let text: Option<String> = self
            .conn
            .query_row(
                &self.substr_sql,
                rusqlite::params![pos, len, self.rowid],
                |row| row.get(0),
            )
            .map_err(from_rusqlite)?;

        Ok(text.unwrap_or_default())
    }
}
