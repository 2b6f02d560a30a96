//! Repository for the LegoSet aggregate
//!
//! The aggregate is written and removed as a unit: root row, manual row and
//! model rows change together inside one transaction. Lifecycle events are
//! published around each write and after each load.

#![allow(clippy::result_large_err)]

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use brickstore_core::config::AggregateConfiguration;
use brickstore_core::convert::CustomConversions;
use brickstore_core::errors::BrickstoreError;
use brickstore_core::events::{EventPublisher, RelationalEvent};
use brickstore_core::{log_op_end, log_op_error, log_op_start};
use brickstore_core::{LegoSet, Manual, Model};
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Transaction};

use crate::clob::SqliteClob;
use crate::errors::{from_rusqlite, unassigned_id, Result};
use crate::repo::sql::{AggregateNames, LegoSetStatements, ModelValue};

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

/// Persists [`LegoSet`] aggregates with names from the configured strategy
#[derive(Debug, Clone)]
pub struct LegoSetRepository {
    statements: LegoSetStatements,
    conversions: Arc<CustomConversions>,
    events: Arc<EventPublisher>,
}

impl LegoSetRepository {
    pub fn new(config: &AggregateConfiguration) -> Self {
        let naming = config.naming_strategy();
        Self {
            statements: LegoSetStatements::new(naming.as_ref()),
            conversions: config.conversions(),
            events: config.event_publisher(),
        }
    }

    /// Physical names this repository writes to
    pub fn names(&self) -> &AggregateNames {
        &self.statements.names
    }

    /// Save the whole aggregate and return its id
    ///
    /// Listeners see the set before anything is written; the id-setting
    /// listener assigns the id there. Existing manual and model rows are
    /// replaced by the current contents.
    pub fn save(&self, conn: &mut Connection, lego_set: &mut LegoSet) -> Result<i32> {
        let start = Instant::now();
        log_op_start!("save_lego_set", set_name = %lego_set.name);

        match self.save_inner(conn, lego_set) {
            Ok(id) => {
                log_op_end!(
                    "save_lego_set",
                    duration_ms = elapsed_ms(start),
                    lego_set_id = id
                );
                Ok(id)
            }
            Err(e) => {
                log_op_error!("save_lego_set", e.clone(), duration_ms = elapsed_ms(start));
                Err(e)
            }
        }
    }

    fn save_inner(&self, conn: &mut Connection, lego_set: &mut LegoSet) -> Result<i32> {
        self.events
            .publish(&mut RelationalEvent::BeforeSave {
                entity: &mut *lego_set,
            });

        if lego_set.id == 0 {
            return Err(unassigned_id(&self.statements.names.set_table));
        }

        let tx = conn.transaction().map_err(from_rusqlite)?;
        self.write_aggregate(&tx, lego_set)?;
        tx.commit().map_err(from_rusqlite)?;

        self.events
            .publish(&mut RelationalEvent::AfterSave { entity: &*lego_set });

        Ok(lego_set.id)
    }

    fn write_aggregate(&self, tx: &Transaction, lego_set: &LegoSet) -> Result<()> {
        let s = &self.statements;
        let id = lego_set.id;

        tx.execute(
            &s.upsert_set,
            rusqlite::params![
                id,
                lego_set.name,
                lego_set.minimum_age,
                lego_set.maximum_age
            ],
        )
        .map_err(from_rusqlite)?;

        tx.execute(&s.delete_manual, [id]).map_err(from_rusqlite)?;
        if let Some(manual) = &lego_set.manual {
            tx.execute(
                &s.insert_manual,
                rusqlite::params![manual.id, manual.author, manual.text],
            )
            .map_err(from_rusqlite)?;
        }

        tx.execute(&s.delete_models, [id]).map_err(from_rusqlite)?;
        let mut insert_model = tx.prepare(&s.insert_model).map_err(from_rusqlite)?;
        for (key, model) in &lego_set.models {
            let values = s.model_values.iter().map(|value| match value {
                ModelValue::SetId => Value::Integer(i64::from(id)),
                ModelValue::Key => Value::Text(key.clone()),
                ModelValue::Name => Value::Text(model.name.clone()),
                ModelValue::Description => Value::Text(model.description.clone()),
            });
            insert_model
                .execute(rusqlite::params_from_iter(values))
                .map_err(from_rusqlite)?;
        }

        Ok(())
    }

    /// Load one aggregate, or `None` if no root row has this id
    pub fn find_by_id(&self, conn: &Connection, id: i32) -> Result<Option<LegoSet>> {
        let start = Instant::now();
        log_op_start!("find_lego_set", lego_set_id = id);

        match self.load(conn, id) {
            Ok(found) => {
                log_op_end!(
                    "find_lego_set",
                    duration_ms = elapsed_ms(start),
                    found = found.is_some()
                );
                Ok(found)
            }
            Err(e) => {
                log_op_error!("find_lego_set", e.clone(), duration_ms = elapsed_ms(start));
                Err(e)
            }
        }
    }

    /// Like [`Self::find_by_id`], but a missing set is a `NotFound` error
    pub fn get(&self, conn: &Connection, id: i32) -> Result<LegoSet> {
        self.find_by_id(conn, id)?
            .ok_or_else(|| BrickstoreError::LegoSetNotFound { id }.into())
    }

    /// Every stored aggregate, ordered by id
    pub fn find_all(&self, conn: &Connection) -> Result<Vec<LegoSet>> {
        let ids: Vec<i32> = {
            let mut stmt = conn
                .prepare(&self.statements.select_set_ids)
                .map_err(from_rusqlite)?;
            let rows = stmt
                .query_map([], |row| row.get(0))
                .map_err(from_rusqlite)?;
            rows.collect::<std::result::Result<Vec<_>, _>>()
                .map_err(from_rusqlite)?
        };

        let mut sets = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(set) = self.load(conn, id)? {
                sets.push(set);
            }
        }
        Ok(sets)
    }

    pub fn count(&self, conn: &Connection) -> Result<u64> {
        let count: i64 = conn
            .query_row(&self.statements.count_sets, [], |row| row.get(0))
            .map_err(from_rusqlite)?;
        Ok(count.max(0) as u64)
    }

    /// Highest stored id, 0 for an empty table
    pub fn max_id(&self, conn: &Connection) -> Result<i32> {
        conn.query_row(&self.statements.max_set_id, [], |row| row.get(0))
            .map_err(from_rusqlite)
    }

    /// Remove the aggregate; returns whether a root row existed
    pub fn delete_by_id(&self, conn: &mut Connection, id: i32) -> Result<bool> {
        let start = Instant::now();
        log_op_start!("delete_lego_set", lego_set_id = id);

        match self.delete_inner(conn, id) {
            Ok(deleted) => {
                log_op_end!(
                    "delete_lego_set",
                    duration_ms = elapsed_ms(start),
                    deleted = deleted
                );
                Ok(deleted)
            }
            Err(e) => {
                log_op_error!("delete_lego_set", e.clone(), duration_ms = elapsed_ms(start));
                Err(e)
            }
        }
    }

    fn delete_inner(&self, conn: &mut Connection, id: i32) -> Result<bool> {
        let s = &self.statements;
        let table = s.names.set_table.as_str();

        self.events.publish(&mut RelationalEvent::BeforeDelete {
            table,
            id: i64::from(id),
        });

        let tx = conn.transaction().map_err(from_rusqlite)?;
        tx.execute(&s.delete_models, [id]).map_err(from_rusqlite)?;
        tx.execute(&s.delete_manual, [id]).map_err(from_rusqlite)?;
        let removed = tx.execute(&s.delete_set, [id]).map_err(from_rusqlite)?;
        tx.commit().map_err(from_rusqlite)?;

        if removed > 0 {
            self.events.publish(&mut RelationalEvent::AfterDelete {
                table,
                id: i64::from(id),
            });
        }

        Ok(removed > 0)
    }

    fn load(&self, conn: &Connection, id: i32) -> Result<Option<LegoSet>> {
        let s = &self.statements;

        let root = conn
            .query_row(&s.select_set, [id], |row| {
                Ok(LegoSet {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    minimum_age: row.get(2)?,
                    maximum_age: row.get(3)?,
                    manual: None,
                    models: BTreeMap::new(),
                })
            })
            .optional()
            .map_err(from_rusqlite)?;

        let Some(mut lego_set) = root else {
            return Ok(None);
        };

        lego_set.manual = self.load_manual(conn, id)?;
        lego_set.models = self.load_models(conn, id)?;

        self.events
            .publish(&mut RelationalEvent::AfterLoad { entity: &lego_set });

        Ok(Some(lego_set))
    }

    fn load_manual(&self, conn: &Connection, id: i32) -> Result<Option<Manual>> {
        let s = &self.statements;

        let row: Option<(i64, i64, String)> = conn
            .query_row(&s.select_manual, [id], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })
            .optional()
            .map_err(from_rusqlite)?;

        let Some((rowid, manual_id, author)) = row else {
            return Ok(None);
        };

        let text = self.read_clob(conn, &s.names.manual_table, &s.names.manual_text, rowid)?;

        Ok(Some(Manual {
            id: manual_id,
            author,
            text,
        }))
    }

    fn load_models(&self, conn: &Connection, id: i32) -> Result<BTreeMap<String, Model>> {
        let s = &self.statements;

        let rows: Vec<(i64, String, String)> = {
            let mut stmt = conn.prepare(&s.select_models).map_err(from_rusqlite)?;
            let mapped = stmt
                .query_map([id], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
                .map_err(from_rusqlite)?;
            mapped
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(from_rusqlite)?
        };

        let mut models = BTreeMap::new();
        for (rowid, key, name) in rows {
            let description = self.read_clob(
                conn,
                &s.names.model_table,
                &s.names.model_description,
                rowid,
            )?;
            models.insert(key, Model { name, description });
        }
        Ok(models)
    }

    fn read_clob(&self, conn: &Connection, table: &str, column: &str, rowid: i64) -> Result<String> {
        let clob = SqliteClob::new(conn, table, column, rowid);
        self.conversions
            .read_clob(&format!("{}.{}", table, column), &clob)
    }
}
