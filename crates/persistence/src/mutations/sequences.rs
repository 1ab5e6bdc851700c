// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use pointage::EntityKind;
use tracing::debug;

use crate::diesel_schema::id_sequences;
use crate::error::PersistenceError;

const fn prefix(kind: EntityKind) -> char {
    match kind {
        EntityKind::Personnel => 'P',
        EntityKind::Mission => 'M',
    }
}

/// Allocates the next identifier for `kind`, e.g. `P000001`.
///
/// Allocated ids are never reused, even if the write that needed them fails.
///
/// # Errors
///
/// Returns an error if the sequence cannot be read or advanced.
pub fn next_id(conn: &mut SqliteConnection, kind: EntityKind) -> Result<String, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let current: Option<i64> = id_sequences::table
            .find(kind.as_str())
            .select(id_sequences::next_value)
            .first::<i64>(conn)
            .optional()?;
        let value: i64 = current.unwrap_or(1);

        diesel::insert_into(id_sequences::table)
            .values((
                id_sequences::entity.eq(kind.as_str()),
                id_sequences::next_value.eq(value + 1),
            ))
            .on_conflict(id_sequences::entity)
            .do_update()
            .set(id_sequences::next_value.eq(value + 1))
            .execute(conn)?;

        let id: String = format!("{}{value:06}", prefix(kind));
        debug!(entity = kind.as_str(), %id, "Allocated id");
        Ok(id)
    })
}
