//! Dynamic, allow-listed SELECT lists decoded into JSON objects

use serde_json::{Map, Value};
use sqlx::postgres::{PgRow, Postgres};
use sqlx::{QueryBuilder, Row};

use crate::models::{Column, ColumnKind};

/// One result row keyed by public field name
pub type JsonRow = Map<String, Value>;

/// Push `expr AS "Name", ...` for each column.
///
/// Expressions and aliases come from the `Column` allow-list only.
pub(crate) fn push_projection<C: Column>(builder: &mut QueryBuilder<'_, Postgres>, columns: &[C]) {
    let mut list = builder.separated(", ");
    for column in columns {
        list.push(format!("{} AS \"{}\"", column.expr(), column.name()));
    }
}

/// Decode the projected columns of `row`, NULL becoming JSON null.
pub(crate) fn decode_row<C: Column>(row: &PgRow, columns: &[C]) -> Result<JsonRow, sqlx::Error> {
    let mut out = JsonRow::new();
    for column in columns {
        let value = match column.kind() {
            ColumnKind::Int => row
                .try_get::<Option<i64>, _>(column.name())?
                .map_or(Value::Null, Value::from),
            ColumnKind::Text => row
                .try_get::<Option<String>, _>(column.name())?
                .map_or(Value::Null, Value::from),
        };
        out.insert(column.name().to_owned(), value);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserColumn;

    #[test]
    fn projection_quotes_aliases() {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT ");
        push_projection(&mut builder, &[UserColumn::UserId, UserColumn::Rank]);
        assert_eq!(
            builder.sql(),
            r#"SELECT u.user_id AS "UserID", rk.rank_name AS "Rank""#
        );
    }
}
