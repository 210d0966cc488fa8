//! Query port backed by the local SQLite record store.
//!
//! Predicates are compiled to `json_extract` expressions over the stored JSON
//! text. Field paths and values are always bound as parameters. Records are
//! normalized on insert, so stored keys match the canonical field names the
//! repositories query by.

use diesel::prelude::*;
use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::sql_types::{BigInt, Double, Text};
use diesel::sqlite::Sqlite;

use crate::db::{DbPool, get_connection};
use crate::domain::Domain;
use crate::domain::record::RawRecord;
use crate::models::record::{NewRecord, RecordCount, RecordData};
use crate::normalizer::{fold_case, normalize_record};
use crate::repository::QueryPort;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::query::{
    PageWindow, Predicate, QuerySpec, Scalar, SortDirection, project_record,
};

/// Query port over the `records` table.
#[derive(Clone)]
pub struct DieselQueryPort {
    pool: DbPool,
}

impl DieselQueryPort {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Normalizes and stores records for a domain in one statement.
    pub fn insert_records(&self, domain: Domain, records: &[RawRecord]) -> RepositoryResult<usize> {
        use crate::schema::records;

        let mut conn = get_connection(&self.pool)?;
        let insertables = records
            .iter()
            .map(|record| NewRecord::new(domain, normalize_record(record).as_map()))
            .collect::<RepositoryResult<Vec<NewRecord>>>()?;
        let affected = diesel::insert_into(records::table)
            .values(&insertables)
            .execute(&mut conn)?;
        Ok(affected)
    }

    /// Removes every stored record of a domain.
    pub fn clear_domain(&self, domain: Domain) -> RepositoryResult<usize> {
        use crate::schema::records;

        let mut conn = get_connection(&self.pool)?;
        let deleted = diesel::delete(records::table.filter(records::domain.eq(domain.slug())))
            .execute(&mut conn)?;
        Ok(deleted)
    }
}

#[derive(Clone, Debug, PartialEq)]
enum SqlParam {
    Text(String),
    Float(f64),
    Int(i64),
}

/// SQL text with its positional parameters.
#[derive(Debug, Default)]
struct CompiledSql {
    sql: String,
    params: Vec<SqlParam>,
}

fn json_path(field: &str) -> RepositoryResult<String> {
    let valid = !field.is_empty()
        && field
            .split('.')
            .all(|segment| !segment.is_empty() && segment.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
    if !valid {
        return Err(RepositoryError::QueryBuild(format!(
            "unsupported field name: {field:?}"
        )));
    }
    Ok(format!("$.{field}"))
}

fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for ch in fold_case(needle).chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

/// Numeric view of a column, ignoring the `$`, `,` and space characters of
/// formatted amounts.
fn amount(column: &str, cast: &str) -> String {
    format!(
        "CAST(REPLACE(REPLACE(REPLACE(CAST({column} AS TEXT), '$', ''), ',', ''), ' ', '') AS {cast})"
    )
}

fn compile_predicate(predicate: &Predicate, params: &mut Vec<SqlParam>) -> RepositoryResult<String> {
    let extract = |field: &str, params: &mut Vec<SqlParam>| -> RepositoryResult<&'static str> {
        params.push(SqlParam::Text(json_path(field)?));
        Ok("json_extract(data, ?)")
    };

    let sql = match predicate {
        Predicate::All(clauses) | Predicate::Any(clauses) if clauses.is_empty() => "1 = 1".to_string(),
        Predicate::All(clauses) | Predicate::Any(clauses) => {
            let joiner = if matches!(predicate, Predicate::All(_)) {
                " AND "
            } else {
                " OR "
            };
            let parts = clauses
                .iter()
                .map(|clause| compile_predicate(clause, params).map(|sql| format!("({sql})")))
                .collect::<RepositoryResult<Vec<String>>>()?;
            parts.join(joiner)
        }
        Predicate::In { field, values } => {
            let column = extract(field, params)?;
            let placeholders = vec!["?"; values.len()].join(", ");
            params.extend(values.iter().cloned().map(SqlParam::Text));
            format!("CAST({column} AS TEXT) IN ({placeholders})")
        }
        Predicate::Like { field, needle } => {
            let column = extract(field, params)?;
            params.push(SqlParam::Text(escape_like(needle)));
            format!("fold_case(CAST({column} AS TEXT)) LIKE ? ESCAPE '\\'")
        }
        Predicate::Gte { field, value } | Predicate::Lte { field, value } => {
            let operator = if matches!(predicate, Predicate::Gte { .. }) {
                ">="
            } else {
                "<="
            };
            let column = extract(field, params)?;
            let (operand, param) = match value {
                Scalar::Int(i) => (amount(column, "INTEGER"), SqlParam::Int(*i)),
                Scalar::Float(f) => (amount(column, "REAL"), SqlParam::Float(*f)),
                Scalar::Text(t) => (format!("CAST({column} AS TEXT)"), SqlParam::Text(t.clone())),
            };
            params.push(param);
            format!("{operand} {operator} ?")
        }
        Predicate::IsNull { field } => {
            let column = extract(field, params)?;
            format!("COALESCE(TRIM(CAST({column} AS TEXT)), '') = ''")
        }
        Predicate::NotNull { field } => {
            let column = extract(field, params)?;
            format!("COALESCE(TRIM(CAST({column} AS TEXT)), '') <> ''")
        }
    };
    Ok(sql)
}

fn compile_where(spec: &QuerySpec) -> RepositoryResult<CompiledSql> {
    let mut params = vec![SqlParam::Text(spec.domain().slug().to_string())];
    let predicate = compile_predicate(spec.predicate(), &mut params)?;
    Ok(CompiledSql {
        sql: format!("FROM records WHERE domain = ? AND ({predicate})"),
        params,
    })
}

fn compile_page(spec: &QuerySpec, window: Option<PageWindow>) -> RepositoryResult<CompiledSql> {
    let CompiledSql { sql, mut params } = compile_where(spec)?;
    let mut sql = format!("SELECT data {sql} ORDER BY ");
    for order in spec.order() {
        let path = json_path(&order.field)?;
        let direction = match order.direction {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        };
        sql.push_str(&format!(
            "json_extract(data, ?) IS NULL, json_extract(data, ?) {direction}, "
        ));
        params.push(SqlParam::Text(path.clone()));
        params.push(SqlParam::Text(path));
    }
    sql.push_str("id ASC");
    if let Some(PageWindow { limit, offset }) = window {
        sql.push_str(" LIMIT ? OFFSET ?");
        params.push(SqlParam::Int(to_i64(limit)?));
        params.push(SqlParam::Int(to_i64(offset)?));
    }
    Ok(CompiledSql { sql, params })
}

fn compile_count(spec: &QuerySpec) -> RepositoryResult<CompiledSql> {
    let CompiledSql { sql, params } = compile_where(spec)?;
    Ok(CompiledSql {
        sql: format!("SELECT COUNT(*) AS count {sql}"),
        params,
    })
}

fn to_i64(value: usize) -> RepositoryResult<i64> {
    i64::try_from(value).map_err(|_| RepositoryError::QueryBuild(format!("{value} is out of range")))
}

fn bind_all(compiled: CompiledSql) -> BoxedSqlQuery<'static, Sqlite, SqlQuery> {
    let mut query = diesel::sql_query(compiled.sql).into_boxed::<Sqlite>();
    for param in compiled.params {
        query = match param {
            SqlParam::Text(value) => query.bind::<Text, _>(value),
            SqlParam::Float(value) => query.bind::<Double, _>(value),
            SqlParam::Int(value) => query.bind::<BigInt, _>(value),
        };
    }
    query
}

impl QueryPort for DieselQueryPort {
    fn execute(
        &self,
        spec: &QuerySpec,
        window: Option<PageWindow>,
    ) -> RepositoryResult<Vec<RawRecord>> {
        let compiled = compile_page(spec, window)?;
        log::debug!("{} page query: {}", spec.domain(), compiled.sql);

        let mut conn = get_connection(&self.pool)?;
        let rows = bind_all(compiled).load::<RecordData>(&mut conn)?;

        rows.into_iter()
            .map(|row| {
                row.into_record()
                    .map(|record| project_record(record, spec.projection()))
            })
            .collect()
    }

    fn count(&self, spec: &QuerySpec) -> RepositoryResult<usize> {
        let compiled = compile_count(spec)?;
        log::debug!("{} count query: {}", spec.domain(), compiled.sql);

        let mut conn = get_connection(&self.pool)?;
        let total = bind_all(compiled).get_result::<RecordCount>(&mut conn)?;

        usize::try_from(total.count)
            .map_err(|_| RepositoryError::Unexpected(format!("negative count {}", total.count)))
    }
}
