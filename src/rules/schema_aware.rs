//! Component E: catalog-dependent rules. These only run when a real or
//! schema-derived [`Catalog`] is supplied — against [`crate::catalog::NullCatalog`]
//! every lookup reports not-found/unknown and the rule stays silent, never a
//! false positive.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    ast_util::{ColumnVec, NameSet},
    catalog::{Catalog, CatalogLookup},
    report::Finding,
    rules::{FnSchemaRule, SchemaRule, meta::RES_011},
    settings::Settings,
    statement::{Statement, StatementKind}
};

pub fn rules() -> Vec<Box<dyn SchemaRule>> {
    vec![Box::new(FnSchemaRule(RES_011, update_overwrites_auto_update_column))]
}

static UPDATE_TABLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^\s*UPDATE\s+[`\"]?([\w.]+)[`\"]?").unwrap());
static SET_CLAUSE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?is)\bSET\b(.*?)(?:\bWHERE\b|$)").unwrap());
static ASSIGNED_COLUMN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)(\w+)\s*=(?!=)").unwrap());

fn update_overwrites_auto_update_column(
    stmt: &Statement,
    _settings: &Settings,
    catalog: &dyn Catalog
) -> Option<Finding> {
    if stmt.kind != StatementKind::Update {
        return None;
    }
    let table_cap = UPDATE_TABLE_RE.captures(&stmt.stripped)?;
    let full_name = &table_cap[1];
    let (db, table_name) = full_name.split_once('.').unwrap_or(("", full_name));

    let table = match catalog.get_table(db, table_name) {
        CatalogLookup::Found(t) => t,
        _ => return None
    };

    let auto_update_cols: ColumnVec =
        table.columns.iter().filter(|c| c.on_update_current_timestamp).map(|c| c.name.as_str().into()).collect();
    if auto_update_cols.is_empty() {
        return None;
    }

    let set_clause = SET_CLAUSE_RE.captures(&stmt.stripped)?;
    let set_cols: NameSet =
        ASSIGNED_COLUMN_RE.captures_iter(&set_clause[1]).map(|c| c[1].to_ascii_lowercase().into()).collect();

    let auto_update_col_untouched = auto_update_cols.iter().all(|c| !set_cols.contains(c.to_ascii_lowercase().as_str()));

    if auto_update_col_untouched {
        Some(Finding::new(
            RES_011,
            0,
            "UPDATE sets every column except the ON UPDATE CURRENT_TIMESTAMP one, silently re-stamping it"
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::{ColumnDef, SchemaCatalog},
        parser::{SqlDialect, parse_statements},
        schema::Schema
    };

    fn stmt(sql: &str) -> Statement {
        parse_statements(sql, SqlDialect::MySql).remove(0)
    }

    struct FixedCatalog(crate::catalog::TableSchema);

    impl Catalog for FixedCatalog {
        fn get_table(&self, _db: &str, name: &str) -> CatalogLookup<crate::catalog::TableSchema> {
            if name.eq_ignore_ascii_case(&self.0.name) {
                CatalogLookup::Found(self.0.clone())
            } else {
                CatalogLookup::NotFound
            }
        }

        fn get_indexes(&self, _db: &str, _name: &str) -> Vec<crate::catalog::IndexDef> {
            Vec::new()
        }

        fn row_count(&self, _db: &str, _name: &str) -> CatalogLookup<u64> {
            CatalogLookup::Unknown
        }

        fn database_exists(&self, _db: &str) -> bool {
            true
        }
    }

    #[test]
    fn silent_against_null_catalog() {
        let s = stmt("UPDATE t SET a = 1 WHERE id = 1");
        assert!(update_overwrites_auto_update_column(&s, &Settings::default(), &crate::catalog::NullCatalog).is_none());
    }

    #[test]
    fn flags_full_overwrite_of_auto_update_table() {
        let catalog = FixedCatalog(crate::catalog::TableSchema {
            name: "t".to_string(),
            columns: vec![
                ColumnDef {
                    name: "a".to_string(),
                    data_type: "INT".to_string(),
                    nullable: true,
                    on_update_current_timestamp: false
                },
                ColumnDef {
                    name: "updated_at".to_string(),
                    data_type: "TIMESTAMP".to_string(),
                    nullable: false,
                    on_update_current_timestamp: true
                },
            ],
            engine: None,
            charset: None
        });
        let s = stmt("UPDATE t SET a = 1 WHERE id = 1");
        assert!(update_overwrites_auto_update_column(&s, &Settings::default(), &catalog).is_some());
    }

    #[test]
    fn flags_partial_update_that_leaves_other_columns_untouched() {
        let catalog = FixedCatalog(crate::catalog::TableSchema {
            name: "t".to_string(),
            columns: vec![
                ColumnDef {
                    name: "a".to_string(),
                    data_type: "INT".to_string(),
                    nullable: true,
                    on_update_current_timestamp: false
                },
                ColumnDef {
                    name: "b".to_string(),
                    data_type: "INT".to_string(),
                    nullable: true,
                    on_update_current_timestamp: false
                },
                ColumnDef {
                    name: "updated_at".to_string(),
                    data_type: "TIMESTAMP".to_string(),
                    nullable: false,
                    on_update_current_timestamp: true
                },
            ],
            engine: None,
            charset: None
        });
        // `b` is never set at all, an ordinary partial update. The rule
        // only cares that `updated_at` itself is left out of the SET list.
        let s = stmt("UPDATE t SET a = 1 WHERE id = 1");
        assert!(update_overwrites_auto_update_column(&s, &Settings::default(), &catalog).is_some());
    }

    #[test]
    fn schema_catalog_reports_not_found_for_unknown_table() {
        let schema = Schema::parse("CREATE TABLE other (id INT PRIMARY KEY)").unwrap();
        let catalog = SchemaCatalog::new(schema);
        let s = stmt("UPDATE t SET a = 1 WHERE id = 1");
        assert!(update_overwrites_auto_update_column(&s, &Settings::default(), &catalog).is_none());
    }
}
