//! The `Catalog`/`Sandbox` capability traits (spec.md §6) that the Index/
//! Schema Advisor subset of the rule catalog consumes. A null, always-empty
//! implementation keeps the engine correct offline; a schema-backed
//! implementation is built by generalizing DDL parsing the way
//! [`crate::schema::Schema`] already does.

use crate::schema::Schema;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogLookup<T> {
    Found(T),
    NotFound,
    Unknown
}

/// Read-only view: database -> table -> column definitions, engine/charset,
/// index list, row-count estimate.
pub trait Catalog: Send + Sync {
    fn get_table(&self, db: &str, name: &str) -> CatalogLookup<TableSchema>;
    fn get_indexes(&self, db: &str, name: &str) -> Vec<IndexDef>;
    fn row_count(&self, db: &str, name: &str) -> CatalogLookup<u64>;
    fn database_exists(&self, db: &str) -> bool;
}

/// A mirror of `Catalog` that accepts additional DDL so "candidate index"
/// rules can be validated against a throwaway copy of the schema.
pub trait Sandbox: Send + Sync {
    fn apply_ddl(&mut self, text: &str) -> Result<(), String>;
    fn explain(&self, sql: &str) -> Result<String, String>;
    fn cleanup(&mut self);
}

#[derive(Debug, Clone)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<ColumnDef>,
    pub engine: Option<String>,
    pub charset: Option<String>
}

#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: String,
    pub nullable: bool,
    pub on_update_current_timestamp: bool
}

#[derive(Debug, Clone)]
pub struct IndexDef {
    pub name: String,
    pub columns: Vec<String>,
    pub unique: bool
}

/// Offline mode: every lookup reports `NotFound`/`Unknown`, never a false
/// positive for a catalog-dependent rule.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCatalog;

impl Catalog for NullCatalog {
    fn get_table(&self, _db: &str, _name: &str) -> CatalogLookup<TableSchema> {
        CatalogLookup::NotFound
    }

    fn get_indexes(&self, _db: &str, _name: &str) -> Vec<IndexDef> {
        Vec::new()
    }

    fn row_count(&self, _db: &str, _name: &str) -> CatalogLookup<u64> {
        CatalogLookup::Unknown
    }

    fn database_exists(&self, _db: &str) -> bool {
        false
    }
}

/// A `Catalog` backed by a parsed DDL `Schema` (no live database
/// connection). `db` is ignored — the schema is treated as a single
/// unqualified namespace, matching how [`Schema::parse`] reads plain
/// `CREATE TABLE`/`CREATE INDEX` text.
#[derive(Debug, Clone)]
pub struct SchemaCatalog {
    schema: Schema
}

impl SchemaCatalog {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema
        }
    }
}

impl Catalog for SchemaCatalog {
    fn get_table(&self, _db: &str, name: &str) -> CatalogLookup<TableSchema> {
        match self.schema.tables.get(name) {
            Some(t) => CatalogLookup::Found(TableSchema {
                name: t.name.clone(),
                columns: t
                    .columns
                    .iter()
                    .map(|c| ColumnDef {
                        name: c.name.clone(),
                        data_type: c.data_type.clone(),
                        nullable: c.is_nullable,
                        on_update_current_timestamp: c
                            .data_type
                            .to_ascii_uppercase()
                            .contains("ON UPDATE CURRENT_TIMESTAMP")
                    })
                    .collect(),
                engine: None,
                charset: None
            }),
            None => CatalogLookup::NotFound
        }
    }

    fn get_indexes(&self, _db: &str, name: &str) -> Vec<IndexDef> {
        self.schema
            .tables
            .get(name)
            .map(|t| {
                t.indexes
                    .iter()
                    .map(|i| IndexDef {
                        name: i.name.clone(),
                        columns: i.columns.clone(),
                        unique: i.is_unique
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn row_count(&self, _db: &str, _name: &str) -> CatalogLookup<u64> {
        CatalogLookup::Unknown
    }

    fn database_exists(&self, _db: &str) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_catalog_never_finds_anything() {
        let c = NullCatalog;
        assert!(matches!(c.get_table("db", "t"), CatalogLookup::NotFound));
        assert!(c.get_indexes("db", "t").is_empty());
        assert_eq!(c.row_count("db", "t"), CatalogLookup::Unknown);
        assert!(!c.database_exists("db"));
    }

    #[test]
    fn schema_catalog_finds_parsed_tables() {
        let schema = Schema::parse("CREATE TABLE t (id INT PRIMARY KEY)").unwrap();
        let c = SchemaCatalog::new(schema);
        match c.get_table("db", "t") {
            CatalogLookup::Found(t) => assert_eq!(t.columns.len(), 1),
            _ => panic!("expected table to be found")
        }
    }
}
