//! Static rule metadata: one `RuleMeta` per catalog entry, grouped by
//! category exactly as spec.md §4 groups them. `RuleMeta` values are
//! `'static` and immutable — evaluation order never depends on them, only
//! sorting and reporting do.

use crate::severity::Severity;

/// Static, process-wide metadata for one rule. The inspector logic lives in
/// the category module; this is only the identity/sort/render data.
#[derive(Debug, Clone, Copy)]
pub struct RuleMeta {
    pub id: &'static str,
    pub severity: Severity,
    pub summary: &'static str,
    pub content: &'static str,
    pub sample: &'static str,
    /// Absolute rules apply even when the statement failed to parse.
    pub absolute: bool
}

macro_rules! rule {
    ($name:ident, $id:literal, $sev:ident, $absolute:expr, $summary:literal, $content:literal, $sample:literal) => {
        pub static $name: &RuleMeta = &RuleMeta {
            id: $id,
            severity: Severity::$sev,
            summary: $summary,
            content: $content,
            sample: $sample,
            absolute: $absolute
        };
    };
}

// ALI — alias rules
rule!(ALI_001, "ALI.001", L1, false, "implicit alias", "A column or table alias omits the `AS` keyword.", "SELECT name n FROM t");
rule!(ALI_002, "ALI.002", L2, false, "star aliased", "`*` is aliased, which is meaningless since `*` expands to every column.", "SELECT * AS everything FROM t");
rule!(ALI_003, "ALI.003", L1, false, "alias identical to source", "An alias is spelled identically to the column or table it renames.", "SELECT name AS name FROM t");

// ARG — argument/predicate rules
rule!(ARG_001, "ARG.001", L4, false, "leading wildcard", "`LIKE` pattern begins with a wildcard, which prevents index range scans.", "SELECT * FROM t WHERE name LIKE '%abc'");
rule!(ARG_002, "ARG.002", L2, false, "LIKE without wildcard", "`LIKE` pattern has no wildcard character; an equality comparison is clearer and can use an index directly.", "SELECT * FROM t WHERE name LIKE 'abc'");
rule!(ARG_004, "ARG.004", L3, false, "large IN list", "`IN (...)` list exceeds the configured item threshold.", "SELECT * FROM t WHERE id IN (1,2,3,...,50)");
rule!(ARG_005, "ARG.005", L4, false, "IN/NOT IN with NULL", "`IN (NULL)` or `NOT IN (NULL)` never matches the way the author likely intends.", "SELECT * FROM t WHERE id NOT IN (1, NULL)");
rule!(ARG_006, "ARG.006", L1, false, "IS NULL predicate", "Predicate tests nullability explicitly; verify the column is expected to be nullable.", "SELECT * FROM t WHERE deleted_at IS NOT NULL");
rule!(ARG_007, "ARG.007", L3, false, "REGEXP predicate", "`REGEXP` cannot use a standard index and scans every candidate row.", "SELECT * FROM t WHERE name REGEXP '^a'");
rule!(ARG_008, "ARG.008", L2, false, "redundant OR", "Two `OR` branches compare the same operands and can be collapsed.", "SELECT * FROM t WHERE a = 1 OR a = 1");
rule!(ARG_009, "ARG.009", L1, false, "padded string literal", "String literal has leading or trailing whitespace inside the quotes.", "SELECT * FROM t WHERE name = ' abc '");
rule!(ARG_010, "ARG.010", L2, false, "explicit index hint", "`USE/IGNORE/FORCE INDEX` pins the optimizer's plan and can go stale as data changes.", "SELECT * FROM t FORCE INDEX (idx_a) WHERE a = 1");
rule!(ARG_011, "ARG.011", L3, false, "index-defeating negation", "`NOT IN`/`NOT LIKE` typically cannot use an index efficiently.", "SELECT * FROM t WHERE a NOT IN (1,2,3)");
rule!(ARG_012, "ARG.012", L3, false, "large VALUES list", "A single `INSERT` statement's row count exceeds the configured threshold.", "INSERT INTO t VALUES (1),(2),(3)");
rule!(ARG_013, "ARG.013", L2, true, "full-width quote", "String literal contains a full-width/curly quote character, often from a pasted document.", "SELECT \u{201C}abc\u{201D} FROM t");

// CLA — clause rules
rule!(CLA_001, "CLA.001", L5, false, "DML without WHERE", "`UPDATE`/`DELETE`/`SELECT` has no `WHERE` clause and will scan or mutate every row.", "DELETE FROM t");
rule!(CLA_002, "CLA.002", L4, false, "ORDER BY RAND()", "Sorting by `RAND()` forces a full sort with no usable index.", "SELECT * FROM t ORDER BY RAND() LIMIT 1");
rule!(CLA_003, "CLA.003", L3, false, "large offset", "`LIMIT offset, n` has an offset above the configured threshold, which still scans the skipped rows.", "SELECT * FROM t LIMIT 100000, 20");
rule!(CLA_004, "CLA.004", L2, false, "positional GROUP BY", "`GROUP BY` references a column by ordinal position rather than by name.", "SELECT a, COUNT(*) FROM t GROUP BY 1");
rule!(CLA_005, "CLA.005", L2, false, "positional ORDER BY", "`ORDER BY` references a column by ordinal position rather than by name.", "SELECT a, b FROM t ORDER BY 2");
rule!(CLA_006, "CLA.006", L3, false, "GROUP BY across tables", "`GROUP BY` references columns from more than one table.", "SELECT a.x, b.y FROM a JOIN b ON a.id=b.id GROUP BY a.x, b.y");
rule!(CLA_007, "CLA.007", L1, false, "mixed ASC/DESC", "`ORDER BY` mixes ascending and descending directions across columns.", "SELECT * FROM t ORDER BY a ASC, b DESC");
rule!(CLA_008, "CLA.008", L2, false, "GROUP BY without ORDER BY", "`GROUP BY` has no explicit `ORDER BY`; MySQL does not guarantee group order.", "SELECT a, COUNT(*) FROM t GROUP BY a");
rule!(CLA_009, "CLA.009", L3, false, "ORDER BY expression", "`ORDER BY` sorts by an expression or function call rather than a bare column.", "SELECT * FROM t ORDER BY UPPER(name)");
rule!(CLA_010, "CLA.010", L3, false, "GROUP BY expression", "`GROUP BY` groups by an expression or function call rather than a bare column.", "SELECT COUNT(*) FROM t GROUP BY YEAR(created_at)");
rule!(CLA_011, "CLA.011", L2, false, "table without comment", "`CREATE TABLE` has no table-level `COMMENT`.", "CREATE TABLE t (a INT)");
rule!(CLA_012, "CLA.012", L2, false, "spaghetti query", "Statement text length exceeds the configured threshold, suggesting it should be decomposed.", "SELECT ... /* very long statement */");
rule!(CLA_013, "CLA.013", L2, false, "HAVING clause", "`HAVING` filters post-aggregation; confirm the condition could not be a `WHERE` predicate instead.", "SELECT a, COUNT(*) FROM t GROUP BY a HAVING COUNT(*) > 1");
rule!(CLA_014, "CLA.014", L4, false, "DELETE without WHERE (FROM ... WHERE policy)", "`DELETE FROM ... ` omits `WHERE` under a policy that normally requires one.", "DELETE FROM t");
rule!(CLA_015, "CLA.015", L3, false, "INSERT ... SELECT without WHERE", "`INSERT ... SELECT` copies from a source with no `WHERE` clause.", "INSERT INTO t SELECT * FROM src");

// COL — column-definition rules
rule!(COL_001, "COL.001", L2, false, "SELECT *", "Projection uses `*` instead of an explicit column list.", "SELECT * FROM t");
rule!(COL_002, "COL.002", L2, false, "INSERT without column list", "`INSERT` omits the explicit column list, so it breaks silently if the table shape changes.", "INSERT INTO t VALUES (1, 2)");
rule!(COL_003, "COL.003", L3, false, "signed AUTO_INCREMENT", "`AUTO_INCREMENT` column is not declared `UNSIGNED`, wasting half its range.", "CREATE TABLE t (id INT AUTO_INCREMENT PRIMARY KEY)");
rule!(COL_004, "COL.004", L2, false, "column without DEFAULT", "Column has no `DEFAULT`, excluding TEXT/BLOB/JSON columns which cannot have one.", "CREATE TABLE t (a INT)");
rule!(COL_005, "COL.005", L1, false, "column without comment", "Column has no `COMMENT` describing its purpose.", "CREATE TABLE t (a INT COMMENT '')");
rule!(COL_006, "COL.006", L3, false, "too many columns", "Table column count exceeds the configured threshold.", "CREATE TABLE t (c1 INT, c2 INT, ...)");
rule!(COL_007, "COL.007", L3, false, "too many TEXT/BLOB columns", "Table declares more TEXT/BLOB/JSON columns than the configured threshold.", "CREATE TABLE t (a TEXT, b TEXT, c TEXT)");
rule!(COL_008, "COL.008", L2, false, "CHAR for variable data", "`CHAR` pads to fixed width; `VARCHAR` suits variable-length data better.", "CREATE TABLE t (name CHAR(100))");
rule!(COL_009, "COL.009", L4, false, "FLOAT/DOUBLE for exact values", "`FLOAT`/`DOUBLE` cannot represent exact decimal values; use `DECIMAL` for money and similar.", "CREATE TABLE t (price FLOAT)");
rule!(COL_010, "COL.010", L2, false, "ENUM/SET column", "`ENUM`/`SET` encode business rules in schema metadata, which is awkward to change later.", "CREATE TABLE t (status ENUM('a','b'))");
rule!(COL_011, "COL.011", L3, false, "nullable column in <> NULL predicate", "Predicate compares a nullable column with `<> NULL`, which never matches in SQL's three-valued logic.", "SELECT * FROM t WHERE a <> NULL");
rule!(COL_012, "COL.012", L3, false, "TEXT/BLOB/JSON NOT NULL", "TEXT/BLOB/JSON column is declared `NOT NULL`, forcing callers to supply an empty sentinel value.", "CREATE TABLE t (a TEXT NOT NULL)");
rule!(COL_013, "COL.013", L2, false, "TIMESTAMP without default", "`TIMESTAMP` column has no `DEFAULT`, relying on implicit MySQL defaulting behavior.", "CREATE TABLE t (created_at TIMESTAMP)");
rule!(COL_014, "COL.014", L2, false, "column-level CHARACTER SET", "Column overrides the table's `CHARACTER SET`, which is easy to lose track of.", "CREATE TABLE t (a VARCHAR(10) CHARACTER SET latin1)");
rule!(COL_015, "COL.015", L2, false, "BLOB/JSON with non-null default", "BLOB/JSON column has a non-null `DEFAULT`, which MySQL historically rejects or silently coerces.", "CREATE TABLE t (a BLOB DEFAULT 'x')");
rule!(COL_016, "COL.016", L1, false, "non-canonical integer width", "Integer type carries a display-width specifier other than the canonical form.", "CREATE TABLE t (a INT(11))");
rule!(COL_017, "COL.017", L3, false, "VARCHAR length above threshold", "`VARCHAR(n)` length exceeds the configured threshold; consider TEXT instead.", "CREATE TABLE t (a VARCHAR(4000))");
rule!(COL_018, "COL.018", L1, false, "forbidden column type", "Column uses a type on the forbidden list (e.g. `BOOLEAN`, which MySQL aliases to `TINYINT(1)`).", "CREATE TABLE t (flag BOOLEAN)");
rule!(COL_019, "COL.019", L1, false, "TIME/DATETIME without fractional precision", "`TIME`/`DATETIME` has no fractional-seconds precision specified.", "CREATE TABLE t (a DATETIME)");

// DIS — distinct rules
rule!(DIS_001, "DIS.001", L2, false, "DISTINCT overuse", "`DISTINCT` is layered onto a query whose result is already unique, or is used defensively.", "SELECT DISTINCT id FROM t WHERE id = 1");
rule!(DIS_002, "DIS.002", L3, false, "multi-column COUNT(DISTINCT ...)", "`COUNT(DISTINCT a, b)` counts distinct tuples, a common source of confusion with single-column `COUNT(DISTINCT a)`.", "SELECT COUNT(DISTINCT a, b) FROM t");
rule!(DIS_003, "DIS.003", L2, false, "DISTINCT * single table", "`SELECT DISTINCT *` on a single-table query without a `GROUP BY` usually means the query should instead filter or select a key.", "SELECT DISTINCT * FROM t");

// FUN — function/expression rules
rule!(FUN_001, "FUN.001", L4, false, "function on column in predicate", "Predicate wraps a column in a function call, which prevents the optimizer from using an index on that column.", "SELECT * FROM t WHERE YEAR(created_at) = 2024");
rule!(FUN_002, "FUN.002", L2, false, "COUNT(*) with filter on grouped column", "`COUNT(*)` is filtered via `HAVING` on a column already in `GROUP BY`; a `WHERE` predicate would be evaluated earlier.", "SELECT a, COUNT(*) FROM t GROUP BY a HAVING a = 1");
rule!(FUN_003, "FUN.003", L1, false, "|| string concatenation", "`||` is non-standard string concatenation outside `PIPES_AS_CONCAT` mode; prefer `CONCAT()`.", "SELECT a || b FROM t");
rule!(FUN_004, "FUN.004", L2, false, "SYSDATE() usage", "`SYSDATE()` is non-deterministic within a statement (unlike `NOW()`), which breaks replication and repeatable reads.", "SELECT SYSDATE() FROM t");
rule!(FUN_005, "FUN.005", L2, false, "COUNT(col) or COUNT(literal) instead of COUNT(*)", "`COUNT(column)` silently excludes NULLs; `COUNT(*)`/`COUNT(1)` intent differs and should be explicit.", "SELECT COUNT(1) FROM t");
rule!(FUN_006, "FUN.006", L2, false, "bare SUM(col) null propagation", "`SUM(col)` returns `NULL` when every input row is `NULL`; wrap in `COALESCE` if a zero default is expected.", "SELECT SUM(amount) FROM t");
rule!(FUN_007, "FUN.007", L3, false, "forbidden TRIGGER", "`CREATE TRIGGER` adds implicit behavior that is invisible at the call site.", "CREATE TRIGGER trg BEFORE INSERT ON t FOR EACH ROW SET NEW.a = 1");
rule!(FUN_008, "FUN.008", L3, false, "forbidden PROCEDURE", "`CREATE PROCEDURE` moves logic into the database, outside normal application version control.", "CREATE PROCEDURE p() BEGIN END");
rule!(FUN_009, "FUN.009", L3, false, "forbidden FUNCTION", "`CREATE FUNCTION` moves logic into the database, outside normal application version control.", "CREATE FUNCTION f() RETURNS INT DETERMINISTIC RETURN 1");

// JOI — join rules
rule!(JOI_001, "JOI.001", L3, false, "mixed comma-join and ANSI join", "Statement mixes comma-style joins with `JOIN ... ON`, which is easy to misread as a Cartesian product.", "SELECT * FROM a, b JOIN c ON b.id = c.id");
rule!(JOI_002, "JOI.002", L3, false, "duplicate joined table", "The same table is joined more than once without clearly distinguishing aliases.", "SELECT * FROM t a JOIN t b ON a.id = b.parent_id JOIN t ON t.id = a.id");
rule!(JOI_005, "JOI.005", L3, false, "too many joins", "Join count exceeds the configured threshold.", "SELECT * FROM a JOIN b ON .. JOIN c ON .. JOIN d ON .. JOIN e ON ..");
rule!(JOI_006, "JOI.006", L3, false, "nested subqueries", "Statement nests subqueries beyond a readable depth.", "SELECT * FROM (SELECT * FROM (SELECT * FROM t) x) y");
rule!(JOI_007, "JOI.007", L4, false, "multi-table UPDATE/DELETE", "`UPDATE`/`DELETE` spans multiple tables in one statement, complicating rollback and locking reasoning.", "UPDATE a JOIN b ON a.id=b.id SET a.x = b.x");
rule!(JOI_008, "JOI.008", L4, false, "cross-database join", "Join references tables from more than one database/schema.", "SELECT * FROM db1.a JOIN db2.b ON a.id = b.id");

// KEY — index/key rules
rule!(KEY_001, "KEY.001", L3, false, "primary key not unsigned auto-increment", "Primary key column is not an unsigned, auto-incrementing integer.", "CREATE TABLE t (id INT PRIMARY KEY)");
rule!(KEY_002, "KEY.002", L5, false, "missing primary/unique key", "Table has no primary or unique key, which blocks many online schema-change tools.", "CREATE TABLE t (a INT)");
rule!(KEY_003, "KEY.003", L4, false, "cyclic foreign-key dependency", "Foreign keys among the affected tables form a cycle.", "CREATE TABLE a (b_id INT, FOREIGN KEY (b_id) REFERENCES b(id))");
rule!(KEY_004, "KEY.004", L2, false, "index attribute ordering", "Composite index column order does not match the declared equality/range usage order.", "CREATE INDEX idx ON t (b, a)");
rule!(KEY_005, "KEY.005", L3, false, "too many indexes", "Table index count exceeds the configured threshold.", "CREATE INDEX idx6 ON t (f)");
rule!(KEY_006, "KEY.006", L3, false, "composite index too wide", "Composite index has more columns than the configured threshold.", "CREATE INDEX idx ON t (a,b,c,d,e,f)");
rule!(KEY_007, "KEY.007", L3, false, "primary key wrong type class", "Primary key uses a type wider or less canonical than an unsigned integer/bigint.", "CREATE TABLE t (id VARCHAR(36) PRIMARY KEY)");
rule!(KEY_008, "KEY.008", L1, false, "mixed direction composite index", "Composite index mixes ascending and descending column order.", "CREATE INDEX idx ON t (a ASC, b DESC)");
rule!(KEY_009, "KEY.009", L2, false, "duplicate unique and primary", "A unique index duplicates the primary key's column set.", "CREATE TABLE t (id INT PRIMARY KEY, UNIQUE KEY uk (id))");
rule!(KEY_010, "KEY.010", L2, false, "full-text index", "`FULLTEXT` index created; confirm a dedicated search engine is not a better fit.", "CREATE FULLTEXT INDEX idx ON t (body)");

// KWR — keyword rules
rule!(KWR_001, "KWR.001", L2, false, "SQL_CALC_FOUND_ROWS", "`SQL_CALC_FOUND_ROWS` forces a second pass to compute the unfiltered row count.", "SELECT SQL_CALC_FOUND_ROWS * FROM t LIMIT 10");
rule!(KWR_002, "KWR.002", L2, false, "reserved word as identifier", "Identifier is a SQL reserved word, requiring quoting everywhere it is used.", "CREATE TABLE t (`order` INT)");
rule!(KWR_003, "KWR.003", L1, false, "plural table name", "Table name is a plural English noun; many teams standardize on singular table names.", "CREATE TABLE users (id INT)");
rule!(KWR_004, "KWR.004", L2, false, "multi-byte identifier", "Identifier contains multi-byte characters, which some tooling and drivers handle inconsistently.", "CREATE TABLE \u{8868} (id INT)");
rule!(KWR_005, "KWR.005", L3, true, "invisible Unicode", "Statement text contains an invisible/zero-width Unicode code point outside a string literal.", "SELECT\u{200B} 1 FROM t");

// LCK — locking rules
rule!(LCK_001, "LCK.001", L2, false, "INSERT ... SELECT", "`INSERT ... SELECT` holds locks on the source rows for the duration of the copy.", "INSERT INTO t SELECT * FROM src");
rule!(LCK_002, "LCK.002", L2, false, "INSERT ... ON DUPLICATE KEY UPDATE", "Upsert via `ON DUPLICATE KEY UPDATE` takes a row lock even on the no-op branch.", "INSERT INTO t (id,a) VALUES (1,2) ON DUPLICATE KEY UPDATE a = 2");

// LIT — literal rules
rule!(LIT_001, "LIT.001", L2, true, "IP literal in string value", "An IPv4 address is stored as a plain string rather than `INET_ATON`/a typed column.", "INSERT INTO hosts (ip) VALUES ('192.168.1.1')");
rule!(LIT_002, "LIT.002", L1, false, "unquoted date/time literal", "Date/time value is not quoted as a string literal.", "SELECT * FROM t WHERE d = 2024-01-01");
rule!(LIT_003, "LIT.003", L2, false, "CSV-in-a-column", "A string literal looks like a comma-separated list stored in a single column.", "INSERT INTO t (tags) VALUES ('a,b,c')");
rule!(LIT_004, "LIT.004", L3, true, "missing statement delimiter", "Apparent statement boundary with no terminating `;`.", "SELECT 1\nSELECT 2");

// RES — result-determinism/safety rules
rule!(RES_001, "RES.001", L3, false, "non-deterministic GROUP BY", "`GROUP BY` output row order/content is not fully determined without an `ORDER BY`.", "SELECT a, b FROM t GROUP BY a");
rule!(RES_002, "RES.002", L3, false, "LIMIT without ORDER BY", "`LIMIT` without `ORDER BY` returns an arbitrary subset of rows.", "SELECT * FROM t LIMIT 10");
rule!(RES_003, "RES.003", L5, false, "UPDATE/DELETE with LIMIT", "`LIMIT` on `UPDATE`/`DELETE` affects an unspecified subset of matching rows without `ORDER BY`.", "DELETE FROM t WHERE a = 1 LIMIT 1");
rule!(RES_004, "RES.004", L4, false, "UPDATE/DELETE with ORDER BY", "`ORDER BY` on `UPDATE`/`DELETE` only matters paired with `LIMIT`; otherwise it is dead weight.", "DELETE FROM t WHERE a = 1 ORDER BY b");
rule!(RES_005, "RES.005", L5, false, "AND used as SET separator", "`UPDATE ... SET a = 1 AND b = 2` parses as a single boolean assignment, not two column assignments.", "UPDATE t SET a = 1 AND b = 2");
rule!(RES_006, "RES.006", L6, false, "impossible WHERE", "`WHERE` predicate can never be true for any row (e.g. a literal inequality comparing equal literals, or a `BETWEEN` with a high bound below the low bound).", "SELECT * FROM t WHERE 1 != 1");
rule!(RES_007, "RES.007", L4, false, "meaningless WHERE", "`WHERE` predicate is a constant truthy value and filters nothing.", "SELECT * FROM t WHERE 1 = 1");
rule!(RES_008, "RES.008", L6, true, "file load/dump", "Statement reads from or writes to a server-side file.", "LOAD DATA INFILE '/tmp/x.csv' INTO TABLE t");
rule!(RES_009, "RES.009", L3, false, "chained comparison", "`a = b = c` chains comparisons left-to-right rather than comparing all three pairwise.", "SELECT * FROM t WHERE a = b = c");
rule!(RES_010, "RES.010", L2, false, "ON UPDATE CURRENT_TIMESTAMP", "Column auto-updates on every row write, which can mask the true last-modified intent.", "CREATE TABLE t (updated_at TIMESTAMP ON UPDATE CURRENT_TIMESTAMP)");
rule!(RES_011, "RES.011", L4, false, "UPDATE overwrites auto-update column", "`UPDATE` explicitly sets every column except one declared `ON UPDATE CURRENT_TIMESTAMP`, silently re-stamping it.", "UPDATE t SET a = 1 WHERE id = 1");

// SEC — security rules
rule!(SEC_001, "SEC.001", L7, false, "TRUNCATE usage", "`TRUNCATE` bypasses row-level triggers and cannot be scoped with a `WHERE` clause.", "TRUNCATE TABLE t");
rule!(SEC_002, "SEC.002", L6, false, "unhashed password column", "Column literally named `password` appears to store a value directly rather than a hash.", "CREATE TABLE users (password VARCHAR(255))");
rule!(SEC_003, "SEC.003", L8, false, "destructive DML/DDL", "Statement is a destructive operation (`DELETE`, `TRUNCATE`, `DROP`).", "DROP TABLE t");
rule!(SEC_004, "SEC.004", L6, false, "suspect function call", "Statement calls a function commonly used to probe timing or locking behavior (`BENCHMARK`, `SLEEP`, `GET_LOCK`, `RELEASE_LOCK`).", "SELECT SLEEP(5)");

// STA — style rules
rule!(STA_001, "STA.001", L1, true, "non-standard inequality", "`!=` is used instead of the standard `<>`.", "SELECT * FROM t WHERE a != 1");
rule!(STA_002, "STA.002", L1, true, "whitespace after dot", "A qualified identifier has whitespace around its `.` separator.", "SELECT t. a FROM t");
rule!(STA_003, "STA.003", L1, false, "index naming convention", "Index name lacks the `idx_`/`uk_` prefix convention.", "CREATE INDEX a_idx ON t (a)");
rule!(STA_004, "STA.004", L1, false, "non-canonical identifier characters", "Identifier contains characters outside `[A-Za-z0-9_]`.", "CREATE TABLE `my-table` (a INT)");

// SUB — subquery rules
rule!(SUB_001, "SUB.001", L2, false, "IN (SELECT ...)", "`IN` is fed a subquery rather than a join, which the optimizer may evaluate less efficiently.", "SELECT * FROM t WHERE id IN (SELECT id FROM other)");
rule!(SUB_002, "SUB.002", L3, false, "UNION without ALL", "`UNION` deduplicates by default, which requires an extra sort/scan most callers do not need.", "SELECT a FROM t1 UNION SELECT a FROM t2");
rule!(SUB_003, "SUB.003", L2, false, "DISTINCT combined with JOIN", "`DISTINCT` is used to paper over row duplication introduced by a `JOIN`.", "SELECT DISTINCT a.x FROM a JOIN b ON a.id = b.a_id");
rule!(SUB_005, "SUB.005", L2, false, "subquery with LIMIT", "A subquery carries its own `LIMIT`, which is easy to reason about incorrectly relative to the outer query.", "SELECT * FROM (SELECT * FROM t LIMIT 1) x");
rule!(SUB_006, "SUB.006", L2, false, "subquery of aggregate", "Subquery wraps an aggregate result, often more clearly expressed as a join or window function.", "SELECT * FROM (SELECT MAX(a) m FROM t) x");
rule!(SUB_007, "SUB.007", L2, false, "UNION branch missing LIMIT", "Outer `UNION` has `LIMIT` but not every branch does, making the effective per-branch row cap unclear.", "SELECT * FROM t1 LIMIT 10 UNION SELECT * FROM t2");

// TBL — schema rules
rule!(TBL_001, "TBL.001", L2, false, "partitioned table", "Table is partitioned; confirm the partition key matches actual query patterns.", "CREATE TABLE t (a INT) PARTITION BY HASH(a)");
rule!(TBL_002, "TBL.002", L3, false, "engine not allow-listed", "Table's storage engine is not on the configured allow-list.", "CREATE TABLE t (a INT) ENGINE=MyISAM");
rule!(TBL_003, "TBL.003", L2, false, "table named dual", "Table is literally named `dual`, shadowing MySQL's pseudo-table of the same name.", "CREATE TABLE dual (a INT)");
rule!(TBL_004, "TBL.004", L1, false, "unexpected AUTO_INCREMENT start value", "`AUTO_INCREMENT` initial value differs from the expected starting value.", "CREATE TABLE t (id INT AUTO_INCREMENT) AUTO_INCREMENT=1000");
rule!(TBL_005, "TBL.005", L2, false, "charset not allow-listed", "Table's default character set is not on the configured allow-list.", "CREATE TABLE t (a INT) DEFAULT CHARSET=latin1");
rule!(TBL_006, "TBL.006", L2, false, "CREATE VIEW", "Statement creates a view; confirm it is tracked the same as table schema.", "CREATE VIEW v AS SELECT * FROM t");
rule!(TBL_007, "TBL.007", L2, false, "CREATE TEMPORARY TABLE", "Statement creates a temporary table, which is invisible to schema tooling and most catalogs.", "CREATE TEMPORARY TABLE t (a INT)");
rule!(TBL_008, "TBL.008", L2, false, "collation not allow-listed", "Table's default collation is not on the configured allow-list.", "CREATE TABLE t (a INT) COLLATE=latin1_swedish_ci");

// ALT — alter rules
rule!(ALT_001, "ALT.001", L3, false, "ALTER changes charset without column change", "`ALTER TABLE` changes the table's default charset without also converting existing columns.", "ALTER TABLE t CHARACTER SET utf8mb4");
rule!(ALT_003, "ALT.003", L4, false, "ALTER DROP COLUMN", "`ALTER TABLE ... DROP COLUMN` is a destructive, hard-to-reverse schema change.", "ALTER TABLE t DROP COLUMN a");
rule!(ALT_004, "ALT.004", L4, false, "ALTER DROP KEY", "`ALTER TABLE ... DROP {PRIMARY|FOREIGN} KEY` removes a structural constraint.", "ALTER TABLE t DROP PRIMARY KEY");

// ERR — error kinds
rule!(ERR_000, "ERR.000", L8, true, "internal invariant violation", "An engine invariant was violated during evaluation; this indicates a bug in the engine itself.", "n/a");
rule!(ERR_001, "ERR.001", L6, true, "parse error", "The statement could not be parsed; only absolute rules were evaluated.", "SELEC * FROM t");
rule!(ERR_002, "ERR.002", L5, true, "catalog/sandbox error", "A Catalog or Sandbox call failed; catalog-dependent rules were silenced for this statement.", "n/a");
