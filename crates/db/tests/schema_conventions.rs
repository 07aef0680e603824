use sqlx::PgPool;

/// Append-only tables carry created_at but never updated_at.
const APPEND_ONLY_TABLES: &[&str] = &["article_versions"];

/// Every table (except _sqlx_migrations) must have created_at as timestamptz,
/// and every mutable table updated_at as well.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_tables_have_timestamps(pool: PgPool) {
    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT table_name
         FROM information_schema.tables
         WHERE table_schema = 'public'
           AND table_type = 'BASE TABLE'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();
    assert!(!tables.is_empty());

    for (table,) in &tables {
        let columns: &[&str] = if APPEND_ONLY_TABLES.contains(&table.as_str()) {
            &["created_at"]
        } else {
            &["created_at", "updated_at"]
        };
        for &col in columns {
            let row: Option<(String,)> = sqlx::query_as(
                "SELECT data_type
                 FROM information_schema.columns
                 WHERE table_schema = 'public' AND table_name = $1 AND column_name = $2",
            )
            .bind(table)
            .bind(col)
            .fetch_optional(&pool)
            .await
            .unwrap();

            let data_type = row.map(|(t,)| t);
            assert_eq!(
                data_type.as_deref(),
                Some("timestamp with time zone"),
                "Table {table} should have {col} as timestamptz"
            );
        }
    }
}

/// Append-only tables must not grow an updated_at column they can never use.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_append_only_tables_have_no_updated_at(pool: PgPool) {
    for table in APPEND_ONLY_TABLES {
        let (present,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                 SELECT 1 FROM information_schema.columns
                 WHERE table_schema = 'public' AND table_name = $1
                   AND column_name = 'updated_at'
             )",
        )
        .bind(table)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert!(!present, "Append-only table {table} should not have updated_at");
    }
}

/// Every table with updated_at must carry the set_updated_at trigger.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_updated_at_triggers_exist(pool: PgPool) {
    let missing: Vec<(String,)> = sqlx::query_as(
        "SELECT c.table_name
         FROM information_schema.columns c
         WHERE c.table_schema = 'public'
           AND c.column_name = 'updated_at'
           AND NOT EXISTS (
               SELECT 1 FROM information_schema.triggers t
               WHERE t.event_object_table = c.table_name
                 AND t.trigger_name = 'set_updated_at'
           )",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(missing.is_empty(), "Tables without set_updated_at: {missing:?}");
}

/// Child tables of articles must cascade on delete.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_article_children_cascade(pool: PgPool) {
    let rules: Vec<(String, String)> = sqlx::query_as(
        "SELECT tc.table_name, rc.delete_rule
         FROM information_schema.table_constraints tc
         JOIN information_schema.referential_constraints rc
           ON rc.constraint_name = tc.constraint_name
         JOIN information_schema.constraint_column_usage ccu
           ON ccu.constraint_name = tc.constraint_name
         WHERE tc.constraint_type = 'FOREIGN KEY'
           AND ccu.table_name = 'articles'
         ORDER BY tc.table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    let tables: Vec<&str> = rules.iter().map(|(t, _)| t.as_str()).collect();
    assert_eq!(tables, vec!["article_versions", "comments"]);
    for (table, rule) in &rules {
        assert_eq!(rule, "CASCADE", "{table} should cascade from articles");
    }
}
