use sqlx::PgPool;

/// All `id` columns must be bigint.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_pks_are_bigint(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, data_type
         FROM information_schema.columns
         WHERE column_name = 'id'
           AND table_schema = 'public'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rows.is_empty());
    for (table, data_type) in &rows {
        assert_eq!(
            data_type, "bigint",
            "Table {table}.id should be bigint, got {data_type}"
        );
    }
}

/// Every table carries created_at as timestamptz. Mutable entity tables also
/// carry updated_at; membership rows, revision snapshots, and notifications
/// are write-once and exempt.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_tables_have_timestamps(pool: PgPool) {
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

    let immutable = ["publication_members", "revisions", "notifications"];

    for (table,) in &tables {
        let mut expected = vec!["created_at"];
        if !immutable.contains(&table.as_str()) {
            expected.push("updated_at");
        }
        for col in expected {
            let result: Option<(String,)> = sqlx::query_as(
                "SELECT data_type
                 FROM information_schema.columns
                 WHERE table_schema = 'public'
                   AND table_name = $1
                   AND column_name = $2",
            )
            .bind(table)
            .bind(col)
            .fetch_optional(&pool)
            .await
            .unwrap();

            let (data_type,) =
                result.unwrap_or_else(|| panic!("Table {table} is missing column {col}"));
            assert_eq!(
                data_type, "timestamp with time zone",
                "Table {table}.{col} should be timestamptz, got {data_type}"
            );
        }
    }
}

/// Unique constraints follow the uq_ naming convention the API relies on for
/// conflict classification.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unique_indexes_use_uq_prefix(pool: PgPool) {
    let rows: Vec<(String,)> = sqlx::query_as(
        "SELECT indexname FROM pg_indexes
         WHERE schemaname = 'public'
           AND indexdef LIKE 'CREATE UNIQUE INDEX%'
           AND indexname NOT LIKE '%_pkey'
           AND indexname != '_sqlx_migrations_pkey'
         ORDER BY indexname",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for (name,) in &rows {
        assert!(
            name.starts_with("uq_"),
            "unique index {name} should start with uq_"
        );
    }
}
