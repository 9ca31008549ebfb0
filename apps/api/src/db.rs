use std::time::Duration;

use anyhow::Result;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tracing::info;

use crate::config::Config;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(config: &Config) -> Result<PgPool> {
    info!(
        "Connecting to PostgreSQL at {}:{}/{}...",
        config.db_host, config.db_port, config.db_name
    );

    let options = PgConnectOptions::new()
        .host(&config.db_host)
        .port(config.db_port)
        .database(&config.db_name)
        .username(&config.db_user)
        .password(&config.db_password);

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .max_lifetime(Duration::from_secs(30 * 60))
        .connect_with(options)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

struct Table {
    name: &'static str,
    columns: &'static [(&'static str, &'static str)],
}

const TABLES: &[Table] = &[
    Table {
        name: "candidates",
        columns: &[
            ("created_at", "TIMESTAMPTZ NOT NULL DEFAULT NOW()"),
            ("updated_at", "TIMESTAMPTZ NOT NULL DEFAULT NOW()"),
            ("deleted_at", "TIMESTAMPTZ"),
            ("firstname", "TEXT NOT NULL DEFAULT ''"),
            ("lastname", "TEXT NOT NULL DEFAULT ''"),
            ("position", "TEXT NOT NULL DEFAULT ''"),
            ("email", "TEXT NOT NULL DEFAULT ''"),
            ("phone", "TEXT NOT NULL DEFAULT ''"),
        ],
    },
    Table {
        name: "stages",
        columns: &[
            ("created_at", "TIMESTAMPTZ NOT NULL DEFAULT NOW()"),
            ("updated_at", "TIMESTAMPTZ NOT NULL DEFAULT NOW()"),
            ("deleted_at", "TIMESTAMPTZ"),
            ("status", "TEXT NOT NULL DEFAULT 'pending'"),
            ("notes", "TEXT NOT NULL DEFAULT ''"),
            ("lead", "TEXT NOT NULL DEFAULT ''"),
            ("datetime", "TEXT NOT NULL DEFAULT ''"),
            ("\"type\"", "TEXT NOT NULL DEFAULT ''"),
            (
                "candidate_id",
                "BIGINT NOT NULL REFERENCES candidates(id)",
            ),
        ],
    },
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_candidates_deleted_at ON candidates(deleted_at)",
    "CREATE INDEX IF NOT EXISTS idx_stages_deleted_at ON stages(deleted_at)",
    "CREATE INDEX IF NOT EXISTS idx_stages_candidate_id ON stages(candidate_id)",
];

/// Additive-only schema statements: tables, then any missing columns, then indexes.
/// Every statement is idempotent so the whole list runs on each startup.
fn migration_statements() -> Vec<String> {
    let mut statements = Vec::new();
    for table in TABLES {
        statements.push(format!(
            "CREATE TABLE IF NOT EXISTS {} (id BIGSERIAL PRIMARY KEY)",
            table.name
        ));
        for (column, ddl) in table.columns {
            statements.push(format!(
                "ALTER TABLE {} ADD COLUMN IF NOT EXISTS {column} {ddl}",
                table.name
            ));
        }
    }
    statements.extend(INDEXES.iter().map(|s| s.to_string()));
    statements
}

pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    info!("Running migrations...");

    let statements = migration_statements();
    for statement in &statements {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Schema up to date ({} statements applied)", statements.len());
    Ok(())
}
