use anyhow::{bail, Context, Result};
use sqlx::any::{install_default_drivers, AnyPoolOptions};
use sqlx::AnyPool;
use tracing::info;

use crate::config::is_valid_identifier;

/// SQL flavour behind the pool; only the bootstrap DDL differs between them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Postgres,
    Sqlite,
}

impl Dialect {
    pub fn from_url(database_url: &str) -> Result<Self> {
        if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
            Ok(Dialect::Postgres)
        } else if database_url.starts_with("sqlite:") {
            Ok(Dialect::Sqlite)
        } else {
            bail!("Unsupported database URL scheme; expected postgres:// or sqlite:")
        }
    }
}

/// TableConnection wraps the pool used to reach the hosted predictions table
#[derive(Clone, Debug)]
pub struct TableConnection {
    pool: AnyPool,
    table_name: String,
    dialect: Dialect,
}

impl TableConnection {
    /// Connect to `database_url`, optionally creating the table if it is missing
    pub async fn connect(database_url: &str, table_name: &str, bootstrap: bool) -> Result<Self> {
        if !is_valid_identifier(table_name) {
            bail!("Invalid table name: {}", table_name);
        }
        let dialect = Dialect::from_url(database_url)?;

        install_default_drivers();
        let pool = AnyPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .context("Failed to connect to the predictions database")?;

        let connection = Self {
            pool,
            table_name: table_name.to_string(),
            dialect,
        };

        if bootstrap {
            connection.setup_schema().await?;
        }

        info!("Connected to predictions table '{}' ({:?})", connection.table_name, dialect);
        Ok(connection)
    }

    /// Create the predictions table if it does not exist yet
    async fn setup_schema(&self) -> Result<()> {
        let ddl = match self.dialect {
            Dialect::Postgres => format!(
                r#"
                CREATE TABLE IF NOT EXISTS {table} (
                    id BIGINT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY,
                    nombre TEXT NOT NULL,
                    fecha_nacimiento TEXT NOT NULL,
                    hora_nacimiento TEXT NOT NULL,
                    peso NUMERIC NOT NULL,
                    longitud NUMERIC NOT NULL,
                    tipo_parto TEXT NOT NULL,
                    numero_habitacion TEXT NOT NULL,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
                )
                "#,
                table = self.table_name
            ),
            Dialect::Sqlite => format!(
                r#"
                CREATE TABLE IF NOT EXISTS {table} (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    nombre TEXT NOT NULL,
                    fecha_nacimiento TEXT NOT NULL,
                    hora_nacimiento TEXT NOT NULL,
                    peso NUMERIC NOT NULL,
                    longitud NUMERIC NOT NULL,
                    tipo_parto TEXT NOT NULL,
                    numero_habitacion TEXT NOT NULL,
                    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
                )
                "#,
                table = self.table_name
            ),
        };

        sqlx::query(&ddl)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to create table {}", self.table_name))?;
        Ok(())
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }
}
