//! Database creation and schema application.
use crate::config::*;
use crate::pg::*;
use crate::*;
use tokio_postgres::Client;
use tokio_postgres::error::SqlState;

/// Whether the target database had to be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Created {
    New,
    Existing,
}

/// Quotes `name` as a PostgreSQL identifier.
pub fn quoted(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Creates the target database from a maintenance connection.
/// An existing database is not an error.
pub async fn create(maintenance: &Client, name: &str) -> Result<Created> {
    let sql = format!("CREATE DATABASE {}", quoted(name));
    match maintenance.batch_execute(&sql).await {
        Ok(()) => {
            log::info!("created database {}", name);
            Ok(Created::New)
        }
        Err(e) if e.code() == Some(&SqlState::DUPLICATE_DATABASE) => {
            log::info!("database {} already created, skipping", name);
            Ok(Created::Existing)
        }
        Err(e) => Err(e.into()),
    }
}

/// Applies every table's DDL and seeds the watermark rows in one transaction.
pub async fn schema(client: &mut Client) -> Result<()> {
    let tx = client.transaction().await?;
    for ddl in tables::ddl() {
        tx.batch_execute(ddl).await?;
    }
    tx.commit().await?;
    log::info!("schema applied");
    Ok(())
}

/// Creates the target database if needed, then applies the schema to it.
pub async fn bootstrap(database: &Database, maintenance: &Maintenance) -> Result<Created> {
    let name = database.name()?;
    let created = {
        let admin = db(&database.with_dbname(&maintenance.dbname)?).await?;
        create(&admin, &name).await?
    };
    let mut client = db(&database.config()?).await?;
    schema(&mut client).await?;
    Ok(created)
}
