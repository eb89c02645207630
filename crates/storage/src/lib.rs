use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use futures::{stream::BoxStream, StreamExt};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
    sync::Arc,
};
use tokio::sync::{watch, Mutex};
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, warn};

use shared::{
    domain::{Contact, ContactId},
    error::ContactError,
};

/// Live view of the contact table. Yields the current set first, then every later snapshot.
pub type ContactStream = BoxStream<'static, Vec<Contact>>;

#[async_trait]
pub trait ContactStore: Send + Sync {
    fn select_all(&self) -> ContactStream;
    async fn insert(&self, contact: &Contact) -> Result<ContactId>;
    async fn update(&self, contact: &Contact) -> Result<()>;
    async fn delete(&self, contact: &Contact) -> Result<()>;
}

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
    snapshots: Arc<watch::Sender<Vec<Contact>>>,
    write_lock: Arc<Mutex<()>>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;

        let initial = fetch_all_contacts(&pool).await?;
        let (snapshots, _) = watch::channel(initial);
        Ok(Self {
            pool,
            snapshots: Arc::new(snapshots),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    pub async fn list_contacts(&self) -> Result<Vec<Contact>> {
        fetch_all_contacts(&self.pool).await
    }

    pub async fn get_contact(&self, contact_id: ContactId) -> Result<Option<Contact>> {
        let row = sqlx::query("SELECT id, name, phone_number, email FROM contacts WHERE id = ?")
            .bind(contact_id.0)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(contact_from_row).transpose()
    }

    // Caller must hold `write_lock` so snapshots go out in mutation order. The write has already
    // committed, so a failed reload only skips this snapshot; the next write republishes.
    async fn publish_snapshot(&self) {
        match fetch_all_contacts(&self.pool).await {
            Ok(contacts) => {
                debug!(count = contacts.len(), "publishing contact snapshot");
                self.snapshots.send_replace(contacts);
            }
            Err(error) => {
                warn!(error = %format!("{error:#}"), "failed to reload contacts after write");
            }
        }
    }
}

#[async_trait]
impl ContactStore for Storage {
    fn select_all(&self) -> ContactStream {
        WatchStream::new(self.snapshots.subscribe()).boxed()
    }

    async fn insert(&self, contact: &Contact) -> Result<ContactId> {
        if contact.id.is_assigned() {
            return Err(anyhow!(ContactError::AlreadyPersisted(contact.id)));
        }

        let _guard = self.write_lock.lock().await;
        let rec = sqlx::query(
            "INSERT INTO contacts (name, phone_number, email) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(&contact.name)
        .bind(&contact.phone_number)
        .bind(&contact.email)
        .fetch_one(&self.pool)
        .await
        .context("insert into contacts rejected")?;
        let contact_id = ContactId(rec.try_get::<i64, _>(0)?);

        self.publish_snapshot().await;
        Ok(contact_id)
    }

    async fn update(&self, contact: &Contact) -> Result<()> {
        if !contact.id.is_assigned() {
            return Err(anyhow!(ContactError::Unassigned));
        }

        let _guard = self.write_lock.lock().await;
        let affected = sqlx::query(
            "UPDATE contacts SET name = ?, phone_number = ?, email = ? WHERE id = ?",
        )
        .bind(&contact.name)
        .bind(&contact.phone_number)
        .bind(&contact.email)
        .bind(contact.id.0)
        .execute(&self.pool)
        .await
        .context("update of contacts rejected")?
        .rows_affected();
        if affected == 0 {
            return Err(anyhow!(ContactError::NotFound(contact.id)));
        }

        self.publish_snapshot().await;
        Ok(())
    }

    async fn delete(&self, contact: &Contact) -> Result<()> {
        if !contact.id.is_assigned() {
            return Err(anyhow!(ContactError::Unassigned));
        }

        let _guard = self.write_lock.lock().await;
        let affected = sqlx::query("DELETE FROM contacts WHERE id = ?")
            .bind(contact.id.0)
            .execute(&self.pool)
            .await
            .context("delete from contacts rejected")?
            .rows_affected();
        if affected == 0 {
            return Err(anyhow!(ContactError::NotFound(contact.id)));
        }

        self.publish_snapshot().await;
        Ok(())
    }
}

async fn fetch_all_contacts(pool: &Pool<Sqlite>) -> Result<Vec<Contact>> {
    let rows = sqlx::query("SELECT id, name, phone_number, email FROM contacts ORDER BY id ASC")
        .fetch_all(pool)
        .await?;
    rows.iter().map(contact_from_row).collect()
}

fn contact_from_row(r: &SqliteRow) -> Result<Contact> {
    Ok(Contact {
        id: ContactId(r.try_get::<i64, _>(0)?),
        name: r.try_get::<String, _>(1)?,
        phone_number: r.try_get::<String, _>(2)?,
        email: r.try_get::<String, _>(3)?,
    })
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url == "sqlite::memory:" || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
