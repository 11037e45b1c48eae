use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gcloud_gax::grpc::Code;
use gcloud_googleapis::spanner::admin::database::v1::{
    CreateDatabaseRequest, GetDatabaseDdlRequest, GetDatabaseRequest, UpdateDatabaseDdlRequest,
};
use gcloud_googleapis::spanner::admin::instance::v1::{
    CreateInstanceRequest, GetInstanceRequest, Instance,
};
use gcloud_spanner::admin::client::Client as AdminClient;
use gcloud_spanner::admin::AdminClientConfig;
use gcloud_spanner::client::{Client, ClientConfig, Error as SpannerError};
use gcloud_spanner::mutation::insert;
use gcloud_spanner::row::Row;
use gcloud_spanner::statement::Statement;
use gcloud_spanner::value::CommitTimestamp;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::{ContactStore, StoreError};
use crate::config::SpannerConfig;
use crate::models::{Contact, ContactPatch, NewContact};

const CONTACT_COLUMNS: &str = "id, owner, name, email, phone, favorite, \
     FORMAT_TIMESTAMP('%Y-%m-%dT%H:%M:%E*SZ', created_at, 'UTC') AS created_at, \
     FORMAT_TIMESTAMP('%Y-%m-%dT%H:%M:%E*SZ', updated_at, 'UTC') AS updated_at";

/// Contact store backed by Google Cloud Spanner
#[derive(Clone)]
pub struct SpannerContactStore {
    inner: Arc<Client>,
}

impl SpannerContactStore {
    /// Connect to the configured database
    ///
    /// The gcloud-spanner library picks up SPANNER_EMULATOR_HOST on its own
    /// and talks to the emulator when it is set. Instance, database, table
    /// and index are created first if they are missing.
    pub async fn from_config(config: &SpannerConfig) -> Result<Self> {
        auto_provision(config).await?;

        let database_path = config.database_path();

        match &config.emulator_host {
            Some(host) => tracing::info!("Connecting to Spanner emulator at: {}", host),
            None => tracing::info!("Connecting to production Spanner"),
        }

        let client = Client::new(&database_path, ClientConfig::default())
            .await
            .context("Failed to create Spanner client")?;

        tracing::info!(
            "Successfully connected to Spanner database: {}",
            database_path
        );

        Ok(Self {
            inner: Arc::new(client),
        })
    }

    /// Run a read-only query and decode every row as a contact
    async fn query_contacts(&self, statement: Statement) -> Result<Vec<Contact>> {
        let mut tx = self.inner
            .single()
            .await
            .context("Failed to create read transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to query contacts from Spanner")?;

        let mut contacts = Vec::new();
        while let Some(row) = result_set.next().await? {
            contacts.push(contact_from_row(&row)?);
        }
        Ok(contacts)
    }

    async fn fetch(&self, owner: &str, id: Uuid) -> Result<Option<Contact>> {
        let sql = format!(
            "SELECT {} FROM contacts WHERE owner = @owner AND id = @id",
            CONTACT_COLUMNS
        );
        let mut statement = Statement::new(&sql);
        statement.add_param("owner", &owner.to_string());
        statement.add_param("id", &id.to_string());

        Ok(self.query_contacts(statement).await?.into_iter().next())
    }

    /// Execute one owner-scoped DML statement in a read-write transaction
    /// and return the number of affected rows
    async fn execute_scoped(
        &self,
        sql: &'static str,
        owner: &str,
        id: Uuid,
        patch: Option<&ContactPatch>,
    ) -> Result<i64> {
        let owner = owner.to_string();
        let id = id.to_string();
        let patch = patch.cloned();

        let (_, affected) = self
            .inner
            .read_write_transaction(|tx| {
                let owner = owner.clone();
                let id = id.clone();
                let patch = patch.clone();
                Box::pin(async move {
                    let mut statement = Statement::new(sql);
                    statement.add_param("owner", &owner);
                    statement.add_param("id", &id);
                    if let Some(patch) = patch {
                        statement.add_param("name", &patch.name);
                        statement.add_param("email", &patch.email);
                        statement.add_param("phone", &patch.phone);
                        statement.add_param("favorite", &patch.favorite);
                    }
                    let affected = tx.update(statement).await?;
                    Ok::<i64, SpannerError>(affected)
                })
            })
            .await
            .context("Spanner read-write transaction failed")?;

        Ok(affected)
    }
}

fn contact_from_row(row: &Row) -> Result<Contact> {
    let id: String = row.column_by_name("id")?;
    let created_at: String = row.column_by_name("created_at")?;
    let updated_at: String = row.column_by_name("updated_at")?;

    Ok(Contact {
        id: Uuid::parse_str(&id).context("Stored contact id is not a UUID")?,
        owner: row.column_by_name("owner")?,
        name: row.column_by_name("name")?,
        email: row.column_by_name("email")?,
        phone: row.column_by_name("phone")?,
        favorite: row.column_by_name("favorite")?,
        created_at: parse_timestamp(&created_at).context("Failed to parse created_at timestamp")?,
        updated_at: parse_timestamp(&updated_at).context("Failed to parse updated_at timestamp")?,
    })
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)?.with_timezone(&Utc))
}

#[async_trait]
impl ContactStore for SpannerContactStore {
    async fn list_by_owner(&self, owner: &str) -> Result<Vec<Contact>, StoreError> {
        let sql = format!(
            "SELECT {} FROM contacts WHERE owner = @owner ORDER BY created_at ASC, id ASC",
            CONTACT_COLUMNS
        );
        let mut statement = Statement::new(&sql);
        statement.add_param("owner", &owner.to_string());

        let contacts = self.query_contacts(statement).await?;
        tracing::debug!("Listed {} contacts for owner {}", contacts.len(), owner);
        Ok(contacts)
    }

    async fn get_by_owner_and_id(
        &self,
        owner: &str,
        id: Uuid,
    ) -> Result<Option<Contact>, StoreError> {
        Ok(self.fetch(owner, id).await?)
    }

    async fn delete_by_owner_and_id(&self, owner: &str, id: Uuid) -> Result<bool, StoreError> {
        let affected = self
            .execute_scoped(
                "DELETE FROM contacts WHERE owner = @owner AND id = @id",
                owner,
                id,
                None,
            )
            .await?;

        tracing::debug!("Deleted {} row(s) for contact {}", affected, id);
        Ok(affected > 0)
    }

    async fn create(&self, owner: &str, draft: NewContact) -> Result<Contact, StoreError> {
        draft.validate()?;

        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let owner_str = owner.to_string();
        let name = draft.name.unwrap_or_default();

        let mutation = insert(
            "contacts",
            &["id", "owner", "name", "email", "phone", "favorite", "created_at", "updated_at"],
            &[
                &id_str,
                &owner_str,
                &name,
                &draft.email,
                &draft.phone,
                &draft.favorite,
                &CommitTimestamp::new(),
                &CommitTimestamp::new(),
            ],
        );

        self.inner
            .apply(vec![mutation])
            .await
            .context("Failed to insert contact into Spanner")?;

        tracing::debug!("Inserted contact {} for owner {}", id, owner);

        // Commit timestamps are only known after the write
        let contact = self
            .fetch(owner, id)
            .await?
            .with_context(|| format!("Contact {} missing right after insert", id))?;
        Ok(contact)
    }

    async fn update_by_owner_and_id(
        &self,
        owner: &str,
        id: Uuid,
        patch: ContactPatch,
    ) -> Result<Option<Contact>, StoreError> {
        patch.validate()?;

        let affected = self
            .execute_scoped(
                "UPDATE contacts SET \
                     name = COALESCE(@name, name), \
                     email = COALESCE(@email, email), \
                     phone = COALESCE(@phone, phone), \
                     favorite = COALESCE(@favorite, favorite), \
                     updated_at = PENDING_COMMIT_TIMESTAMP() \
                 WHERE owner = @owner AND id = @id",
                owner,
                id,
                Some(&patch),
            )
            .await?;

        if affected == 0 {
            tracing::debug!("No contact {} for owner {} to update", id, owner);
            return Ok(None);
        }

        Ok(self.fetch(owner, id).await?)
    }

    /// Runs `SELECT 1` to verify the database answers
    async fn health_check(&self) -> Result<(), StoreError> {
        let statement = Statement::new("SELECT 1");

        let mut tx = self.inner
            .single()
            .await
            .context("Failed to create health check transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to execute health check query")?;

        if result_set
            .next()
            .await
            .context("Failed to read health check result")?
            .is_some()
        {
            tracing::debug!("Health check query succeeded");
            Ok(())
        } else {
            Err(anyhow::anyhow!("Health check query returned no results").into())
        }
    }
}

/// Provision the Spanner instance, database, table and index when missing
///
/// Lets a fresh emulator come up with no manual setup.
async fn auto_provision(config: &SpannerConfig) -> Result<()> {
    tracing::info!("Starting auto-provisioning checks...");

    let admin_client = AdminClient::new(AdminClientConfig::default())
        .await
        .context("Failed to create Spanner admin client")?;

    let project_path = format!("projects/{}", config.project);
    let instance_path = format!("{}/instances/{}", project_path, config.instance);
    let database_path = config.database_path();

    ensure_instance_exists(&admin_client, config, &project_path, &instance_path).await?;
    ensure_database_exists(&admin_client, &instance_path, &database_path).await?;
    ensure_schema_exists(&admin_client, &database_path).await?;

    tracing::info!("Auto-provisioning complete");
    Ok(())
}

async fn ensure_instance_exists(
    admin_client: &AdminClient,
    config: &SpannerConfig,
    project_path: &str,
    instance_path: &str,
) -> Result<()> {
    let get_request = GetInstanceRequest {
        name: instance_path.to_string(),
        field_mask: None,
    };

    match admin_client.instance().get_instance(get_request, None).await {
        Ok(_) => {
            tracing::info!("Instance already exists: {}", instance_path);
            Ok(())
        }
        Err(status) if status.code() == Code::NotFound => {
            tracing::info!("Instance not found, creating: {}", instance_path);

            let instance_config = if config.emulator_host.is_some() {
                format!("{}/instanceConfigs/emulator-config", project_path)
            } else {
                format!("{}/instanceConfigs/regional-us-central1", project_path)
            };

            let create_request = CreateInstanceRequest {
                parent: project_path.to_string(),
                instance_id: config.instance.clone(),
                instance: Some(Instance {
                    name: instance_path.to_string(),
                    config: instance_config,
                    display_name: format!("{} instance", config.instance),
                    node_count: 1,
                    ..Default::default()
                }),
            };

            let mut operation = admin_client
                .instance()
                .create_instance(create_request, None)
                .await
                .context("Failed to start instance creation")?;

            operation
                .wait(None)
                .await
                .context("Failed to create instance")?;

            tracing::info!("Instance created successfully: {}", instance_path);
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!(
            "Failed to check instance existence: {}",
            e.message()
        )),
    }
}

async fn ensure_database_exists(
    admin_client: &AdminClient,
    instance_path: &str,
    database_path: &str,
) -> Result<()> {
    let get_request = GetDatabaseRequest {
        name: database_path.to_string(),
    };

    match admin_client
        .database()
        .get_database(get_request, None)
        .await
    {
        Ok(_) => {
            tracing::info!("Database already exists: {}", database_path);
            Ok(())
        }
        Err(status) if status.code() == Code::NotFound => {
            tracing::info!("Database not found, creating: {}", database_path);

            let database_id = database_path
                .split('/')
                .next_back()
                .context("Invalid database path")?;

            let create_request = CreateDatabaseRequest {
                parent: instance_path.to_string(),
                create_statement: format!("CREATE DATABASE `{}`", database_id),
                extra_statements: vec![],
                encryption_config: None,
                database_dialect: 1, // Google Standard SQL
                proto_descriptors: vec![],
            };

            let mut operation = admin_client
                .database()
                .create_database(create_request, None)
                .await
                .context("Failed to start database creation")?;

            operation
                .wait(None)
                .await
                .context("Failed to create database")?;

            tracing::info!("Database created successfully: {}", database_path);
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!(
            "Failed to check database existence: {}",
            e.message()
        )),
    }
}

/// DDL for the contacts table and its owner index
fn contacts_schema() -> Vec<String> {
    vec![
        r#"
CREATE TABLE contacts (
    id STRING(36) NOT NULL,
    owner STRING(MAX) NOT NULL,
    name STRING(MAX) NOT NULL,
    email STRING(MAX),
    phone STRING(32),
    favorite BOOL NOT NULL,
    created_at TIMESTAMP NOT NULL OPTIONS (allow_commit_timestamp=true),
    updated_at TIMESTAMP NOT NULL OPTIONS (allow_commit_timestamp=true),
) PRIMARY KEY (id)
"#
        .trim()
        .to_string(),
        "CREATE INDEX contacts_by_owner ON contacts (owner, created_at)".to_string(),
    ]
}

fn has_contacts_table(statements: &[String]) -> bool {
    statements
        .iter()
        .any(|stmt| stmt.contains("CREATE TABLE contacts") || stmt.contains("CREATE TABLE `contacts`"))
}

async fn ensure_schema_exists(admin_client: &AdminClient, database_path: &str) -> Result<()> {
    let get_ddl_request = GetDatabaseDdlRequest {
        database: database_path.to_string(),
    };

    let ddl_response = admin_client
        .database()
        .get_database_ddl(get_ddl_request, None)
        .await
        .context("Failed to get database DDL")?;

    if has_contacts_table(&ddl_response.into_inner().statements) {
        tracing::info!("Table 'contacts' already exists");
        return Ok(());
    }

    tracing::info!("Table 'contacts' not found, creating...");

    let update_request = UpdateDatabaseDdlRequest {
        database: database_path.to_string(),
        statements: contacts_schema(),
        operation_id: String::new(),
        proto_descriptors: vec![],
        throughput_mode: false,
    };

    let mut operation = admin_client
        .database()
        .update_database_ddl(update_request, None)
        .await
        .context("Failed to start schema creation")?;

    operation
        .wait(None)
        .await
        .context("Failed to create contacts schema")?;

    tracing::info!("Table 'contacts' created successfully");
    Ok(())
}
