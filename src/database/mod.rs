pub mod retry;
pub mod store;

#[cfg(test)]
pub mod memory;

pub use store::{DocumentStore, StoreError, UpdateOutcome};

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Client, Database, IndexModel};
use std::time::Duration;

use crate::config::AppConfig;

pub const USERS: &str = "Users";
pub const NOMINEE_INFO: &str = "NomineeInfo";
pub const LOAN_REQUEST: &str = "LoanRequest";

/// Índices garantidos na inicialização: (coleção, campo, único)
pub const INDEXES: &[(&str, &str, bool)] = &[
    (USERS, "phone", true),
    (NOMINEE_INFO, "user_phone", false),
    (LOAN_REQUEST, "phone", false),
];

const DUPLICATE_KEY_CODE: i32 = 11000;

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        match err.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(write_error))
                if write_error.code == DUPLICATE_KEY_CODE =>
            {
                StoreError::Duplicate(write_error.message.clone())
            }
            _ => StoreError::Backend(err.to_string()),
        }
    }
}

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    /// Abre o pool e confirma a conexão com um `ping`.
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, StoreError> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        client_options.app_name = Some("microfinance-service".to_string());
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(Duration::from_secs(300));
        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        let mongodb = Self { client, db };
        mongodb.ping().await?;

        Ok(mongodb)
    }

    /// Conecta com retentativas de intervalo fixo. Quem chama decide o que
    /// fazer quando as tentativas se esgotam.
    pub async fn connect_with_retry(config: &AppConfig) -> Result<Self, StoreError> {
        log::info!("🔌 Connecting to MongoDB database '{}'...", config.database_name);

        let mongodb = retry::retry_with_delay(
            config.connect_retries,
            Duration::from_secs(config.connect_delay_secs),
            |_| MongoDB::new(&config.mongodb_uri, &config.database_name),
        )
        .await?;

        mongodb.ensure_indexes().await;
        Ok(mongodb)
    }

    /// Cria os índices de `INDEXES`. Falhas são logadas e não impedem o boot.
    async fn ensure_indexes(&self) {
        log::info!("🔧 Creating database indexes...");

        for (collection, field, unique) in INDEXES {
            let mut keys = Document::new();
            keys.insert(*field, 1);

            let model = IndexModel::builder()
                .keys(keys)
                .options(IndexOptions::builder().unique(*unique).build())
                .build();

            match self.db.collection::<Document>(collection).create_index(model).await {
                Ok(_) => log::info!("   ✅ Index ready: {}({})", collection, field),
                Err(e) => log::warn!("   ⚠️  Index {}({}) not created: {}", collection, field, e),
            }
        }
    }

    fn collection(&self, name: &str) -> mongodb::Collection<Document> {
        self.db.collection(name)
    }
}

#[async_trait]
impl DocumentStore for MongoDB {
    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>, StoreError> {
        Ok(self.collection(collection).find_one(filter).await?)
    }

    async fn find_many(
        &self,
        collection: &str,
        filter: Document,
        sort: Option<Document>,
    ) -> Result<Vec<Document>, StoreError> {
        let cursor = match sort {
            Some(sort) => self.collection(collection).find(filter).sort(sort).await?,
            None => self.collection(collection).find(filter).await?,
        };
        Ok(cursor.try_collect().await?)
    }

    async fn insert_one(&self, collection: &str, document: Document) -> Result<ObjectId, StoreError> {
        let result = self.collection(collection).insert_one(document).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::Backend(format!("unexpected inserted id: {}", result.inserted_id)))
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        fields: Document,
    ) -> Result<UpdateOutcome, StoreError> {
        let result = self
            .collection(collection)
            .update_one(filter, doc! { "$set": fields })
            .await?;
        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64, StoreError> {
        Ok(self.collection(collection).delete_one(filter).await?.deleted_count)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.client.database("admin").run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    async fn shutdown(&self) {
        log::info!("🔌 Closing MongoDB connections");
        self.client.clone().shutdown().await;
    }
}
