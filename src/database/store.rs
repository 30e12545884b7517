use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};

/// Falha vinda da camada de armazenamento.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Violação de índice único (código 11000 no MongoDB)
    #[error("duplicate key: {0}")]
    Duplicate(String),
    #[error("{0}")]
    Backend(String),
}

/// Resultado de um `$set` em um único documento
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

/// Operações de documento usadas pelos serviços.
///
/// Cada escrita afeta um único documento e depende da atomicidade por
/// documento do próprio banco. Não há transações entre coleções.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>, StoreError>;

    /// `sort` segue a sintaxe do MongoDB, ex: `{ "created_at": -1 }`
    async fn find_many(
        &self,
        collection: &str,
        filter: Document,
        sort: Option<Document>,
    ) -> Result<Vec<Document>, StoreError>;

    async fn insert_one(&self, collection: &str, document: Document) -> Result<ObjectId, StoreError>;

    /// Aplica `{ "$set": fields }` ao primeiro documento que casar com `filter`
    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        fields: Document,
    ) -> Result<UpdateOutcome, StoreError>;

    /// Retorna a quantidade de documentos removidos (0 ou 1)
    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;

    async fn shutdown(&self);
}
