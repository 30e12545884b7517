use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use std::cmp::Ordering;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{DocumentStore, StoreError, UpdateOutcome, INDEXES};

/// Store em memória para os testes de rota e de serviço.
/// Filtros suportam apenas igualdade por campo; `sort` usa a primeira chave.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map(|docs| docs.len())
            .unwrap_or(0)
    }
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter.iter().all(|(key, value)| document.get(key) == Some(value))
}

fn compare(a: Option<&Bson>, b: Option<&Bson>) -> Ordering {
    match (a, b) {
        (Some(Bson::DateTime(a)), Some(Bson::DateTime(b))) => a.cmp(b),
        (Some(Bson::Int32(a)), Some(Bson::Int32(b))) => a.cmp(b),
        (Some(Bson::Int64(a)), Some(Bson::Int64(b))) => a.cmp(b),
        (Some(Bson::Double(a)), Some(Bson::Double(b))) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
        (Some(Bson::String(a)), Some(Bson::String(b))) => a.cmp(b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

fn unique_conflict(docs: &[Document], collection: &str, candidate: &Document, skip: Option<usize>) -> Option<String> {
    INDEXES
        .iter()
        .filter(|(name, _, unique)| *unique && *name == collection)
        .find_map(|(_, field, _)| {
            let value = candidate.get(*field)?;
            docs.iter()
                .enumerate()
                .any(|(i, d)| Some(i) != skip && d.get(*field) == Some(value))
                .then(|| format!("{} index: {} dup key", collection, field))
        })
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| matches(d, &filter)).cloned()))
    }

    async fn find_many(
        &self,
        collection: &str,
        filter: Document,
        sort: Option<Document>,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        let mut found: Vec<Document> = collections
            .get(collection)
            .map(|docs| docs.iter().filter(|d| matches(d, &filter)).cloned().collect())
            .unwrap_or_default();

        if let Some((key, direction)) = sort.as_ref().and_then(|s| s.iter().next()) {
            let descending = matches!(direction, Bson::Int32(d) if *d < 0) || matches!(direction, Bson::Int64(d) if *d < 0);
            found.sort_by(|a, b| {
                let ord = compare(a.get(key), b.get(key));
                if descending { ord.reverse() } else { ord }
            });
        }

        Ok(found)
    }

    async fn insert_one(&self, collection: &str, mut document: Document) -> Result<ObjectId, StoreError> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();

        if let Some(message) = unique_conflict(docs, collection, &document, None) {
            return Err(StoreError::Duplicate(message));
        }

        let id = match document.get("_id") {
            Some(Bson::ObjectId(id)) => *id,
            _ => {
                let id = ObjectId::new();
                document.insert("_id", id);
                id
            }
        };
        docs.push(document);
        Ok(id)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        fields: Document,
    ) -> Result<UpdateOutcome, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(UpdateOutcome::default());
        };
        let Some(index) = docs.iter().position(|d| matches(d, &filter)) else {
            return Ok(UpdateOutcome::default());
        };

        let mut updated = docs[index].clone();
        for (key, value) in fields {
            updated.insert(key, value);
        }

        if let Some(message) = unique_conflict(docs, collection, &updated, Some(index)) {
            return Err(StoreError::Duplicate(message));
        }

        let modified = if updated != docs[index] { 1 } else { 0 };
        docs[index] = updated;
        Ok(UpdateOutcome { matched: 1, modified })
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(0);
        };
        match docs.iter().position(|d| matches(d, &filter)) {
            Some(index) => {
                docs.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn shutdown(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::USERS;
    use mongodb::bson::doc;

    #[tokio::test]
    async fn unique_phone_is_enforced_on_insert_and_update() {
        let store = MemoryStore::new();
        store.insert_one(USERS, doc! { "phone": "1" }).await.unwrap();
        let second = store.insert_one(USERS, doc! { "phone": "2" }).await.unwrap();

        let dup = store.insert_one(USERS, doc! { "phone": "1" }).await;
        assert!(matches!(dup, Err(StoreError::Duplicate(_))));

        let clash = store
            .update_one(USERS, doc! { "_id": second }, doc! { "phone": "1" })
            .await;
        assert!(matches!(clash, Err(StoreError::Duplicate(_))));
        assert_eq!(store.count(USERS).await, 2);
    }

    #[tokio::test]
    async fn update_reports_unmodified_when_values_match() {
        let store = MemoryStore::new();
        let id = store.insert_one("LoanRequest", doc! { "status": "pending" }).await.unwrap();

        let same = store
            .update_one("LoanRequest", doc! { "_id": id }, doc! { "status": "pending" })
            .await
            .unwrap();
        assert_eq!(same, UpdateOutcome { matched: 1, modified: 0 });

        let changed = store
            .update_one("LoanRequest", doc! { "_id": id }, doc! { "status": "approved" })
            .await
            .unwrap();
        assert_eq!(changed, UpdateOutcome { matched: 1, modified: 1 });
    }

    #[tokio::test]
    async fn find_many_sorts_descending() {
        let store = MemoryStore::new();
        for n in [2, 3, 1] {
            store.insert_one("NomineeInfo", doc! { "n": n }).await.unwrap();
        }

        let docs = store
            .find_many("NomineeInfo", doc! {}, Some(doc! { "n": -1 }))
            .await
            .unwrap();
        let order: Vec<i32> = docs.iter().map(|d| d.get_i32("n").unwrap()).collect();
        assert_eq!(order, vec![3, 2, 1]);
    }
}
