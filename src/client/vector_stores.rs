//! Vector-store endpoints (assistants resource family).

use crate::client::core::OpenAiClient;
use crate::endpoint::{table, ListQuery};
use crate::payload::{VectorStoreOptions, VectorStoreUpdate};
use serde_json::Value;

impl OpenAiClient {
    pub async fn create_vector_store(&self, options: &VectorStoreOptions) -> Option<Value> {
        let body = self.body_from(options, Vec::new());
        self.call(&table::CREATE_VECTOR_STORE, &[], None, body).await
    }

    pub async fn list_vector_stores(&self, query: &ListQuery) -> Option<Value> {
        self.call(&table::LIST_VECTOR_STORES, &[], Some(query), Ok(None))
            .await
    }

    pub async fn retrieve_vector_store(&self, vector_store_id: &str) -> Option<Value> {
        self.call(
            &table::RETRIEVE_VECTOR_STORE,
            &[("vector_store_id", vector_store_id)],
            None,
            Ok(None),
        )
        .await
    }

    pub async fn modify_vector_store(
        &self,
        vector_store_id: &str,
        update: &VectorStoreUpdate,
    ) -> Option<Value> {
        let body = self.body_from(update, Vec::new());
        self.call(
            &table::MODIFY_VECTOR_STORE,
            &[("vector_store_id", vector_store_id)],
            None,
            body,
        )
        .await
    }

    pub async fn delete_vector_store(&self, vector_store_id: &str) -> Option<Value> {
        self.call(
            &table::DELETE_VECTOR_STORE,
            &[("vector_store_id", vector_store_id)],
            None,
            Ok(None),
        )
        .await
    }
}
