//! Beast CRUD against a `Store`. Each operation issues exactly one statement.

use crate::error::StoreError;
use crate::model::Beast;
use crate::sql::{statements, SqlValue};
use crate::store::Store;

pub struct BeastService;

impl BeastService {
    /// All beasts, in whatever order the store returns them.
    pub async fn list(store: &dyn Store) -> Result<Vec<Beast>, StoreError> {
        let rows = store.query(statements::SELECT_ALL, &[]).await?;
        rows.into_iter().map(Beast::from_row).collect()
    }

    pub async fn get(store: &dyn Store, name: &str) -> Result<Option<Beast>, StoreError> {
        let row = store
            .query_row(statements::SELECT_BY_NAME, &[SqlValue::from(name)])
            .await?;
        row.map(Beast::from_row).transpose()
    }

    pub async fn create(store: &dyn Store, beast: &Beast) -> Result<(), StoreError> {
        let params = [
            SqlValue::from(beast.name.as_str()),
            SqlValue::from(beast.category.as_str()),
            SqlValue::from(beast.challenge_rating.as_str()),
            SqlValue::Json(beast.attributes_json()),
            SqlValue::from(beast.description.as_str()),
        ];
        store.exec(statements::INSERT, &params).await?;
        Ok(())
    }

    /// Replace every non-key field of the beast stored under `name`. Returns rows affected.
    pub async fn update(store: &dyn Store, name: &str, beast: &Beast) -> Result<u64, StoreError> {
        let params = [
            SqlValue::from(beast.category.as_str()),
            SqlValue::from(beast.challenge_rating.as_str()),
            SqlValue::Json(beast.attributes_json()),
            SqlValue::from(beast.description.as_str()),
            SqlValue::from(name),
        ];
        store.exec(statements::UPDATE_BY_NAME, &params).await
    }

    /// Returns rows affected.
    pub async fn delete(store: &dyn Store, name: &str) -> Result<u64, StoreError> {
        store
            .exec(statements::DELETE_BY_NAME, &[SqlValue::from(name)])
            .await
    }
}
