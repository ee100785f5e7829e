// src/shared/store.rs
use bson::{doc, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use serde_json::Value;

use crate::shared::api::listing::{ListParams, SortOrder};
use crate::shared::error::StoreError;

/// Name of the orchestrator database.
pub const DATABASE: &str = "orchestra";

pub fn to_filter_doc(filter: &Option<Value>) -> Result<Document, StoreError> {
    match filter {
        None => Ok(Document::new()),
        Some(value) => bson::to_document(value).map_err(|e| StoreError::Backend(e.to_string())),
    }
}

pub fn to_sort_doc(sort: &[(String, SortOrder)]) -> Document {
    let mut document = Document::new();
    for (field, order) in sort {
        document.insert(
            field.clone(),
            match order {
                SortOrder::Ascending => 1,
                SortOrder::Descending => -1,
            },
        );
    }
    document
}

/// A unique-index violation surfaces as server write error 11000.
pub fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    matches!(
        &*error.kind,
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == 11000
    )
}

pub fn backend(error: mongodb::error::Error) -> StoreError {
    StoreError::Backend(error.to_string())
}

pub fn id_filter(id: impl ToString) -> Document {
    doc! {"_id": id.to_string()}
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filters_convert_to_documents() {
        let filter = Some(json!({"status": {"$ne": "DELETED"}}));
        let document = to_filter_doc(&filter).unwrap();
        assert!(document.contains_key("status"));
        assert!(to_filter_doc(&None).unwrap().is_empty());
    }

    #[test]
    fn sort_preserves_field_order_and_direction() {
        let sort = vec![
            ("last_name".to_string(), SortOrder::Ascending),
            ("statistic.add_date".to_string(), SortOrder::Descending),
        ];
        let document = to_sort_doc(&sort);
        let keys: Vec<_> = document.keys().collect();
        assert_eq!(keys, vec!["last_name", "statistic.add_date"]);
        assert_eq!(document.get_i32("statistic.add_date").unwrap(), -1);
    }
}
