//! Book (catalog record) model.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A catalog record, keyed by an ISBN-like id.
///
/// Every field defaults so that a partial update body parses; on update an
/// empty `name`/`press` or empty `authors` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Book {
    /// ISBN identifier, unique within the store
    pub id: String,
    /// Display title
    pub name: String,
    /// Authors, in order
    pub authors: Vec<String>,
    /// Publisher
    pub press: String,
}
