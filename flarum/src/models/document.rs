//! JSON:API request documents.

use serde::Serialize;
use serde_json::{Map, Value};

/// Top-level `{ "data": ... }` envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document<A, R = Map<String, Value>> {
    pub data: Resource<A, R>,
}

impl<A, R> Document<A, R> {
    /// Wrap a resource object.
    pub fn new(data: Resource<A, R>) -> Self {
        Self { data }
    }
}

/// A resource object with attributes and optional relationships.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource<A, R = Map<String, Value>> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub attributes: A,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationships: Option<R>,
}

impl<A, R> Resource<A, R> {
    /// Resource of the given type without id or relationships.
    pub fn new(kind: &'static str, attributes: A) -> Self {
        Self {
            kind,
            id: None,
            attributes,
            relationships: None,
        }
    }

    /// Set the resource id.
    pub fn with_id(mut self, id: impl ToString) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Set the relationships object.
    pub fn with_relationships(mut self, relationships: R) -> Self {
        self.relationships = Some(relationships);
        self
    }
}

/// `{ "type": ..., "id": ... }` pointer to another resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceIdentifier<I> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: I,
}

/// To-many relationship linkage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Relationship<I> {
    pub data: Vec<ResourceIdentifier<I>>,
}

impl<I> Relationship<I> {
    /// Build linkage of `kind` from a list of ids. An empty list stays an empty array.
    pub fn to_many(kind: &'static str, ids: impl IntoIterator<Item = I>) -> Self {
        Self {
            data: ids
                .into_iter()
                .map(|id| ResourceIdentifier { kind, id })
                .collect(),
        }
    }
}
