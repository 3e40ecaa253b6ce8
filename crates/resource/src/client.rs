//! Fetcher and Mutator for one resource collection.

use core_types::{Resource, ResourceId};
use serde_json::Value;
use std::marker::PhantomData;

use crate::cookie::{CSRF_COOKIE, CSRF_HEADER};
use crate::transport::{ApiRequest, Method, Transport};
use crate::Result;

/// A state-changing request against a collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Create { body: Value, label: String },
    Update { id: ResourceId, body: Value, label: String },
    Delete { id: ResourceId, label: String },
}

impl Mutation {
    pub fn method(&self) -> Method {
        match self {
            Mutation::Create { .. } => Method::Post,
            Mutation::Update { .. } => Method::Patch,
            Mutation::Delete { .. } => Method::Delete,
        }
    }

    /// Endpoint path under a collection.
    pub fn path(&self, collection: &str) -> String {
        match self {
            Mutation::Create { .. } => format!("/api/{collection}"),
            Mutation::Update { id, .. } | Mutation::Delete { id, .. } => {
                format!("/api/{collection}/{id}")
            }
        }
    }

    pub fn body(&self) -> Option<&Value> {
        match self {
            Mutation::Create { body, .. } | Mutation::Update { body, .. } => Some(body),
            Mutation::Delete { .. } => None,
        }
    }

    /// Name of the affected record.
    pub fn label(&self) -> &str {
        match self {
            Mutation::Create { label, .. }
            | Mutation::Update { label, .. }
            | Mutation::Delete { label, .. } => label,
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            Mutation::Create { .. } => "create",
            Mutation::Update { .. } => "update",
            Mutation::Delete { .. } => "delete",
        }
    }

    pub fn success_title(&self) -> String {
        let done = match self {
            Mutation::Create { .. } => "created",
            Mutation::Update { .. } => "updated",
            Mutation::Delete { .. } => "deleted",
        };
        format!("{} has been {done}", self.label())
    }

    pub fn failure_title(&self) -> String {
        format!("Could not {} {}", self.verb(), self.label())
    }
}

/// Client for one resource collection.
pub struct ResourceClient<R, T> {
    transport: T,
    marker: PhantomData<fn() -> R>,
}

impl<R, T: Clone> Clone for ResourceClient<R, T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            marker: PhantomData,
        }
    }
}

impl<R: Resource, T: Transport> ResourceClient<R, T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            marker: PhantomData,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Path of the collection endpoint.
    pub fn collection_path() -> String {
        format!("/api/{}", R::COLLECTION)
    }

    /// GET the whole collection.
    pub async fn fetch(&self) -> Result<Vec<R>> {
        let request = ApiRequest::new(Method::Get, Self::collection_path());
        log::debug!("{} {}", request.method, request.path);

        let response = self.transport.send(request).await?.error_for_status()?;
        response.json()
    }

    /// Send a mutation with the CSRF header attached.
    pub async fn mutate(&self, mutation: &Mutation) -> Result<()> {
        let mut request = ApiRequest::new(mutation.method(), mutation.path(R::COLLECTION))
            .header(CSRF_HEADER, csrf_token(&self.transport));
        if let Some(body) = mutation.body() {
            request = request.json(body.clone());
        }
        log::debug!("{} {}", request.method, request.path);

        self.transport.send(request).await?.error_for_status()?;
        Ok(())
    }
}

/// CSRF token from the client's cookies, empty when absent.
pub(crate) fn csrf_token<T: Transport + ?Sized>(transport: &T) -> String {
    transport.cookie(CSRF_COOKIE).unwrap_or_default()
}
