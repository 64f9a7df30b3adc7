//! CRUD resources served by the dispatcher.
//!
//! # Data Flow
//! ```text
//! register_all(builder)
//!     → register_crud(USERS)    GET/POST /users, PUT/DELETE /users/{id}
//!     → register_crud(PRODUCTS) GET/POST /products, PUT/DELETE /products/{id}
//!
//! Request → handler → ResourceStore (FixtureStore) → Reply
//! ```
//!
//! Each route is registered with its descriptor in the same call, so the
//! document always lists exactly the routes that are served.

pub mod model;
pub mod products;
pub mod store;
pub mod users;

use std::sync::Arc;

use crate::docs::{HttpMethod, RegistryError, RouteDescriptor, Shape};
use crate::routing::{DispatchError, DispatcherBuilder, Reply, RouteRequest};

pub use model::{EchoedRecord, Message, NameFields, Record};
pub use store::{FixtureStore, ResourceStore};

/// Static text describing one resource in the document and its replies.
#[derive(Debug, Clone, Copy)]
pub struct Resource {
    pub collection: &'static str,
    pub item: &'static str,
    pub seed_name: &'static str,
    pub list_summary: &'static str,
    pub list_description: &'static str,
    pub create_summary: &'static str,
    pub created_description: &'static str,
    pub update_summary: &'static str,
    pub updated_description: &'static str,
    pub delete_summary: &'static str,
    pub deleted_description: &'static str,
    pub id_description: &'static str,
    /// Deletion message; `{id}` is replaced by the path parameter.
    pub deleted_message: &'static str,
}

impl Resource {
    pub fn deleted_message(&self, id: &str) -> String {
        self.deleted_message.replace("{id}", id)
    }

    pub fn fixture_store(&self) -> FixtureStore {
        FixtureStore::new(self.seed_name)
    }
}

fn record_shape() -> Shape {
    Shape::object([("id", Shape::Integer), ("name", Shape::String)])
}

fn name_shape() -> Shape {
    Shape::object([("name", Shape::String)])
}

/// Register list, create, update and delete for one resource.
pub fn register_crud(
    builder: &mut DispatcherBuilder,
    resource: &'static Resource,
    store: Arc<dyn ResourceStore>,
) -> Result<(), RegistryError> {
    let list_store = store.clone();
    builder.add_route(
        HttpMethod::Get,
        resource.collection,
        move |_req: RouteRequest| Reply::json(&list_store.list()),
        RouteDescriptor::new(HttpMethod::Get, resource.collection, resource.list_summary).response(
            200,
            resource.list_description,
            Some(Shape::array(record_shape())),
        ),
    )?;

    let create_store = store.clone();
    builder.add_route(
        HttpMethod::Post,
        resource.collection,
        move |req: RouteRequest| -> Result<Reply, DispatchError> {
            let fields: NameFields = req.json()?;
            Reply::json(&create_store.create(fields))
        },
        RouteDescriptor::new(HttpMethod::Post, resource.collection, resource.create_summary)
            .request_body(name_shape())
            .response(201, resource.created_description, Some(record_shape())),
    )?;

    let update_store = store.clone();
    builder.add_route(
        HttpMethod::Put,
        resource.item,
        move |req: RouteRequest| -> Result<Reply, DispatchError> {
            let fields: NameFields = req.json()?;
            Reply::json(&update_store.update(req.param("id")?, fields))
        },
        RouteDescriptor::new(HttpMethod::Put, resource.item, resource.update_summary)
            .param("id", Shape::Integer, resource.id_description)
            .request_body(name_shape())
            .response(200, resource.updated_description, None),
    )?;

    builder.add_route(
        HttpMethod::Delete,
        resource.item,
        move |req: RouteRequest| -> Result<Reply, DispatchError> {
            let id = req.param("id")?;
            store.delete(id);
            Reply::json(&Message {
                message: resource.deleted_message(id),
            })
        },
        RouteDescriptor::new(HttpMethod::Delete, resource.item, resource.delete_summary)
            .param("id", Shape::Integer, resource.id_description)
            .response(200, resource.deleted_description, None),
    )?;

    Ok(())
}

/// Register every resource: users first, then products.
pub fn register_all(builder: &mut DispatcherBuilder) -> Result<(), RegistryError> {
    for resource in [&users::USERS, &products::PRODUCTS] {
        register_crud(builder, resource, Arc::new(resource.fixture_store()))?;
    }
    Ok(())
}
