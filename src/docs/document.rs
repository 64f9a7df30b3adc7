//! OpenAPI document assembled with `utoipa::openapi` builders.
//!
//! Descriptors are rendered into `utoipa` operations on insert; `describe`
//! reads them back. Paths keep insertion order (`preserve_path_order`).

use indexmap::IndexMap;
use serde::Serialize;
use utoipa::openapi::path::{HttpMethod as OpenApiMethod, Operation, OperationBuilder, ParameterBuilder, ParameterIn};
use utoipa::openapi::request_body::RequestBodyBuilder;
use utoipa::openapi::schema::{Array, ObjectBuilder, Schema, Type};
use utoipa::openapi::{
    Content, ContentBuilder, Info, InfoBuilder, OpenApi, OpenApiBuilder, Paths, RefOr, Required, ResponseBuilder,
    Server,
};

use crate::docs::descriptor::{HttpMethod, ParamDescriptor, ResponseDescriptor, RouteDescriptor, Shape};

pub const JSON_MEDIA_TYPE: &str = "application/json";

pub const DEFAULT_TITLE: &str = "API Dokumentacioni";
pub const DEFAULT_VERSION: &str = "1.0.0";
pub const DEFAULT_DESCRIPTION: &str = "Dokumentacioni për API-të";

/// Document header used when nothing is configured.
pub fn default_info() -> Info {
    InfoBuilder::new()
        .title(DEFAULT_TITLE)
        .version(DEFAULT_VERSION)
        .description(Some(DEFAULT_DESCRIPTION))
        .build()
}

fn openapi_method(method: HttpMethod) -> OpenApiMethod {
    match method {
        HttpMethod::Get => OpenApiMethod::Get,
        HttpMethod::Post => OpenApiMethod::Post,
        HttpMethod::Put => OpenApiMethod::Put,
        HttpMethod::Delete => OpenApiMethod::Delete,
    }
}

/// Render a shape as a `utoipa` schema.
pub fn schema_for(shape: &Shape) -> Schema {
    let primitive = |ty: Type| Schema::Object(ObjectBuilder::new().schema_type(ty).build());
    match shape {
        Shape::Integer => primitive(Type::Integer),
        Shape::Number => primitive(Type::Number),
        Shape::String => primitive(Type::String),
        Shape::Boolean => primitive(Type::Boolean),
        Shape::Array { items } => Schema::Array(Array::new(schema_for(items))),
        Shape::Object { properties } => {
            let object = properties
                .iter()
                .fold(ObjectBuilder::new().schema_type(Type::Object), |object, (name, shape)| {
                    object.property(name, schema_for(shape)).required(name)
                });
            Schema::Object(object.build())
        }
    }
}

/// Read a schema back as a shape. Schemas outside the `Shape` subset give `None`.
fn shape_of(schema: &RefOr<Schema>) -> Option<Shape> {
    let value = serde_json::to_value(schema).ok()?;
    serde_json::from_value(value).ok()
}

fn json_content(shape: &Shape) -> Content {
    ContentBuilder::new().schema(Some(schema_for(shape))).build()
}

fn content_shape(content: &Content) -> Option<Shape> {
    content.schema.as_ref().and_then(shape_of)
}

fn operation_for(descriptor: &RouteDescriptor) -> Operation {
    let mut operation = OperationBuilder::new().summary(Some(descriptor.summary.clone()));

    for param in &descriptor.parameters {
        operation = operation.parameter(
            ParameterBuilder::new()
                .name(param.name.clone())
                .parameter_in(ParameterIn::Path)
                .required(Required::True)
                .description(Some(param.description.clone()))
                .schema(Some(schema_for(&param.shape)))
                .build(),
        );
    }

    if let Some(shape) = &descriptor.request_body {
        operation = operation.request_body(Some(
            RequestBodyBuilder::new()
                .content(JSON_MEDIA_TYPE, json_content(shape))
                .required(Some(Required::True))
                .build(),
        ));
    }

    for (status, response) in &descriptor.responses {
        let mut builder = ResponseBuilder::new().description(response.description.clone());
        if let Some(body) = &response.body {
            builder = builder.content(JSON_MEDIA_TYPE, json_content(body));
        }
        operation = operation.response(status.to_string(), builder.build());
    }

    operation.build()
}

/// Recover the descriptor an operation was rendered from.
///
/// `None` for operations this registry could not have produced: non-numeric
/// status keys, referenced responses, parameters without a schema.
fn descriptor_from(method: HttpMethod, path: &str, operation: &Operation) -> Option<RouteDescriptor> {
    let mut responses = IndexMap::new();
    for (status, response) in &operation.responses.responses {
        let RefOr::T(response) = response else {
            return None;
        };
        responses.insert(
            status.parse::<u16>().ok()?,
            ResponseDescriptor {
                description: response.description.clone(),
                body: response.content.get(JSON_MEDIA_TYPE).and_then(content_shape),
            },
        );
    }

    let parameters = operation
        .parameters
        .iter()
        .flatten()
        .map(|param| {
            Some(ParamDescriptor {
                name: param.name.clone(),
                shape: param.schema.as_ref().and_then(shape_of)?,
                description: param.description.clone().unwrap_or_default(),
            })
        })
        .collect::<Option<Vec<_>>>()?;

    Some(RouteDescriptor {
        method,
        path: path.to_string(),
        summary: operation.summary.clone().unwrap_or_default(),
        parameters,
        request_body: operation
            .request_body
            .as_ref()
            .and_then(|body| body.content.get(JSON_MEDIA_TYPE))
            .and_then(content_shape),
        responses,
    })
}

/// The OpenAPI document served at `/api-docs/openapi.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ApiDocument(OpenApi);

impl ApiDocument {
    pub fn new(info: Info, servers: Vec<Server>) -> Self {
        let mut openapi = OpenApiBuilder::new().info(info).paths(Paths::new()).build();
        if !servers.is_empty() {
            openapi.servers = Some(servers);
        }
        Self(openapi)
    }

    /// Add one operation. A path seen before keeps its original position.
    pub fn insert(&mut self, descriptor: &RouteDescriptor) {
        self.0.paths.add_path_operation(
            &descriptor.path,
            vec![openapi_method(descriptor.method)],
            operation_for(descriptor),
        );
    }

    pub fn info(&self) -> &Info {
        &self.0.info
    }

    pub fn servers(&self) -> &[Server] {
        self.0.servers.as_deref().unwrap_or_default()
    }

    pub fn openapi(&self) -> &OpenApi {
        &self.0
    }

    pub fn operation(&self, method: HttpMethod, path: &str) -> Option<&Operation> {
        self.0.paths.get_path_operation(path, openapi_method(method))
    }

    pub fn describe(&self, method: HttpMethod, path: &str) -> Option<RouteDescriptor> {
        descriptor_from(method, path, self.operation(method, path)?)
    }

    /// Every (method, path) pair: paths in insertion order, then GET, POST,
    /// PUT, DELETE within a path.
    pub fn routes(&self) -> Vec<(HttpMethod, &str)> {
        let methods = [HttpMethod::Get, HttpMethod::Post, HttpMethod::Put, HttpMethod::Delete];
        self.0
            .paths
            .paths
            .keys()
            .flat_map(|path| {
                methods
                    .into_iter()
                    .filter(move |method| self.operation(*method, path).is_some())
                    .map(move |method| (method, path.as_str()))
            })
            .collect()
    }

    pub fn path_count(&self) -> usize {
        self.0.paths.paths.len()
    }

    pub fn operation_count(&self) -> usize {
        self.routes().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn update_user() -> RouteDescriptor {
        RouteDescriptor::new(HttpMethod::Put, "/users/{id}", "Përditëso një përdorues")
            .param("id", Shape::Integer, "ID e përdoruesit")
            .request_body(Shape::object([("name", Shape::String)]))
            .response(200, "Përdoruesi u përditësua", None)
    }

    #[test]
    fn test_operation_json_layout() {
        let mut doc = ApiDocument::new(default_info(), vec![]);
        doc.insert(&update_user());

        let value = serde_json::to_value(&doc).unwrap();
        assert!(value["openapi"].as_str().unwrap().starts_with('3'));
        assert_eq!(value["info"]["title"], DEFAULT_TITLE);
        assert!(value.get("servers").is_none());

        let put = &value["paths"]["/users/{id}"]["put"];
        assert_eq!(put["summary"], "Përditëso një përdorues");
        let param = &put["parameters"][0];
        assert_eq!(param["in"], "path");
        assert_eq!(param["name"], "id");
        assert_eq!(param["required"], true);
        assert_eq!(param["schema"], json!({ "type": "integer" }));
        assert_eq!(param["description"], "ID e përdoruesit");

        assert_eq!(put["requestBody"]["required"], true);
        let body = &put["requestBody"]["content"]["application/json"]["schema"];
        assert_eq!(body["type"], "object");
        assert_eq!(body["properties"]["name"]["type"], "string");
        assert_eq!(body["required"], json!(["name"]));
        assert_eq!(put["responses"]["200"], json!({ "description": "Përdoruesi u përditësua" }));
    }

    #[test]
    fn test_array_schema() {
        let schema = schema_for(&Shape::array(Shape::object([("id", Shape::Integer)])));
        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(value["type"], "array");
        assert_eq!(value["items"]["properties"]["id"]["type"], "integer");
    }

    #[test]
    fn test_describe_recovers_descriptor() {
        let mut doc = ApiDocument::new(default_info(), vec![]);
        doc.insert(&update_user());

        assert_eq!(doc.describe(HttpMethod::Put, "/users/{id}"), Some(update_user()));
        assert_eq!(doc.describe(HttpMethod::Get, "/users/{id}"), None);
    }

    #[test]
    fn test_paths_keep_insertion_order() {
        let mut doc = ApiDocument::new(default_info(), vec![Server::new("http://localhost:3000")]);
        doc.insert(&RouteDescriptor::new(HttpMethod::Get, "/users", "list"));
        doc.insert(&RouteDescriptor::new(HttpMethod::Get, "/products", "list"));
        doc.insert(&RouteDescriptor::new(HttpMethod::Post, "/users", "create"));

        assert_eq!(doc.servers()[0].url, "http://localhost:3000");
        assert_eq!(doc.path_count(), 2);
        assert_eq!(
            doc.routes(),
            vec![
                (HttpMethod::Get, "/users"),
                (HttpMethod::Post, "/users"),
                (HttpMethod::Get, "/products"),
            ]
        );

        let value = serde_json::to_value(&doc).unwrap();
        let paths: Vec<&String> = value["paths"].as_object().unwrap().keys().collect();
        assert_eq!(paths, ["/users", "/products"]);
    }
}
