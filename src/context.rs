//! Application context shared by every connection.

use crate::config::ServiceConfig;
use crate::docs::{ui, RegistryError, SchemaRegistry, DOCS_JSON_PATH};
use crate::resources;
use crate::routing::{Dispatcher, DispatcherBuilder};

/// Everything a request needs, built once at startup and shared via `Arc`.
#[derive(Debug)]
pub struct AppContext {
    dispatcher: Dispatcher,
    docs_page: String,
}

impl AppContext {
    /// Context serving the users and products resources.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, RegistryError> {
        Self::with_routes(config, resources::register_all)
    }

    /// Context with a custom route set. Registration errors are returned
    /// unchanged; nothing is built from a partial registration.
    pub fn with_routes<F>(config: &ServiceConfig, register: F) -> Result<Self, RegistryError>
    where
        F: FnOnce(&mut DispatcherBuilder) -> Result<(), RegistryError>,
    {
        let registry = SchemaRegistry::new(
            config.docs.info(),
            config.docs.servers(config.listener.port),
        );
        let mut builder = Dispatcher::builder(registry);
        register(&mut builder)?;

        Ok(Self {
            dispatcher: builder.build(),
            docs_page: ui::render_page(&config.docs.title, DOCS_JSON_PATH),
        })
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn docs_page(&self) -> &str {
        &self.docs_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::HttpMethod;

    #[test]
    fn test_document_header_from_config() {
        let mut config = ServiceConfig::default();
        config.listener.port = 4321;
        config.docs.title = "Demo".into();

        let context = AppContext::from_config(&config).unwrap();
        let document = context.dispatcher().document();
        assert_eq!(document.info().title, "Demo");
        assert_eq!(document.info().version, "1.0.0");
        assert_eq!(document.servers()[0].url, "http://localhost:4321");
        assert_eq!(document.operation_count(), 8);
        assert!(context.docs_page().contains("<title>Demo</title>"));
    }

    #[test]
    fn test_duplicate_registration_aborts() {
        let err = AppContext::with_routes(&ServiceConfig::default(), |builder| {
            resources::register_all(builder)?;
            resources::register_all(builder)
        })
        .unwrap_err();

        assert_eq!(
            err,
            RegistryError::DuplicateRoute {
                method: HttpMethod::Get,
                path: "/users".into()
            }
        );
    }
}
