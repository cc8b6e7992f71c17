//! Data service client and per-model read operations.

use most_query::ClientDataQueryable;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::request::ReadRequest;
use crate::result::ResultPage;
use crate::traits::DataTransport;

/// A client bound to one data service.
///
/// # Example
///
/// ```rust
/// use most_client::{ClientConfig, ClientDataService, DataTransport, ReadRequest, TransportError};
/// use serde_json::{json, Value};
///
/// struct Fixed;
///
/// impl DataTransport for Fixed {
///     fn fetch(&self, _request: &ReadRequest) -> Result<Value, TransportError> {
///         Ok(json!([{ "id": 1, "name": "John" }]))
///     }
/// }
///
/// let service = ClientDataService::new(ClientConfig::default(), Fixed);
/// let people = service.model("Person");
/// let query = people.as_queryable().where_("name").equal("John");
///
/// let items = people.get_items(&query).unwrap();
/// assert_eq!(items[0]["id"], 1);
/// ```
#[derive(Debug)]
pub struct ClientDataService<T> {
    config: ClientConfig,
    transport: T,
}

impl<T: DataTransport> ClientDataService<T> {
    /// Creates a client with the given configuration and transport.
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns a handle for reading from `name`.
    pub fn model(&self, name: impl Into<String>) -> ClientDataModel<'_, T> {
        ClientDataModel {
            service: self,
            name: name.into(),
        }
    }

    /// Issues one read request for `query` and returns the raw payload.
    pub fn execute(&self, query: &ClientDataQueryable) -> ClientResult<Value> {
        if query.model().trim().is_empty() {
            return Err(ClientError::MissingModel);
        }

        let mut params = query.params();
        if let Some(page_size) = self.config.default_page_size {
            params = params.with_default_top(i64::from(page_size));
        }

        let request = ReadRequest {
            base_url: self.config.base_url.clone(),
            model: params.model.clone(),
            params,
        };
        debug!(
            model = %request.model,
            filter = ?request.params.filter,
            top = ?request.params.top,
            skip = ?request.params.skip,
            "issuing read request"
        );

        self.transport.fetch(&request).map_err(ClientError::Transport)
    }
}

/// Read operations against one model of a [`ClientDataService`].
#[derive(Debug)]
pub struct ClientDataModel<'a, T> {
    service: &'a ClientDataService<T>,
    name: String,
}

impl<T: DataTransport> ClientDataModel<'_, T> {
    /// Returns the model name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a new, empty query against this model.
    pub fn as_queryable(&self) -> ClientDataQueryable {
        ClientDataQueryable::new(self.name.clone())
    }

    /// Returns a new query against this model, starting a filter on `field`.
    pub fn where_(&self, field: impl Into<String>) -> ClientDataQueryable {
        self.as_queryable().where_(field)
    }

    /// Returns a new query against this model projecting `fields`.
    pub fn select<I, S>(&self, fields: I) -> ClientDataQueryable
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.as_queryable().select(fields)
    }

    /// Reads the items matching `query`.
    pub fn get_items(&self, query: &ClientDataQueryable) -> ClientResult<Value> {
        self.service.execute(&self.snapshot(query))
    }

    /// Reads the first item matching `query`.
    pub fn get_item(&self, query: &ClientDataQueryable) -> ClientResult<Value> {
        self.service.execute(&self.snapshot(query).first())
    }

    /// Reads one page of items matching `query`, with paging metadata.
    pub fn get_list(&self, query: &ClientDataQueryable) -> ClientResult<Value> {
        self.service.execute(&self.snapshot(query).paged(true))
    }

    /// Reads the items matching `query` as `D`.
    pub fn get_items_as<D: DeserializeOwned>(
        &self,
        query: &ClientDataQueryable,
    ) -> ClientResult<Vec<D>> {
        let payload = self.service.execute(&self.snapshot(query).as_array(true))?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Reads the first item matching `query` as `D`.
    pub fn get_item_as<D: DeserializeOwned>(
        &self,
        query: &ClientDataQueryable,
    ) -> ClientResult<Option<D>> {
        let payload = self
            .service
            .execute(&self.snapshot(query).first().as_array(true))?;
        let items: Vec<D> = serde_json::from_value(payload)?;
        Ok(items.into_iter().next())
    }

    /// Reads one page of items matching `query` as `D`.
    pub fn get_list_as<D: DeserializeOwned>(
        &self,
        query: &ClientDataQueryable,
    ) -> ClientResult<ResultPage<D>> {
        let payload = self.get_list(query)?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Detaches `query` from the caller and retargets it to this model.
    fn snapshot(&self, query: &ClientDataQueryable) -> ClientDataQueryable {
        let mut snapshot = query.copy();
        snapshot.set_model(self.name.clone());
        snapshot
    }
}
