//! # most-client
//!
//! Read-side client for MOST Web Framework data services.
//!
//! This crate connects [`most-query`] queries to a remote list/read endpoint
//! through a pluggable [`DataTransport`]. The transport receives the base
//! URL, the model name and the projected `$filter`/`$select`/`$top`/...
//! parameters, issues one request, and returns the payload untouched.
//!
//! ## Quick Start
//!
//! ```ignore
//! use most_client::{ClientConfig, ClientDataService};
//!
//! let config = ClientConfig::builder()
//!     .with_base_url("https://example.com/api/")
//!     .with_default_page_size(25)
//!     .build();
//! let service = ClientDataService::new(config, HttpTransport::default());
//!
//! let people = service.model("Person");
//! let query = people
//!     .where_("familyName").starts_with("Ber").equal(true)
//!     .order_by("familyName")
//!     .take(10);
//!
//! let page = people.get_list_as::<Person>(&query)?;
//! println!("{} of {} people", page.len(), page.total);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         most-client                           │
//! │                                                               │
//! │  ClientDataService                                            │
//! │  ├── model(name) → ClientDataModel                            │
//! │  ├── ClientDataQueryable::copy() → detached snapshot          │
//! │  ├── params() → QueryParams ($filter, $top, ...)              │
//! │  └── DataTransport::fetch(ReadRequest) → serde_json::Value    │
//! │                                                               │
//! │  Dependencies:                                                │
//! │  └── most-query - filter builder and parameter projection     │
//! └──────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod config;
mod error;
mod request;
mod result;
mod service;
mod traits;

// Public re-exports
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{ClientError, ClientResult, TransportError};
pub use request::ReadRequest;
pub use result::ResultPage;
pub use service::{ClientDataModel, ClientDataService};
pub use traits::DataTransport;

pub use most_query;
