//! User record service: paginated listing, first-name search and
//! email-unique create, update and delete over HTTP.
//!
//! The crate follows a hexagonal layout. [`domain`] holds the user entity,
//! its invariants and the [`domain::UserService`] that enforces them behind
//! driving ports. [`inbound`] adapts HTTP requests onto those ports and
//! [`outbound`] provides the record stores.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
