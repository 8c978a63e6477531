//! The generic dispatch core shared by all service clients.
//!
//! One API call flows validator → builder → authenticator → transport →
//! mapper; the modules here are those stages in order.

pub mod executor;
pub mod operation;
pub mod request;
pub mod response;
pub mod transport;

pub use executor::OperationExecutor;
pub use operation::{Method, Operation};
pub use request::{Part, PartKind, RequestBody, RequestBuilder, WatsonRequest};
pub use response::{DetailedResponse, WatsonResponse};
pub use transport::{HttpTransport, ReqwestTransport};
