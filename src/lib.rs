//! watson-sdk
//!
//! Typed client core for the IBM Watson family of cloud REST APIs.
//!
//! Every API operation flows through one generic dispatch path: validate
//! required parameters, build the request (path substitution, query
//! arguments, one of four body modes), attach credentials, send through the
//! transport, and map the response into a typed [`DetailedResponse`] or a
//! [`WatsonError`]. Service modules only declare endpoint descriptors and
//! DTOs on top of that path. Long-running resources (Discovery
//! environments, custom speech models) are observed with the bounded
//! [`poll::StatusPoller`].
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use watson_sdk::prelude::*;
//!
//! let config = ServiceConfig::new("https://api.us-south.discovery.watson.cloud.ibm.com", "2019-04-30");
//! let auth = Arc::new(IamAuthenticator::new(std::env::var("WATSON_APIKEY")?));
//! let discovery = DiscoveryClient::new(config, auth);
//!
//! let env = discovery.create_environment("my-env", None).await?.result;
//! let outcome = discovery
//!     .wait_for_environment(&env.environment_id, &PollPolicy::default())
//!     .await?;
//! ```
#![deny(unsafe_code)]

pub mod auth;
pub mod config;
pub mod core;
pub mod error;
pub mod poll;
pub mod services;

pub use config::ServiceConfig;
pub use core::response::DetailedResponse;
pub use error::{WatsonError, WatsonResult};

/// Common imports for SDK consumers.
pub mod prelude {
    pub use crate::auth::{
        ApiKeyQueryAuth, Authenticator, BasicAuth, BearerAuth, IamAuthenticator, NoAuth,
    };
    pub use crate::config::ServiceConfig;
    pub use crate::core::response::DetailedResponse;
    pub use crate::error::{WatsonError, WatsonResult};
    pub use crate::poll::{PollOutcome, PollPolicy, ResourceStatus, StatusPoller};
    pub use crate::services::assistant::AssistantClient;
    pub use crate::services::discovery::DiscoveryClient;
    pub use crate::services::language_translator::LanguageTranslatorClient;
    pub use crate::services::speech_to_text::SpeechToTextClient;
    pub use crate::services::text_to_speech::TextToSpeechClient;
}
