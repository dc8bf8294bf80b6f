//! # huevar-server
//!
//! HTTP service around the hue variation pipeline.
//!
//! A request names a source image already in object storage. The service
//! downloads and decodes it, generates one JPEG per configured hue, uploads
//! the variants next to the source, signs a retrieval URL for each and
//! records the URLs under `users/{uid}/collections/{auto_id}`.
//!
//! # Collaborators
//!
//! Each external dependency sits behind a trait with one local
//! implementation:
//!
//! | Trait | Local implementation |
//! |-------|----------------------|
//! | [`IdentityVerifier`] | [`AllowListVerifier`] |
//! | [`ObjectStore`] | [`FsObjectStore`] |
//! | [`RecordStore`] | [`JsonRecordStore`] |
//! | [`UrlSigner`] | [`Sha256UrlSigner`] |
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use huevar_server::{ServerConfig, VariationService, serve};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env_or_default(None)?;
//! let service = Arc::new(VariationService::from_config(&config)?);
//! serve(service, config.bind_addr()?).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod identity;
pub mod records;
pub mod routes;
pub mod service;
pub mod signing;
pub mod storage;

pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use identity::{AllowListVerifier, IdentityVerifier};
pub use records::{JsonRecordStore, RecordStore};
pub use routes::{router, serve};
pub use service::{
    DeleteResponse, GenerateResponse, VariationRequest, VariationService, record_path,
    variant_base,
};
pub use signing::{Sha256UrlSigner, UrlSigner};
pub use storage::{FsObjectStore, ObjectStore, StoredObject};
