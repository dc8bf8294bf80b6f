//! Request orchestration.
//!
//! [`VariationService`] glues the batch generator to the collaborators:
//! identity, object storage, records and URL signing. Its methods are
//! blocking and are run on the blocking pool by the HTTP layer.

use std::sync::Arc;

use huevar_color::ColorPalette;
use huevar_io::jpeg::JpegWriter;
use huevar_io::ImageWriter;
use huevar_ops::{VariationBatchGenerator, VariationResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::config::ServerConfig;
use crate::error::{Result, ServerError};
use crate::identity::{AllowListVerifier, IdentityVerifier};
use crate::records::{JsonRecordStore, RecordStore};
use crate::signing::{Sha256UrlSigner, UrlSigner};
use crate::storage::{FsObjectStore, ObjectStore, StoredObject};

/// Body of both the generate and the delete request.
///
/// Fields are optional so that a missing field is reported as a missing
/// parameter rather than a malformed body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationRequest {
    /// Caller's user id.
    #[serde(default)]
    pub uid: Option<String>,
    /// Collection id the variants belong to.
    #[serde(default)]
    pub auto_id: Option<String>,
    /// Object key of the source image.
    #[serde(default)]
    pub target_path: Option<String>,
}

/// Validated request parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParams<'a> {
    /// Caller's user id.
    pub uid: &'a str,
    /// Collection id.
    pub auto_id: &'a str,
    /// Source object key.
    pub target_path: &'a str,
}

impl VariationRequest {
    /// Builds a request with all three fields set.
    pub fn new(uid: impl Into<String>, auto_id: impl Into<String>, target_path: impl Into<String>) -> Self {
        Self {
            uid: Some(uid.into()),
            auto_id: Some(auto_id.into()),
            target_path: Some(target_path.into()),
        }
    }

    /// Checks that every field is present and non-empty.
    pub fn params(&self) -> Result<RequestParams<'_>> {
        match (
            non_empty(&self.uid),
            non_empty(&self.auto_id),
            non_empty(&self.target_path),
        ) {
            (Some(uid), Some(auto_id), Some(target_path)) => Ok(RequestParams {
                uid,
                auto_id,
                target_path,
            }),
            _ => Err(ServerError::MissingParameters),
        }
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Successful generate response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    /// Human-readable status.
    pub message: String,
    /// Display palette, reversed when so configured.
    pub colors: Vec<String>,
    /// Object keys of the variants, in hue order.
    pub images: Vec<String>,
    /// Signed URLs of the variants, in hue order.
    pub image_urls: Vec<String>,
}

/// Successful delete response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Human-readable status.
    pub message: String,
}

/// Splits `dir/name.ext` into the variant base `dir/name`.
///
/// Only the last extension is dropped; a leading dot is part of the name.
/// No leading `/` is produced when there is no directory.
pub fn variant_base(target_path: &str) -> String {
    let (dir, file) = match target_path.rfind('/') {
        Some(i) => (&target_path[..i], &target_path[i + 1..]),
        None => ("", target_path),
    };
    let stem = match file.rfind('.') {
        Some(i) if i > 0 => &file[..i],
        _ => file,
    };
    if dir.is_empty() {
        stem.to_string()
    } else {
        format!("{dir}/{stem}")
    }
}

/// Record path of a collection.
pub fn record_path(uid: &str, auto_id: &str) -> String {
    format!("users/{uid}/collections/{auto_id}")
}

/// Handles generate, delete and fetch requests.
pub struct VariationService {
    generator: VariationBatchGenerator,
    writer: JpegWriter,
    palette: ColorPalette,
    reverse_palette: bool,
    identity: Arc<dyn IdentityVerifier>,
    objects: Arc<dyn ObjectStore>,
    records: Arc<dyn RecordStore>,
    signer: Arc<dyn UrlSigner>,
}

impl std::fmt::Debug for VariationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariationService")
            .field("hues", self.generator.spec())
            .field("quality", &self.writer.quality())
            .field("reverse_palette", &self.reverse_palette)
            .finish_non_exhaustive()
    }
}

impl VariationService {
    /// Builds a service from explicit collaborators.
    pub fn new(
        config: &ServerConfig,
        identity: Arc<dyn IdentityVerifier>,
        objects: Arc<dyn ObjectStore>,
        records: Arc<dyn RecordStore>,
        signer: Arc<dyn UrlSigner>,
    ) -> Self {
        Self {
            generator: VariationBatchGenerator::new(config.hues.clone()),
            writer: JpegWriter::with_quality(config.jpeg_quality),
            palette: config.palette.clone(),
            reverse_palette: config.reverse_palette,
            identity,
            objects,
            records,
            signer,
        }
    }

    /// Builds a service with the local collaborators described by `config`.
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let objects = FsObjectStore::open(&config.storage_root)?;
        let records = match &config.records_path {
            Some(path) => JsonRecordStore::open(path)?,
            None => JsonRecordStore::in_memory(),
        };
        let signer = Sha256UrlSigner::new(
            config.public_url.clone(),
            config.signing_secret.clone(),
            config.url_ttl_secs,
        );
        Ok(Self::new(
            config,
            Arc::new(AllowListVerifier::new(config.allowed_users.iter().cloned())),
            Arc::new(objects),
            Arc::new(records),
            Arc::new(signer),
        ))
    }

    /// Palette as served to clients. The configured palette is not modified.
    pub fn colors(&self) -> Vec<String> {
        if self.reverse_palette {
            self.palette.reversed().to_strings()
        } else {
            self.palette.to_strings()
        }
    }

    /// Generates, stores, signs and records one batch of variants.
    pub fn generate(&self, request: &VariationRequest) -> Result<GenerateResponse> {
        let params = request.params()?;
        tracing::trace!(uid = params.uid, auto_id = params.auto_id, target = params.target_path, "generate");

        if !self.identity.verify(params.uid)? {
            return Err(ServerError::AccessDenied(params.uid.to_string()));
        }

        let source = self.objects.get(params.target_path)?;
        let image = huevar_io::decode(&source.data).map_err(ServerError::Decode)?;
        tracing::debug!(
            target = params.target_path,
            width = image.width(),
            height = image.height(),
            "decoded source"
        );

        let base = variant_base(params.target_path);
        let results = self.generator.generate(&image, &base, &self.writer)?;
        let images = self.upload(&results)?;

        let image_urls: Vec<String> = images.iter().map(|key| self.signer.sign(key)).collect();

        let mut fields = Map::new();
        fields.insert("name".into(), json!(params.auto_id));
        fields.insert("images".into(), json!(image_urls));
        self.records
            .update(&record_path(params.uid, params.auto_id), fields)?;

        tracing::info!(
            uid = params.uid,
            target = params.target_path,
            variants = images.len(),
            "generated variations"
        );

        Ok(GenerateResponse {
            message: "Generated variations successfully".to_string(),
            colors: self.colors(),
            images,
            image_urls,
        })
    }

    fn upload(&self, results: &[VariationResult]) -> Result<Vec<String>> {
        let content_type = self.writer.content_type();
        results
            .iter()
            .map(|r| {
                self.objects.put(&r.path, &r.bytes, content_type)?;
                Ok(r.path.clone())
            })
            .collect()
    }

    /// Deletes every stored object whose key starts with `target_path`.
    pub fn delete_variations(&self, request: &VariationRequest) -> Result<DeleteResponse> {
        let params = request.params()?;
        let keys = self.objects.list(params.target_path)?;
        for key in &keys {
            self.objects.delete(key)?;
        }
        tracing::info!(target = params.target_path, deleted = keys.len(), "deleted variations");

        Ok(DeleteResponse {
            message: format!("Directory {} deleted successfully.", params.target_path),
        })
    }

    /// Serves an object behind a signed URL.
    pub fn fetch_object(&self, key: &str, expires: Option<u64>, signature: Option<&str>) -> Result<StoredObject> {
        match (expires, signature) {
            (Some(expires), Some(signature)) if self.signer.verify(key, expires, signature) => {
                self.objects.get(key)
            }
            _ => Err(ServerError::InvalidSignature),
        }
    }

    /// Record stored for a collection, if any.
    pub fn record(&self, uid: &str, auto_id: &str) -> Result<Option<Value>> {
        self.records.get(&record_path(uid, auto_id))
    }
}
