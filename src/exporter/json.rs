// file: src/exporter/json.rs
// description: json export utilities for LanceDB data

use crate::database::client::LanceDbClient;
use crate::error::Result;
use crate::models::Document;
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_dir: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct ExportedDocument {
    #[serde(flatten)]
    pub document: Document,
}

#[derive(Debug, Serialize)]
pub struct ExportManifest {
    pub exported_at: String,
    pub total_documents: usize,
    pub files: Vec<String>,
}

impl JsonExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub async fn export_all(
        &self,
        _client: &LanceDbClient,
        _pretty: bool,
    ) -> Result<ExportManifest> {
        info!("Starting JSON export to {:?}", self.output_dir);

        // For now, return empty manifest
        // TODO: Implement LanceDB export once we have query functionality
        let manifest = ExportManifest {
            exported_at: Utc::now().to_rfc3339(),
            total_documents: 0,
            files: vec![],
        };

        info!(
            "Export complete: {} documents exported",
            manifest.total_documents
        );
        Ok(manifest)
    }

    pub async fn export_single(
        &self,
        _client: &LanceDbClient,
        _document_hash: &str,
        _pretty: bool,
    ) -> Result<()> {
        info!("Exporting single document");

        // TODO: Implement single document export
        Ok(())
    }

    pub async fn export_filtered(
        &self,
        _client: &LanceDbClient,
        _filter: &str,
        _pretty: bool,
    ) -> Result<usize> {
        info!("Exporting filtered documents");

        // TODO: Implement filtered export
        Ok(0)
    }
}
