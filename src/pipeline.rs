use std::{
    io::{self, Write as _},
    path::{Path, PathBuf},
};

use serde_json::Value;
use tempfile::{NamedTempFile, PersistError};
use thiserror::Error;
use tracing::info;

use crate::{
    advisory::{filter_by_fir, AdvisoryCollection, TransformError},
    config::SigmetConfig,
    fetch::{AdvisorySource, FetchError},
    map::MapsDocument,
};

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("failed to serialize map XML: {0}")]
    Serialize(#[source] io::Error),
    #[error("failed to write output file to {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to replace output file: {0}")]
    Persist(#[from] PersistError),
}

#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("could not form XML: {0}")]
    Transform(#[from] TransformError),
    #[error(transparent)]
    Write(#[from] WriteError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub path: PathBuf,
    pub features: usize,
    pub polygons: usize,
}

/// Filters the raw payload down to the configured FIR and builds the map document.
pub fn transform(
    payload: Value,
    config: &SigmetConfig,
) -> Result<(MapsDocument, usize), TransformError> {
    let collection = AdvisoryCollection::from_value(payload)?;
    let features = filter_by_fir(collection.features, &config.fir_id);
    info!("found {} SIGMETs for {}", features.len(), config.fir_id);

    let document = MapsDocument::from_features(config.map.clone(), &features)?;
    Ok((document, features.len()))
}

/// Writes next to the destination first and renames over it, so a failure
/// never leaves a truncated map behind.
pub fn write_document(document: &MapsDocument, path: &Path) -> Result<(), WriteError> {
    let xml = document.to_xml().map_err(WriteError::Serialize)?;
    let file_write = |source| WriteError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir).map_err(file_write)?;
    file.write_all(&xml).map_err(file_write)?;
    file.as_file().sync_all().map_err(file_write)?;
    file.persist(path)?;

    info!("wrote XML file to {}", path.display());
    Ok(())
}

pub struct Pipeline<'a> {
    config: &'a SigmetConfig,
    source: AdvisorySource,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a SigmetConfig, source: AdvisorySource) -> Self {
        Self { config, source }
    }

    /// Fetch, transform, write. Any failing stage ends the run.
    pub fn run(&self, maps_dir: &Path) -> Result<RunSummary, RunError> {
        let path = maps_dir.join(&self.config.filename);
        info!("running with output location {}", path.display());

        let payload = self.source.fetch()?;
        let (document, features) = transform(payload, self.config)?;
        write_document(&document, &path)?;

        Ok(RunSummary {
            path,
            features,
            polygons: document.infills.len(),
        })
    }
}
