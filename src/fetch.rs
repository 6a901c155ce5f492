use std::{io, path::PathBuf};

use reqwest::blocking::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to fetch SIGMETs from API: {0}")]
    Request(#[from] reqwest::Error),
    #[error("failed to read SIGMETs file: {0}")]
    FileRead(#[from] io::Error),
    #[error("failed to deserialize SIGMETs: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// Where the raw ISIGMET GeoJSON comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdvisorySource {
    Url(String),
    File(PathBuf),
}

impl AdvisorySource {
    pub fn fetch(&self) -> Result<Value, FetchError> {
        let body = match self {
            AdvisorySource::Url(url) => fetch_url(url)?,
            AdvisorySource::File(path) => fs_err::read(path)?,
        };
        let payload = serde_json::from_slice(&body)?;
        info!("fetched JSON from {self}");
        Ok(payload)
    }
}

impl std::fmt::Display for AdvisorySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdvisorySource::Url(url) => f.write_str(url),
            AdvisorySource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

fn fetch_url(url: &str) -> Result<Vec<u8>, reqwest::Error> {
    let client = Client::builder().user_agent(USER_AGENT).build()?;
    let response = client.get(url).send()?;
    debug!(url, status = %response.status(), "fetch_body");
    Ok(response.error_for_status()?.bytes()?.to_vec())
}
