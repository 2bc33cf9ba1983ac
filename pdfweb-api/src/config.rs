//! Server configuration read from the environment

use pdfweb::office::DEFAULT_SOFFICE;
use pdfweb::PipelineConfig;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_BIND: &str = "0.0.0.0:3000";
pub const DEFAULT_BODY_LIMIT_MB: usize = 200;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Everything the server needs at startup
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on (`PDFWEB_BIND`)
    pub bind: String,
    /// LibreOffice binary (`SOFFICE_PATH`)
    pub soffice: PathBuf,
    /// Maximum accepted request body in bytes (`PDFWEB_BODY_LIMIT_MB`)
    pub body_limit: usize,
    /// Composition settings (`PDFWEB_MAX_IMAGES`, `PDFWEB_JPEG_QUALITY`)
    pub pipeline: PipelineConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            soffice: PathBuf::from(DEFAULT_SOFFICE),
            body_limit: DEFAULT_BODY_LIMIT_MB * 1024 * 1024,
            pipeline: PipelineConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read the configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(bind) = lookup("PDFWEB_BIND") {
            config.bind = bind;
        }
        if let Some(soffice) = lookup("SOFFICE_PATH") {
            config.soffice = PathBuf::from(soffice);
        }
        if let Some(mb) = parse_var::<usize>(&lookup, "PDFWEB_BODY_LIMIT_MB")? {
            config.body_limit = mb * 1024 * 1024;
        }
        if let Some(max) = parse_var::<usize>(&lookup, "PDFWEB_MAX_IMAGES")? {
            config.pipeline = config.pipeline.with_max_images(max);
        }
        if let Some(quality) = parse_var::<u8>(&lookup, "PDFWEB_JPEG_QUALITY")? {
            config.pipeline = config.pipeline.with_jpeg_quality(quality);
        }

        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}
