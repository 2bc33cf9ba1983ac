//! Collecting multipart uploads into plain values

use crate::error::AppError;
use crate::i18n::Lang;
use axum::extract::Multipart;
use pdfweb::{LayoutSpec, PipelineConfig, SortOrder};
use std::collections::HashMap;

const OCTET_STREAM: &str = "application/octet-stream";

/// A file part of a multipart request
#[derive(Debug, Clone)]
pub struct FilePart {
    /// Form field the file was sent under
    pub field: String,
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// A fully buffered multipart request
#[derive(Debug, Default)]
pub struct UploadForm {
    /// Files in order of arrival
    pub files: Vec<FilePart>,
    /// Text fields; a repeated field keeps its last value
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            match field.file_name().map(str::to_string) {
                Some(filename) => {
                    let content_type = field.content_type().unwrap_or(OCTET_STREAM).to_string();
                    let data = field.bytes().await?.to_vec();
                    form.files.push(FilePart {
                        field: name,
                        filename,
                        content_type,
                        data,
                    });
                }
                None => {
                    let value = field.text().await?;
                    form.fields.insert(name, value);
                }
            }
        }

        Ok(form)
    }

    /// Files sent under `name` or its `name[]` variant, in order of arrival
    pub fn take_files(&mut self, name: &str) -> Vec<FilePart> {
        let array_name = format!("{name}[]");
        let (taken, rest): (Vec<FilePart>, Vec<FilePart>) = std::mem::take(&mut self.files)
            .into_iter()
            .partition(|part| part.field == name || part.field == array_name);
        self.files = rest;
        taken
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Checkbox-style flag: `1`, `true`, `on` or `yes`
    pub fn flag(&self, name: &str) -> bool {
        self.text(name).is_some_and(parse_flag)
    }

    pub fn lang(&self) -> Lang {
        self.text("lang").map(Lang::parse_lenient).unwrap_or_default()
    }

    pub fn order(&self) -> SortOrder {
        self.text("order")
            .map(SortOrder::parse_lenient)
            .unwrap_or_default()
    }

    /// Page layout from `style`, honoring the legacy `fit_a4` flag
    pub fn layout(&self, config: &PipelineConfig) -> LayoutSpec {
        let style = self
            .text("style")
            .map(|s| s.trim().to_ascii_lowercase().replace('-', "_"));
        if style.as_deref() == Some("a4_margins") || self.flag("fit_a4") {
            config.fixed_page()
        } else {
            LayoutSpec::FullBleed
        }
    }

    /// Requested output name, empty when not given
    pub fn outfile(&self) -> &str {
        self.text("outfile").unwrap_or_default()
    }
}

pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "on" | "yes"
    )
}
