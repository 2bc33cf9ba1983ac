//! Serialization of composed output into a downloadable file

use crate::compose::{Composition, SinglePage};
use crate::error::Result;
use std::collections::HashSet;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const DEFAULT_OUTFILE: &str = "images.pdf";
pub const ARCHIVE_NAME: &str = "images_pdf.zip";
pub const PDF_MEDIA_TYPE: &str = "application/pdf";
pub const ZIP_MEDIA_TYPE: &str = "application/zip";

/// A finished download
#[derive(Debug, Clone)]
pub struct Package {
    pub filename: String,
    pub media_type: &'static str,
    pub data: Vec<u8>,
}

impl Package {
    pub fn pdf(filename: String, data: Vec<u8>) -> Self {
        Self {
            filename,
            media_type: PDF_MEDIA_TYPE,
            data,
        }
    }

    /// Value for the `Content-Disposition` header
    pub fn content_disposition(&self) -> String {
        content_disposition(&self.filename)
    }
}

/// Serialize a composition.
///
/// Merged documents are named after `outfile`; per-file output is always
/// delivered as [`ARCHIVE_NAME`].
pub fn package(composition: Composition, outfile: &str) -> Result<Package> {
    match composition {
        Composition::Merged(mut doc) => {
            let mut data = Vec::new();
            doc.write(&mut data)?;
            Ok(Package::pdf(pdf_filename(outfile, DEFAULT_OUTFILE), data))
        }
        Composition::PerFile(pages) => Ok(Package {
            filename: ARCHIVE_NAME.to_string(),
            media_type: ZIP_MEDIA_TYPE,
            data: write_archive(&pages)?,
        }),
    }
}

/// Zip single-page documents with deflate, keeping their order.
///
/// Entries sharing a name get a numeric suffix (`scan.pdf`, `scan-2.pdf`).
pub fn write_archive(pages: &[SinglePage]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut used = HashSet::new();

    for page in pages {
        let name = unique_name(&page.filename, &mut used);
        zip.start_file(name, options)?;
        zip.write_all(&page.data)?;
    }

    Ok(zip.finish()?.into_inner())
}

fn unique_name(filename: &str, used: &mut HashSet<String>) -> String {
    if used.insert(filename.to_string()) {
        return filename.to_string();
    }

    let (stem, ext) = match filename.rsplit_once('.') {
        Some((stem, ext)) => (stem, format!(".{ext}")),
        None => (filename, String::new()),
    };
    let mut n = 2;
    loop {
        let candidate = format!("{stem}-{n}{ext}");
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

/// Requested output name with a `.pdf` extension; blank names use `default`
pub fn pdf_filename(requested: &str, default: &str) -> String {
    let name = crate::upload::base_name(requested);
    let name = if name.is_empty() { default } else { name };
    if name.to_lowercase().ends_with(".pdf") {
        name.to_string()
    } else {
        format!("{name}.pdf")
    }
}

/// Attachment disposition carrying an ASCII fallback and the UTF-8 name
pub fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| match c {
            ' '..='~' if c != '"' && c != '\\' => c,
            _ => '_',
        })
        .collect();

    if fallback == filename {
        format!("attachment; filename=\"{filename}\"")
    } else {
        format!(
            "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
            percent_encode(filename)
        )
    }
}

fn percent_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len() * 3);
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
