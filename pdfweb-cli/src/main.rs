use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use image::ImageFormat;
use pdfweb::office::DEFAULT_SOFFICE;
use pdfweb::{
    merge_uploads, package, ComposeOptions, Composer, LayoutSpec, MergeError, OfficeConverter,
    PipelineConfig, SortOrder, UploadedImage, UploadedPdf,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const OCTET_STREAM: &str = "application/octet-stream";

#[derive(Parser)]
#[command(
    name = "pdfweb",
    about = "Turn images into PDFs, merge PDFs and convert office documents",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Combine images into a PDF, or a zip of single-page PDFs
    Images {
        /// Input image files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Page order
        #[arg(long, value_enum, default_value = "name")]
        order: OrderArg,

        /// Write one PDF per image into a zip archive
        #[arg(long)]
        per_file: bool,

        /// Page layout
        #[arg(long, value_enum, default_value = "full-bleed")]
        style: StyleArg,

        /// Re-encode JPEGs that could be embedded untouched
        #[arg(long)]
        compress: bool,

        /// JPEG quality for re-encoded images (1-100)
        #[arg(long, default_value_t = pdfweb::config::DEFAULT_JPEG_QUALITY)]
        quality: u8,
    },

    /// Merge PDFs in the given order
    Merge {
        /// Input PDF files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Convert a Word/ODT/RTF document with LibreOffice
    Word {
        /// Input document
        input: PathBuf,

        /// Output file path (defaults to the input name with a .pdf extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// LibreOffice binary
        #[arg(long, default_value = DEFAULT_SOFFICE)]
        soffice: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderArg {
    Name,
    Mtime,
    AsIs,
}

impl From<OrderArg> for SortOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Name => SortOrder::Name,
            OrderArg::Mtime => SortOrder::Mtime,
            OrderArg::AsIs => SortOrder::AsIs,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StyleArg {
    FullBleed,
    A4Margins,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Images {
            files,
            output,
            order,
            per_file,
            style,
            compress,
            quality,
        } => {
            let config = PipelineConfig::default().with_jpeg_quality(quality);
            let options = ComposeOptions {
                order: order.into(),
                per_file,
                layout: match style {
                    StyleArg::FullBleed => LayoutSpec::FullBleed,
                    StyleArg::A4Margins => config.fixed_page(),
                },
                compress,
            };

            let images = files
                .iter()
                .map(|path| read_image(path))
                .collect::<Result<Vec<_>>>()?;

            let composer = Composer::new(config);
            let composition = composer.compose(images, &options)?;
            let pages = composition.page_count();
            let download = package(composition, "")?;

            fs::write(&output, &download.data)
                .with_context(|| format!("Failed to write {}", output.display()))?;

            println!("Wrote {pages} page(s) to {}", output.display());
        }

        Commands::Merge { files, output } => {
            let uploads = files
                .iter()
                .map(|path| {
                    let data = fs::read(path)
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                    Ok(UploadedPdf::new(display_name(path), OCTET_STREAM, data))
                })
                .collect::<Result<Vec<_>>>()?;

            let outcome = match merge_uploads(uploads, SortOrder::AsIs) {
                Ok(outcome) => outcome,
                Err(MergeError::NoValidPages { skipped }) => {
                    for file in &skipped {
                        eprintln!("Skipped {file}");
                    }
                    bail!("No valid pages found to merge");
                }
                Err(e) => return Err(e.into()),
            };

            for file in &outcome.skipped {
                eprintln!("Skipped {file}");
            }

            fs::write(&output, &outcome.data)
                .with_context(|| format!("Failed to write {}", output.display()))?;

            println!(
                "Merged {} file(s), {} page(s) into {}",
                outcome.files_merged,
                outcome.pages,
                output.display()
            );
        }

        Commands::Word {
            input,
            output,
            soffice,
        } => {
            let data =
                fs::read(&input).with_context(|| format!("Failed to read {}", input.display()))?;
            let converter = OfficeConverter::new(soffice);
            let converted = converter.convert(&display_name(&input), &data)?;

            let output = output.unwrap_or_else(|| input.with_extension("pdf"));
            fs::write(&output, &converted.data)
                .with_context(|| format!("Failed to write {}", output.display()))?;

            println!("Converted {} to {}", input.display(), output.display());
        }
    }

    Ok(())
}

/// Load an image file, guessing its media type from the extension
fn read_image(path: &Path) -> Result<UploadedImage> {
    let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let content_type = ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or(OCTET_STREAM);

    let mut upload = UploadedImage::new(display_name(path), content_type, data);
    if let Ok(modified) = fs::metadata(path).and_then(|meta| meta.modified()) {
        upload = upload.with_modified(modified);
    }

    debug!(path = %path.display(), content_type, "Loaded image");
    Ok(upload)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
