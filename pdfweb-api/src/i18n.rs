//! Localized error messages
//!
//! Clients pick a language with the `lang` form field. Arabic is the
//! default, matching the audience the service was built for.

use crate::error::AppError;
use pdfweb::{ComposeError, MergeError, OfficeError, SkipReason, SkippedFile};

/// Language of user-facing messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    #[default]
    Ar,
    En,
    Tr,
}

impl Lang {
    /// Parse a form value such as `en`, `tr` or `en-US`; anything else is Arabic
    pub fn parse_lenient(value: &str) -> Self {
        let primary = value
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "en" => Lang::En,
            "tr" => Lang::Tr,
            _ => Lang::Ar,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Lang::Ar => "ar",
            Lang::En => "en",
            Lang::Tr => "tr",
        }
    }

    /// Render an error for the client
    pub fn message(self, err: &AppError) -> String {
        match err {
            AppError::Compose(e) => self.compose_message(e),
            AppError::Merge(e) => self.merge_message(e),
            AppError::Office(e) => self.office_message(e),
            AppError::Multipart(msg) => match self {
                Lang::Ar => format!("طلب غير صالح: {msg}"),
                Lang::En => format!("Invalid request: {msg}"),
                Lang::Tr => format!("Geçersiz istek: {msg}"),
            },
            AppError::PayloadTooLarge => match self {
                Lang::Ar => "حجم الملفات المرفوعة أكبر من الحد المسموح.".to_string(),
                Lang::En => "The upload is larger than the allowed limit.".to_string(),
                Lang::Tr => "Yükleme izin verilen boyutu aşıyor.".to_string(),
            },
            AppError::Task(msg) => self.server_error(msg),
        }
    }

    /// One line of the `details` list of a failed merge
    pub fn skipped(self, file: &SkippedFile) -> String {
        let name = &file.filename;
        match (&file.reason, self) {
            (SkipReason::NotPdf, Lang::Ar) => format!("{name}: ليس PDF"),
            (SkipReason::NotPdf, Lang::En) => format!("{name}: not a PDF"),
            (SkipReason::NotPdf, Lang::Tr) => format!("{name}: PDF değil"),
            (SkipReason::PasswordProtected, Lang::Ar) => format!("{name}: ملف محمي بكلمة مرور"),
            (SkipReason::PasswordProtected, Lang::En) => format!("{name}: password protected"),
            (SkipReason::PasswordProtected, Lang::Tr) => format!("{name}: parola korumalı dosya"),
            (SkipReason::Unreadable(e), Lang::Ar) => format!("{name}: خطأ القراءة ({e})"),
            (SkipReason::Unreadable(e), Lang::En) => format!("{name}: read error ({e})"),
            (SkipReason::Unreadable(e), Lang::Tr) => format!("{name}: okuma hatası ({e})"),
        }
    }

    fn compose_message(self, err: &ComposeError) -> String {
        match (err, self) {
            (ComposeError::NoImages, Lang::Ar) => "لم تُرسل أي صور.".to_string(),
            (ComposeError::NoImages, Lang::En) => "No images were submitted.".to_string(),
            (ComposeError::NoImages, Lang::Tr) => "Hiç görsel gönderilmedi.".to_string(),

            (ComposeError::TooManyImages { count, max }, Lang::Ar) => {
                format!("عدد الصور كبير ({count}). الحد الأقصى {max}.")
            }
            (ComposeError::TooManyImages { count, max }, Lang::En) => {
                format!("Too many images ({count}). The maximum is {max}.")
            }
            (ComposeError::TooManyImages { count, max }, Lang::Tr) => {
                format!("Çok fazla görsel ({count}). En fazla {max}.")
            }

            (ComposeError::NotAnImage { filename }, Lang::Ar) => {
                format!("الملف {filename} ليس صورة.")
            }
            (ComposeError::NotAnImage { filename }, Lang::En) => {
                format!("File {filename} is not an image.")
            }
            (ComposeError::NotAnImage { filename }, Lang::Tr) => {
                format!("{filename} dosyası bir görsel değil.")
            }

            (ComposeError::Decode { filename, source }, Lang::Ar) => {
                format!("فشل قراءة {filename}: {source}")
            }
            (ComposeError::Decode { filename, source }, Lang::En) => {
                format!("Failed to read {filename}: {source}")
            }
            (ComposeError::Decode { filename, source }, Lang::Tr) => {
                format!("{filename} okunamadı: {source}")
            }

            (ComposeError::Encode { filename, source }, Lang::Ar) => {
                format!("فشل ضغط {filename}: {source}")
            }
            (ComposeError::Encode { filename, source }, Lang::En) => {
                format!("Failed to encode {filename}: {source}")
            }
            (ComposeError::Encode { filename, source }, Lang::Tr) => {
                format!("{filename} kodlanamadı: {source}")
            }

            (ComposeError::Composition(e), Lang::Ar) => format!("فشل إنشاء ملف PDF: {e}"),
            (ComposeError::Composition(e), Lang::En) => format!("Failed to build the PDF: {e}"),
            (ComposeError::Composition(e), Lang::Tr) => format!("PDF oluşturulamadı: {e}"),

            (ComposeError::Archive(e), Lang::Ar) => format!("فشل إنشاء ملف ZIP: {e}"),
            (ComposeError::Archive(e), Lang::En) => {
                format!("Failed to build the ZIP archive: {e}")
            }
            (ComposeError::Archive(e), Lang::Tr) => format!("ZIP arşivi oluşturulamadı: {e}"),

            (ComposeError::Io(e), _) => self.server_error(e),
        }
    }

    fn merge_message(self, err: &MergeError) -> String {
        match (err, self) {
            (MergeError::NoFiles, Lang::Ar) => "لم تُرسل أي ملفات.".to_string(),
            (MergeError::NoFiles, Lang::En) => "No files were submitted.".to_string(),
            (MergeError::NoFiles, Lang::Tr) => "Hiç dosya gönderilmedi.".to_string(),

            (MergeError::NoValidPages { .. }, Lang::Ar) => {
                "لم يتم العثور على صفحات صالحة للدمج.".to_string()
            }
            (MergeError::NoValidPages { .. }, Lang::En) => {
                "No valid pages were found to merge.".to_string()
            }
            (MergeError::NoValidPages { .. }, Lang::Tr) => {
                "Birleştirilecek geçerli sayfa bulunamadı.".to_string()
            }

            (MergeError::Merge(msg), Lang::Ar) => format!("فشل الدمج: {msg}"),
            (MergeError::Merge(msg), Lang::En) => format!("Merge failed: {msg}"),
            (MergeError::Merge(msg), Lang::Tr) => format!("Birleştirme başarısız: {msg}"),

            (MergeError::Io(e), _) => self.server_error(e),
        }
    }

    fn office_message(self, err: &OfficeError) -> String {
        match (err, self) {
            (OfficeError::UnsupportedFile { .. }, Lang::Ar) => {
                "الرجاء رفع ملف Word/ODT صالح (docx/doc/odt/rtf).".to_string()
            }
            (OfficeError::UnsupportedFile { .. }, Lang::En) => {
                "Please upload a valid Word/ODT file (docx/doc/odt/rtf).".to_string()
            }
            (OfficeError::UnsupportedFile { .. }, Lang::Tr) => {
                "Lütfen geçerli bir Word/ODT dosyası yükleyin (docx/doc/odt/rtf).".to_string()
            }

            (OfficeError::ConverterMissing { path }, Lang::Ar) => {
                format!("لم يتم العثور على LibreOffice في: {}", path.display())
            }
            (OfficeError::ConverterMissing { path }, Lang::En) => {
                format!("LibreOffice was not found at: {}", path.display())
            }
            (OfficeError::ConverterMissing { path }, Lang::Tr) => {
                format!("LibreOffice bulunamadı: {}", path.display())
            }

            (OfficeError::ConversionFailed(msg), Lang::Ar) => format!("فشل التحويل: {msg}"),
            (OfficeError::ConversionFailed(msg), Lang::En) => format!("Conversion failed: {msg}"),
            (OfficeError::ConversionFailed(msg), Lang::Tr) => {
                format!("Dönüştürme başarısız: {msg}")
            }

            (OfficeError::Io(e), _) => self.server_error(e),
        }
    }

    fn server_error(self, detail: impl std::fmt::Display) -> String {
        match self {
            Lang::Ar => format!("خطأ في الخادم: {detail}"),
            Lang::En => format!("Server error: {detail}"),
            Lang::Tr => format!("Sunucu hatası: {detail}"),
        }
    }
}
