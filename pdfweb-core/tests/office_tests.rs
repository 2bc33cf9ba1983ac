//! Office conversion against a stand-in converter script

#![cfg(unix)]

use pdfweb::{OfficeConverter, OfficeError};
use std::os::unix::fs::PermissionsExt;
use tempfile::TempDir;

const FAKE_SOFFICE: &str = r#"#!/bin/sh
outdir=""
while [ $# -gt 1 ]; do
  if [ "$1" = "--outdir" ]; then outdir="$2"; shift; fi
  shift
done
name=$(basename "$1")
stem="${name%.*}"
printf '%%PDF-1.4 converted' > "$outdir/$stem.pdf"
"#;

const FAILING_SOFFICE: &str = "#!/bin/sh\necho 'source file could not be loaded' >&2\nexit 1\n";

fn install(dir: &TempDir, name: &str, script: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[test]
fn test_converts_with_external_binary() {
    let dir = TempDir::new().unwrap();
    let converter = OfficeConverter::new(install(&dir, "soffice", FAKE_SOFFICE));

    let doc = converter.convert("Quarterly Report.docx", b"PK fake docx").unwrap();
    assert_eq!(doc.stem, "Quarterly Report");
    assert_eq!(doc.default_filename(), "Quarterly Report.pdf");
    assert_eq!(doc.data, b"%PDF-1.4 converted");

    let err = OfficeConverter::new(install(&dir, "broken", FAILING_SOFFICE))
        .convert("letter.odt", b"data")
        .unwrap_err();
    match err {
        OfficeError::ConversionFailed(message) => {
            assert_eq!(message, "source file could not be loaded")
        }
        other => panic!("unexpected error: {other}"),
    }
}
