mod text;

#[cfg(feature = "pdf")]
mod pdf;

pub use text::TextLoader;

#[cfg(feature = "pdf")]
pub use pdf::PdfLoader;

use std::path::Path;
use std::pin::Pin;

use crate::error::DocumentError;
use crate::types::Document;

pub trait DocumentLoader: Send + Sync {
    fn load(
        &self,
        path: &Path,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Document, DocumentError>> + Send + '_>>;

    fn supported_extensions(&self) -> &[&str];
}

/// Pick a loader by file extension.
///
/// # Errors
///
/// Returns [`DocumentError::UnsupportedFormat`] for extensions no loader
/// claims (and for `pdf` when the `pdf` feature is off).
pub fn loader_for(path: &Path) -> Result<Box<dyn DocumentLoader>, DocumentError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "txt" | "md" | "markdown" => Ok(Box::new(TextLoader::default())),
        #[cfg(feature = "pdf")]
        "pdf" => Ok(Box::new(PdfLoader::default())),
        _ => Err(DocumentError::UnsupportedFormat(ext)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_extensions_resolve() {
        for name in ["a.txt", "b.md", "c.markdown", "d.TXT"] {
            assert!(loader_for(Path::new(name)).is_ok(), "{name}");
        }
    }

    #[test]
    fn unknown_extension_rejected() {
        let result = loader_for(Path::new("archive.tar.gz"));
        assert!(matches!(result, Err(DocumentError::UnsupportedFormat(_))));
    }

    #[test]
    fn missing_extension_rejected() {
        assert!(matches!(
            loader_for(Path::new("README")),
            Err(DocumentError::UnsupportedFormat(_))
        ));
    }

    #[cfg(feature = "pdf")]
    #[test]
    fn pdf_extension_resolves() {
        assert!(loader_for(Path::new("paper.pdf")).is_ok());
    }
}
