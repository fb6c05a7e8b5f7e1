//! Format registry for format discovery and selection
//!
//! This module provides a centralized registry for all available formats.
//! Formats can be registered and retrieved by name.

use crate::error::InputError;
use crate::format::Format;
use crate::ir::nodes::Document;
use std::collections::HashMap;

/// Name of the format that reads source text.
pub const SOURCE_FORMAT: &str = "markup";

/// Registry of document formats
///
/// Provides a centralized registry for all available formats.
/// Formats can be registered and retrieved by name.
///
/// # Examples
///
/// ```ignore
/// let registry = FormatRegistry::with_defaults();
///
/// let doc = registry.parse("# Title", "markup")?;
/// let pdf = registry.renderer("pdf")?;
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format
    ///
    /// If a format with the same name already exists, it will be replaced.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    /// Get a format by name
    pub fn get(&self, name: &str) -> Result<&dyn Format, InputError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| InputError::UnsupportedFormat(name.to_string()))
    }

    /// Get a format that can render artifacts
    ///
    /// Formats that only parse are reported as unsupported, the same as unknown names.
    pub fn renderer(&self, name: &str) -> Result<&dyn Format, InputError> {
        match self.get(name) {
            Ok(format) if format.supports_rendering() => Ok(format),
            _ => Err(InputError::UnsupportedFormat(name.to_string())),
        }
    }

    /// Check if a format exists
    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// List the names of formats that can render artifacts (sorted)
    pub fn list_renderers(&self) -> Vec<String> {
        let mut names: Vec<_> = self
            .formats
            .values()
            .filter(|f| f.supports_rendering())
            .map(|f| f.name().to_string())
            .collect();
        names.sort();
        names
    }

    /// Detect format from filename based on file extension
    ///
    /// Returns the format name if a matching extension is found, or None otherwise.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let registry = FormatRegistry::default();
    /// assert_eq!(registry.detect_format_from_filename("doc.pdf"), Some("pdf".to_string()));
    /// assert_eq!(registry.detect_format_from_filename("doc.unknown"), None);
    /// ```
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?;

        self.formats
            .values()
            .find(|format| format.file_extensions().contains(&extension))
            .map(|format| format.name().to_string())
    }

    /// MIME type of artifacts rendered by the named format
    pub fn mime_type(&self, name: &str) -> Result<&str, InputError> {
        self.get(name).map(|f| f.mime_type())
    }

    /// Parse source text using the specified format
    pub fn parse(&self, source: &str, format: &str) -> Result<Document, InputError> {
        let fmt = self.get(format)?;
        if !fmt.supports_parsing() {
            return Err(InputError::NotSupported(format!(
                "Format '{format}' does not support parsing"
            )));
        }
        fmt.parse(source)
    }

    /// Create a registry with default formats
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(crate::formats::markup::MarkupFormat);
        registry.register(crate::formats::docx::DocxFormat);
        registry.register(crate::formats::pdf::PdfFormat);

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;
    use crate::format::RenderOptions;
    use crate::ir::nodes::Block;
    use crate::sink::{ArtifactSink, SinkReceipt};
    use async_trait::async_trait;

    // Test format
    struct TestFormat;

    #[async_trait]
    impl Format for TestFormat {
        fn name(&self) -> &str {
            "test"
        }
        fn description(&self) -> &str {
            "Test format"
        }
        fn file_extensions(&self) -> &[&str] {
            &["tst"]
        }
        fn supports_parsing(&self) -> bool {
            true
        }
        fn supports_rendering(&self) -> bool {
            true
        }
        fn parse(&self, _source: &str) -> Result<Document, InputError> {
            Ok(Document::new(vec![Block::paragraph("test", false)]))
        }
        async fn render(
            &self,
            _doc: &Document,
            _options: &RenderOptions,
            sink: ArtifactSink,
        ) -> Result<SinkReceipt, RenderError> {
            sink.write(b"test output".to_vec()).await?;
            sink.finish().await
        }
    }

    #[test]
    fn test_registry_creation() {
        let registry = FormatRegistry::new();
        assert_eq!(registry.formats.len(), 0);
    }

    #[test]
    fn test_registry_register() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormat);

        assert!(registry.has("test"));
        assert_eq!(registry.list_formats(), vec!["test"]);
    }

    #[test]
    fn test_registry_get() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormat);

        let format = registry.get("test");
        assert!(format.is_ok());
        assert_eq!(format.unwrap().name(), "test");
    }

    #[test]
    fn test_registry_get_nonexistent() {
        let registry = FormatRegistry::new();
        match registry.get("nonexistent") {
            Err(InputError::UnsupportedFormat(name)) => assert_eq!(name, "nonexistent"),
            _ => panic!("Expected UnsupportedFormat error"),
        }
    }

    #[test]
    fn test_registry_parse() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormat);

        let doc = registry.parse("input", "test").unwrap();
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_registry_parse_not_supported() {
        let registry = FormatRegistry::with_defaults();
        let result = registry.parse("input", "pdf");
        assert!(matches!(result, Err(InputError::NotSupported(_))));
    }

    #[test]
    fn test_renderer_rejects_parse_only_formats() {
        let registry = FormatRegistry::with_defaults();
        assert!(registry.renderer("pdf").is_ok());
        assert!(registry.renderer("docx").is_ok());
        match registry.renderer("markup") {
            Err(InputError::UnsupportedFormat(name)) => assert_eq!(name, "markup"),
            _ => panic!("Expected UnsupportedFormat error"),
        }
        assert!(registry.renderer("txt").is_err());
    }

    #[tokio::test]
    async fn test_registered_format_renders() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormat);

        let doc = registry.parse("input", "test").unwrap();
        let receipt = registry
            .renderer("test")
            .unwrap()
            .render(&doc, &RenderOptions::default(), ArtifactSink::in_memory())
            .await
            .unwrap();
        assert_eq!(receipt.bytes_written, 11);
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = FormatRegistry::with_defaults();
        assert_eq!(registry.list_formats(), vec!["docx", "markup", "pdf"]);
        assert_eq!(registry.list_renderers(), vec!["docx", "pdf"]);
    }

    #[test]
    fn test_registry_default_trait() {
        let registry = FormatRegistry::default();
        assert!(registry.has("markup"));
        assert!(registry.has("docx"));
        assert!(registry.has("pdf"));
    }

    #[test]
    fn test_registry_replace_format() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormat);
        registry.register(TestFormat); // Replace

        assert_eq!(registry.list_formats().len(), 1);
    }

    #[test]
    fn test_mime_types() {
        let registry = FormatRegistry::with_defaults();
        assert_eq!(registry.mime_type("pdf").unwrap(), "application/pdf");
        assert_eq!(
            registry.mime_type("docx").unwrap(),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        assert!(registry.mime_type("txt").is_err());
    }

    #[test]
    fn test_detect_format_from_filename() {
        let registry = FormatRegistry::with_defaults();

        assert_eq!(
            registry.detect_format_from_filename("report.pdf"),
            Some("pdf".to_string())
        );
        assert_eq!(
            registry.detect_format_from_filename("/path/to/letter.docx"),
            Some("docx".to_string())
        );
        assert_eq!(
            registry.detect_format_from_filename("notes.md"),
            Some("markup".to_string())
        );

        // Test unknown extension
        assert_eq!(registry.detect_format_from_filename("doc.unknown"), None);

        // Test no extension
        assert_eq!(registry.detect_format_from_filename("doc"), None);
    }

    #[test]
    fn test_detect_format_case_sensitive() {
        let registry = FormatRegistry::with_defaults();
        assert_eq!(registry.detect_format_from_filename("REPORT.PDF"), None);
    }
}
