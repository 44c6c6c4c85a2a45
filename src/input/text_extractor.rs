//! Text extraction from various file formats

use crate::error::{Result, ResumeEvaluatorError};
use log::{debug, warn};
use lopdf::Document;
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::LazyLock;
use tokio::fs;

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid HTML tag regex"));

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// PDF text extraction. Unreadable or image-only documents yield reduced or
/// empty text instead of an error.
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await.map_err(ResumeEvaluatorError::Io)?;
        Ok(Self::extract_from_bytes(&bytes, path))
    }
}

impl PdfExtractor {
    /// Whole-document extraction first; when that fails the document is
    /// re-read page by page so one broken page costs only its own text.
    pub fn extract_from_bytes(bytes: &[u8], path: &Path) -> String {
        // pdf-extract panics on some malformed font tables
        let outcome = panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes));

        match outcome {
            Ok(Ok(text)) => {
                debug!("Extracted {} characters from {}", text.len(), path.display());
                return text;
            }
            Ok(Err(e)) => {
                warn!(
                    "{}",
                    ResumeEvaluatorError::PdfExtraction(format!("'{}': {}", path.display(), e))
                );
            }
            Err(_) => {
                warn!(
                    "{}",
                    ResumeEvaluatorError::PdfExtraction(format!(
                        "'{}': extractor aborted",
                        path.display()
                    ))
                );
            }
        }

        Self::extract_pages(bytes, path).join("\n")
    }

    /// Text of every page in page order. A page that cannot be decoded
    /// yields an empty string; an unparseable document yields no pages.
    pub fn extract_pages(bytes: &[u8], path: &Path) -> Vec<String> {
        let document = match Document::load_mem(bytes) {
            Ok(document) => document,
            Err(e) => {
                warn!(
                    "{}",
                    ResumeEvaluatorError::PdfExtraction(format!("'{}': {}", path.display(), e))
                );
                return Vec::new();
            }
        };

        let pages: Vec<String> = document
            .get_pages()
            .into_keys()
            .map(|page_number| {
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                    document.extract_text(&[page_number])
                }));
                match outcome {
                    Ok(Ok(text)) => text,
                    Ok(Err(e)) => {
                        warn!("Skipping page {} of {}: {}", page_number, path.display(), e);
                        String::new()
                    }
                    Err(_) => {
                        warn!(
                            "Skipping page {} of {}: extractor aborted",
                            page_number,
                            path.display()
                        );
                        String::new()
                    }
                }
            })
            .collect();

        debug!("Extracted {} pages from {}", pages.len(), path.display());
        pages
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path)
            .await
            .map_err(ResumeEvaluatorError::Io)?;
        Ok(content)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path)
            .await
            .map_err(ResumeEvaluatorError::Io)?;
        Ok(Self::markdown_to_text(&markdown_content))
    }
}

impl MarkdownExtractor {
    pub fn markdown_to_text(markdown: &str) -> String {
        let parser = Parser::new(markdown);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        Self::html_to_text(&html_output)
    }

    fn html_to_text(html: &str) -> String {
        let text = html
            .replace("<br>", "\n")
            .replace("</p>", "\n\n")
            .replace("</li>", "\n");

        let clean_text = HTML_TAG.replace_all(&text, "");
        let clean_text = clean_text
            .replace("&nbsp;", " ")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&amp;", "&");

        clean_text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    #[test]
    fn test_markdown_is_flattened() {
        let text = MarkdownExtractor::markdown_to_text("## Skills\n\n- **Rust** & C++\n- Python\n");
        assert!(text.contains("Skills"));
        assert!(text.contains("Rust & C++"));
        assert!(text.contains("Python"));
        assert!(!text.contains("**"));
        assert!(!text.contains("##"));
        assert!(!text.contains('<'));
    }

    #[test]
    fn test_garbage_pdf_degrades_to_empty_text() {
        let text =
            PdfExtractor::extract_from_bytes(b"definitely not a pdf", Path::new("broken.pdf"));
        assert!(text.is_empty());
        let pages = PdfExtractor::extract_pages(b"definitely not a pdf", Path::new("broken.pdf"));
        assert!(pages.is_empty());
    }

    fn text_page(text: &str) -> Vec<Operation> {
        vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![72.into(), 720.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ]
    }

    /// Three pages; the middle one selects a font without naming it.
    fn pdf_with_broken_middle_page() -> Vec<u8> {
        let mut doc = lopdf::Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let broken = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![]),
            Operation::new("Tj", vec![Object::string_literal("Lost")]),
            Operation::new("ET", vec![]),
        ];
        let contents = [text_page("Alpha Rust"), broken, text_page("Gamma Python")];

        let mut kids: Vec<Object> = Vec::new();
        for operations in contents {
            let stream = Stream::new(dictionary! {}, Content { operations }.encode().unwrap());
            let content_id = doc.add_object(stream);
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => 3,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_broken_page_loses_only_its_own_text() {
        let bytes = pdf_with_broken_middle_page();
        let pages = PdfExtractor::extract_pages(&bytes, Path::new("resume.pdf"));

        assert_eq!(pages.len(), 3);
        assert!(pages[0].contains("Alpha Rust"));
        assert!(pages[1].is_empty());
        assert!(pages[2].contains("Gamma Python"));

        let text = PdfExtractor::extract_from_bytes(&bytes, Path::new("resume.pdf"));
        assert!(text.contains("Alpha Rust"));
        assert!(text.contains("Gamma Python"));
    }
}
