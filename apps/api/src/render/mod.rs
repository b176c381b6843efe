//! Document rendering. A `ResumeDocument` goes in, finished file bytes come
//! out. Two renderers share one trait: the paginated PDF renderer and the
//! flowing DOCX renderer. Callers pick a renderer from `OutputFormat` and
//! treat it uniformly after that.

pub mod docx;
pub mod layout;
pub mod pdf;

use thiserror::Error;

use crate::models::resume::{CandidateProfile, OutputFormat, ResumeDocument};
use crate::render::docx::FlowingRenderer;
use crate::render::pdf::PaginatedRenderer;

#[derive(Debug, Error)]
pub enum RenderError {
    /// A character the paginated renderer's text encoding cannot represent.
    /// `context` names the field it came from; the character is never
    /// silently dropped or substituted.
    #[error("unsupported character {ch:?} in {context}")]
    UnsupportedCharacter { ch: char, context: &'static str },

    #[error("PDF emission failed: {0}")]
    Pdf(String),

    #[error("DOCX emission failed: {0}")]
    Docx(String),
}

/// Renders a complete document to file bytes in one call. Rendering is pure
/// with respect to the document: same input, same layout decisions.
pub trait DocumentRenderer {
    fn render(&self, document: &ResumeDocument) -> Result<Vec<u8>, RenderError>;
}

/// Dispatches on the document's requested output format.
pub fn render_document(document: &ResumeDocument) -> Result<Vec<u8>, RenderError> {
    let renderer: &dyn DocumentRenderer = match document.options.output_format {
        OutputFormat::Paginated => &PaginatedRenderer,
        OutputFormat::Flowing => &FlowingRenderer,
    };
    renderer.render(document)
}

/// Download filename: the candidate's name as-is, then `_Resume`, then the
/// format's extension.
pub fn download_filename(profile: &CandidateProfile, format: OutputFormat) -> String {
    format!("{}_Resume.{}", profile.name, format.extension())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{RenderOptions, ResumeDocument, Section, SectionText};

    fn sample_document(format: OutputFormat) -> ResumeDocument {
        ResumeDocument {
            profile: CandidateProfile {
                name: "Jane Doe".to_string(),
                job_role: "Data Scientist".to_string(),
                education: "BSc CS".to_string(),
                skills: "Python, SQL".to_string(),
                experience: "2 years at Acme".to_string(),
                phone: "555-1234".to_string(),
                email: "jane@x.com".to_string(),
                linkedin: "in/jane".to_string(),
                address: "1 Main St".to_string(),
            },
            sections: Section::CANONICAL_ORDER
                .into_iter()
                .map(|section| SectionText {
                    section,
                    body: format!("Body for {}.", section.key()),
                })
                .collect(),
            options: RenderOptions {
                output_format: format,
                ..RenderOptions::default()
            },
        }
    }

    #[test]
    fn test_download_filename_uses_name_verbatim() {
        let profile = sample_document(OutputFormat::Paginated).profile;
        assert_eq!(
            download_filename(&profile, OutputFormat::Paginated),
            "Jane Doe_Resume.pdf"
        );
        assert_eq!(
            download_filename(&profile, OutputFormat::Flowing),
            "Jane Doe_Resume.docx"
        );
    }

    #[test]
    fn test_dispatch_produces_format_specific_bytes() {
        let pdf = render_document(&sample_document(OutputFormat::Paginated)).unwrap();
        assert!(pdf.starts_with(b"%PDF"));

        let docx = render_document(&sample_document(OutputFormat::Flowing)).unwrap();
        assert!(docx.starts_with(b"PK"));
    }
}
