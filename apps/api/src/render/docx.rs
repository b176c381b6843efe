//! Flowing DOCX emission. No manual pagination: the document is a flat
//! sequence of flow blocks (headings, paragraphs, list items) and the word
//! processor owns page breaks. Mirrors the paginated renderer's split between
//! a pure block-building stage and the byte-emission stage.

use docx_rs::{AlignmentType, Docx, Paragraph, Run};

use crate::models::resume::{ResumeDocument, Section};
use crate::render::{DocumentRenderer, RenderError};

// Run sizes are in half-points.
const NAME_SIZE: usize = 56;
const HEADING_SIZE: usize = 30;
const BODY_SIZE: usize = 22;

/// One block of flowing content, in document order.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowBlock {
    /// Level 0 is the document title; level 1 a section heading.
    Heading { level: u8, text: String },
    Paragraph(String),
    ListItem(String),
}

/// Comma-separated single-line bodies in the skills and experience slots are
/// enumerations, not prose; they flow as one list item per element. A period
/// or a newline marks the body as prose and it stays a paragraph.
fn is_list_like(section: Section, body: &str) -> bool {
    matches!(section, Section::Skills | Section::Experience)
        && body.contains(',')
        && !body.contains('.')
        && !body.contains('\n')
}

/// Builds the flat block sequence: title header, contact line, then each
/// canonical section as a heading followed by its body.
pub fn build_flow(document: &ResumeDocument) -> Vec<FlowBlock> {
    let profile = &document.profile;
    let mut blocks = vec![
        FlowBlock::Heading {
            level: 0,
            text: profile.name.to_uppercase(),
        },
        FlowBlock::Paragraph(profile.job_role.to_uppercase()),
        FlowBlock::Paragraph(format!(
            "Phone: {} | Email: {} | LinkedIn: {} | Address: {}",
            profile.phone, profile.email, profile.linkedin, profile.address
        )),
    ];

    for (section, body) in document.ordered_sections() {
        blocks.push(FlowBlock::Heading {
            level: 1,
            text: section.title().to_string(),
        });
        if is_list_like(section, body) {
            for item in body.split(',') {
                let item = item.trim();
                if !item.is_empty() {
                    blocks.push(FlowBlock::ListItem(item.to_string()));
                }
            }
        } else {
            blocks.push(FlowBlock::Paragraph(body.to_string()));
        }
    }

    blocks
}

pub struct FlowingRenderer;

impl DocumentRenderer for FlowingRenderer {
    fn render(&self, document: &ResumeDocument) -> Result<Vec<u8>, RenderError> {
        let mut docx = Docx::new();

        for block in build_flow(document) {
            let paragraph = match block {
                FlowBlock::Heading { level: 0, text } => Paragraph::new()
                    .align(AlignmentType::Center)
                    .add_run(Run::new().add_text(text).bold().size(NAME_SIZE)),
                FlowBlock::Heading { text, .. } => Paragraph::new()
                    .add_run(Run::new().add_text(text).bold().size(HEADING_SIZE)),
                FlowBlock::Paragraph(text) => {
                    Paragraph::new().add_run(Run::new().add_text(text).size(BODY_SIZE))
                }
                FlowBlock::ListItem(text) => Paragraph::new()
                    .add_run(Run::new().add_text(format!("• {text}")).size(BODY_SIZE)),
            };
            docx = docx.add_paragraph(paragraph);
        }

        let mut cursor = std::io::Cursor::new(Vec::new());
        docx.build()
            .pack(&mut cursor)
            .map_err(|e| RenderError::Docx(e.to_string()))?;
        Ok(cursor.into_inner())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
