//! Paginated PDF emission. Consumes the positioned `PageOp` stream from the
//! layout stage and draws it with printpdf's builtin Helvetica fonts. All
//! layout decisions (wrapping, page breaks, keep-together) happen upstream;
//! this stage only translates coordinates and paints.

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rect,
    Rgb,
};

use crate::models::resume::ResumeDocument;
use crate::render::layout::{self, PageOp, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use crate::render::{DocumentRenderer, RenderError};

const RULE_THICKNESS_PT: f32 = 0.6;

pub struct PaginatedRenderer;

impl DocumentRenderer for PaginatedRenderer {
    fn render(&self, document: &ResumeDocument) -> Result<Vec<u8>, RenderError> {
        let pages = layout::layout_pages(document)?;

        let (doc, first_page, first_layer) = PdfDocument::new(
            format!("{} Resume", document.profile.name),
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "content",
        );
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;

        let (bg_r, bg_g, bg_b) = document.options.background_color.rgb();
        let background = Color::Rgb(Rgb::new(
            f32::from(bg_r) / 255.0,
            f32::from(bg_g) / 255.0,
            f32::from(bg_b) / 255.0,
            None,
        ));

        for (index, page) in pages.iter().enumerate() {
            let layer = if index == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (page_idx, layer_idx) =
                    doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "content");
                doc.get_page(page_idx).get_layer(layer_idx)
            };
            emit_page(&layer, &regular, &bold, &background, &page.ops);
        }

        doc.save_to_bytes()
            .map_err(|e| RenderError::Pdf(e.to_string()))
    }
}

fn emit_page(
    layer: &PdfLayerReference,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
    background: &Color,
    ops: &[PageOp],
) {
    // Full-bleed background fill goes under everything else on the page.
    layer.set_fill_color(background.clone());
    layer.add_rect(
        Rect::new(Mm(0.0), Mm(0.0), Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM))
            .with_mode(PaintMode::Fill),
    );

    layer.set_fill_color(Color::Rgb(Rgb::new(0.1, 0.1, 0.1, None)));
    layer.set_outline_color(Color::Rgb(Rgb::new(0.6, 0.6, 0.6, None)));
    layer.set_outline_thickness(RULE_THICKNESS_PT);

    for op in ops {
        match op {
            PageOp::Text {
                x_mm,
                y_mm,
                size_pt,
                bold: is_bold,
                content,
            } => {
                // Layout measures y from the top; PDF's origin is bottom-left.
                let font = if *is_bold { bold } else { regular };
                layer.use_text(
                    content.clone(),
                    *size_pt,
                    Mm(*x_mm),
                    Mm(PAGE_HEIGHT_MM - y_mm),
                    font,
                );
            }
            PageOp::Rule { y_mm, x1_mm, x2_mm } => {
                let y = PAGE_HEIGHT_MM - y_mm;
                layer.add_line(Line {
                    points: vec![
                        (Point::new(Mm(*x1_mm), Mm(y)), false),
                        (Point::new(Mm(*x2_mm), Mm(y)), false),
                    ],
                    is_closed: false,
                });
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{
        BackgroundColor, CandidateProfile, RenderOptions, Section, SectionText,
    };
    use crate::render::RenderError;

    fn sample_document() -> ResumeDocument {
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
            options: RenderOptions::default(),
        }
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let bytes = PaginatedRenderer.render(&sample_document()).unwrap();
        assert!(bytes.starts_with(b"%PDF"), "missing PDF header");
        assert!(bytes.len() > 500);
    }

    #[test]
    fn test_every_background_color_renders() {
        for color in [
            BackgroundColor::White,
            BackgroundColor::LightGrey,
            BackgroundColor::Blue,
        ] {
            let mut document = sample_document();
            document.options.background_color = color;
            let bytes = PaginatedRenderer.render(&document).unwrap();
            assert!(bytes.starts_with(b"%PDF"), "{color:?} render failed");
        }
    }

    #[test]
    fn test_multi_page_document_renders() {
        let mut document = sample_document();
        document.sections[2].body = "Delivered measurable results across teams. ".repeat(200);
        let bytes = PaginatedRenderer.render(&document).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_unsupported_character_fails_before_emission() {
        let mut document = sample_document();
        document.profile.email = "jane→x.com".to_string();
        let err = PaginatedRenderer.render(&document).unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedCharacter { .. }));
    }
}
