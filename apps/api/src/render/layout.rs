//! Paginated layout engine — positions every page element before any PDF
//! byte is written.
//!
//! Character widths are in em units (relative to font size). Static tables
//! are an intentional approximation: they catch real layout decisions (where
//! a body wraps, when a page breaks) while tolerating ±1–2% of line width.
//!
//! The layout pass is pure: `ResumeDocument` in, positioned `PageOp`s out.
//! Emission (`pdf.rs`) turns the ops into bytes. Keeping the stages separate
//! makes the page-break rules testable without decoding PDF content streams.

use crate::models::resume::ResumeDocument;
use crate::render::RenderError;

// ────────────────────────────────────────────────────────────────────────────
// Page geometry (A4 portrait, 15 mm margins)
// ────────────────────────────────────────────────────────────────────────────

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_MM: f32 = 15.0;

const PT_TO_MM: f32 = 0.352_778;
/// Baseline-to-baseline distance as a multiple of font size.
const LINE_FACTOR: f32 = 1.45;

const NAME_SIZE_PT: f32 = 22.0;
const ROLE_SIZE_PT: f32 = 13.0;
const CONTACT_SIZE_PT: f32 = 10.0;
const TITLE_SIZE_PT: f32 = 12.0;
const BODY_SIZE_PT: f32 = 11.0;

/// Vertical gap between a section title's rule and the first body line.
const RULE_GAP_MM: f32 = 2.5;
/// Vertical gap after a section's last body line.
const SECTION_GAP_MM: f32 = 4.0;
/// Gap between the contact banner and the first section.
const HEADER_GAP_MM: f32 = 6.0;

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for Helvetica, in em units at 1em.
///
/// `widths[i]` = width of ASCII character `(i + 32)`, covering 0x20 (space)
/// through 0x7E (~). Latin-1 characters above 0x7E fall back to
/// `average_char_width`.
pub struct FontMetricTable {
    widths: [f32; 95],
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }

    /// Rendered width in millimetres at the given font size.
    pub fn width_mm(&self, s: &str, size_pt: f32) -> f32 {
        self.measure_str(s) * size_pt * PT_TO_MM
    }
}

/// Helvetica widths from the standard AFM metrics (per-mille / 1000).
static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.537,
    space_width: 0.278,
};

pub fn helvetica_metrics() -> &'static FontMetricTable {
    &HELVETICA_TABLE
}

// ────────────────────────────────────────────────────────────────────────────
// Word wrap
// ────────────────────────────────────────────────────────────────────────────

/// Greedy word-wrap at `max_width_mm`. Explicit newlines in the input start
/// fresh lines; blank input yields no lines. A single word wider than the
/// line is emitted on its own line rather than truncated.
pub fn wrap_text(text: &str, size_pt: f32, max_width_mm: f32) -> Vec<String> {
    let metrics = helvetica_metrics();
    let mut lines = Vec::new();

    for raw_line in text.lines() {
        let words: Vec<&str> = raw_line.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }

        let mut current = String::new();
        for word in words {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if !current.is_empty() && metrics.width_mm(&candidate, size_pt) > max_width_mm {
                lines.push(current);
                current = word.to_string();
            } else {
                current = candidate;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

// ────────────────────────────────────────────────────────────────────────────
// Page operations
// ────────────────────────────────────────────────────────────────────────────

/// One positioned drawing operation. `y_mm` is the text baseline measured
/// from the TOP of the page; emission converts to PDF's bottom-left origin.
#[derive(Debug, Clone, PartialEq)]
pub enum PageOp {
    Text {
        x_mm: f32,
        y_mm: f32,
        size_pt: f32,
        bold: bool,
        content: String,
    },
    Rule {
        y_mm: f32,
        x1_mm: f32,
        x2_mm: f32,
    },
}

impl PageOp {
    /// Text content, if this op draws text.
    pub fn text(&self) -> Option<&str> {
        match self {
            PageOp::Text { content, .. } => Some(content),
            PageOp::Rule { .. } => None,
        }
    }
}

/// All operations for one page. The background fill is implicit: emission
/// paints the document's background color under every page.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub ops: Vec<PageOp>,
}

/// Tracks the write position while ops accumulate across page breaks.
struct LayoutCursor {
    pages: Vec<Page>,
    y_mm: f32,
}

impl LayoutCursor {
    fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            y_mm: MARGIN_MM,
        }
    }

    fn remaining_mm(&self) -> f32 {
        PAGE_HEIGHT_MM - MARGIN_MM - self.y_mm
    }

    fn break_page(&mut self) {
        self.pages.push(Page::default());
        self.y_mm = MARGIN_MM;
    }

    fn push(&mut self, op: PageOp) {
        self.pages
            .last_mut()
            .expect("cursor always holds at least one page")
            .ops
            .push(op);
    }

    /// Places one line of text at the current position, breaking the page
    /// first if the line does not fit.
    fn text_line(&mut self, x_mm: f32, size_pt: f32, bold: bool, content: String) {
        let line_h = size_pt * PT_TO_MM * LINE_FACTOR;
        if self.remaining_mm() < line_h {
            self.break_page();
        }
        self.y_mm += line_h;
        self.push(PageOp::Text {
            x_mm,
            y_mm: self.y_mm,
            size_pt,
            bold,
            content,
        });
    }

    fn centered_line(&mut self, size_pt: f32, bold: bool, content: String) {
        let width = helvetica_metrics().width_mm(&content, size_pt);
        let x = ((PAGE_WIDTH_MM - width) / 2.0).max(MARGIN_MM);
        self.text_line(x, size_pt, bold, content);
    }

    fn gap(&mut self, dy_mm: f32) {
        self.y_mm += dy_mm;
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Encoding check
// ────────────────────────────────────────────────────────────────────────────

/// True if the builtin-font text encoding (Latin-1) can represent `c`.
fn encodable(c: char) -> bool {
    c == '\n' || c == '\t' || ('\u{20}'..='\u{7e}').contains(&c) || ('\u{a0}'..='\u{ff}').contains(&c)
}

fn check_encodable(value: &str, context: &'static str) -> Result<(), RenderError> {
    match value.chars().find(|c| !encodable(*c)) {
        Some(ch) => Err(RenderError::UnsupportedCharacter { ch, context }),
        None => Ok(()),
    }
}

/// Rejects any character the paginated renderer cannot encode, naming the
/// field it came from. Dropping or substituting silently is forbidden.
fn ensure_encodable(document: &ResumeDocument) -> Result<(), RenderError> {
    let profile = &document.profile;
    check_encodable(&profile.name, "name")?;
    check_encodable(&profile.job_role, "job_role")?;
    check_encodable(&profile.phone, "phone")?;
    check_encodable(&profile.email, "email")?;
    check_encodable(&profile.linkedin, "linkedin")?;
    check_encodable(&profile.address, "address")?;
    for (section, body) in document.ordered_sections() {
        check_encodable(body, section.key())?;
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Layout
// ────────────────────────────────────────────────────────────────────────────

/// Lays out the full document: header banner, then each canonical section as
/// an upper-cased bold title, a full-width rule immediately under the title
/// baseline, and the wrapped body with page-break-and-continue.
///
/// A section title is never split from its rule: the title is only placed
/// when the title, the rule, and at least one body line all fit on the
/// current page.
pub fn layout_pages(document: &ResumeDocument) -> Result<Vec<Page>, RenderError> {
    ensure_encodable(document)?;

    let profile = &document.profile;
    let text_width = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
    let mut cursor = LayoutCursor::new();

    // Header block: name, role, contact banner, all centered.
    cursor.centered_line(NAME_SIZE_PT, true, profile.name.to_uppercase());
    cursor.centered_line(ROLE_SIZE_PT, false, profile.job_role.to_uppercase());
    cursor.centered_line(
        CONTACT_SIZE_PT,
        false,
        format!(
            "Phone: {} | Email: {} | LinkedIn: {} | Address: {}",
            profile.phone, profile.email, profile.linkedin, profile.address
        ),
    );
    cursor.gap(HEADER_GAP_MM);

    let title_line_h = TITLE_SIZE_PT * PT_TO_MM * LINE_FACTOR;
    let body_line_h = BODY_SIZE_PT * PT_TO_MM * LINE_FACTOR;

    for (section, body) in document.ordered_sections() {
        // Title + rule + first body line stay together across page breaks.
        if cursor.remaining_mm() < title_line_h + RULE_GAP_MM + body_line_h {
            cursor.break_page();
        }

        cursor.text_line(MARGIN_MM, TITLE_SIZE_PT, true, section.title().to_string());
        cursor.push(PageOp::Rule {
            y_mm: cursor.y_mm + 1.0,
            x1_mm: MARGIN_MM,
            x2_mm: PAGE_WIDTH_MM - MARGIN_MM,
        });
        cursor.gap(RULE_GAP_MM);

        for line in wrap_text(body, BODY_SIZE_PT, text_width) {
            cursor.text_line(MARGIN_MM, BODY_SIZE_PT, false, line);
        }
        cursor.gap(SECTION_GAP_MM);
    }

    Ok(cursor.pages)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{
        CandidateProfile, RenderOptions, ResumeDocument, Section, SectionText,
    };

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
                    body: format!("Narrative body for the {} section.", section.key()),
                })
                .collect(),
            options: RenderOptions::default(),
        }
    }

    fn all_text(pages: &[Page]) -> String {
        pages
            .iter()
            .flat_map(|p| p.ops.iter())
            .filter_map(|op| op.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    // ── wrap_text ───────────────────────────────────────────────────────────

    #[test]
    fn test_wrap_text_empty_yields_no_lines() {
        assert!(wrap_text("", BODY_SIZE_PT, 180.0).is_empty());
        assert!(wrap_text("   \n  ", BODY_SIZE_PT, 180.0).is_empty());
    }

    #[test]
    fn test_wrap_text_short_text_single_line() {
        let lines = wrap_text("Python and SQL", BODY_SIZE_PT, 180.0);
        assert_eq!(lines, vec!["Python and SQL".to_string()]);
    }

    #[test]
    fn test_wrap_text_long_text_wraps_within_width() {
        let text = "word ".repeat(120);
        let lines = wrap_text(&text, BODY_SIZE_PT, 180.0);
        assert!(lines.len() > 1);
        let metrics = helvetica_metrics();
        for line in &lines {
            assert!(
                metrics.width_mm(line, BODY_SIZE_PT) <= 180.0 + 1e-3,
                "line exceeds width: {line:?}"
            );
        }
    }

    #[test]
    fn test_wrap_text_preserves_every_word() {
        let text = "Built data pipelines that processed millions of records per day";
        let lines = wrap_text(text, BODY_SIZE_PT, 40.0);
        let rejoined = lines.join(" ");
        assert_eq!(rejoined, text);
    }

    #[test]
    fn test_wrap_text_respects_explicit_newlines() {
        let lines = wrap_text("first\nsecond", BODY_SIZE_PT, 180.0);
        assert_eq!(lines, vec!["first".to_string(), "second".to_string()]);
    }

    // ── layout_pages content ────────────────────────────────────────────────

    #[test]
    fn test_layout_contains_upper_cased_header_lines() {
        let pages = layout_pages(&sample_document()).unwrap();
        let text = all_text(&pages);
        assert!(text.contains("JANE DOE"));
        assert!(text.contains("DATA SCIENTIST"));
    }

    #[test]
    fn test_layout_round_trips_every_contact_field() {
        let pages = layout_pages(&sample_document()).unwrap();
        let text = all_text(&pages);
        for fragment in ["555-1234", "jane@x.com", "in/jane", "1 Main St"] {
            assert!(text.contains(fragment), "missing {fragment:?}");
        }
        assert!(text.contains("Phone: 555-1234 | Email: jane@x.com"));
    }

    #[test]
    fn test_layout_emits_section_titles_in_canonical_order() {
        let pages = layout_pages(&sample_document()).unwrap();
        let text = all_text(&pages);
        let positions: Vec<usize> = ["PROFESSIONAL SUMMARY", "SKILLS", "EXPERIENCE", "EDUCATION"]
            .iter()
            .map(|title| text.find(title).unwrap_or_else(|| panic!("missing {title}")))
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted, "titles out of canonical order");
    }

    #[test]
    fn test_every_rule_sits_directly_under_a_title() {
        let pages = layout_pages(&sample_document()).unwrap();
        for page in &pages {
            for (i, op) in page.ops.iter().enumerate() {
                if let PageOp::Rule { .. } = op {
                    let prev = i.checked_sub(1).and_then(|j| page.ops.get(j));
                    match prev {
                        Some(PageOp::Text { bold: true, size_pt, .. }) => {
                            assert_eq!(*size_pt, TITLE_SIZE_PT);
                        }
                        other => panic!("rule not preceded by a title: {other:?}"),
                    }
                }
            }
        }
    }

    #[test]
    fn test_long_body_breaks_pages_and_continues() {
        let mut document = sample_document();
        document.sections[2].body =
            "Shipped measurable improvements across several production systems. ".repeat(120);
        let pages = layout_pages(&document).unwrap();
        assert!(pages.len() > 1, "long experience body should paginate");

        // The EXPERIENCE title appears exactly once; its body continues on
        // later pages without a repeated title.
        let text = all_text(&pages);
        assert_eq!(text.matches("EXPERIENCE").count(), 1);
        // EDUCATION still follows on some later page.
        assert!(text.contains("EDUCATION"));
    }

    #[test]
    fn test_title_never_split_from_rule_across_pages() {
        // Pad the summary so a section title lands near the bottom of a page.
        for pad in 1..60 {
            let mut document = sample_document();
            document.sections[0].body = "Filler sentence to push content down the page. ".repeat(pad);
            let pages = layout_pages(&document).unwrap();
            for page in &pages {
                if let Some(PageOp::Text { bold: true, size_pt, .. }) = page.ops.last() {
                    assert_ne!(
                        *size_pt, TITLE_SIZE_PT,
                        "page ends with an orphaned section title (pad {pad})"
                    );
                }
            }
        }
    }

    #[test]
    fn test_all_ops_stay_inside_page_bounds() {
        let mut document = sample_document();
        document.sections[1].body = "Kubernetes Terraform Airflow Spark ".repeat(80);
        let pages = layout_pages(&document).unwrap();
        for page in &pages {
            for op in &page.ops {
                let y = match op {
                    PageOp::Text { y_mm, .. } => *y_mm,
                    PageOp::Rule { y_mm, .. } => *y_mm,
                };
                assert!(y >= MARGIN_MM && y <= PAGE_HEIGHT_MM - MARGIN_MM + 1.5);
            }
        }
    }

    // ── encoding ────────────────────────────────────────────────────────────

    #[test]
    fn test_latin1_characters_are_accepted() {
        let mut document = sample_document();
        document.profile.name = "Renée Müller".to_string();
        assert!(layout_pages(&document).is_ok());
    }

    #[test]
    fn test_unsupported_character_is_surfaced_not_dropped() {
        let mut document = sample_document();
        document.sections[0].body = "Grew revenue → fast".to_string();
        let err = layout_pages(&document).unwrap_err();
        match err {
            RenderError::UnsupportedCharacter { ch, context } => {
                assert_eq!(ch, '→');
                assert_eq!(context, "summary");
            }
            other => panic!("expected UnsupportedCharacter, got {other:?}"),
        }
    }

    // ── metrics ─────────────────────────────────────────────────────────────

    #[test]
    fn test_measure_str_matches_known_widths() {
        let metrics = helvetica_metrics();
        // "Hi" = H(0.722) + i(0.222) = 0.944
        assert!((metrics.measure_str("Hi") - 0.944).abs() < 1e-4);
        assert_eq!(metrics.measure_str(""), 0.0);
    }

    #[test]
    fn test_non_ascii_falls_back_to_average_width() {
        let metrics = helvetica_metrics();
        assert!((metrics.measure_str("é") - metrics.average_char_width).abs() < 1e-4);
    }
}
