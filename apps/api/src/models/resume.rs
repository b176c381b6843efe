//! Canonical resume data model shared by the generation pipeline and both renderers.

use serde::{Deserialize, Deserializer, Serialize};

/// Structured career inputs collected from the external form surface.
///
/// All fields are plain free text and all are required: generation must not
/// start while any of them is empty. `skills` is comma-separated by
/// convention ("Python, SQL") — the flowing renderer splits on that.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub name: String,
    pub job_role: String,
    pub education: String,
    pub skills: String,
    pub experience: String,
    pub phone: String,
    pub email: String,
    pub linkedin: String,
    pub address: String,
}

impl CandidateProfile {
    /// Returns the names of every empty required field, so validation can
    /// report them all in one pass instead of failing field by field.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let fields: [(&'static str, &str); 9] = [
            ("name", &self.name),
            ("job_role", &self.job_role),
            ("education", &self.education),
            ("skills", &self.skills),
            ("experience", &self.experience),
            ("phone", &self.phone),
            ("email", &self.email),
            ("linkedin", &self.linkedin),
            ("address", &self.address),
        ];
        fields
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(label, _)| label)
            .collect()
    }
}

/// Optional targeting context: the free-text description of the job the
/// candidate is applying for. Empty is valid and yields an unbiased prompt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobContext {
    #[serde(default)]
    pub job_description: String,
}

/// The four logical resume sections.
///
/// `CANONICAL_ORDER` is a presentation contract consumed by both renderers —
/// it never varies by submission or composition mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Summary,
    Skills,
    Experience,
    Education,
}

impl Section {
    pub const CANONICAL_ORDER: [Section; 4] = [
        Section::Summary,
        Section::Skills,
        Section::Experience,
        Section::Education,
    ];

    /// Stable identifier used in prompts, logs, and exchange records.
    pub fn key(self) -> &'static str {
        match self {
            Section::Summary => "summary",
            Section::Skills => "skills",
            Section::Experience => "experience",
            Section::Education => "education",
        }
    }

    /// Upper-cased display title used by both renderers.
    pub fn title(self) -> &'static str {
        match self {
            Section::Summary => "PROFESSIONAL SUMMARY",
            Section::Skills => "SKILLS",
            Section::Experience => "EXPERIENCE",
            Section::Education => "EDUCATION",
        }
    }
}

/// One generated (or fallback) body text for a section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionText {
    pub section: Section,
    pub body: String,
}

/// Page background fill for the paginated renderer.
///
/// Deserialization never fails: an unrecognized value falls back to `White`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundColor {
    #[default]
    White,
    LightGrey,
    Blue,
}

impl BackgroundColor {
    /// Parses a color name; anything unrecognized is `White`, never an error.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light_grey" => BackgroundColor::LightGrey,
            "blue" => BackgroundColor::Blue,
            _ => BackgroundColor::White,
        }
    }

    /// The exact RGB triple for the page fill.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            BackgroundColor::White => (255, 255, 255),
            BackgroundColor::LightGrey => (240, 240, 240),
            BackgroundColor::Blue => (230, 240, 255),
        }
    }
}

impl<'de> Deserialize<'de> for BackgroundColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(BackgroundColor::from_name(&name))
    }
}

/// Output container format, selected by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Fixed-page PDF with background fill, rules, and page breaks.
    #[default]
    Paginated,
    /// Heading/paragraph DOCX without page geometry.
    Flowing,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Paginated => "pdf",
            OutputFormat::Flowing => "docx",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            OutputFormat::Paginated => "application/pdf",
            OutputFormat::Flowing => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

/// How many adapter calls one resume build issues: one per section, or a
/// single pass covering the whole body. Cost/latency-relevant, so it stays a
/// request-level option.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositionMode {
    #[default]
    PerSection,
    Monolithic,
}

/// Render configuration carried on the document record.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RenderOptions {
    #[serde(default)]
    pub background_color: BackgroundColor,
    #[serde(default)]
    pub output_format: OutputFormat,
}

/// The canonical output record: verbatim profile fields plus one body text
/// per section. Built once, handed to exactly one renderer, then discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub profile: CandidateProfile,
    pub sections: Vec<SectionText>,
    pub options: RenderOptions,
}

impl ResumeDocument {
    /// Body text for a section; empty string if the section is absent.
    pub fn section_body(&self, section: Section) -> &str {
        self.sections
            .iter()
            .find(|s| s.section == section)
            .map(|s| s.body.as_str())
            .unwrap_or("")
    }

    /// Sections in canonical order, regardless of how `sections` was filled.
    /// Both renderers iterate through this, never through `sections` directly.
    pub fn ordered_sections(&self) -> impl Iterator<Item = (Section, &str)> + '_ {
        Section::CANONICAL_ORDER
            .into_iter()
            .map(move |section| (section, self.section_body(section)))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
