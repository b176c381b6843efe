//! Resume assembly — orchestrates the document-assembly pipeline.
//!
//! Flow: validate profile → extract keywords → compose prompts →
//!       sequential adapter calls → assemble ResumeDocument.
//!
//! Validation runs before any adapter call: a profile with empty required
//! fields must never cost a generation call. Sections are generated
//! sequentially to keep prompt/response pairing simple and debuggable; each
//! round-trip is recorded as an explicit `SectionExchange` in request order.

use std::collections::BTreeSet;

use tracing::info;

use crate::errors::AppError;
use crate::generation::keywords::extract_keywords;
use crate::generation::prompts::{compose_monolithic_prompt, compose_section_prompt};
use crate::llm_client::TextGenerator;
use crate::models::resume::{
    CandidateProfile, CompositionMode, JobContext, RenderOptions, ResumeDocument, Section,
    SectionText,
};

/// One adapter round-trip: section, the prompt sent, the completion received.
#[derive(Debug, Clone)]
pub struct SectionExchange {
    pub section: Section,
    pub prompt: String,
    pub completion: String,
}

/// Pipeline output: the canonical document plus the ordered exchange log.
#[derive(Debug, Clone)]
pub struct AssembledResume {
    pub document: ResumeDocument,
    pub exchanges: Vec<SectionExchange>,
}

/// Runs the full document-assembly pipeline.
///
/// Fatal on the first adapter failure — no partial resume is ever assembled.
pub async fn assemble_resume(
    generator: &dyn TextGenerator,
    profile: CandidateProfile,
    job: JobContext,
    options: RenderOptions,
    mode: CompositionMode,
) -> Result<AssembledResume, AppError> {
    let missing = profile.missing_fields();
    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "required fields are empty: {}",
            missing.join(", ")
        )));
    }

    let keywords = extract_keywords(&job.job_description);
    info!(
        "Assembling resume for {:?} ({} keywords, mode {:?})",
        profile.job_role,
        keywords.len(),
        mode
    );

    let (sections, exchanges) = match mode {
        CompositionMode::PerSection => generate_per_section(generator, &profile, &keywords).await?,
        CompositionMode::Monolithic => generate_monolithic(generator, &profile, &keywords).await?,
    };

    Ok(AssembledResume {
        document: ResumeDocument {
            profile,
            sections,
            options,
        },
        exchanges,
    })
}

/// Per-section mode: one prompt and one adapter call per canonical section.
async fn generate_per_section(
    generator: &dyn TextGenerator,
    profile: &CandidateProfile,
    keywords: &BTreeSet<String>,
) -> Result<(Vec<SectionText>, Vec<SectionExchange>), AppError> {
    let mut sections = Vec::with_capacity(Section::CANONICAL_ORDER.len());
    let mut exchanges = Vec::with_capacity(Section::CANONICAL_ORDER.len());

    for section in Section::CANONICAL_ORDER {
        let prompt = compose_section_prompt(profile, keywords, section);
        let completion = generator.generate(&prompt).await.map_err(|e| {
            AppError::Generation(format!("{} generation failed: {e}", section.key()))
        })?;
        sections.push(SectionText {
            section,
            body: completion.clone(),
        });
        exchanges.push(SectionExchange {
            section,
            prompt,
            completion,
        });
    }

    Ok((sections, exchanges))
}

/// Monolithic mode: one adapter call. The completion fills the summary slot;
/// the remaining slots carry the verbatim structured input, not regenerated.
async fn generate_monolithic(
    generator: &dyn TextGenerator,
    profile: &CandidateProfile,
    keywords: &BTreeSet<String>,
) -> Result<(Vec<SectionText>, Vec<SectionExchange>), AppError> {
    let prompt = compose_monolithic_prompt(profile, keywords);
    let completion = generator
        .generate(&prompt)
        .await
        .map_err(|e| AppError::Generation(format!("resume generation failed: {e}")))?;

    let sections = vec![
        SectionText {
            section: Section::Summary,
            body: completion.clone(),
        },
        SectionText {
            section: Section::Skills,
            body: profile.skills.clone(),
        },
        SectionText {
            section: Section::Experience,
            body: profile.experience.clone(),
        },
        SectionText {
            section: Section::Education,
            body: profile.education.clone(),
        },
    ];
    let exchanges = vec![SectionExchange {
        section: Section::Summary,
        prompt,
        completion,
    }];

    Ok((sections, exchanges))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
