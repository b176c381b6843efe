//! Prompt Composer — builds the instruction strings fed to the generation adapter.
//!
//! Two composition strategies: one prompt per section, or a single monolithic
//! prompt covering the whole resume body. Every prompt embeds the candidate's
//! job role, and the extracted keyword set verbatim whenever it is non-empty —
//! losing that binding is a functional regression, since the keywords are
//! what biases the completion toward the target job's vocabulary.

use std::collections::BTreeSet;

use crate::generation::keywords::join_keywords;
use crate::models::resume::{CandidateProfile, Section};

/// Fixed stylistic instruction appended to every prompt.
const STYLE_INSTRUCTION: &str = "Write in complete sentences, in a professional tone, \
    optimized for applicant tracking systems. Do not invent facts beyond the details provided.";

/// Builds the prompt for one resume section.
///
/// Each section prompt carries only the structured fields relevant to that
/// section, so a skills completion cannot leak experience phrasing and vice
/// versa. The keyword clause is omitted entirely when the set is empty — an
/// empty "Focus on these keywords: ." clause helps nobody.
pub fn compose_section_prompt(
    profile: &CandidateProfile,
    keywords: &BTreeSet<String>,
    section: Section,
) -> String {
    let body = match section {
        Section::Summary => format!(
            "Write the professional summary section of a resume for a {role} named {name}. \
            Highlight the candidate's strengths for that role in two to three sentences.",
            role = profile.job_role,
            name = profile.name,
        ),
        Section::Skills => format!(
            "Write the skills section of a resume for a {role}. \
            The candidate lists these skills: {skills}. \
            Present them as a coherent capability statement.",
            role = profile.job_role,
            skills = profile.skills,
        ),
        Section::Experience => format!(
            "Write the experience section of a resume for a {role}. \
            The candidate's experience includes: {experience}. \
            Emphasize outcomes and responsibilities.",
            role = profile.job_role,
            experience = profile.experience,
        ),
        Section::Education => format!(
            "Write the education section of a resume for a {role}. \
            The candidate's education: {education}.",
            role = profile.job_role,
            education = profile.education,
        ),
    };

    assemble(body, keywords)
}

/// Builds the single full-resume prompt used in monolithic mode.
///
/// One combined instruction covering role, name, education, skills, and
/// experience in a single pass.
pub fn compose_monolithic_prompt(
    profile: &CandidateProfile,
    keywords: &BTreeSet<String>,
) -> String {
    let body = format!(
        "Generate a resume for a {role}. The person's name is {name}, \
        with education in {education}. The person has the following skills: {skills}. \
        The experience includes: {experience}.",
        role = profile.job_role,
        name = profile.name,
        education = profile.education,
        skills = profile.skills,
        experience = profile.experience,
    );

    assemble(body, keywords)
}

/// Appends the keyword clause (when non-empty) and the stylistic instruction.
fn assemble(body: String, keywords: &BTreeSet<String>) -> String {
    let mut prompt = body;
    if !keywords.is_empty() {
        prompt.push_str(&format!(
            " Focus on these keywords: {}.",
            join_keywords(keywords)
        ));
    }
    prompt.push(' ');
    prompt.push_str(STYLE_INSTRUCTION);
    prompt
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
