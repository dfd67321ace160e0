use crate::models::CoverLetterRequest;

const REQUIREMENTS: &str = "\n\nRequirements:\n\
1. Keep it professional, engaging, and concise (under 400 words).\n\
2. Highlight how the skills match the role.\n\
3. Format with proper paragraph breaks.\n\
4. Do NOT include placeholders like [Date] or [Address] unless necessary, try to keep it ready-to-send.";

/// Assembles the generation prompt. Deterministic: same input, same string.
///
/// `resume_text` is expected to be normalized already; an empty string means
/// no resume clause.
pub fn build_prompt(request: &CoverLetterRequest, resume_text: &str) -> String {
    let mut prompt = format!(
        "Write a professional cover letter for {} applying to the position of {} at {}.",
        request.name, request.job_role, request.company
    );

    if let Some(skills) = request.skills() {
        prompt.push_str(&format!("\nThey have the following key skills: {}.", skills));
    }

    if !resume_text.is_empty() {
        prompt.push_str(&format!(
            "\n\nHere is their resume text for reference to make it more personalized:\n\"{}\"",
            resume_text
        ));
    }

    prompt.push_str(REQUIREMENTS);
    prompt
}
