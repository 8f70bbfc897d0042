/// Candidate summary prompt. Placeholders: `{candidate_name}`, `{jd_text}`, `{resume_text}`.
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"Summarize the resume of '{candidate_name}' in relation to the job description.

Job Description:
{jd_text}

Resume:
{resume_text}

Format:
- 4-6 sentence professional summary
- 3 bullet points of relevant skills/experience
- A one-line recommendation (e.g., "Strong fit", "Moderate fit", "Not a fit")"#;
