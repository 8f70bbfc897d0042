pub const ENTITY_SYSTEM: &str = crate::llm_client::prompts::JSON_ONLY_SYSTEM;

/// Entity extraction prompt. `{resume_text}` is replaced at call time.
pub const ENTITY_PROMPT_TEMPLATE: &str = r#"Extract named entities from the resume text below.

Return a JSON array of objects, each with:
- "text": the entity exactly as written
- "label": one of "PERSON", "ORG", "DATE"

List the candidate's own name first if it appears. Return [] if nothing is found.

Resume:
{resume_text}"#;
