// All LLM prompt templates for cover-letter generation.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Letter prompt template.
/// Replace: {no_placeholders}, {plain_text_only}, {resume_text}, {job_description}
pub const LETTER_PROMPT_TEMPLATE: &str = "Using the resume provided below as context and the \
following job description, write a personalized, human-sounding cover letter. \
Separate paragraphs with a single blank line. {plain_text_only} {no_placeholders}

Resume:
{resume_text}

Job Description:
{job_description}";

/// Title prompt template. The answer becomes the output filename.
/// Replace: {job_description}
pub const TITLE_PROMPT_TEMPLATE: &str = "Based solely on the following job description, \
return EXACTLY the filename in this format: Cover Letter - <Company> - <Position> \
(without any extra text).

Job Description:
{job_description}";
