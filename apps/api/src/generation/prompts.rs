// Prompt for the AI generation path. Placeholders are replaced in `build_ai_prompt`.

use crate::generation::cv_generator::GenerateInput;

pub const CV_WRITER_PROMPT_TEMPLATE: &str = r#"You are a professional CV writer. Generate a competitive, job-market-ready CV for the following person:

**Personal Information:**
- Name: {name}
- Email: {email}
- Phone: {phone}
- Location: {location}
- Personal Summary: {summary}

**Education:**
{education}

**Skills:**
{skills}

Please generate a professional CV with:
1. A compelling professional profile/summary (2-3 sentences)
2. Clear sections for education and skills
3. Professional, confident, and formal language
4. Action-oriented descriptions
5. Job-market ready content

Format the output with clear section headers and bullet points where appropriate."#;

const NOT_AVAILABLE: &str = "N/A";

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        NOT_AVAILABLE
    } else {
        value
    }
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.trim().is_empty() {
        default
    } else {
        value
    }
}

pub fn build_ai_prompt(input: &GenerateInput) -> String {
    let education = input
        .education
        .iter()
        .filter(|e| !e.school.trim().is_empty() || !e.degree.trim().is_empty())
        .map(|e| {
            format!(
                "{} in {} from {} ({} - {})",
                or_default(&e.degree, "Degree"),
                or_default(&e.field, "Field"),
                or_default(&e.school, "Institution"),
                or_default(&e.start_date, "Start"),
                or_default(&e.end_date, "End"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    let skills = input
        .skills
        .iter()
        .filter(|s| !s.name.trim().is_empty())
        .map(|s| format!("{} ({})", s.name, s.level.as_str()))
        .collect::<Vec<_>>()
        .join(", ");

    CV_WRITER_PROMPT_TEMPLATE
        .replace("{name}", or_na(&input.name))
        .replace("{email}", or_na(&input.email))
        .replace("{phone}", or_na(&input.phone))
        .replace("{location}", or_na(&input.location))
        .replace("{summary}", or_na(&input.personal_summary))
        .replace("{education}", or_na(&education))
        .replace("{skills}", or_na(&skills))
}
