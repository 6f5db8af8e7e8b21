// Prompt constants for job-description analysis.

/// Metadata extraction prompt. Replace `{jd_text}` before sending.
pub const JD_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze this job description and extract structured metadata. Return ONLY a valid JSON object with these exact fields:

{
  "company_names": ["list", "of", "company", "names"],
  "role_level": "Junior|Mid|Senior|Staff|Lead",
  "experience_years_min": <number or null>,
  "experience_years_max": <number or null>,
  "key_responsibilities": ["top", "5", "responsibilities"],
  "leadership_required": true|false
}

Guidelines:
1. company_names: Extract ALL company/organization names mentioned (e.g., "R1", "R37", "Google")
2. role_level: Determine from title and description:
   - "Engineer I", "Junior", "Entry-level" → "Junior"
   - "Engineer II", no modifier, "intermediate" → "Mid"
   - "Engineer III", "Senior" → "Senior"
   - "Staff", "Principal" → "Staff"
   - "Lead", "Manager" → "Lead"
3. experience_years_min/max: Extract from phrases like "3-5 years", "5+ years", "minimum 3 years"
4. key_responsibilities: Top 5 most important responsibilities (be concise)
5. leadership_required: true only if the role explicitly requires leading teams, managing people or directing others
   - Do NOT mark true for "working with teams" or "collaborating"

Job Description:
{jd_text}

Return ONLY the JSON object, no other text."#;
