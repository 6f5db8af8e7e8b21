// Prompt constants for section generation.
// The system prompt (LaTeX only, no fences) lives in llm_client::prompts.

/// Summary rewrite prompt.
/// Replace: {old_summary}, {job_description}, {keywords}, {company_names},
///          {role_level}, {experience_range}, {leadership_guidance},
///          {bullet_count}, {char_min}, {char_max}
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"Rewrite the Summary section of a resume for the job description below.

CURRENT SUMMARY BULLETS:
{old_summary}

TARGET KEYWORDS (work in at least five naturally):
{keywords}

JOB CONTEXT:
- Hiring company (NEVER mention it, the candidate does not work there): {company_names}
- Role level: {role_level}
- Experience to claim: {experience_range} yrs (never more)
- Leadership language: {leadership_guidance}

HARD RULES:
1. Exactly {bullet_count} bullets, each a single line starting with \item
2. Each bullet is {char_min}-{char_max} characters long, counted after "\item "
3. Bullet 1 MUST start with "<Role> with <N>+ yrs", e.g. "AI Engineer with {experience_range} yrs ..."
4. No trailing periods
5. Every bullet carries a number (scale, percentage, count)
6. Escape LaTeX special characters: \% \$ \& \# \_
7. Only use facts present in the current bullets; reframe, do not invent

JOB DESCRIPTION:
{job_description}

Return ONLY the {bullet_count} \item lines."#;

/// Experience rewrite prompt. Replace: {old_experience}, {job_description}, {keywords}
pub const EXPERIENCE_PROMPT_TEMPLATE: &str = r#"Rewrite this resume experience entry for the job description below.

CURRENT ENTRY (LaTeX):
{old_experience}

TARGET KEYWORDS (work in at least three naturally):
{keywords}

HARD RULES:
1. Keep the \resumeSubheading line and its four arguments exactly as given
2. Keep the \resumeItemListStart / \resumeItemListEnd wrapper
3. 4-6 bullets, ideally 5, each as \resumeItem{...}
4. Start every bullet with a strong action verb (Built, Designed, Deployed, Reduced, ...)
5. Every bullet carries a metric: %, N+, K/M/B scale, $ amount or Nx
6. No trailing periods
7. Escape LaTeX special characters: \% \$ \& \# \_
8. Only use facts present in the current entry; reframe, do not invent

JOB DESCRIPTION:
{job_description}

Return ONLY the LaTeX entry, from \resumeSubheading through \resumeItemListEnd."#;

/// Skills rewrite prompt. Replace: {old_skills}, {job_description}, {keywords}
pub const SKILLS_PROMPT_TEMPLATE: &str = r#"Rewrite this resume skills section for the job description below.

CURRENT SECTION (LaTeX):
{old_skills}

TARGET KEYWORDS (include at least three that the candidate plausibly has):
{keywords}

HARD RULES:
1. Keep the \section heading and the itemize environment exactly as given
2. Group skills into categories, one per line: \item \textbf{Category:} skill, skill, skill
3. 12-15 skills in total, never fewer than 8 or more than 20
4. No duplicate skills
5. Prefer skills named in the job description that already appear in the current section

JOB DESCRIPTION:
{job_description}

Return ONLY the LaTeX section, from \section through \end{itemize}."#;

/// Free-text refinement of one already-generated section.
/// Replace: {section_type}, {format_rules}, {keywords}, {current_content}, {user_request}
pub const REFINEMENT_PROMPT_TEMPLATE: &str = r#"Revise the {section_type} section of a resume as the candidate asks.

CURRENT CONTENT (LaTeX):
{current_content}

CANDIDATE REQUEST:
{user_request}

TARGET KEYWORDS (keep the ones already present):
{keywords}

FORMAT RULES (the request never overrides these):
{format_rules}
- Escape LaTeX special characters: \% \$ \& \# \_
- Only use facts present in the current content; reframe, do not invent

Return ONLY the revised LaTeX, in the same shape as the current content."#;
