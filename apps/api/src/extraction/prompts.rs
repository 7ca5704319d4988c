// Extraction prompt: raw resume text → ResumeProfile JSON.

use crate::prompt::PromptTemplate;

pub const RESUME_EXTRACTION: PromptTemplate = PromptTemplate {
    id: "resume-extraction",
    params: &["resume_text"],
    body: r#"You are an expert resume reader. Read the resume text below and return a single JSON object describing the candidate.

RESUME TEXT:
---
<<resume_text>>
---

OUTPUT SCHEMA (return exactly this structure, every key present):
{
  "about": {
    "name": "string | null",
    "email": "string | null",
    "phone": "string | null",
    "address": "string | null",
    "linkedin": "string | null",
    "github": "string | null",
    "portfolio": "string | null",
    "role": "string | null",
    "summary": "string | null",
    "otherProfiles": ["string"]
  },
  "education": [
    {"degree": "string | null", "school": "string | null", "startYr": "YYYY | null", "endYr": "YYYY | null", "grade": "string | null"}
  ],
  "work": [
    {
      "position": "string | null",
      "company": "string | null",
      "startDate": "YYYY-MM | null",
      "endDate": "YYYY-MM | null",
      "description": "string | null",
      "type": "Full-Time" | "Internship" | "Part-Time" | "Freelance" | null
    }
  ],
  "projects": [
    {"name": "string | null", "description": "string | null", "github": "string | null", "technologies": ["string"], "url": "string | null"}
  ],
  "skills": ["string"],
  "languages": [{"name": "string | null", "level": "string | null"}],
  "certifications": [{"title": "string | null", "issuer": "string | null", "year": "string | null"}],
  "socialActivities": [{"role": "string | null", "organization": "string | null", "description": "string | null"}]
}

RULES:
1. Cover everything: education, jobs, internships, projects, certifications, skills, spoken languages, volunteering and community work.
2. Use null for any value the text does not state. Never omit a key.
3. Use an empty array for any section with no entries.
4. Dates use ISO format, YYYY-MM when the month is known.
5. "type" must be exactly one of "Full-Time", "Internship", "Part-Time", "Freelance", or null.
6. Only extract what is written. Do NOT guess or invent details.
7. Return ONLY the JSON object. No code fences, no commentary."#,
};
