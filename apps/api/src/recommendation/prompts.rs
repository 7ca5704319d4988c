use crate::prompt::PromptTemplate;

pub const CAREER_RECOMMENDATIONS: PromptTemplate = PromptTemplate {
    id: "career-recommendations",
    params: &["resumes_json", "filters_json", "filter_instructions"],
    body: r#"You are a career advisor. Study the selected resumes and suggest courses, certifications, trainings and opportunities that would move this person forward.

SELECTED RESUMES (JSON array):
<<resumes_json>>

CLIENT FILTERS (JSON):
<<filters_json>>

Every recommendation MUST satisfy all of these constraints:
<<filter_instructions>>

OUTPUT RULES:
1. Return a JSON ARRAY of recommendation objects and nothing else.
2. Every object carries every field below.
3. Strings must not contain line breaks.
4. If nothing satisfies the constraints, return an empty array: []

EACH ITEM:
{
  "type": "COURSE" | "CERTIFICATION" | "TRAINING" | "OPPORTUNITY",
  "title": "string",
  "provider": "string",
  "description": "string",
  "matchScore": 0,
  "level": "BEGINNER" | "INTERMEDIATE" | "ADVANCED",
  "duration": "string",
  "price": 0,
  "url": "string",
  "skills": ["string"],
  "whyRecommended": "string",
  "category": "string | null"
}

Return ONLY the JSON array."#,
};
