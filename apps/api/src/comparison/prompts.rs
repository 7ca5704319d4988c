use crate::prompt::PromptTemplate;

pub const RESUME_COMPARISON: PromptTemplate = PromptTemplate {
    id: "resume-comparison",
    params: &["resumes_json"],
    body: r#"You are a career analyst. Compare the resumes below and produce a structured comparison.

RESUMES (JSON array; each entry has a "resumeId" and its "profile"):
<<resumes_json>>

Cover:
- strengths and weaknesses of each resume
- skills: the ones all resumes share and the ones unique to each
- depth, relevance and diversity of experience
- education
- which resume suits which roles
- a final verdict on which resume is stronger for which goals

RULES:
1. Refer to resumes only by the "resumeId" values given above.
2. "uniqueSkillsByResume" is keyed by resumeId.
3. Strings must not contain line breaks.

OUTPUT SCHEMA:
{
  "resumeSummaries": [
    {
      "resumeId": "string",
      "keyStrengths": ["string"],
      "keyWeaknesses": ["string"],
      "uniqueSkills": ["string"],
      "notableExperiences": ["string"]
    }
  ],
  "comparison": {
    "commonSkills": ["string"],
    "uniqueSkillsByResume": {"<resumeId>": ["string"]},
    "experienceComparison": {"strongerExperienceResumeId": "string | null", "summary": "string"},
    "educationComparison": {"strongerEducationResumeId": "string | null", "summary": "string"},
    "roleSuitability": [{"role": "string", "bestResumeId": "string", "reason": "string"}]
  },
  "finalVerdict": "string"
}

Return ONLY the JSON object."#,
};
