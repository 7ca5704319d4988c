//! Output schemas for every document the model is asked to produce.
//!
//! Field names mirror the JSON the prompts request (camelCase).

/// Shape of a value inside a model document.
#[derive(Debug)]
pub enum Shape {
    /// Nullable string. Numbers and booleans are accepted and stringified.
    Text,
    /// Nullable number. Numeric strings are accepted.
    Number,
    /// Nullable integer, rounded and clamped into 0..=100.
    Score,
    /// Nullable string restricted to the listed values.
    Enum(&'static [&'static str]),
    /// Defaults to `[]`.
    List(&'static Shape),
    /// Object with known fields. Defaults to the object of field defaults.
    Record(&'static [Field]),
    /// Object with arbitrary keys and uniform values. Defaults to `{}`.
    Dict(&'static Shape),
}

#[derive(Debug)]
pub struct Field {
    pub name: &'static str,
    pub shape: Shape,
}

#[derive(Debug)]
pub struct Schema {
    pub name: &'static str,
    pub root: Shape,
}

impl Schema {
    /// The character that opens a document of this schema.
    pub fn opener(&self) -> char {
        match self.root {
            Shape::List(_) => '[',
            _ => '{',
        }
    }
}

pub const WORK_TYPES: &[&str] = &["Full-Time", "Internship", "Part-Time", "Freelance"];
pub const RECOMMENDATION_TYPES: &[&str] = &["COURSE", "CERTIFICATION", "TRAINING", "OPPORTUNITY"];
pub const LEVELS: &[&str] = &["BEGINNER", "INTERMEDIATE", "ADVANCED"];

const TEXT_LIST: Shape = Shape::List(&Shape::Text);

pub const RESUME_PROFILE: Schema = Schema {
    name: "ResumeProfile",
    root: Shape::Record(&[
        Field {
            name: "about",
            shape: Shape::Record(&[
                Field { name: "name", shape: Shape::Text },
                Field { name: "email", shape: Shape::Text },
                Field { name: "phone", shape: Shape::Text },
                Field { name: "address", shape: Shape::Text },
                Field { name: "linkedin", shape: Shape::Text },
                Field { name: "github", shape: Shape::Text },
                Field { name: "portfolio", shape: Shape::Text },
                Field { name: "role", shape: Shape::Text },
                Field { name: "summary", shape: Shape::Text },
                Field { name: "otherProfiles", shape: TEXT_LIST },
            ]),
        },
        Field {
            name: "education",
            shape: Shape::List(&Shape::Record(&[
                Field { name: "degree", shape: Shape::Text },
                Field { name: "school", shape: Shape::Text },
                Field { name: "startYr", shape: Shape::Text },
                Field { name: "endYr", shape: Shape::Text },
                Field { name: "grade", shape: Shape::Text },
            ])),
        },
        Field {
            name: "work",
            shape: Shape::List(&Shape::Record(&[
                Field { name: "position", shape: Shape::Text },
                Field { name: "company", shape: Shape::Text },
                Field { name: "startDate", shape: Shape::Text },
                Field { name: "endDate", shape: Shape::Text },
                Field { name: "description", shape: Shape::Text },
                Field { name: "type", shape: Shape::Enum(WORK_TYPES) },
            ])),
        },
        Field {
            name: "projects",
            shape: Shape::List(&Shape::Record(&[
                Field { name: "name", shape: Shape::Text },
                Field { name: "description", shape: Shape::Text },
                Field { name: "github", shape: Shape::Text },
                Field { name: "technologies", shape: TEXT_LIST },
                Field { name: "url", shape: Shape::Text },
            ])),
        },
        Field { name: "skills", shape: TEXT_LIST },
        Field {
            name: "languages",
            shape: Shape::List(&Shape::Record(&[
                Field { name: "name", shape: Shape::Text },
                Field { name: "level", shape: Shape::Text },
            ])),
        },
        Field {
            name: "certifications",
            shape: Shape::List(&Shape::Record(&[
                Field { name: "title", shape: Shape::Text },
                Field { name: "issuer", shape: Shape::Text },
                Field { name: "year", shape: Shape::Text },
            ])),
        },
        Field {
            name: "socialActivities",
            shape: Shape::List(&Shape::Record(&[
                Field { name: "role", shape: Shape::Text },
                Field { name: "organization", shape: Shape::Text },
                Field { name: "description", shape: Shape::Text },
            ])),
        },
    ]),
};

pub const ANALYSIS_REPORT: Schema = Schema {
    name: "AnalysisReport",
    root: Shape::Record(&[
        Field { name: "weaknesses", shape: TEXT_LIST },
        Field { name: "improvements", shape: TEXT_LIST },
        Field { name: "missingSections", shape: TEXT_LIST },
        Field { name: "mistakes", shape: TEXT_LIST },
        Field { name: "score", shape: Shape::Score },
        Field { name: "overallFeedback", shape: Shape::Text },
    ]),
};

pub const RECOMMENDATIONS: Schema = Schema {
    name: "RecommendationItem[]",
    root: Shape::List(&Shape::Record(&[
        Field { name: "type", shape: Shape::Enum(RECOMMENDATION_TYPES) },
        Field { name: "title", shape: Shape::Text },
        Field { name: "provider", shape: Shape::Text },
        Field { name: "description", shape: Shape::Text },
        Field { name: "matchScore", shape: Shape::Number },
        Field { name: "level", shape: Shape::Enum(LEVELS) },
        Field { name: "duration", shape: Shape::Text },
        Field { name: "price", shape: Shape::Number },
        Field { name: "url", shape: Shape::Text },
        Field { name: "skills", shape: TEXT_LIST },
        Field { name: "whyRecommended", shape: Shape::Text },
        Field { name: "category", shape: Shape::Text },
    ])),
};

pub const COMPARISON_REPORT: Schema = Schema {
    name: "ComparisonReport",
    root: Shape::Record(&[
        Field {
            name: "resumeSummaries",
            shape: Shape::List(&Shape::Record(&[
                Field { name: "resumeId", shape: Shape::Text },
                Field { name: "keyStrengths", shape: TEXT_LIST },
                Field { name: "keyWeaknesses", shape: TEXT_LIST },
                Field { name: "uniqueSkills", shape: TEXT_LIST },
                Field { name: "notableExperiences", shape: TEXT_LIST },
            ])),
        },
        Field {
            name: "comparison",
            shape: Shape::Record(&[
                Field { name: "commonSkills", shape: TEXT_LIST },
                Field { name: "uniqueSkillsByResume", shape: Shape::Dict(&TEXT_LIST) },
                Field {
                    name: "experienceComparison",
                    shape: Shape::Record(&[
                        Field { name: "strongerExperienceResumeId", shape: Shape::Text },
                        Field { name: "summary", shape: Shape::Text },
                    ]),
                },
                Field {
                    name: "educationComparison",
                    shape: Shape::Record(&[
                        Field { name: "strongerEducationResumeId", shape: Shape::Text },
                        Field { name: "summary", shape: Shape::Text },
                    ]),
                },
                Field {
                    name: "roleSuitability",
                    shape: Shape::List(&Shape::Record(&[
                        Field { name: "role", shape: Shape::Text },
                        Field { name: "bestResumeId", shape: Shape::Text },
                        Field { name: "reason", shape: Shape::Text },
                    ])),
                },
            ]),
        },
        Field { name: "finalVerdict", shape: Shape::Text },
    ]),
};
