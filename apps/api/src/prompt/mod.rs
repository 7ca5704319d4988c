//! Prompt builder: typed templates with declared parameters.
//!
//! Markers look like `<<name>>` so they never collide with the literal `{`/`}`
//! of the JSON schemas embedded in template bodies. Rendering is one
//! left-to-right pass over the template: substituted values are copied
//! verbatim and never rescanned, so resume text cannot open or close a marker.

use thiserror::Error;

use crate::analysis::prompts::RESUME_ANALYSIS;
use crate::comparison::prompts::RESUME_COMPARISON;
use crate::extraction::prompts::RESUME_EXTRACTION;
use crate::llm_client::prompts::RESPONSE_CORRECTION;
use crate::recommendation::prompts::CAREER_RECOMMENDATIONS;

const MARKER_OPEN: &str = "<<";
const MARKER_CLOSE: &str = ">>";

#[derive(Debug, Error, PartialEq)]
pub enum PromptError {
    #[error("template '{template}' requires parameter '{name}'")]
    MissingParameter { template: &'static str, name: String },

    #[error("template '{template}' does not declare parameter '{name}'")]
    UnexpectedParameter { template: &'static str, name: String },

    #[error("template '{template}' uses undeclared marker '{name}'")]
    UndeclaredMarker { template: &'static str, name: String },
}

/// Every template the service sends to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateId {
    Extraction,
    Analysis,
    Recommendations,
    Comparison,
    Correction,
}

impl TemplateId {
    pub fn template(self) -> &'static PromptTemplate {
        match self {
            TemplateId::Extraction => &RESUME_EXTRACTION,
            TemplateId::Analysis => &RESUME_ANALYSIS,
            TemplateId::Recommendations => &CAREER_RECOMMENDATIONS,
            TemplateId::Comparison => &RESUME_COMPARISON,
            TemplateId::Correction => &RESPONSE_CORRECTION,
        }
    }
}

#[derive(Debug)]
pub struct PromptTemplate {
    pub id: &'static str,
    /// Parameter names the body references; all of them must be supplied.
    pub params: &'static [&'static str],
    pub body: &'static str,
}

impl PromptTemplate {
    pub fn render(&self, values: &[(&str, &str)]) -> Result<String, PromptError> {
        if let Some((name, _)) = values.iter().find(|(name, _)| !self.params.contains(name)) {
            return Err(PromptError::UnexpectedParameter {
                template: self.id,
                name: name.to_string(),
            });
        }
        if let Some(name) = self
            .params
            .iter()
            .find(|param| !values.iter().any(|(name, _)| name == *param))
        {
            return Err(PromptError::MissingParameter {
                template: self.id,
                name: name.to_string(),
            });
        }

        let extra: usize = values.iter().map(|(_, value)| value.len()).sum();
        let mut out = String::with_capacity(self.body.len() + extra);
        let mut rest = self.body;

        while let Some(start) = rest.find(MARKER_OPEN) {
            let after_open = &rest[start + MARKER_OPEN.len()..];
            let name = after_open
                .find(MARKER_CLOSE)
                .map(|end| &after_open[..end])
                .filter(|name| is_marker_name(name));

            let Some(name) = name else {
                // Not a marker, e.g. a literal "<<" in the prose.
                out.push_str(&rest[..start + MARKER_OPEN.len()]);
                rest = after_open;
                continue;
            };

            let value = values
                .iter()
                .find(|(param, _)| *param == name)
                .map(|(_, value)| *value)
                .ok_or_else(|| PromptError::UndeclaredMarker {
                    template: self.id,
                    name: name.to_string(),
                })?;

            out.push_str(&rest[..start]);
            out.push_str(value);
            rest = &after_open[name.len() + MARKER_CLOSE.len()..];
        }
        out.push_str(rest);

        Ok(out)
    }
}

/// Renders the template registered under `id`.
pub fn build(id: TemplateId, values: &[(&str, &str)]) -> Result<String, PromptError> {
    id.template().render(values)
}

fn is_marker_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_lowercase() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREETING: PromptTemplate = PromptTemplate {
        id: "greeting",
        params: &["name"],
        body: r#"Hello <<name>>. Reply with {"ok": true}."#,
    };

    #[test]
    fn test_substitutes_declared_parameter() {
        let out = GREETING.render(&[("name", "Ada")]).unwrap();
        assert_eq!(out, r#"Hello Ada. Reply with {"ok": true}."#);
    }

    #[test]
    fn test_missing_parameter_fails_fast() {
        let err = GREETING.render(&[]).unwrap_err();
        assert_eq!(
            err,
            PromptError::MissingParameter {
                template: "greeting",
                name: "name".into()
            }
        );
    }

    #[test]
    fn test_unexpected_parameter_is_rejected() {
        let err = GREETING
            .render(&[("name", "Ada"), ("age", "36")])
            .unwrap_err();
        assert!(matches!(err, PromptError::UnexpectedParameter { .. }));
    }

    #[test]
    fn test_undeclared_marker_is_rejected() {
        let broken = PromptTemplate {
            id: "broken",
            params: &[],
            body: "Hi <<who>>",
        };
        assert!(matches!(
            broken.render(&[]),
            Err(PromptError::UndeclaredMarker { .. })
        ));
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let template = PromptTemplate {
            id: "pair",
            params: &["first", "second"],
            body: "<<first>>|<<second>>",
        };
        let out = template
            .render(&[("first", "<<second>> >> <<"), ("second", "B")])
            .unwrap();
        assert_eq!(out, "<<second>> >> <<|B");
    }

    #[test]
    fn test_literal_angle_brackets_pass_through() {
        let template = PromptTemplate {
            id: "literal",
            params: &["x"],
            body: "a << b and <<x>> and <<Not A Marker>>",
        };
        let out = template.render(&[("x", "1")]).unwrap();
        assert_eq!(out, "a << b and 1 and <<Not A Marker>>");
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let a = build(TemplateId::Extraction, &[("resume_text", "Jane Doe")]).unwrap();
        let b = build(TemplateId::Extraction, &[("resume_text", "Jane Doe")]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_builtin_templates_render_with_their_declared_params() {
        for id in [
            TemplateId::Extraction,
            TemplateId::Analysis,
            TemplateId::Recommendations,
            TemplateId::Comparison,
            TemplateId::Correction,
        ] {
            let template = id.template();
            let values: Vec<(&str, &str)> = template.params.iter().map(|p| (*p, "VALUE")).collect();
            let out = template
                .render(&values)
                .unwrap_or_else(|e| panic!("{} failed to render: {e}", template.id));
            assert!(!out.contains("<<"), "{} left a marker behind", template.id);
        }
    }
}
