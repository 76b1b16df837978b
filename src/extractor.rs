// Copyright (c) 2026 VulnX Security. All rights reserved.
// This software is proprietary and confidential.

/**
 * VulnX Pro - Form Extractor Module
 * Parses HTML form metadata for vulnerability testing
 *
 * @copyright 2026 VulnX Security
 * @license Proprietary
 */

use crate::http_client::HttpClient;
use scraper::{Html, Selector};
use std::sync::Arc;
use tracing::{debug, warn};

/// Form input field with a name attribute
#[derive(Debug, Clone)]
pub struct FormInput {
    pub name: String,
    pub input_type: String,
    pub value: String,
}

/// Named textarea field
#[derive(Debug, Clone)]
pub struct TextAreaField {
    pub name: String,
    pub value: String,
}

/// Named select field with its option values
#[derive(Debug, Clone)]
pub struct SelectField {
    pub name: String,
    pub options: Vec<String>,
}

/// Structured metadata for one HTML form
#[derive(Debug, Clone)]
pub struct ExtractedForm {
    /// Stable per-page identifier derived from the form's index
    pub id: String,
    /// Raw action attribute; empty when absent, callers fall back to the page URL
    pub action: String,
    /// Lowercased method, defaulting to "get"
    pub method: String,
    pub inputs: Vec<FormInput>,
    pub textareas: Vec<TextAreaField>,
    pub selects: Vec<SelectField>,
}

impl ExtractedForm {
    /// All named field names across inputs, textareas and selects.
    pub fn field_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inputs.iter().map(|i| i.name.clone()).collect();
        names.extend(self.textareas.iter().map(|t| t.name.clone()));
        names.extend(self.selects.iter().map(|s| s.name.clone()));
        names
    }

    /// True when the form has at least one field that can carry
    /// attacker-controlled data: a non-submit/button/reset/hidden input, or
    /// any textarea.
    pub fn has_testable_inputs(&self) -> bool {
        let testable_input = self.inputs.iter().any(|input| {
            !matches!(
                input.input_type.to_lowercase().as_str(),
                "submit" | "button" | "reset" | "hidden"
            )
        });

        testable_input || !self.textareas.is_empty()
    }
}

/// Fetches pages and extracts HTML form metadata.
///
/// Failures degrade to an empty result and never propagate.
pub struct FormExtractor {
    http_client: Arc<HttpClient>,
}

impl FormExtractor {
    pub fn new(http_client: Arc<HttpClient>) -> Self {
        Self { http_client }
    }

    /// Extract every form on the page at `url`.
    pub async fn extract_forms(&self, url: &str) -> Vec<ExtractedForm> {
        let response = match self.http_client.get(url).await {
            Ok(resp) if resp.is_success() => resp,
            Ok(resp) => {
                warn!(
                    "Form extraction from {} got status {}",
                    url, resp.status_code
                );
                return Vec::new();
            }
            Err(e) => {
                warn!("Error extracting forms from {}: {}", url, e);
                return Vec::new();
            }
        };

        let forms = Self::parse_forms(&response.body);
        debug!("Extracted {} forms from {}", forms.len(), url);
        forms
    }

    /// Parse form metadata out of an HTML document. Only fields with a name
    /// attribute are collected; an unparseable form is simply omitted.
    pub fn parse_forms(html: &str) -> Vec<ExtractedForm> {
        let document = Html::parse_document(html);

        let form_selector = Selector::parse("form").unwrap();
        let input_selector = Selector::parse("input").unwrap();
        let textarea_selector = Selector::parse("textarea").unwrap();
        let select_selector = Selector::parse("select").unwrap();
        let option_selector = Selector::parse("option").unwrap();

        let mut forms = Vec::new();

        for (idx, form_element) in document.select(&form_selector).enumerate() {
            let mut form = ExtractedForm {
                id: format!("form_{}", idx),
                action: form_element
                    .value()
                    .attr("action")
                    .unwrap_or("")
                    .to_string(),
                method: form_element
                    .value()
                    .attr("method")
                    .unwrap_or("get")
                    .to_lowercase(),
                inputs: Vec::new(),
                textareas: Vec::new(),
                selects: Vec::new(),
            };

            for input in form_element.select(&input_selector) {
                if let Some(name) = input.value().attr("name") {
                    form.inputs.push(FormInput {
                        name: name.to_string(),
                        input_type: input.value().attr("type").unwrap_or("text").to_string(),
                        value: input.value().attr("value").unwrap_or("").to_string(),
                    });
                }
            }

            for textarea in form_element.select(&textarea_selector) {
                if let Some(name) = textarea.value().attr("name") {
                    form.textareas.push(TextAreaField {
                        name: name.to_string(),
                        value: textarea.text().collect::<String>(),
                    });
                }
            }

            for select in form_element.select(&select_selector) {
                if let Some(name) = select.value().attr("name") {
                    let options = select
                        .select(&option_selector)
                        .map(|opt| {
                            opt.value()
                                .attr("value")
                                .map(|v| v.to_string())
                                .unwrap_or_else(|| opt.text().collect::<String>().trim().to_string())
                        })
                        .collect();

                    form.selects.push(SelectField {
                        name: name.to_string(),
                        options,
                    });
                }
            }

            forms.push(form);
        }

        forms
    }

    /// Filter forms by HTTP method ("get", "post", or "all").
    pub fn filter_by_method<'a>(
        forms: &'a [ExtractedForm],
        method: &str,
    ) -> Vec<&'a ExtractedForm> {
        if method.eq_ignore_ascii_case("all") {
            return forms.iter().collect();
        }
        forms
            .iter()
            .filter(|f| f.method.eq_ignore_ascii_case(method))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_PAGE: &str = r#"
        <html><body>
            <form action="/search" method="POST">
                <input type="text" name="q" value="default" />
                <input type="hidden" name="csrf" value="token" />
                <input type="submit" value="Go" />
                <textarea name="notes">hello</textarea>
                <select name="sort">
                    <option value="asc">Ascending</option>
                    <option>Descending</option>
                </select>
            </form>
            <form>
                <input type="text" />
                <input type="submit" name="go" />
            </form>
        </body></html>
    "#;

    #[test]
    fn test_parse_forms_metadata() {
        let forms = FormExtractor::parse_forms(SAMPLE_PAGE);
        assert_eq!(forms.len(), 2);

        let first = &forms[0];
        assert_eq!(first.id, "form_0");
        assert_eq!(first.action, "/search");
        assert_eq!(first.method, "post");
        assert_eq!(first.inputs.len(), 2); // unnamed submit input is skipped
        assert_eq!(first.inputs[0].name, "q");
        assert_eq!(first.inputs[0].input_type, "text");
        assert_eq!(first.inputs[0].value, "default");
        assert_eq!(first.textareas.len(), 1);
        assert_eq!(first.textareas[0].value, "hello");
        assert_eq!(first.selects.len(), 1);
        assert_eq!(
            first.selects[0].options,
            vec!["asc".to_string(), "Descending".to_string()]
        );

        let second = &forms[1];
        assert_eq!(second.id, "form_1");
        assert_eq!(second.action, "");
        assert_eq!(second.method, "get");
        assert_eq!(second.inputs.len(), 1); // only the named submit
    }

    #[test]
    fn test_field_names_covers_all_groups() {
        let forms = FormExtractor::parse_forms(SAMPLE_PAGE);
        let names = forms[0].field_names();
        assert_eq!(
            names,
            vec![
                "q".to_string(),
                "csrf".to_string(),
                "notes".to_string(),
                "sort".to_string()
            ]
        );
    }

    #[test]
    fn test_has_testable_inputs() {
        let forms = FormExtractor::parse_forms(SAMPLE_PAGE);
        assert!(forms[0].has_testable_inputs());
        // Second form has only a named submit input and no textarea
        assert!(!forms[1].has_testable_inputs());

        let hidden_only = FormExtractor::parse_forms(
            r#"<form><input type="hidden" name="h" /><input type="submit" name="s" /></form>"#,
        );
        assert!(!hidden_only[0].has_testable_inputs());

        let textarea_only =
            FormExtractor::parse_forms(r#"<form><textarea name="t"></textarea></form>"#);
        assert!(textarea_only[0].has_testable_inputs());
    }

    #[test]
    fn test_filter_by_method() {
        let forms = FormExtractor::parse_forms(SAMPLE_PAGE);

        assert_eq!(FormExtractor::filter_by_method(&forms, "all").len(), 2);
        assert_eq!(FormExtractor::filter_by_method(&forms, "post").len(), 1);
        assert_eq!(FormExtractor::filter_by_method(&forms, "GET").len(), 1);
    }

    #[test]
    fn test_parse_forms_empty_document() {
        assert!(FormExtractor::parse_forms("<html><body>no forms</body></html>").is_empty());
    }
}
