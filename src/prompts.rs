use crate::models::{AnalysisRequest, JewelryAttributes, WordBudget};

pub const ANALYSIS: &str = include_str!("../data/prompts/analysis.txt");

/// Replace `{{key}}` placeholders in a template string.
///
/// Substitution is a single pass, so placeholders that appear inside a
/// substituted value are left as-is. Unknown keys are kept verbatim.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        result.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];

        let Some(end) = after_open.find("}}") else {
            result.push_str(&rest[start..]);
            return result;
        };

        let key = &after_open[..end];
        match vars.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => result.push_str(value),
            None => result.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after_open[end + 2..];
    }

    result.push_str(rest);
    result
}

/// "Label: value" lines for every filled attribute, newline-joined.
pub fn jewelry_info_lines(attributes: &JewelryAttributes) -> String {
    attributes
        .filled()
        .map(|(attribute, value)| format!("{}: {}", attribute.label(), value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the full instruction prompt for one analysis.
pub fn build_prompt(request: &AnalysisRequest, budget: WordBudget) -> String {
    let context = request
        .additional_context
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();
    let jewelry_info = jewelry_info_lines(&request.attributes);
    let min_words = budget.min.to_string();
    let max_words = budget.max.to_string();

    render(
        ANALYSIS,
        &[
            ("context", context),
            ("jewelry_info", &jewelry_info),
            ("tone", request.tone.label()),
            ("min_words", &min_words),
            ("max_words", &max_words),
        ],
    )
}
