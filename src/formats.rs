use crate::{Context, Severity};
use serde_json::Value;

const INDENT: &str = "    ";
const LEVEL_WIDTH: usize = 9;

/// Placeholder for the timestamp of the log line in a custom line template.
pub const PH_DATE: &str = "{date}";
/// Placeholder for the uppercase severity name in a custom line template.
pub const PH_LEVEL: &str = "{level}";
/// Placeholder for the spaces that pad the severity name to nine characters.
pub const PH_LEVEL_PADDING: &str = "{level-padding}";
/// Placeholder for the numeric rank of the severity in a custom line template.
pub const PH_PRIORITY: &str = "{priority}";
/// Placeholder for the message in a custom line template.
pub const PH_MESSAGE: &str = "{message}";
/// Placeholder for the context, serialized as compact JSON, in a custom line template.
pub const PH_CONTEXT: &str = "{context}";

// Everything that is needed to produce one log line.
pub(crate) struct LineSpec<'a> {
    pub(crate) timestamp: &'a str,
    pub(crate) severity: Severity,
    pub(crate) message: &'a str,
    pub(crate) context: &'a Context,
}

/// Produces a log line like
/// <br>
/// ```[2026-10-17 09:15:02.123456] [error] disk full```
/// <br>
/// or, with a custom template, the template with all placeholders substituted,
/// followed by the indented context (if `append_context` is set and the context is not empty)
/// and a line break.
pub(crate) fn format_message(
    template: Option<&str>,
    append_context: bool,
    line: &LineSpec,
) -> String {
    let mut message = match template {
        Some(template) => substitute(template, line),
        None => format!(
            "[{}] [{}] {}",
            line.timestamp,
            line.severity.as_str(),
            line.message
        ),
    };
    if append_context && !line.context.is_empty() {
        message.push('\n');
        message.push_str(&indent(&context_to_string(line.context)));
    }
    message.push('\n');
    message
}

// Single pass over the template: substituted values are copied verbatim and never
// scanned again, so placeholders inside a message or a context survive.
fn substitute(template: &str, line: &LineSpec) -> String {
    let mut result = String::with_capacity(template.len() + line.message.len());
    let mut rest = template;
    while let Some(pos) = rest.find('{') {
        result.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match PLACEHOLDERS.iter().find(|ph| rest.starts_with(**ph)) {
            Some(ph) => {
                push_value(&mut result, ph, line);
                rest = &rest[ph.len()..];
            }
            None => {
                result.push('{');
                rest = &rest[1..];
            }
        }
    }
    result.push_str(rest);
    result
}

const PLACEHOLDERS: [&str; 6] = [
    PH_DATE,
    PH_LEVEL,
    PH_LEVEL_PADDING,
    PH_PRIORITY,
    PH_MESSAGE,
    PH_CONTEXT,
];

fn push_value(result: &mut String, placeholder: &str, line: &LineSpec) {
    let name = line.severity.as_str();
    match placeholder {
        PH_DATE => result.push_str(line.timestamp),
        PH_LEVEL => result.push_str(&name.to_uppercase()),
        PH_LEVEL_PADDING => {
            result.push_str(&" ".repeat(LEVEL_WIDTH.saturating_sub(name.len())));
        }
        PH_PRIORITY => result.push_str(&line.severity.rank().to_string()),
        PH_MESSAGE => result.push_str(line.message),
        _ => result.push_str(&serde_json::to_string(line.context).unwrap_or_default()),
    }
}

/// Renders the context as a human readable, multi-line block.
///
/// Each top-level entry goes into its own block, starting with `key: `.
/// Sequences and mappings are spread over several lines with stable indentation,
/// strings are single-quoted and not escaped.
///
/// ```text
/// user: 'alice'
/// ids: [
///     1,
///     2,
/// ]
/// ```
#[must_use]
pub fn context_to_string(context: &Context) -> String {
    context
        .iter()
        .map(|(key, value)| format!("{key}: {}", render_value(value)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prefixes every line of the given string with four spaces.
#[must_use]
pub fn indent(s: &str) -> String {
    s.lines()
        .map(|line| format!("{INDENT}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("'{s}'"),
        Value::Array(items) if items.is_empty() => "[]".to_string(),
        Value::Array(items) => {
            let body = items
                .iter()
                .map(|item| format!("{},", render_value(item)))
                .collect::<Vec<_>>()
                .join("\n");
            format!("[\n{}\n]", indent(&body))
        }
        Value::Object(map) if map.is_empty() => "{}".to_string(),
        Value::Object(map) => {
            let body = map
                .iter()
                .map(|(key, item)| format!("{key}: {},", render_value(item)))
                .collect::<Vec<_>>()
                .join("\n");
            format!("{{\n{}\n}}", indent(&body))
        }
    }
}
