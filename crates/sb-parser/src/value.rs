use sb_core::JumpTarget;
use serde_json::Value as JsonValue;

/// Display text of a sequence-marker slot: strings pass through, numbers
/// render decimally, anything else is empty.
pub(crate) fn seq_text(value: Option<&JsonValue>) -> String {
    text_value(value)
}

pub(crate) fn text_value(value: Option<&JsonValue>) -> String {
    match value {
        Some(JsonValue::String(text)) => text.clone(),
        Some(JsonValue::Number(number)) => number.to_string(),
        _ => String::new(),
    }
}

/// String field of an argument object, empty when missing.
pub(crate) fn text_field(args: Option<&JsonValue>, key: &str) -> String {
    text_value(args.and_then(|value| value.get(key)))
}

/// String field of an argument object, `None` when missing or empty.
pub(crate) fn optional_field(args: Option<&JsonValue>, key: &str) -> Option<String> {
    let text = text_field(args, key);
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// The sub-command tag stored under the reserved empty-string key of
/// "call" argument objects.
pub(crate) fn sub_command<'a>(args: Option<&'a JsonValue>) -> &'a str {
    args.and_then(|value| value.get(""))
        .and_then(JsonValue::as_str)
        .unwrap_or_default()
}

pub(crate) fn jump_target(args: Option<&JsonValue>) -> JumpTarget {
    JumpTarget {
        storage: optional_field(args, "storage"),
        target: text_field(args, "target"),
    }
}
