use std::sync::OnceLock;

use regex::{Captures, Regex};
use sb_assets::voice_asset_path;
use sb_core::{ChoiceEntry, JumpTarget};

/// Fixed marker rendered where the script opens a dialogue window.
pub const DIALOGUE_MARKER: &str = "<div class=\"dia\">dialogue begins</div>";

/// Escapes user-authored text for embedding in the transcript. An `&`
/// already introducing a named or numeric entity is left alone.
pub fn escape_html(text: &str) -> String {
    let escaped = amp_regex().replace_all(text, |caps: &Captures<'_>| {
        if caps.get(1).is_some() {
            caps[0].to_string()
        } else {
            "&amp;".to_string()
        }
    });

    escaped
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\'', "&#39;")
        .replace('"', "&quot;")
}

fn amp_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"&(#?\w+;)?").expect("amp escape regex must compile"))
}

/// Document-fragment identifier for a label. The wildcard character is
/// legal in target ids but not in fragment names, so it becomes a period.
pub fn anchor_name(storage: &str, target: &str) -> String {
    format!("{}-{}", storage, target).replace('*', ".")
}

pub fn label_markup(storage: &str, id: &str, title: Option<&str>) -> String {
    let text = match title {
        Some(title) if !title.is_empty() => format!("({}) {} {}", storage, id, title),
        _ => format!("({}) {}", storage, id),
    };
    format!("<a name=\"{}\">{}</a>", anchor_name(storage, id), text)
}

pub fn jump_markup(storage: &str, to: &JumpTarget) -> String {
    let anchor_storage = to.storage.as_deref().unwrap_or(storage);
    let text_storage = match to.storage.as_deref() {
        Some(target_storage) => target_storage.to_string(),
        None => format!("({})", storage),
    };
    format!(
        "<a href=\"#{}\">{} {}</a>",
        anchor_name(anchor_storage, &to.target),
        text_storage,
        to.target
    )
}

pub fn choices_markup(storage: &str, choices: &[ChoiceEntry]) -> String {
    choices
        .iter()
        .map(|choice| {
            let link = jump_markup(storage, &choice.to);
            match choice.text.as_deref() {
                Some(text) => format!("{} {}", text, link),
                None => link,
            }
        })
        .collect::<Vec<_>>()
        .join("<br/>")
}

pub fn expression_markup(code: &str) -> String {
    format!("<div class=\"exp\">{}</div>", escape_html(code))
}

pub fn speaker_markup(name: &str) -> String {
    format!("<div class=\"npc\">{}</div>", name)
}

/// Dialogue body cell. Voiced lines are clickable and styled `vo`; the
/// click handler receives the hashed audio path.
pub fn dialogue_markup(text: &str, voice: Option<&str>) -> String {
    match voice {
        Some(cue) => format!(
            "<div class=\"text vo\" onclick=\"vo('{}')\">{}</div>",
            voice_asset_path(cue),
            text
        ),
        None => format!("<div class=\"text\">{}</div>", text),
    }
}
