use sb_core::{ChoiceEntry, CondKind, JumpTarget, Op};
use serde_json::Value as JsonValue;

use crate::value::{optional_field, seq_text, sub_command, text_field, text_value};

/// Converted assets from the engine's `.ks` era still name the old
/// extension in jump targets; anchors must resolve against the `.sc` ids.
const LEGACY_EXTENSION: &str = ".ks";

/// Decodes an `sc` instruction list. Instructions are
/// `[opcode, args, ...positional]` with positional meaning per opcode.
pub(crate) fn decode_ops(instructions: &[JsonValue]) -> Vec<Op> {
    let mut ops = Vec::new();
    for instruction in instructions {
        decode_instruction(instruction, &mut ops);
    }
    ops
}

fn decode_instruction(instruction: &JsonValue, ops: &mut Vec<Op>) {
    let Some(parts) = instruction.as_array() else {
        return;
    };
    let Some(opcode) = parts.first().and_then(JsonValue::as_i64) else {
        return;
    };

    let args = parts.get(1);

    match opcode {
        0 => ops.push(Op::Label {
            seq: String::new(),
            id: text_value(parts.get(2)),
            title: optional_field(args, "title"),
        }),
        8 => ops.push(Op::Line {
            seq: seq_text(parts.get(3)),
            text: text_value(parts.get(2)),
        }),
        60 => match sub_command(args) {
            "npc" => ops.push(Op::SetSpeaker {
                name: text_field(args, "id"),
            }),
            "vo" => ops.push(Op::SetVoice {
                cue: text_field(args, "storage"),
            }),
            "selstart" => ops.push(Op::ChoiceReset),
            "selbutton" => ops.push(Op::ChoicePush(ChoiceEntry {
                text: optional_field(args, "text"),
                to: normalized_target(args),
            })),
            "selend" => ops.push(Op::ChoiceCommit { seq: String::new() }),
            "showwd" => ops.push(Op::Line {
                seq: String::new(),
                text: text_field(args, "text"),
            }),
            _ => {}
        },
        63 => ops.push(Op::Cond {
            kind: CondKind::If,
            expr: text_value(parts.get(2)),
        }),
        64 => ops.push(Op::Cond {
            kind: CondKind::Elif,
            expr: text_value(parts.get(2)),
        }),
        65 => ops.push(Op::Cond {
            kind: CondKind::Endif,
            expr: String::new(),
        }),
        69 => ops.push(Op::Expression {
            seq: String::new(),
            code: text_value(parts.get(2)),
        }),
        201 => ops.push(Op::Jump {
            seq: String::new(),
            to: normalized_target(args),
        }),
        _ => {}
    }
}

fn normalized_target(args: Option<&JsonValue>) -> JumpTarget {
    let storage = optional_field(args, "storage")
        .map(|storage| storage.replacen(LEGACY_EXTENSION, ".sc", 1));
    JumpTarget {
        storage,
        target: text_field(args, "target"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ops(source: &str) -> Vec<Op> {
        let root = serde_json::from_str::<JsonValue>(source).expect("fixture json");
        decode_ops(root.as_array().expect("fixture array"))
    }

    #[test]
    fn decode_ops_reads_positional_label_and_line() {
        let decoded = ops(
            r#"[
                [0, {"title": "Opening"}, "start"],
                [8, {}, "good morning", "12"]
            ]"#,
        );

        assert_eq!(
            decoded,
            vec![
                Op::Label {
                    seq: String::new(),
                    id: "start".to_string(),
                    title: Some("Opening".to_string()),
                },
                Op::Line {
                    seq: "12".to_string(),
                    text: "good morning".to_string(),
                },
            ]
        );
    }

    #[test]
    fn decode_ops_maps_flat_conditionals_and_expression() {
        let decoded = ops(
            r#"[
                [63, {}, "flag >= 2"],
                [64, {}, "flag == 1"],
                [65, {}],
                [69, {}, "flag += 1"]
            ]"#,
        );

        assert_eq!(
            decoded,
            vec![
                Op::Cond {
                    kind: CondKind::If,
                    expr: "flag >= 2".to_string(),
                },
                Op::Cond {
                    kind: CondKind::Elif,
                    expr: "flag == 1".to_string(),
                },
                Op::Cond {
                    kind: CondKind::Endif,
                    expr: String::new(),
                },
                Op::Expression {
                    seq: String::new(),
                    code: "flag += 1".to_string(),
                },
            ]
        );
    }

    #[test]
    fn decode_ops_rewrites_legacy_extension_in_jump_storages() {
        let decoded = ops(r#"[[201, {"target": "ending", "storage": "finale.ks"}]]"#);

        assert_eq!(
            decoded,
            vec![Op::Jump {
                seq: String::new(),
                to: JumpTarget {
                    storage: Some("finale.sc".to_string()),
                    target: "ending".to_string(),
                },
            }]
        );
    }

    #[test]
    fn decode_ops_keeps_choice_display_text_and_rewrites_targets() {
        let decoded = ops(
            r#"[
                [60, {"": "selstart"}],
                [60, {"": "selbutton", "text": "Go home", "target": "home", "storage": "route_a.ks"}],
                [60, {"": "selend"}]
            ]"#,
        );

        assert_eq!(
            decoded,
            vec![
                Op::ChoiceReset,
                Op::ChoicePush(ChoiceEntry {
                    text: Some("Go home".to_string()),
                    to: JumpTarget {
                        storage: Some("route_a.sc".to_string()),
                        target: "home".to_string(),
                    },
                }),
                Op::ChoiceCommit { seq: String::new() },
            ]
        );
    }

    #[test]
    fn decode_ops_showwd_is_a_full_dialogue_line() {
        let decoded = ops(
            r#"[
                [60, {"": "npc", "id": "Rin"}],
                [60, {"": "showwd", "text": "over here"}]
            ]"#,
        );

        assert_eq!(
            decoded,
            vec![
                Op::SetSpeaker {
                    name: "Rin".to_string(),
                },
                Op::Line {
                    seq: String::new(),
                    text: "over here".to_string(),
                },
            ]
        );
    }

    #[test]
    fn decode_ops_skips_unknown_opcodes() {
        let decoded = ops(r#"[[7, {}], [500, {}, "x"], [8, {}, "kept", "1"]]"#);
        assert_eq!(
            decoded,
            vec![Op::Line {
                seq: "1".to_string(),
                text: "kept".to_string(),
            }]
        );
    }
}
