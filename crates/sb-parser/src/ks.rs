use sb_core::{BranchArm, ChoiceEntry, Op};
use serde_json::Value as JsonValue;

use crate::value::{jump_target, optional_field, seq_text, sub_command, text_field};

/// Decodes a `ks` instruction list. Instructions are quads
/// `[opcode, seq, subop, args]`; anything unrecognized decodes to nothing.
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

    let seq = seq_text(parts.get(1));
    let args = parts.get(3);

    match opcode {
        0 => ops.push(Op::Label {
            seq,
            id: text_field(args, "id"),
            title: optional_field(args, "title"),
        }),
        1 => ops.push(Op::Jump {
            seq,
            to: jump_target(args),
        }),
        4 => match sub_command(args) {
            "npc" => ops.push(Op::SetSpeaker {
                name: text_field(args, "id"),
            }),
            "vo" => ops.push(Op::SetVoice {
                cue: text_field(args, "storage"),
            }),
            "selstart" => ops.push(Op::ChoiceReset),
            "selbutton" => ops.push(Op::ChoicePush(ChoiceEntry {
                text: None,
                to: jump_target(args),
            })),
            "selend" => {
                // Closing a choice menu also reopens the dialogue window,
                // so one instruction yields both ops.
                ops.push(Op::ChoiceCommit { seq: seq.clone() });
                ops.push(Op::DialogueMarker { seq });
            }
            "dia" => ops.push(Op::DialogueMarker { seq }),
            _ => {}
        },
        5 => ops.push(Op::Line {
            seq,
            text: text_field(args, "text"),
        }),
        50 => ops.push(Op::Expression {
            seq,
            code: text_field(args, "exp"),
        }),
        51 => ops.push(Op::Branches {
            seq,
            arms: branch_arms(args),
        }),
        _ => {}
    }
}

fn branch_arms(args: Option<&JsonValue>) -> Vec<BranchArm> {
    let Some(pairs) = args
        .and_then(|value| value.get(""))
        .and_then(JsonValue::as_array)
    else {
        return Vec::new();
    };

    let mut arms = Vec::new();
    for pair in pairs {
        let Some(pair) = pair.as_array() else {
            continue;
        };
        let cond = pair
            .first()
            .and_then(JsonValue::as_str)
            .unwrap_or_default()
            .to_string();
        let body = pair
            .get(1)
            .and_then(JsonValue::as_array)
            .map(|nested| decode_ops(nested))
            .unwrap_or_default();
        arms.push(BranchArm { cond, body });
    }
    arms
}
