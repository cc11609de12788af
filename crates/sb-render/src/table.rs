use sb_core::{ChoiceEntry, CondKind, Op, Row, ScriptBookError};

use crate::html;

/// Nesting limit for `ks` conditional blocks. Real scripts stay in single
/// digits; the bound exists so a cyclic or hostile dump fails instead of
/// overflowing the stack.
const MAX_BRANCH_DEPTH: usize = 64;

const TAG_LABEL: &str = "label";
const TAG_JUMP: &str = "jump";
const TAG_CHOICE: &str = "choice";
const TAG_EXPR: &str = "expr";
const TAG_COND: &str = "cond";

/// Speaker and voice cue waiting for the next dialogue line. Owned by one
/// interpretation pass; consumed and cleared by the line that lands.
#[derive(Debug, Default)]
struct PendingLine {
    speaker: Option<String>,
    voice: Option<String>,
}

/// Renders one decoded script as transcript table markup.
pub fn render_table(ops: &[Op], storage: &str) -> Result<String, ScriptBookError> {
    render_table_at(ops, storage, 0)
}

fn render_table_at(ops: &[Op], storage: &str, depth: usize) -> Result<String, ScriptBookError> {
    if depth > MAX_BRANCH_DEPTH {
        return Err(ScriptBookError::with_storage(
            "BRANCH_DEPTH_EXCEEDED",
            format!("Conditional blocks nest deeper than {}.", MAX_BRANCH_DEPTH),
            storage,
        ));
    }

    let rows = collect_rows(ops, storage, depth)?;

    let mut table = String::from("<table>");
    for row in &rows {
        table.push_str("<tr><td>");
        table.push_str(&row.seq);
        table.push_str("</td><td>");
        table.push_str(&row.tag);
        table.push_str("</td><td>");
        table.push_str(&row.body);
        table.push_str("</td></tr>");
    }
    table.push_str("</table>");
    Ok(table)
}

fn collect_rows(ops: &[Op], storage: &str, depth: usize) -> Result<Vec<Row>, ScriptBookError> {
    let mut rows = Vec::new();
    let mut pending = PendingLine::default();
    let mut choices: Vec<ChoiceEntry> = Vec::new();

    for op in ops {
        match op {
            Op::Label { seq, id, title } => rows.push(Row::new(
                seq.clone(),
                TAG_LABEL,
                html::label_markup(storage, id, title.as_deref()),
            )),
            Op::Jump { seq, to } => rows.push(Row::new(
                seq.clone(),
                TAG_JUMP,
                html::jump_markup(storage, to),
            )),
            Op::SetSpeaker { name } => pending.speaker = Some(name.clone()),
            Op::SetVoice { cue } => pending.voice = Some(cue.clone()),
            Op::ChoiceReset => choices.clear(),
            Op::ChoicePush(entry) => choices.push(entry.clone()),
            Op::ChoiceCommit { seq } => rows.push(Row::new(
                seq.clone(),
                TAG_CHOICE,
                html::choices_markup(storage, &choices),
            )),
            Op::DialogueMarker { seq } => {
                rows.push(Row::new(seq.clone(), "", html::DIALOGUE_MARKER))
            }
            Op::Line { seq, text } => {
                let speaker_cell = pending
                    .speaker
                    .as_deref()
                    .map(html::speaker_markup)
                    .unwrap_or_default();
                let body = html::dialogue_markup(text, pending.voice.as_deref());
                rows.push(Row::new(seq.clone(), speaker_cell, body));
                pending = PendingLine::default();
            }
            Op::Expression { seq, code } => rows.push(Row::new(
                seq.clone(),
                TAG_EXPR,
                html::expression_markup(code),
            )),
            Op::Branches { seq, arms } => {
                for arm in arms {
                    let nested = render_table_at(&arm.body, storage, depth + 1)?;
                    rows.push(Row::new(
                        seq.clone(),
                        TAG_COND,
                        format!("{}<br/>{}", html::expression_markup(&arm.cond), nested),
                    ));
                }
            }
            Op::Cond { kind, expr } => {
                let body = match kind {
                    CondKind::Endif => String::new(),
                    CondKind::If | CondKind::Elif => html::expression_markup(expr),
                };
                rows.push(Row::new("", kind.tag(), body));
            }
        }
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sb_core::{BranchArm, JumpTarget};

    fn line(seq: &str, text: &str) -> Op {
        Op::Line {
            seq: seq.to_string(),
            text: text.to_string(),
        }
    }

    fn row_count(table: &str) -> usize {
        table.matches("<tr>").count()
    }

    #[test]
    fn pending_speaker_attaches_to_next_line_only() {
        let ops = vec![
            Op::SetSpeaker {
                name: "Alice".to_string(),
            },
            line("1", "hi"),
            line("2", "bye"),
        ];

        let table = render_table(&ops, "a.ks").expect("render");
        assert!(table.contains("<td><div class=\"npc\">Alice</div></td>"));
        assert!(table.contains("<tr><td>2</td><td></td><td><div class=\"text\">bye</div>"));
        assert_eq!(table.matches("npc").count(), 1);
    }

    #[test]
    fn pending_voice_is_consumed_and_cleared_even_for_empty_lines() {
        let ops = vec![
            Op::SetVoice {
                cue: "yui_0001".to_string(),
            },
            line("1", ""),
            line("2", "quiet"),
        ];

        let table = render_table(&ops, "a.ks").expect("render");
        assert_eq!(table.matches("class=\"text vo\"").count(), 1);
        assert!(table.contains("<div class=\"text\">quiet</div>"));
    }

    #[test]
    fn choice_accumulation_emits_one_row_in_push_order() {
        let first = ChoiceEntry {
            text: None,
            to: JumpTarget {
                storage: None,
                target: "a".to_string(),
            },
        };
        let second = ChoiceEntry {
            text: None,
            to: JumpTarget {
                storage: None,
                target: "b".to_string(),
            },
        };
        let ops = vec![
            Op::ChoiceReset,
            Op::ChoicePush(first),
            Op::ChoicePush(second),
            Op::ChoiceCommit {
                seq: "5".to_string(),
            },
        ];

        let table = render_table(&ops, "x.ks").expect("render");
        assert_eq!(row_count(&table), 1);
        let a = table.find("#x.ks-a").expect("first choice link");
        let b = table.find("#x.ks-b").expect("second choice link");
        assert!(a < b);
    }

    #[test]
    fn bare_choice_commit_emits_an_empty_choice_row() {
        let ops = vec![Op::ChoiceCommit {
            seq: "1".to_string(),
        }];
        let table = render_table(&ops, "x.ks").expect("render");
        assert!(table.contains("<tr><td>1</td><td>choice</td><td></td></tr>"));
    }

    #[test]
    fn branch_arms_render_in_isolation() {
        let ops = vec![Op::Branches {
            seq: "7".to_string(),
            arms: vec![
                BranchArm {
                    cond: "flag > 0".to_string(),
                    body: vec![line("8", "sunny")],
                },
                BranchArm {
                    cond: "flag <= 0".to_string(),
                    body: vec![line("9", "rainy")],
                },
            ],
        }];

        let table = render_table(&ops, "w.ks").expect("render");
        assert_eq!(table.matches("<td>cond</td>").count(), 2);

        let arm_split = table.find("flag &lt;= 0").expect("second arm");
        let (first_arm, second_arm) = table.split_at(arm_split);
        assert!(first_arm.contains("sunny"));
        assert!(!first_arm.contains("rainy"));
        assert!(second_arm.contains("rainy"));
        assert!(!second_arm.contains("sunny"));
    }

    #[test]
    fn branch_conditions_are_escaped() {
        let ops = vec![Op::Branches {
            seq: "1".to_string(),
            arms: vec![BranchArm {
                cond: "<script>bad()</script>".to_string(),
                body: Vec::new(),
            }],
        }];

        let table = render_table(&ops, "w.ks").expect("render");
        assert!(!table.contains("<script>"));
    }

    #[test]
    fn flat_conditionals_keep_their_tags() {
        let ops = vec![
            Op::Cond {
                kind: CondKind::If,
                expr: "a == 1".to_string(),
            },
            Op::Cond {
                kind: CondKind::Endif,
                expr: String::new(),
            },
        ];

        let table = render_table(&ops, "m.sc").expect("render");
        assert!(table.contains("<td>IF</td>"));
        assert!(table.contains("<tr><td></td><td>ENDIF</td><td></td></tr>"));
    }

    #[test]
    fn branch_nesting_past_the_depth_bound_fails() {
        let mut ops = vec![line("1", "deepest")];
        for _ in 0..=MAX_BRANCH_DEPTH {
            ops = vec![Op::Branches {
                seq: "1".to_string(),
                arms: vec![BranchArm {
                    cond: "x".to_string(),
                    body: ops,
                }],
            }];
        }

        let error = render_table(&ops, "deep.ks").expect_err("should exceed depth");
        assert_eq!(error.code, "BRANCH_DEPTH_EXCEEDED");
        assert_eq!(error.storage.as_deref(), Some("deep.ks"));
    }

    #[test]
    fn branch_nesting_within_the_bound_renders() {
        let mut ops = vec![line("1", "deepest")];
        for _ in 0..MAX_BRANCH_DEPTH {
            ops = vec![Op::Branches {
                seq: "1".to_string(),
                arms: vec![BranchArm {
                    cond: "x".to_string(),
                    body: ops,
                }],
            }];
        }

        let table = render_table(&ops, "deep.ks").expect("within bound");
        assert!(table.contains("deepest"));
    }
}
