use serde::{Deserialize, Serialize};

/// Script container dialect. `Ks` scripts are UTF-8 with quad-encoded
/// instructions; `Sc` scripts are UTF-16LE with positional instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Ks,
    Sc,
}

impl Dialect {
    pub fn storage_extension(&self) -> &'static str {
        match self {
            Dialect::Ks => ".ks",
            Dialect::Sc => ".sc",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Ks => "ks",
            Dialect::Sc => "sc",
        }
    }
}

/// Destination of a jump or choice. `storage: None` means the target label
/// lives in the script currently being rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumpTarget {
    pub storage: Option<String>,
    pub target: String,
}

/// One selectable option accumulated between `selstart` and `selend`.
/// `text` is the display prefix the `sc` dialect puts before the link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceEntry {
    pub text: Option<String>,
    pub to: JumpTarget,
}

/// One `(condition, nested instructions)` arm of a `ks` conditional block.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchArm {
    pub cond: String,
    pub body: Vec<Op>,
}

/// Flat conditional tag used by the `sc` dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CondKind {
    If,
    Elif,
    Endif,
}

impl CondKind {
    pub fn tag(&self) -> &'static str {
        match self {
            CondKind::If => "IF",
            CondKind::Elif => "ELIF",
            CondKind::Endif => "ENDIF",
        }
    }
}

/// A decoded instruction. Unrecognized opcodes and sub-commands never reach
/// this type; the decoders drop them at the input boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Label {
        seq: String,
        id: String,
        title: Option<String>,
    },
    Jump {
        seq: String,
        to: JumpTarget,
    },
    SetSpeaker {
        name: String,
    },
    SetVoice {
        cue: String,
    },
    ChoiceReset,
    ChoicePush(ChoiceEntry),
    ChoiceCommit {
        seq: String,
    },
    DialogueMarker {
        seq: String,
    },
    Line {
        seq: String,
        text: String,
    },
    Expression {
        seq: String,
        code: String,
    },
    Branches {
        seq: String,
        arms: Vec<BranchArm>,
    },
    Cond {
        kind: CondKind,
        expr: String,
    },
}

/// One transcript table row: display marker, kind cell, HTML body.
/// Dialogue rows carry the speaker markup in the kind cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub seq: String,
    pub tag: String,
    pub body: String,
}

impl Row {
    pub fn new(seq: impl Into<String>, tag: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            seq: seq.into(),
            tag: tag.into(),
            body: body.into(),
        }
    }
}
