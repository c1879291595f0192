use serde::Serialize;

use crate::requisition::command::{Command, ParamKind};

/// What the hint panel shows for the current input. Serialized into the
/// hint template, so field names are part of the template contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Hint {
    pub typed: String,
    pub command: Option<CommandHint>,
    pub completions: Vec<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandHint {
    pub name: String,
    pub usage: String,
    pub description: String,
    pub params: Vec<ParamHint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamHint {
    pub name: String,
    pub description: String,
    pub kind: ParamKind,
    pub required: bool,
    /// Set on the parameter the cursor is currently filling.
    pub current: bool,
}

impl CommandHint {
    pub fn new(command: &Command, filled: usize) -> Self {
        let last = command.params.len().saturating_sub(1);
        let params = command
            .params
            .iter()
            .enumerate()
            .map(|(idx, param)| ParamHint {
                name: param.name.clone(),
                description: param.description.clone(),
                kind: param.kind,
                required: param.is_required(),
                current: idx == filled || (param.greedy && idx == last && filled > idx),
            })
            .collect();

        Self {
            name: command.name.clone(),
            usage: command.usage(),
            description: command.description.clone(),
            params,
        }
    }
}
