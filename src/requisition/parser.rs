use crate::requisition::command::{Arguments, Command};
use crate::util::error::CmdlineError;

/// Splits input on whitespace, honoring single quotes, double quotes and
/// backslash escapes. Quotes may start mid-token (`--x="a b"` is one token).
pub fn tokenize(input: &str) -> Result<Vec<String>, CmdlineError> {
    let mut tokens = vec![];
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        match (quote, ch) {
            (Some(q), ch) if ch == q => quote = None,
            (Some('"') | None, '\\') => {
                in_token = true;
                match chars.next() {
                    Some(escaped) => current.push(escaped),
                    None => current.push('\\'),
                }
            }
            (Some(_), ch) => current.push(ch),
            (None, '"' | '\'') => {
                in_token = true;
                quote = Some(ch);
            }
            (None, ch) if ch.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            (None, ch) => {
                in_token = true;
                current.push(ch);
            }
        }
    }

    if quote.is_some() {
        return Err(CmdlineError::UnterminatedQuote);
    }
    if in_token {
        tokens.push(current);
    }

    Ok(tokens)
}

/// Maps positional tokens onto the command's parameters.
pub fn assign(command: &Command, tokens: &[String]) -> Result<Arguments, CmdlineError> {
    let mut arguments = Arguments::default();
    let mut remaining = tokens;

    for param in &command.params {
        let raw = if param.greedy && !remaining.is_empty() {
            let joined = remaining.join(" ");
            remaining = &[];
            Some(joined)
        } else if let Some((first, rest)) = remaining.split_first() {
            remaining = rest;
            Some(first.clone())
        } else {
            None
        };

        match (raw, &param.default) {
            (Some(raw), _) => arguments.insert(&param.name, param.convert(&raw)?),
            (None, Some(default)) if default.is_empty() => {}
            (None, Some(default)) => arguments.insert(&param.name, param.convert(default)?),
            (None, None) => {
                return Err(CmdlineError::MissingArgument {
                    command: command.name.clone(),
                    param: param.name.clone(),
                })
            }
        }
    }

    if !remaining.is_empty() {
        return Err(CmdlineError::TooManyArguments {
            command: command.name.clone(),
            extra: remaining.join(" "),
        });
    }

    Ok(arguments)
}
