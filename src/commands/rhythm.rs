//! Pattern commands (query, list, clear, load)

use crate::commands::{CommandContext, CommandResult};
use crate::display::MAX_STEPS;
use crate::interpreter::Value;
use anyhow::{anyhow, Result};
use colored::*;
use pulse_core::parser::parse_expression;
use pulse_core::Rhythm;

/// Split `<rhythm> <cursor> [<end>]` into the rhythm source and the cursors.
/// The rhythm may itself contain spaces, e.g. `(5, 8) 3`.
fn split_query_args(args: &str) -> Option<(&str, i64, Option<i64>)> {
    let (rest, last) = args.rsplit_once(char::is_whitespace)?;
    let last: i64 = last.parse().ok()?;

    if let Some((head, middle)) = rest.trim_end().rsplit_once(char::is_whitespace) {
        if let Ok(start) = middle.parse::<i64>() {
            if !head.trim().is_empty() {
                return Some((head.trim(), start, Some(last)));
            }
        }
    }
    let rest = rest.trim();
    if rest.is_empty() {
        return None;
    }
    Some((rest, last, None))
}

fn resolve_rhythm(source: &str, ctx: &CommandContext) -> Result<Rhythm> {
    let expr = parse_expression(source)?;
    match ctx.interpreter.eval(&expr)? {
        Value::Rhythm(r) => Ok(r),
        other => Err(anyhow!("'{}' is not a rhythm (got {})", source, other)),
    }
}

/// Handle `query <rhythm> <cursor> [<end>]`
///
/// A single cursor answers hit or rest; a range renders `[start, end)`,
/// cut short after `MAX_STEPS` cursors.
pub fn cmd_query(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let Some((source, start, end)) = split_query_args(args) else {
        return CommandResult::Error("Usage: query <rhythm> <cursor> [<end>]".to_string());
    };
    let rhythm = match resolve_rhythm(source, ctx) {
        Ok(r) => r,
        Err(e) => return CommandResult::Error(e.to_string()),
    };

    match end {
        None => {
            let step = ctx.display.describe(&Value::Step(rhythm.is_hit(start)));
            CommandResult::Message(format!("cursor {}: {}", start, step))
        }
        Some(end) if end <= start => {
            CommandResult::Error(format!("Empty cursor range {}..{}", start, end))
        }
        Some(end) => {
            let mut steps: String = (start..end)
                .take(MAX_STEPS)
                .map(|c| {
                    if rhythm.is_hit(c) {
                        ctx.display.hit
                    } else {
                        ctx.display.rest
                    }
                })
                .collect();
            let hidden = end as i128 - start as i128 - MAX_STEPS as i128;
            if hidden > 0 {
                steps.push_str(&format!("…(+{})", hidden));
            }
            CommandResult::Message(format!("{}..{}: {}", start, end, steps))
        }
    }
}

/// Handle `list`
pub fn cmd_list(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Message(ctx.list_bindings())
}

/// Handle `clear`
pub fn cmd_clear(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    ctx.interpreter.environment.clear();
    CommandResult::Message("Cleared all patterns".to_string())
}

/// Handle `load <file>`
pub fn cmd_load(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error("Usage: load <file>".to_string());
    }
    match ctx.load_file(args) {
        Ok(values) => {
            let mut out = format!(
                "{} Loaded {} ({} patterns)",
                "✓".bright_green(),
                args,
                ctx.interpreter.environment.len()
            );
            for value in &values {
                out.push('\n');
                out.push_str(&ctx.display.describe(value));
            }
            CommandResult::Message(out)
        }
        Err(e) => CommandResult::Error(e.to_string()),
    }
}
