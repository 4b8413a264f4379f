//! General REPL commands (help, quit, style, color, watch, unwatch)

use crate::commands::{CommandContext, CommandResult};
use crate::interpreter::BUILTINS;
use colored::*;

/// Handle `help` command
pub fn cmd_help(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    print_help();
    CommandResult::Success
}

/// Handle `quit` or `exit` command
pub fn cmd_quit(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Exit
}

/// Handle `style [<hit> <rest>]` command
pub fn cmd_style(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!(
            "Hit: '{}'  Rest: '{}'",
            ctx.display.hit, ctx.display.rest
        ));
    }

    let chars: Vec<char> = args
        .split_whitespace()
        .filter_map(|part| {
            let mut it = part.chars();
            match (it.next(), it.next()) {
                (Some(c), None) => Some(c),
                _ => None,
            }
        })
        .collect();
    if chars.len() != 2 || args.split_whitespace().count() != 2 {
        return CommandResult::Error("Usage: style <hit-char> <rest-char>".to_string());
    }

    match ctx.display.set_style(chars[0], chars[1]) {
        Ok(()) => CommandResult::Message(format!("Style set to '{}' / '{}'", chars[0], chars[1])),
        Err(e) => CommandResult::Error(e),
    }
}

/// Handle `color [on|off]` command
pub fn cmd_color(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let enabled = match args {
        "" => {
            let state = if ctx.display.color { "on" } else { "off" };
            return CommandResult::Message(format!("Color is {}", state));
        }
        "on" => true,
        "off" => false,
        _ => return CommandResult::Error("Usage: color on|off".to_string()),
    };
    ctx.display.color = enabled;
    ctx.display.apply_color();
    CommandResult::Success
}

/// Handle `watch [file]` command
pub fn cmd_watch(args: &str, _ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error("Usage: watch <file>".to_string());
    }
    CommandResult::Watch(args.to_string())
}

/// Handle `unwatch <file>` command
pub fn cmd_unwatch(args: &str, _ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error("Usage: unwatch <file>".to_string());
    }
    CommandResult::Unwatch(args.to_string())
}

/// Print help information
fn print_help() {
    println!("{}", "🥁 Pulse Help".bold());
    println!("{}", "=============".bold());
    println!();
    println!("{}", "Rhythms:".green());
    println!("  {}            - 3 onsets over 8 pulses", "euclid(3, 8)".cyan());
    println!("  {}        - Rotated by 2", "euclid(5, 8, 2)".cyan());
    println!("  {}    - Read over 12 steps (padding)", "euclid(5, 8, 0, 12)".cyan());
    println!("  {}                  - Shorthand for euclid", "(3, 8)".cyan());
    println!("  {}      - Bind a name", "let kick = (3, 8)".cyan());
    println!();
    println!("{}", "Functions:".green());
    for (signature, description) in BUILTINS {
        println!("  {:<34} - {}", signature.cyan(), description);
    }
    println!();
    println!("{}", "Examples:".green());
    println!("  pulse> {}", "(5, 8)".cyan());
    println!("  x.x.xx.x  E(5,8)");
    println!();
    println!("  pulse> {}", "rotate(resize((5, 8), 12), 8)".cyan());
    println!("  ....x.x.xx.x  E(5,8,8,12)");
    println!();
    println!("  pulse> {}", "at((3, 8), 3)".cyan());
    println!("  hit");
    println!();
    println!("{}", "Commands:".green());
    println!(
        "  {} - Hit or rest at a cursor, or a range",
        "query <rhythm> <cursor> [<end>]".cyan()
    );
    println!("  {}                   - List bound patterns", "list".cyan());
    println!("  {}                  - Remove all bindings", "clear".cyan());
    println!("  {}            - Run a pattern file", "load <file>".cyan());
    println!("  {}           - Re-run a file on every change", "watch <file>".cyan());
    println!("  {}         - Stop watching a file", "unwatch <file>".cyan());
    println!("  {}   - Display characters", "style <hit> <rest>".cyan());
    println!("  {}         - Toggle colored output", "color on|off".cyan());
    println!("  {}                   - Show this help", "help".bright_green());
    println!("  {}                   - Exit the REPL", "quit".bright_red());
}
