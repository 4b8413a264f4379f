//! Command registry for REPL commands
//!
//! Provides a clean, extensible pattern for handling REPL commands.

pub mod general;
pub mod rhythm;

use crate::display::DisplayConfig;
use crate::interpreter::{Interpreter, Value};
use anyhow::Result;
use pulse_core::parser::{parse_statements, Program};

/// Result of executing a command
#[derive(Debug, PartialEq)]
pub enum CommandResult {
    /// Command executed successfully, continue REPL
    Success,
    /// Command executed, show this message
    Message(String),
    /// Exit the REPL
    Exit,
    /// Not a command, try evaluating as statements
    NotACommand,
    /// Error occurred
    Error(String),
    /// Watch a file for changes
    Watch(String),
    /// Stop watching a file
    Unwatch(String),
}

/// State shared by command handlers
pub struct CommandContext {
    pub interpreter: Interpreter,
    pub display: DisplayConfig,
}

impl CommandContext {
    pub fn new(display: DisplayConfig) -> Self {
        Self {
            interpreter: Interpreter::new(),
            display,
        }
    }

    /// Run source text, returning the value of every bare expression in order
    pub fn run_source(&mut self, source: &str) -> Result<Vec<Value>> {
        let program = parse_statements(source)?;
        run_collecting(&mut self.interpreter, &program)
    }

    /// Run a script file from scratch, replacing earlier bindings.
    ///
    /// The script runs in a fresh interpreter; on a read, parse or runtime
    /// error the current bindings are left untouched.
    pub fn load_file(&mut self, path: &str) -> Result<Vec<Value>> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path, e))?;
        let program = parse_statements(&source)?;

        let mut fresh = Interpreter::new();
        let values = run_collecting(&mut fresh, &program)?;
        self.interpreter = fresh;

        tracing::info!(
            path,
            bindings = self.interpreter.environment.len(),
            "loaded script"
        );
        Ok(values)
    }

    /// Current bindings, one per line
    pub fn list_bindings(&self) -> String {
        if self.interpreter.environment.is_empty() {
            return "No patterns defined".to_string();
        }
        self.interpreter
            .environment
            .iter()
            .map(|(name, value)| format!("  {:<12} {}", name, self.display.describe(value)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Run every statement, keeping the values of bare expressions
fn run_collecting(interpreter: &mut Interpreter, program: &Program) -> Result<Vec<Value>> {
    let mut values = Vec::new();
    for stmt in &program.statements {
        if let Some(value) = interpreter.run_statement(stmt)? {
            values.push(value);
        }
    }
    Ok(values)
}

/// A command handler function
pub type CommandHandler = fn(&str, &mut CommandContext) -> CommandResult;

/// Registry of available commands
pub struct CommandRegistry {
    /// Commands indexed by their prefix, longest first
    commands: Vec<(String, CommandHandler)>,
}

impl CommandRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Register a command with its prefix
    pub fn register(&mut self, prefix: &str, handler: CommandHandler) {
        self.commands.push((prefix.to_string(), handler));
        // Sort by prefix length descending for longest-match-first
        self.commands.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    }

    /// Execute a command, returning NotACommand if no match found
    pub fn execute(&self, input: &str, ctx: &mut CommandContext) -> CommandResult {
        for (prefix, handler) in &self.commands {
            if input == prefix || input.starts_with(&format!("{} ", prefix)) {
                let args = input[prefix.len()..].trim();
                tracing::debug!(command = %prefix, args, "dispatch");
                return handler(args, ctx);
            }
        }
        CommandResult::NotACommand
    }

    /// Get all registered command prefixes
    pub fn list_commands(&self) -> Vec<&str> {
        self.commands.iter().map(|(p, _)| p.as_str()).collect()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a fully populated command registry with all built-in commands
pub fn create_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    registry.register("query", rhythm::cmd_query);
    registry.register("list", rhythm::cmd_list);
    registry.register("clear", rhythm::cmd_clear);
    registry.register("load", rhythm::cmd_load);

    registry.register("style", general::cmd_style);
    registry.register("color", general::cmd_color);
    registry.register("help", general::cmd_help);
    registry.register("quit", general::cmd_quit);
    registry.register("exit", general::cmd_quit);
    registry.register("watch", general::cmd_watch);
    registry.register("unwatch", general::cmd_unwatch);

    registry
}
