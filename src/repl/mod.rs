//! REPL (Read-Eval-Print Loop) for the pattern language

use crate::commands::{create_registry, CommandContext, CommandRegistry, CommandResult};
use crate::display::DisplayConfig;
use crate::repl::watcher::ScriptWatcher;
use anyhow::Result;
use colored::*;
use crossbeam_channel::{unbounded, Receiver, Sender};
use notify::Event;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RustylineResult};
use std::path::Path;
use std::thread;

pub mod watcher;

/// Types of events the REPL loop handles
enum ReplEvent {
    Input(Result<String, ReadlineError>),
}

/// What the loop should do after handling a line
#[derive(Debug, PartialEq)]
enum Flow {
    Continue,
    Exit,
}

/// Interactive REPL for the pattern language
pub struct Repl {
    editor: Option<DefaultEditor>,
    ctx: CommandContext,

    // Event channels
    tx_input: Sender<ReplEvent>,
    rx_input: Receiver<ReplEvent>,
    tx_watcher: Sender<notify::Result<Event>>,
    rx_watcher: Receiver<notify::Result<Event>>,

    // File watcher, created on first `watch`
    watcher: Option<ScriptWatcher>,
}

impl Repl {
    /// Create a new REPL instance
    pub fn new(display: DisplayConfig) -> RustylineResult<Self> {
        let editor = DefaultEditor::new()?;
        let (tx_input, rx_input) = unbounded();
        let (tx_watcher, rx_watcher) = unbounded();

        Ok(Repl {
            editor: Some(editor),
            ctx: CommandContext::new(display),
            tx_input,
            rx_input,
            tx_watcher,
            rx_watcher,
            watcher: None,
        })
    }

    /// Parse and run a line of statements, printing each expression value
    fn evaluate(&mut self, line: &str) {
        match self.ctx.run_source(line) {
            Ok(values) => {
                for value in values {
                    println!("{}", self.ctx.display.describe(&value));
                }
            }
            Err(e) => println!("{} {}", "Error:".bright_red().bold(), e.to_string().red()),
        }
    }

    fn start_watching(&mut self, path: &str) {
        if self.watcher.is_none() {
            match ScriptWatcher::new(self.tx_watcher.clone()) {
                Ok(w) => self.watcher = Some(w),
                Err(e) => {
                    tracing::warn!(error = %e, "failed to create file watcher");
                    println!("{} Failed to create watcher: {}", "Error:".red(), e);
                    return;
                }
            }
        }

        // Run it once now so the bindings exist before the first change
        self.reload(Path::new(path));

        if let Some(w) = &mut self.watcher {
            match w.watch(path) {
                Ok(true) => {
                    tracing::info!(path, "watching script");
                    println!(
                        "{} Watching {} for changes...",
                        "👀".bright_cyan(),
                        path.bright_green()
                    );
                }
                Ok(false) => println!("Already watching {}", path),
                Err(e) => {
                    tracing::warn!(path, error = %e, "watch failed");
                    println!("{} Failed to watch {}: {}", "Error:".red(), path, e);
                }
            }
        }
    }

    fn stop_watching(&mut self, path: &str) {
        let Some(w) = &mut self.watcher else {
            println!("Not watching {}", path);
            return;
        };
        match w.unwatch(path) {
            Ok(true) => {
                tracing::info!(path, "stopped watching script");
                println!("{} Stopped watching {}", "✓".bright_green(), path);
            }
            Ok(false) => println!("Not watching {}", path),
            Err(e) => {
                tracing::warn!(path, error = %e, "unwatch failed");
                println!("{} Failed to unwatch {}: {}", "Error:".red(), path, e);
            }
        }
    }

    fn reload(&mut self, path: &Path) {
        let display_path = path.display().to_string();
        match self.ctx.load_file(&display_path) {
            Ok(values) => {
                println!("{} Reloaded {}", "✓".bright_green(), display_path);
                for value in values {
                    println!("{}", self.ctx.display.describe(&value));
                }
                println!("{}", self.ctx.list_bindings());
            }
            Err(e) => println!("{} {}", "Error:".red(), e),
        }
    }

    /// Handle one input line
    fn handle_line(&mut self, line: &str, registry: &CommandRegistry) -> Flow {
        if line.is_empty() {
            return Flow::Continue;
        }
        match registry.execute(line, &mut self.ctx) {
            CommandResult::Success => {}
            CommandResult::Message(msg) => println!("{}", msg),
            CommandResult::Exit => {
                println!("{} 🥁", "Goodbye!".bright_cyan());
                return Flow::Exit;
            }
            CommandResult::Error(e) => {
                println!("{} {}", "Error:".bright_red().bold(), e.red())
            }
            CommandResult::Watch(path) => self.start_watching(&path),
            CommandResult::Unwatch(path) => self.stop_watching(&path),
            CommandResult::NotACommand => self.evaluate(line),
        }
        Flow::Continue
    }

    fn handle_watch_event(&mut self, res: notify::Result<Event>) {
        match res {
            Ok(event) => {
                let changed = self
                    .watcher
                    .as_ref()
                    .map(|w| w.changed_scripts(&event))
                    .unwrap_or_default();
                for path in changed {
                    println!("{} File changed: {}", "⚡".bright_yellow(), path.display());
                    tracing::info!(path = %path.display(), "reloading script");
                    self.reload(&path);
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "watch error");
                println!("{} Watch error: {}", "Error:".red(), e);
            }
        }
    }

    /// Start the REPL loop
    pub fn run(&mut self) -> Result<()> {
        println!(
            "{} {}",
            "🥁".bright_yellow(),
            "Pulse Euclidean Rhythm REPL".bright_cyan().bold()
        );
        println!(
            "Type rhythms like: {}, {}, {}",
            "(3, 8)".cyan(),
            "euclid(5, 8, 2, 12)".cyan(),
            "let kick = (3, 8)".cyan()
        );
        println!(
            "Type '{}' for more information, '{}' or {} to exit.\n",
            "help".bright_green(),
            "quit".bright_red(),
            "Ctrl+C".bright_red()
        );

        let Some(mut editor) = self.editor.take() else {
            anyhow::bail!("REPL is already running");
        };
        let tx_input = self.tx_input.clone();

        thread::spawn(move || loop {
            let prompt = format!("{} ", "pulse>".bright_magenta().bold());
            match editor.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim().to_string();
                    if !line.is_empty() {
                        let _ = editor.add_history_entry(&line);
                    }
                    if tx_input.send(ReplEvent::Input(Ok(line))).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    let _ = tx_input.send(ReplEvent::Input(Err(err)));
                    break;
                }
            }
        });

        let registry = create_registry();

        loop {
            crossbeam_channel::select! {
                recv(self.rx_input) -> msg => match msg {
                    Ok(ReplEvent::Input(Ok(line))) => {
                        if self.handle_line(&line, &registry) == Flow::Exit {
                            break;
                        }
                    }
                    Ok(ReplEvent::Input(Err(ReadlineError::Interrupted | ReadlineError::Eof))) => {
                        println!("{} 🥁", "Goodbye!".bright_cyan());
                        break;
                    }
                    Ok(ReplEvent::Input(Err(err))) => {
                        println!(
                            "{} {}",
                            "Error reading input:".bright_red().bold(),
                            err.to_string().red()
                        );
                        break;
                    }
                    Err(_) => break, // Channel closed
                },

                recv(self.rx_watcher) -> msg => match msg {
                    Ok(res) => self.handle_watch_event(res),
                    Err(_) => break,
                }
            }
        }

        Ok(())
    }
}

/// Convenience function to start the REPL
pub fn start(display: DisplayConfig) -> Result<()> {
    let mut repl =
        Repl::new(display).map_err(|e| anyhow::anyhow!("Failed to initialize REPL: {}", e))?;
    repl.run()
}
