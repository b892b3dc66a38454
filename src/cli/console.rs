// Console output for the running debate
//
// stdout carries the dialogue itself plus the occasional notice. A
// capturing console keeps the rendered lines in memory instead, which is
// what the session tests inspect.

use crossterm::style::Stylize;
use std::sync::{Arc, Mutex};

/// Things the session shows the user
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleEvent {
    /// A line of the debate
    Utterance { text: String },
    /// Shown while waiting for a persona's completion
    Thinking { speaker: String },
    /// A persona's freshly rewritten dynamic prompt
    PersonaPrompt { speaker: String, prompt: String },
    /// The scenario's freshly rewritten dynamic prompt
    ScenarioPrompt { prompt: String },
}

impl ConsoleEvent {
    fn render(&self, color: bool) -> String {
        match self {
            ConsoleEvent::Utterance { text } => format!("{}\n", text),
            ConsoleEvent::Thinking { speaker } => {
                let line = format!("{} is thinking...", speaker);
                if color {
                    line.dark_grey().to_string()
                } else {
                    line
                }
            }
            ConsoleEvent::PersonaPrompt { speaker, prompt } => {
                let label = format!("*** NEW PROMPT for {}:", speaker);
                let label = if color { label.cyan().bold().to_string() } else { label };
                format!("\n{} {}\n", label, prompt)
            }
            ConsoleEvent::ScenarioPrompt { prompt } => {
                let label = "*** NEW SCENARIO PROMPT:";
                let label = if color {
                    label.magenta().bold().to_string()
                } else {
                    label.to_string()
                };
                format!("\n{} {}\n", label, prompt)
            }
        }
    }
}

#[derive(Debug, Clone)]
enum Target {
    Stdout,
    Capture(Arc<Mutex<Vec<ConsoleEvent>>>),
}

#[derive(Debug, Clone)]
pub struct Console {
    target: Target,
    color: bool,
}

impl Console {
    pub fn stdout(color: bool) -> Self {
        Self {
            target: Target::Stdout,
            color,
        }
    }

    /// A console that records events; the returned handle sees every event
    pub fn capturing() -> (Self, Arc<Mutex<Vec<ConsoleEvent>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let console = Self {
            target: Target::Capture(Arc::clone(&events)),
            color: false,
        };
        (console, events)
    }

    pub fn show(&self, event: ConsoleEvent) {
        match &self.target {
            Target::Stdout => println!("{}", event.render(self.color)),
            Target::Capture(events) => {
                if let Ok(mut events) = events.lock() {
                    events.push(event);
                }
            }
        }
    }
}
