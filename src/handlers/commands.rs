// src/handlers/commands.rs

// Comandos digitados no terminal do binário. Cada um vira um clique, um
// preenchimento de formulário ou um refresh manual.

use std::str::FromStr;

use crate::{
    handlers::controls::{handle_click, ClickOutcome},
    models::actions::{SlaForm, SlaTier},
    services::dashboard_service::{DashboardController, TickOutcome},
    ui::{memory::MemoryView, widgets::Control},
};

pub const HELP: &str = "commands: init | optimize | sla <tier> <power_mw> <hours> | refresh | status | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Initialize,
    Optimize,
    /// Os números ficam como texto: a validação é a mesma do formulário.
    RequestSla { tier: SlaTier, power: String, hours: String },
    Refresh,
    Status,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let Some(head) = parts.next() else {
            return Err("empty command".to_string());
        };

        match head.to_ascii_lowercase().as_str() {
            "init" | "initialize" => Ok(Command::Initialize),
            "optimize" | "opt" => Ok(Command::Optimize),
            "sla" => {
                let tier = parts
                    .next()
                    .ok_or_else(|| "usage: sla <tier> <power_mw> <hours>".to_string())?
                    .parse::<SlaTier>()?;
                Ok(Command::RequestSla {
                    tier,
                    power: parts.next().unwrap_or_default().to_string(),
                    hours: parts.next().unwrap_or_default().to_string(),
                })
            }
            "refresh" | "r" => Ok(Command::Refresh),
            "status" => Ok(Command::Status),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(format!("unknown command '{}'", other)),
        }
    }
}

/// Executa um comando. Devolve `false` quando o loop deve parar.
pub async fn run_command(controller: &DashboardController, form: &MemoryView, command: Command) -> bool {
    match command {
        Command::Initialize => report(handle_click(controller, Control::Initialize).await),
        Command::Optimize => report(handle_click(controller, Control::Optimize).await),
        Command::RequestSla { tier, power, hours } => {
            form.fill_sla_form(SlaForm {
                tier,
                power_requirement: power,
                duration_hours: hours,
            });
            report(handle_click(controller, Control::RequestSla).await);
        }
        Command::Refresh => match controller.refresh().await {
            TickOutcome::Skipped => println!("system not initialized yet"),
            TickOutcome::Failed => println!("refresh failed, keeping previous data"),
            TickOutcome::Discarded | TickOutcome::Rendered => {}
        },
        Command::Status => {
            println!(
                "lifecycle={:?} initialized={} timer={}",
                controller.lifecycle(),
                controller.is_initialized(),
                controller.has_active_timer()
            );
        }
        Command::Help => println!("{}", HELP),
        Command::Quit => return false,
    }
    true
}

fn report(outcome: ClickOutcome) {
    if outcome.is_ignored() {
        println!("that action is currently disabled");
    }
}
