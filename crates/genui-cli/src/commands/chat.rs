use super::utils::{load_config, load_secrets};
use anyhow::{Context, Result};
use genui_core::block::Screen;
use genui_core::interaction::InteractionEvent;
use genui_core::session::SessionState;
use genui_infrastructure::resolve_system_prompt;
use genui_interaction::{ModelClient, ScriptedModel, SessionEngine, SessionError, model_from_config};
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "Type a message, paste an action object ({\"type\": ...}) to send an \
interaction, /screen to reprint, /clear to reset, /quit to exit.";

/// What one input line asks for.
#[derive(Debug, PartialEq)]
enum Input {
    Message(String),
    Interaction(InteractionEvent),
    Screen,
    Clear,
    Quit,
    Skip,
}

fn parse_input(line: &str) -> Result<Input> {
    let line = line.trim();
    match line {
        "" => Ok(Input::Skip),
        "/quit" | "/exit" => Ok(Input::Quit),
        "/clear" => Ok(Input::Clear),
        "/screen" => Ok(Input::Screen),
        _ if line.starts_with('{') => {
            let value: Value = serde_json::from_str(line).context("Action is not valid JSON")?;
            let Value::Object(action) = value else {
                anyhow::bail!("Action must be a JSON object");
            };
            Ok(Input::Interaction(InteractionEvent::from_action(action)))
        }
        _ => Ok(Input::Message(line.to_string())),
    }
}

fn parse_context(raw: Option<&str>) -> Result<Option<Value>> {
    raw.map(|text| serde_json::from_str(text).context("--context is not valid JSON"))
        .transpose()
}

fn print_screen(screen: &Screen) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&screen.to_json())?);
    Ok(())
}

fn report(engine: &SessionEngine, result: Result<Screen, SessionError>) -> Result<()> {
    match result {
        Ok(screen) => {
            if let Some(report) = engine.last_report().filter(|r| !r.is_clean()) {
                eprintln!("({} invalid block(s) dropped)", report.dropped.len());
            }
            print_screen(&screen)
        }
        Err(err) => {
            eprintln!("Turn failed: {}", err);
            if err.is_retryable() {
                eprintln!("(retryable; send the same input again)");
            }
            match engine.current_screen() {
                Some(previous) => {
                    eprintln!("Previous screen:");
                    print_screen(previous)
                }
                None => Ok(()),
            }
        }
    }
}

pub async fn run(instruction: Option<String>, context: Option<&str>, offline: bool) -> Result<()> {
    let config = load_config()?;
    let context = parse_context(context)?;

    let model: Arc<dyn ModelClient> = if offline {
        Arc::new(ScriptedModel::demo())
    } else {
        model_from_config(&config, &load_secrets()?)?
    };
    let system_prompt = resolve_system_prompt(&config.session)?;

    let mut engine =
        SessionEngine::new(model, system_prompt).with_max_tokens(config.model.max_tokens);
    let mut states = engine.subscribe();
    tokio::spawn(async move {
        while let Some(state) = states.recv().await {
            match state {
                SessionState::Streaming { received, .. } => {
                    tracing::trace!(bytes = received, "streaming")
                }
                other => tracing::debug!(state = other.name(), "session state"),
            }
        }
    });

    eprintln!("Session {} with {}. {}", engine.id(), engine.model_name(), HELP);

    if let Some(instruction) = instruction {
        let result = engine.start(&instruction, context.clone()).await;
        report(&engine, result)?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = match parse_input(&line) {
            Ok(input) => input,
            Err(err) => {
                eprintln!("{:#}", err);
                continue;
            }
        };

        let result = match input {
            Input::Skip => continue,
            Input::Quit => break,
            Input::Clear => {
                engine.clear_history();
                eprintln!("History cleared.");
                continue;
            }
            Input::Screen => {
                match engine.current_screen() {
                    Some(screen) => print_screen(screen)?,
                    None => eprintln!("No screen yet."),
                }
                continue;
            }
            Input::Message(text) if engine.current_screen().is_none() => {
                engine.start(&text, context.clone()).await
            }
            Input::Message(text) => engine.send_message(&text, context.clone()).await,
            Input::Interaction(event) => {
                if event.is_unknown() {
                    tracing::warn!("action has no usable type, sending as \"unknown\"");
                }
                engine.send_interaction(event, context.clone()).await
            }
        };
        report(&engine, result)?;
    }

    Ok(())
}
