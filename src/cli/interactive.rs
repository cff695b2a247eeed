//! Interactive form: one command per line on stdin.
//!
//! ```text
//! mode text|image     pick the input mode
//! headline <text>     enter a headline (clears any image)
//! image <path>        select an image (clears any headline)
//! country <c>         country hint for headlines
//! category <c>        category hint for headlines
//! page-size <n>       number of sources for headlines
//! submit              send for analysis
//! reset               start over
//! state               show the current state
//! quit                exit
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{print_error, print_result};
use crate::adapters::AnalysisService;
use crate::core::Session;
use crate::domain::{InputKind, ViewState};

/// A parsed line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormCommand {
    Mode(InputKind),
    Headline(String),
    Image(PathBuf),
    Country(String),
    Category(String),
    PageSize(String),
    Submit,
    Reset,
    State,
    Help,
    Quit,
}

impl FormCommand {
    /// Parse one line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.trim_start().split_once(' ') {
            Some((word, rest)) => (word, rest),
            None => (line.trim(), ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "mode" => match rest.trim() {
                "text" => Self::Mode(InputKind::Text),
                "image" => Self::Mode(InputKind::Image),
                other => return Err(format!("Unknown mode '{}'. Use 'text' or 'image'.", other)),
            },
            // Headline text is kept exactly as typed after the first space
            "headline" => Self::Headline(rest.to_string()),
            "image" => {
                let path = rest.trim();
                if path.is_empty() {
                    return Err("Usage: image <path>".to_string());
                }
                Self::Image(PathBuf::from(path))
            }
            "country" => Self::Country(rest.trim().to_string()),
            "category" => Self::Category(rest.trim().to_string()),
            "page-size" => {
                let value = rest.trim();
                if !value.is_empty() && value.parse::<u32>().is_err() {
                    return Err(format!("Page size must be a number, got '{}'.", value));
                }
                Self::PageSize(value.to_string())
            }
            "submit" => Self::Submit,
            "reset" => Self::Reset,
            "state" => Self::State,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(format!("Unknown command '{}'. Type 'help'.", other)),
        };
        Ok(Some(command))
    }
}

/// Run the form until `quit` or end of input
pub async fn run<S: AnalysisService>(mut session: Session<S>, json: bool) -> Result<()> {
    print_prompt(&session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read from stdin")?
    {
        let command = match FormCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                eprintln!("{}", message);
                continue;
            }
        };

        if command == FormCommand::Quit {
            break;
        }
        apply(&mut session, command, json).await?;
        print_prompt(&session);
    }

    Ok(())
}

/// Apply one command to the session
pub async fn apply<S: AnalysisService>(
    session: &mut Session<S>,
    command: FormCommand,
    json: bool,
) -> Result<()> {
    match command {
        FormCommand::Mode(kind) => session.select_mode(kind),
        FormCommand::Headline(headline) => {
            if let Err(e) = session.collector_mut().set_headline(headline) {
                eprintln!("{}", e);
            }
        }
        FormCommand::Image(path) => {
            if let Err(e) = session.collector_mut().set_image(path) {
                eprintln!("{}", e);
            }
        }
        FormCommand::Country(country) => session.collector_mut().set_country(country),
        FormCommand::Category(category) => session.collector_mut().set_category(category),
        FormCommand::PageSize(size) => session.collector_mut().set_page_size(size),
        FormCommand::Submit => {
            eprintln!("Analyzing...");
            match session.submit().await {
                Ok(result) => print_result(&result, json)?,
                Err(e) => print_error(&e),
            }
        }
        FormCommand::Reset => {
            if !session.reset() {
                eprintln!("An analysis is still in progress.");
            }
        }
        FormCommand::State => print_state(session),
        FormCommand::Help => print_help(),
        FormCommand::Quit => {}
    }
    Ok(())
}

fn print_prompt<S: AnalysisService>(session: &Session<S>) {
    match session.state() {
        ViewState::AwaitingModeSelection => {
            eprintln!("Choose 'mode text' to verify a news headline or 'mode image' to check a face for deepfakes.")
        }
        ViewState::Success(_) | ViewState::Failure(_) => eprintln!("Type 'reset' to start over."),
        ViewState::Idle | ViewState::Loading => {}
    }
    eprint!("[{}]> ", session.state().label());
}

fn print_state<S: AnalysisService>(session: &Session<S>) {
    let form = session.collector();
    println!("State:    {}", session.state().label());
    println!(
        "Mode:     {}",
        form.mode()
            .map(|k| k.to_string())
            .unwrap_or_else(|| "(inferred)".to_string())
    );
    match (form.input().headline(), form.input().image()) {
        (Some(headline), _) => println!("Headline: {}", headline),
        (_, Some(image)) => println!("Image:    {}", image.display_name()),
        _ => println!("Input:    (empty)"),
    }
    if let Some(error) = session.state().error() {
        println!("Error:    {}", error);
    }
}

fn print_help() {
    eprintln!("Commands: mode text|image, headline <text>, image <path>, country <c>, category <c>, page-size <n>, submit, reset, state, quit");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{Fixture, FixtureService};
    use crate::core::{InputCollector, ModePolicy};

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            FormCommand::parse("mode image").unwrap(),
            Some(FormCommand::Mode(InputKind::Image))
        );
        assert_eq!(
            FormCommand::parse("headline  Two spaces kept").unwrap(),
            Some(FormCommand::Headline(" Two spaces kept".to_string()))
        );
        assert_eq!(
            FormCommand::parse("image ./face.png\n").unwrap(),
            Some(FormCommand::Image(PathBuf::from("./face.png")))
        );
        assert_eq!(FormCommand::parse("   ").unwrap(), None);
        assert_eq!(FormCommand::parse("SUBMIT").unwrap(), Some(FormCommand::Submit));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(FormCommand::parse("mode video").is_err());
        assert!(FormCommand::parse("page-size five").is_err());
        assert!(FormCommand::parse("image").is_err());
        assert!(FormCommand::parse("launch").is_err());
    }

    #[tokio::test]
    async fn test_explicit_form_walkthrough() {
        let mut session = Session::new(
            FixtureService::new(Fixture::Verified),
            InputCollector::new(ModePolicy::Explicit),
        );
        assert_eq!(session.state(), &ViewState::AwaitingModeSelection);

        for line in ["mode text", "headline dummy-verified", "country us", "submit"] {
            let command = FormCommand::parse(line).unwrap().unwrap();
            apply(&mut session, command, false).await.unwrap();
        }
        assert!(session.state().result().is_some());

        let sent = session.service().requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].data, "dummy-verified");
        assert_eq!(sent[0].metadata.country.as_deref(), Some("us"));

        apply(&mut session, FormCommand::Reset, false).await.unwrap();
        assert_eq!(session.state(), &ViewState::AwaitingModeSelection);
        assert!(session.collector().input().headline().is_none());
    }
}
