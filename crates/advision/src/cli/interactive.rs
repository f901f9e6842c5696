//! Interactive session loop over stdin.

use advision::{
    AdvisionConfig, AdvisionResult, IoError, ProductBrief, Settlement, StoryboardSession, View,
};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::debug;

use super::commands::OutputFormat;
use super::generate::print_storyboard;

const HELP: &str = "\
Commands:
  regen <id>   Render one frame again
  regen all    Render every frame again
  show         Print the storyboard
  new          Start a new project
  help         Show this help
  quit         Exit";

/// A parsed interactive command.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Regenerate(u32),
    RegenerateAll,
    Show,
    New,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            ["regen", "all"] | ["regenerate", "all"] => Command::RegenerateAll,
            ["regen", id] | ["regenerate", id] => match id.parse() {
                Ok(id) => Command::Regenerate(id),
                Err(_) => Command::Unknown(line.to_string()),
            },
            ["show"] => Command::Show,
            ["new"] => Command::New,
            ["help"] | ["?"] => Command::Help,
            ["quit"] | ["exit"] | ["q"] => Command::Quit,
            _ => Command::Unknown(line.to_string()),
        }
    }
}

/// Read one trimmed line, `None` at end of input.
async fn read_line(lines: &mut Lines<BufReader<Stdin>>) -> AdvisionResult<Option<String>> {
    lines
        .next_line()
        .await
        .map(|line| line.map(|l| l.trim().to_string()))
        .map_err(|e| IoError::new(format!("Failed to read stdin: {}", e)).into())
}

/// Prompt for a new brief until one is valid; `None` at end of input.
async fn read_brief(
    lines: &mut Lines<BufReader<Stdin>>,
    config: &AdvisionConfig,
) -> AdvisionResult<Option<ProductBrief>> {
    loop {
        eprintln!("Product name:");
        let Some(name) = read_line(lines).await? else {
            return Ok(None);
        };
        eprintln!("Product description:");
        let Some(description) = read_line(lines).await? else {
            return Ok(None);
        };
        eprintln!("Tone [{}]:", config.storyboard().default_tone());
        let tone = config
            .storyboard()
            .tone_or_default(read_line(lines).await?.as_deref());

        match ProductBrief::builder()
            .product_name(name)
            .description(description)
            .tone(tone)
            .build()
        {
            Ok(brief) => return Ok(Some(brief)),
            Err(e) => eprintln!("Error: {}", e),
        }
    }
}

/// Run commands against the session until `quit` or end of input.
pub async fn run_interactive(
    session: &mut StoryboardSession,
    config: &AdvisionConfig,
    format: OutputFormat,
) -> AdvisionResult<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    eprintln!("{}", HELP);

    loop {
        if session.view() == View::Input {
            let Some(brief) = read_brief(&mut lines, config).await? else {
                break;
            };
            let report = session.submit(brief).await;
            match session.error() {
                Some(error) => eprintln!("Error: {}", error),
                None => print_storyboard(session, report.as_ref(), format).await?,
            }
            continue;
        }

        eprint!("> ");
        let Some(line) = read_line(&mut lines).await? else {
            break;
        };
        if line.is_empty() {
            continue;
        }

        let command = Command::parse(&line);
        debug!(?command, "Interactive command");
        match command {
            Command::Regenerate(id) => match session.regenerate(id).await {
                Ok(Settlement::Applied(status)) => {
                    eprintln!("Frame {}: {}", id, status);
                    print_storyboard(session, None, format).await?;
                }
                Ok(Settlement::Discarded) => eprintln!("Frame {}: storyboard was replaced", id),
                Err(e) => eprintln!("Error: {}", e),
            },
            Command::RegenerateAll => {
                let report = session.regenerate_all().await;
                print_storyboard(session, Some(&report), format).await?;
            }
            Command::Show => print_storyboard(session, None, format).await?,
            Command::New => session.reset().await,
            Command::Help => eprintln!("{}", HELP),
            Command::Quit => break,
            Command::Unknown(input) => eprintln!("Unknown command: {} (type 'help')", input),
        }
    }
    Ok(())
}
