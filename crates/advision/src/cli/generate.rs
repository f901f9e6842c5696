//! Storyboard generation command handlers.

use advision::{
    AdvisionConfig, AdvisionResult, AspectRatio, BatchReport, GeminiClient, Orchestrator,
    ProductBrief, ScriptGenerator, StoryboardError, StoryboardErrorKind, StoryboardSession,
    render,
};
use std::sync::Arc;
use tracing::info;

use super::commands::{BriefArgs, OutputFormat};
use super::interactive::run_interactive;

/// Build a brief from CLI arguments, filling the tone from configuration.
fn build_brief(args: &BriefArgs, config: &AdvisionConfig) -> AdvisionResult<ProductBrief> {
    let tone = config.storyboard().tone_or_default(args.tone.as_deref());
    ProductBrief::builder()
        .product_name(args.name.clone())
        .description(args.description.clone())
        .tone(tone)
        .build()
}

/// Print the session's storyboard in the requested format.
pub(super) async fn print_storyboard(
    session: &StoryboardSession,
    report: Option<&BatchReport>,
    format: OutputFormat,
) -> AdvisionResult<()> {
    let snapshot = session.snapshot().await;
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                render::storyboard_json(session.brief(), report, snapshot.frames())?
            );
        }
        OutputFormat::Human => {
            print!("{}", render::storyboard_text(session.brief(), &snapshot));
            if let Some(report) = report {
                println!("{}", render::report_text(report));
            }
        }
    }
    Ok(())
}

/// Generate a storyboard and render every frame.
pub async fn run_generate(
    brief: BriefArgs,
    aspect_ratio: Option<AspectRatio>,
    format: OutputFormat,
    interactive: bool,
) -> AdvisionResult<()> {
    let config = AdvisionConfig::load()?;
    let brief = build_brief(&brief, &config)?;
    let aspect_ratio = aspect_ratio.unwrap_or(*config.storyboard().aspect_ratio());

    let client = Arc::new(GeminiClient::from_env(config.gemini().clone())?);
    let orchestrator = Orchestrator::new(client.clone(), client).with_aspect_ratio(aspect_ratio);
    let mut session = StoryboardSession::new(orchestrator);

    info!(
        product = %brief.product_name(),
        aspect_ratio = %aspect_ratio,
        "Generating storyboard"
    );
    submit_brief(&mut session, brief, format, interactive).await?;

    if interactive {
        run_interactive(&mut session, &config, format).await?;
    }
    Ok(())
}

/// Submit the brief and print the result.
///
/// A rejected script is an error unless the session stays open for more
/// commands, in which case it is only reported.
async fn submit_brief(
    session: &mut StoryboardSession,
    brief: ProductBrief,
    format: OutputFormat,
    interactive: bool,
) -> AdvisionResult<()> {
    let report = session.submit(brief).await;
    match session.error() {
        Some(error) if !interactive => {
            Err(StoryboardError::new(StoryboardErrorKind::ScriptRejected(error.to_string())).into())
        }
        Some(error) => {
            eprintln!("Error: {}", error);
            Ok(())
        }
        None => print_storyboard(session, report.as_ref(), format).await,
    }
}

/// Generate and print the script only.
pub async fn run_script(brief: BriefArgs, format: OutputFormat) -> AdvisionResult<()> {
    let config = AdvisionConfig::load()?;
    let brief = build_brief(&brief, &config)?;
    let client = GeminiClient::from_env(config.gemini().clone())?;

    info!(product = %brief.product_name(), model = %client.model_name(), "Generating script");
    let frames = client.generate_script(&brief).await?.into_frames()?;

    match format {
        OutputFormat::Json => {
            println!("{}", render::storyboard_json(Some(&brief), None, &frames)?);
        }
        OutputFormat::Human => {
            println!("Script: {} ({})", brief.product_name(), brief.tone());
            println!("{:-<80}", "");
            for frame in &frames {
                print!("{}", render::frame_text(frame));
                println!("{:-<80}", "");
            }
        }
    }
    Ok(())
}
