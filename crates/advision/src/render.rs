//! Terminal rendering of storyboards.

use advision_core::{FrameStatus, ProductBrief, StoryboardFrame};
use advision_error::{AdvisionResult, JsonError};
use advision_storyboard::{BatchReport, StoreSnapshot};
use serde::Serialize;

/// What the image slot shows for a frame without a current image.
pub fn placeholder(status: FrameStatus) -> &'static str {
    match status {
        FrameStatus::Idle => "Waiting for generation",
        FrameStatus::Loading => "Rendering scene...",
        FrameStatus::Error => "Render failed",
        FrameStatus::Success => "No image",
    }
}

/// Human-readable frame block.
pub fn frame_text(frame: &StoryboardFrame) -> String {
    let image = match frame.current_image() {
        Some(image) => format!("{}, {} bytes", image.mime_type(), image.len()),
        None => format!("[{}]", placeholder(*frame.status())),
    };
    format!(
        "Frame {} | {} | {} | {}\n  \
         Visual action: {}\n  \
         Voiceover:     {}\n  \
         Prompt:        {}\n  \
         Image:         {}\n",
        frame.id(),
        frame.shot_type(),
        frame.time(),
        frame.status(),
        frame.description(),
        frame.voiceover(),
        frame.visual_prompt(),
        image
    )
}

/// Human-readable storyboard.
pub fn storyboard_text(brief: Option<&ProductBrief>, snapshot: &StoreSnapshot) -> String {
    let rule = format!("{:-<80}\n", "");
    let mut text = match brief {
        Some(brief) => format!("Storyboard: {} ({})\n", brief.product_name(), brief.tone()),
        None => "Storyboard\n".to_string(),
    };
    text.push_str(if *snapshot.images_loading() {
        "Rendering frames...\n"
    } else {
        "Generation complete. Review your concept below.\n"
    });
    text.push_str(&rule);
    for frame in snapshot.frames() {
        text.push_str(&frame_text(frame));
        text.push_str(&rule);
    }
    text.push_str(&format!(
        "Total: {} frames, {} rendered, {} failed\n",
        snapshot.len(),
        snapshot.count(FrameStatus::Success),
        snapshot.count(FrameStatus::Error)
    ));
    text
}

/// One-line batch summary.
pub fn report_text(report: &BatchReport) -> String {
    let mut text = format!(
        "Rendered {} of {} frames",
        report.succeeded().len(),
        report.total()
    );
    if !report.failed().is_empty() {
        text.push_str(&format!("; failed: {:?}", report.failed()));
    }
    if !report.discarded().is_empty() {
        text.push_str(&format!("; discarded: {:?}", report.discarded()));
    }
    text
}

#[derive(Serialize)]
struct StoryboardDocument<'a> {
    brief: Option<&'a ProductBrief>,
    report: Option<&'a BatchReport>,
    storyboard: &'a [StoryboardFrame],
}

/// Storyboard as pretty JSON; images appear as data URIs.
pub fn storyboard_json(
    brief: Option<&ProductBrief>,
    report: Option<&BatchReport>,
    frames: &[StoryboardFrame],
) -> AdvisionResult<String> {
    let document = StoryboardDocument {
        brief,
        report,
        storyboard: frames,
    };
    Ok(serde_json::to_string_pretty(&document)
        .map_err(|e| JsonError::new(e.to_string()))?)
}
