//! Orchestrator tests using mock generators.

mod test_utils;

use advision_core::{AspectRatio, FrameStatus, ImagePayload, ScriptResult};
use advision_error::{AdvisionErrorKind, GeminiErrorKind, StoryboardErrorKind};
use advision_storyboard::{FrameStore, Orchestrator, Settlement};
use std::sync::Arc;
use std::time::Duration;
use test_utils::{
    MockHook, MockImageBehavior, MockImageGenerator, MockScriptGenerator, aerosynth_brief,
    six_frame_script,
};

fn orchestrator(image: Arc<MockImageGenerator>) -> Orchestrator {
    let script = Arc::new(MockScriptGenerator::new_success(six_frame_script()));
    Orchestrator::new(script, image)
}

//
// ─── SCRIPT ────────────────────────────────────────────────────────────────────
//

#[tokio::test]
async fn test_script_normalizes_into_six_idle_frames() -> anyhow::Result<()> {
    let image = Arc::new(MockImageGenerator::new_success());
    let orchestrator = orchestrator(image.clone());

    orchestrator.load_script(&aerosynth_brief()).await?;

    let snapshot = orchestrator.store().snapshot().await;
    let ids: Vec<u32> = snapshot.frames().iter().map(|f| *f.id()).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(snapshot.count(FrameStatus::Idle), 6);

    let third = snapshot.frame(3).expect("Frame 3 exists");
    assert_eq!(third.shot_type(), "Dutch Angle");
    assert_eq!(third.description(), "Action for frame 3");
    assert_eq!(third.visual_prompt(), "prompt 3");
    assert_eq!(third.voiceover(), "Voiceover 3");
    assert_eq!(third.time(), "2s");
    assert_eq!(image.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_script_failure_leaves_store_untouched() {
    let script = Arc::new(MockScriptGenerator::new_error(GeminiErrorKind::HttpError {
        status_code: 500,
        message: "Internal error".to_string(),
    }));
    let image = Arc::new(MockImageGenerator::new_success());
    let orchestrator = Orchestrator::new(script, image.clone());

    let result = orchestrator.create_storyboard(&aerosynth_brief()).await;

    assert!(result.is_err());
    assert!(orchestrator.store().snapshot().await.is_empty());
    assert_eq!(orchestrator.store().epoch().await.value(), 0);
    assert_eq!(image.call_count(), 0);
}

#[tokio::test]
async fn test_short_script_is_rejected() {
    let mut entries = six_frame_script().storyboard().clone();
    entries.pop();
    let script = Arc::new(MockScriptGenerator::new_success(ScriptResult::new(entries)));
    let orchestrator = Orchestrator::new(script, Arc::new(MockImageGenerator::new_success()));

    let err = orchestrator
        .load_script(&aerosynth_brief())
        .await
        .expect_err("Five frames must be rejected");

    match err.kind() {
        AdvisionErrorKind::Storyboard(e) => assert_eq!(
            e.kind,
            StoryboardErrorKind::FrameCount {
                expected: 6,
                actual: 5
            }
        ),
        other => panic!("Unexpected error: {}", other),
    }
}

//
// ─── BULK GENERATE ─────────────────────────────────────────────────────────────
//

#[tokio::test]
async fn test_aerosynth_storyboard_renders_every_frame() -> anyhow::Result<()> {
    let store = FrameStore::new();
    let image = Arc::new(
        MockImageGenerator::new_success().with_hook(MockHook::Observe(store.clone())),
    );
    let orchestrator = orchestrator(image.clone()).with_store(store.clone());

    let report = orchestrator.create_storyboard(&aerosynth_brief()).await?;

    // The first request saw every frame already loading.
    let observed = image.observed();
    assert_eq!(observed.len(), 6);
    assert_eq!(observed[0].count(FrameStatus::Loading), 6);
    assert!(*observed[0].images_loading());
    assert!(image.observed_no_idle());

    let snapshot = store.snapshot().await;
    assert_eq!(snapshot.count(FrameStatus::Success), 6);
    assert!(snapshot.all_settled());
    assert!(!snapshot.images_loading());
    assert_eq!(report.succeeded(), &vec![1, 2, 3, 4, 5, 6]);
    assert!(report.all_succeeded());
    Ok(())
}

#[tokio::test]
async fn test_one_failed_frame_is_isolated() -> anyhow::Result<()> {
    let image = Arc::new(MockImageGenerator::new(MockImageBehavior::FailFor(vec![
        "prompt 4".to_string(),
    ])));
    let orchestrator = orchestrator(image.clone());

    let report = orchestrator.create_storyboard(&aerosynth_brief()).await?;

    let snapshot = orchestrator.store().snapshot().await;
    for frame in snapshot.frames() {
        let expected = if *frame.id() == 4 {
            FrameStatus::Error
        } else {
            FrameStatus::Success
        };
        assert_eq!(*frame.status(), expected, "frame {}", frame.id());
    }
    assert!(snapshot.frame(4).and_then(|f| f.current_image()).is_none());
    assert_eq!(report.failed(), &vec![4]);
    assert_eq!(report.succeeded().len(), 5);
    assert_eq!(image.call_count(), 6);
    Ok(())
}

#[tokio::test]
async fn test_bulk_generate_never_fails_when_every_frame_fails() -> anyhow::Result<()> {
    let image = Arc::new(MockImageGenerator::new(MockImageBehavior::Error(
        GeminiErrorKind::HttpError {
            status_code: 503,
            message: "Unavailable".to_string(),
        },
    )));
    let orchestrator = orchestrator(image);

    let report = orchestrator.create_storyboard(&aerosynth_brief()).await?;

    assert_eq!(report.failed().len(), 6);
    let snapshot = orchestrator.store().snapshot().await;
    assert_eq!(snapshot.count(FrameStatus::Error), 6);
    assert!(!snapshot.images_loading());
    Ok(())
}

#[tokio::test]
async fn test_rendered_payload_is_stored_unchanged() -> anyhow::Result<()> {
    let image = Arc::new(MockImageGenerator::new_success());
    let orchestrator = orchestrator(image.clone());

    orchestrator.create_storyboard(&aerosynth_brief()).await?;

    let snapshot = orchestrator.store().snapshot().await;
    for frame in snapshot.frames() {
        let call = image
            .prompts()
            .iter()
            .position(|p| p == frame.visual_prompt())
            .expect("Prompt was sent")
            + 1;
        let expected = ImagePayload::new(
            "image/png",
            MockImageGenerator::expected_bytes(frame.visual_prompt(), call),
        );
        let stored = frame.current_image().expect("Frame rendered");
        assert_eq!(stored.data(), expected.data());
        assert_eq!(stored.to_data_uri(), expected.to_data_uri());
    }
    Ok(())
}

#[tokio::test]
async fn test_aspect_ratio_is_forwarded() -> anyhow::Result<()> {
    let image = Arc::new(MockImageGenerator::new_success());
    let orchestrator = orchestrator(image.clone()).with_aspect_ratio(AspectRatio::Portrait);

    orchestrator.create_storyboard(&aerosynth_brief()).await?;

    let ratios = image.aspect_ratios();
    assert_eq!(ratios.len(), 6);
    assert!(ratios.iter().all(|r| *r == AspectRatio::Portrait));
    Ok(())
}

#[tokio::test]
async fn test_results_for_a_cleared_storyboard_are_discarded() -> anyhow::Result<()> {
    let store = FrameStore::new();
    let image = Arc::new(
        MockImageGenerator::new_success().with_hook(MockHook::ClearOnFirstCall(store.clone())),
    );
    let orchestrator = orchestrator(image.clone()).with_store(store.clone());

    let report = orchestrator.create_storyboard(&aerosynth_brief()).await?;

    assert_eq!(report.discarded().len(), 6);
    assert!(report.succeeded().is_empty());
    let snapshot = store.snapshot().await;
    assert!(snapshot.is_empty());
    assert_eq!(snapshot.epoch().value(), 2);
    Ok(())
}

#[tokio::test]
async fn test_out_of_order_settlements_merge_by_id() -> anyhow::Result<()> {
    // Frame 1 resolves last, frame 6 first.
    let delays = (1..=6u64)
        .map(|n| Duration::from_millis((7 - n) * 15))
        .collect();
    let image = Arc::new(MockImageGenerator::new_success().with_call_delays(delays));
    let orchestrator = orchestrator(image.clone());

    let report = orchestrator.create_storyboard(&aerosynth_brief()).await?;

    let expected_order: Vec<String> = (1..=6).rev().map(|n| format!("prompt {}", n)).collect();
    assert_eq!(image.completed(), expected_order);
    assert!(report.all_succeeded());

    let snapshot = orchestrator.store().snapshot().await;
    for frame in snapshot.frames() {
        assert_eq!(*frame.status(), FrameStatus::Success, "frame {}", frame.id());
        let stored = frame.current_image().expect("Frame rendered");
        assert_eq!(
            stored.data(),
            &MockImageGenerator::expected_bytes(frame.visual_prompt(), *frame.id() as usize)
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_images_loading_spans_overlapping_bulk_renders() -> anyhow::Result<()> {
    // First batch: frames 1-3 fast, 4-6 slow. Second batch: all slow.
    let mut delays = vec![Duration::from_millis(20); 3];
    delays.extend(vec![Duration::from_millis(60); 3]);
    delays.extend(vec![Duration::from_millis(120); 6]);
    let image = Arc::new(MockImageGenerator::new_success().with_call_delays(delays));
    let orchestrator = orchestrator(image.clone());
    let store = orchestrator.store().clone();
    orchestrator.load_script(&aerosynth_brief()).await?;

    let (first, second, during) = tokio::join!(
        orchestrator.regenerate_all(),
        async {
            tokio::time::sleep(Duration::from_millis(40)).await;
            orchestrator.regenerate_all().await
        },
        async {
            // First batch has finished; second is still in flight.
            tokio::time::sleep(Duration::from_millis(100)).await;
            store.snapshot().await
        }
    );

    assert!(first.all_succeeded());
    assert!(second.all_succeeded());
    assert!(*during.images_loading());
    for id in [1, 2, 3] {
        let frame = during.frame(id).expect("Frame exists");
        assert_eq!(*frame.status(), FrameStatus::Loading, "frame {}", id);
    }

    let snapshot = store.snapshot().await;
    assert!(!snapshot.images_loading());
    assert_eq!(snapshot.count(FrameStatus::Success), 6);
    assert_eq!(image.call_count(), 12);
    Ok(())
}

//
// ─── REGENERATE ────────────────────────────────────────────────────────────────
//

#[tokio::test]
async fn test_regenerate_frame_three_leaves_siblings_untouched() -> anyhow::Result<()> {
    let store = FrameStore::new();
    let initial = orchestrator(Arc::new(MockImageGenerator::new_success()))
        .with_store(store.clone());
    initial.create_storyboard(&aerosynth_brief()).await?;
    let before = store.snapshot().await;
    assert_eq!(before.count(FrameStatus::Success), 6);

    let image = Arc::new(
        MockImageGenerator::new_success().with_hook(MockHook::Observe(store.clone())),
    );
    let orchestrator = orchestrator(image.clone()).with_store(store.clone());
    let settlement = orchestrator.regenerate_frame(3).await?;

    assert_eq!(settlement, Settlement::Applied(FrameStatus::Success));

    // While the request was in flight only frame 3 was loading.
    let observed = image.observed();
    assert_eq!(observed.len(), 1);
    let during = &observed[0];
    let third = during.frame(3).expect("Frame 3 exists");
    assert_eq!(*third.status(), FrameStatus::Loading);
    assert_eq!(third.image(), before.frame(3).expect("Frame 3 exists").image());
    assert!(!during.images_loading());
    for id in [1, 2, 4, 5, 6] {
        assert_eq!(before.frame(id), during.frame(id), "frame {} changed", id);
        let frame = during.frame(id).expect("Frame exists");
        assert_eq!(*frame.status(), FrameStatus::Success);
    }

    let after = store.snapshot().await;
    for id in [1, 2, 4, 5, 6] {
        assert_eq!(before.frame(id), after.frame(id), "frame {} changed", id);
    }

    let frame = after.frame(3).expect("Frame 3 exists");
    assert_eq!(*frame.status(), FrameStatus::Success);
    assert_eq!(
        frame.image().as_ref().map(|i| i.data().clone()),
        Some(MockImageGenerator::expected_bytes("prompt 3", 1))
    );
    assert_ne!(before.frame(3), after.frame(3));
    assert_eq!(image.prompts(), vec!["prompt 3".to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_regenerate_uses_the_given_prompt() -> anyhow::Result<()> {
    let image = Arc::new(MockImageGenerator::new_success());
    let orchestrator = orchestrator(image.clone());
    orchestrator.create_storyboard(&aerosynth_brief()).await?;

    orchestrator.regenerate(2, "prompt 2, night time").await?;

    assert_eq!(
        image.prompts().last().map(String::as_str),
        Some("prompt 2, night time")
    );
    let frame = orchestrator.store().frame(2).await.expect("Frame 2 exists");
    assert_eq!(frame.visual_prompt(), "prompt 2");
    assert_eq!(*frame.status(), FrameStatus::Success);
    Ok(())
}

#[tokio::test]
async fn test_regenerate_unknown_frame_makes_no_request() -> anyhow::Result<()> {
    let image = Arc::new(MockImageGenerator::new_success());
    let orchestrator = orchestrator(image.clone());
    orchestrator.create_storyboard(&aerosynth_brief()).await?;
    let calls = image.call_count();

    let err = orchestrator
        .regenerate_frame(9)
        .await
        .expect_err("Frame 9 does not exist");

    match err.kind() {
        AdvisionErrorKind::Storyboard(e) => {
            assert_eq!(e.kind, StoryboardErrorKind::UnknownFrame(9));
        }
        other => panic!("Unexpected error: {}", other),
    }
    assert_eq!(image.call_count(), calls);
    Ok(())
}

#[tokio::test]
async fn test_failed_regenerate_keeps_stale_image() -> anyhow::Result<()> {
    let store = FrameStore::new();
    let rendering = orchestrator(Arc::new(MockImageGenerator::new_success()))
        .with_store(store.clone());
    rendering.create_storyboard(&aerosynth_brief()).await?;
    let previous = store.frame(2).await.and_then(|f| f.image().clone());

    let failing = orchestrator(Arc::new(MockImageGenerator::new(MockImageBehavior::Error(
        GeminiErrorKind::NoImageData,
    ))))
    .with_store(store.clone());
    let settlement = failing.regenerate_frame(2).await?;

    assert_eq!(settlement, Settlement::Applied(FrameStatus::Error));
    let frame = store.frame(2).await.expect("Frame 2 exists");
    assert_eq!(*frame.status(), FrameStatus::Error);
    assert!(frame.current_image().is_none());
    assert_eq!(frame.image().clone(), previous);
    Ok(())
}

#[tokio::test]
async fn test_concurrent_regenerates_on_different_frames() -> anyhow::Result<()> {
    let image = Arc::new(MockImageGenerator::new_success());
    let orchestrator = orchestrator(image.clone());
    orchestrator.create_storyboard(&aerosynth_brief()).await?;

    let (first, second) = tokio::join!(
        orchestrator.regenerate_frame(1),
        orchestrator.regenerate_frame(6)
    );

    assert_eq!(first?, Settlement::Applied(FrameStatus::Success));
    assert_eq!(second?, Settlement::Applied(FrameStatus::Success));
    let snapshot = orchestrator.store().snapshot().await;
    assert_eq!(snapshot.count(FrameStatus::Success), 6);
    assert_eq!(image.call_count(), 8);
    Ok(())
}
