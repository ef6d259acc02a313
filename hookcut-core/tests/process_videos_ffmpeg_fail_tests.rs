// hookcut-core/tests/process_videos_ffmpeg_fail_tests.rs

use hookcut_core::config::CoreConfig;
use hookcut_core::error::CoreError;
use hookcut_core::external::mocks::{MockFfmpegSpawner, MockFfprobeExecutor};
use hookcut_core::processing::{RenderTier, process_single_video, process_videos};
use hookcut_core::sheets::mocks::InMemorySheet;
use ffmpeg_sidecar::event::{FfmpegEvent, FfmpegProgress};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

// Helper to create a dummy file with some content
fn create_dummy_file(dir: &Path, filename: &str) -> PathBuf {
    let file_path = dir.join(filename);
    let mut file = File::create(&file_path).expect("Failed to create dummy file");
    file.write_all(b"dummy content").expect("Failed to write dummy content");
    file_path
}

fn arg_after<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

struct Fixture {
    _dirs: Vec<tempfile::TempDir>,
    config: CoreConfig,
    video: PathBuf,
    temp_dir: PathBuf,
}

impl Fixture {
    /// Number of entries left in the caption temp directory.
    fn leftover_temp_files(&self) -> usize {
        std::fs::read_dir(&self.temp_dir)
            .expect("temp dir should still exist")
            .count()
    }
}

fn fixture(filename: &str) -> Fixture {
    let input_dir = tempdir().unwrap();
    let output_dir = tempdir().unwrap();
    let assets_dir = tempdir().unwrap();
    let temp_dir = tempdir().unwrap();
    create_dummy_file(assets_dir.path(), "TikTokDisplay-Medium.ttf");
    let video = create_dummy_file(input_dir.path(), filename);

    let mut config = CoreConfig::new(
        input_dir.path().to_path_buf(),
        output_dir.path().to_path_buf(),
        assets_dir.path().to_path_buf(),
    );
    config.temp_dir = Some(temp_dir.path().to_path_buf());

    Fixture {
        temp_dir: temp_dir.path().to_path_buf(),
        _dirs: vec![input_dir, output_dir, assets_dir, temp_dir],
        config,
        video,
    }
}

#[test]
fn test_full_tier_failure_falls_back_without_reselection() -> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture("sad_01.mp4");
    let sheet = InMemorySheet::new()
        .with_caption(false, "sad", "Miss you")
        .with_caption(false, "sad", "Second caption");

    let mock_ffprobe = MockFfprobeExecutor::new();
    mock_ffprobe.expect_duration(&fx.video, 10.0);

    // --- Mock Spawner Setup ---
    let mock_spawner = MockFfmpegSpawner::new();
    let mock_events = vec![
        FfmpegEvent::Progress(FfmpegProgress { frame: 30, fps: 30.0, size_kb: 256, time: "00:00:01.00".to_string(), bitrate_kbps: 2097.2, speed: 1.0, q: 0.0, raw_log_message: String::new() }),
        FfmpegEvent::Error("Cannot load font".to_string()),
    ];
    // The full tier is the only one that names a font file
    mock_spawner.add_exit_error_expectation("fontfile=", mock_events, 1);
    mock_spawner.add_success_expectation("drawtext", vec![], true);

    let outcome = process_single_video(&sheet, &mock_spawner, &mock_ffprobe, &fx.config, &fx.video)?;

    assert_eq!(outcome.tier, RenderTier::Fallback);
    assert_eq!(outcome.output_path, fx.config.output_dir.join("sad_01_edited.mp4"));
    assert_eq!(mock_spawner.remaining_expectations(), 0);

    let calls = mock_spawner.get_received_calls();
    assert_eq!(calls.len(), 2, "Expected full and fallback renders");
    let full_filter = arg_after(&calls[0], "-vf").unwrap();
    let fallback_filter = arg_after(&calls[1], "-vf").unwrap();
    assert!(full_filter.contains("fontfile="));
    assert!(!fallback_filter.contains("fontfile="));
    assert_eq!(arg_after(&calls[0], "-t"), arg_after(&calls[1], "-t"));
    assert_eq!(arg_after(&calls[0], "-ss"), arg_after(&calls[1], "-ss"));

    let texts = mock_spawner.get_caption_texts();
    assert_eq!(texts, vec![Some("Miss you".to_string()), Some("Miss you".to_string())]);

    // Exactly one row consumed: the fallback reuses the caption already selected.
    assert_eq!(sheet.writes().len(), 1);
    assert_eq!(sheet.cell(3, 1), "FALSE");
    // Both caption files are gone, including the one of the failed tier.
    assert_eq!(fx.leftover_temp_files(), 0);
    Ok(())
}

#[test]
fn test_spawn_failures_step_down_to_trim_only() -> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture("crying_baby.mkv");
    let sheet = InMemorySheet::new().with_caption(false, "crying", "me at 3am");

    let mock_ffprobe = MockFfprobeExecutor::new();
    mock_ffprobe.expect_duration(&fx.video, 5.0);

    let mock_spawner = MockFfmpegSpawner::new();
    mock_spawner.add_spawn_error_expectation("fontfile=", CoreError::RenderFailed("spawn".to_string()));
    mock_spawner.add_exit_error_expectation("drawtext", vec![], 1);
    mock_spawner.add_success_expectation("libx264", vec![], true);

    let outcome = process_single_video(&sheet, &mock_spawner, &mock_ffprobe, &fx.config, &fx.video)?;

    assert_eq!(outcome.tier, RenderTier::NoText);
    let calls = mock_spawner.get_received_calls();
    assert_eq!(calls.len(), 3);
    assert!(arg_after(&calls[2], "-vf").is_none(), "trim-only render has no filter");
    assert_eq!(arg_after(&calls[2], "-t"), Some("4.25"));
    assert_eq!(mock_spawner.get_caption_texts()[2], None);
    assert_eq!(fx.leftover_temp_files(), 0);
    Ok(())
}

#[test]
fn test_all_tiers_failing_marks_video_failed() -> Result<(), Box<dyn std::error::Error>> {
    let fx = fixture("surprised_party.webm");
    let sheet = InMemorySheet::new().with_caption(false, "surprised", "no way");

    let mock_ffprobe = MockFfprobeExecutor::new();
    mock_ffprobe.expect_duration(&fx.video, 8.0);

    let mock_spawner = MockFfmpegSpawner::new();
    mock_spawner.add_exit_error_expectation("libx264", vec![], 1);
    mock_spawner.add_exit_error_expectation("libx264", vec![], 1);
    mock_spawner.add_exit_error_expectation("libx264", vec![], 1);

    let result = process_videos(&sheet, &mock_spawner, &mock_ffprobe, &fx.config, &[fx.video.clone()])?;

    assert!(result.succeeded.is_empty());
    assert_eq!(result.failed, vec!["surprised_party.webm".to_string()]);
    assert!(!result.any_succeeded());
    assert_eq!(mock_spawner.get_received_calls().len(), 3);
    // No fourth attempt and no retry of a higher tier.
    assert_eq!(mock_spawner.remaining_expectations(), 0);
    // The caption stays consumed.
    assert_eq!(sheet.cell(2, 1), "TRUE");
    assert_eq!(fx.leftover_temp_files(), 0);

    let single = process_single_video(&sheet, &MockFfmpegSpawner::new(), &mock_ffprobe, &fx.config, &fx.video);
    assert!(matches!(single, Err(CoreError::NoCaptionAvailable(_))));
    Ok(())
}
