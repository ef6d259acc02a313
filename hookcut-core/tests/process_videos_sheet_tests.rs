// hookcut-core/tests/process_videos_sheet_tests.rs

use hookcut_core::config::CoreConfig;
use hookcut_core::error::CoreError;
use hookcut_core::external::mocks::{MockFfmpegSpawner, MockFfprobeExecutor};
use hookcut_core::processing::{process_single_video, process_videos};
use hookcut_core::sheets::mocks::{CellWrite, InMemorySheet};
use hookcut_core::sheets::{SheetStatistics, check_sheet_format};
use std::fs::File;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn create_dummy_file(dir: &Path, filename: &str) -> PathBuf {
    let file_path = dir.join(filename);
    File::create(&file_path).expect("Failed to create dummy file");
    file_path
}

fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|r| r.iter().map(|c| (*c).to_string()).collect())
        .collect()
}

fn config_for(input: &Path, output: &Path) -> CoreConfig {
    let mut config = CoreConfig::new(input.to_path_buf(), output.to_path_buf(), input.join("assets"));
    config.temp_dir = Some(output.join("tmp"));
    config
}

#[test]
fn test_no_unused_caption_means_no_render_and_no_write() -> Result<(), Box<dyn std::error::Error>> {
    let input_dir = tempdir()?;
    let output_dir = tempdir()?;
    let video = create_dummy_file(input_dir.path(), "sad_02.mp4");
    let config = config_for(input_dir.path(), output_dir.path());

    let sheet = InMemorySheet::new()
        .with_caption(true, "sad", "already used")
        .with_caption(false, "romantic", "wrong type");

    let mock_spawner = MockFfmpegSpawner::new();
    let mock_ffprobe = MockFfprobeExecutor::new();

    let result = process_videos(&sheet, &mock_spawner, &mock_ffprobe, &config, &[video])?;

    assert!(result.succeeded.is_empty());
    assert_eq!(result.failed, vec!["sad_02.mp4".to_string()]);
    assert!(mock_spawner.get_received_calls().is_empty(), "ffmpeg must not run");
    assert!(sheet.writes().is_empty(), "sheet must not be mutated");
    assert!(!output_dir.path().join("sad_02_edited.mp4").exists());
    Ok(())
}

#[test]
fn test_unknown_type_fails_but_batch_continues() -> Result<(), Box<dyn std::error::Error>> {
    let input_dir = tempdir()?;
    let output_dir = tempdir()?;
    let unknown = create_dummy_file(input_dir.path(), "clip.mp4");
    let good = create_dummy_file(input_dir.path(), "romantic_01.mp4");
    let config = config_for(input_dir.path(), output_dir.path());

    let sheet = InMemorySheet::new().with_caption(false, "romantic", "butterflies");
    let mock_ffprobe = MockFfprobeExecutor::new();
    mock_ffprobe.expect_duration(&good, 4.0);
    let mock_spawner = MockFfmpegSpawner::new();
    mock_spawner.add_success_expectation("drawtext", vec![], true);

    let direct = process_single_video(&sheet, &mock_spawner, &mock_ffprobe, &config, &unknown);
    assert!(matches!(direct, Err(CoreError::UnknownVideoType(name)) if name == "clip.mp4"));

    let result = process_videos(
        &sheet,
        &mock_spawner,
        &mock_ffprobe,
        &config,
        &[unknown, good],
    )?;

    assert_eq!(result.failed, vec!["clip.mp4".to_string()]);
    assert_eq!(result.succeeded, vec!["romantic_01.mp4".to_string()]);
    assert_eq!(mock_spawner.get_received_calls().len(), 1);
    Ok(())
}

#[test]
fn test_sheet_errors_are_per_video_failures() -> Result<(), Box<dyn std::error::Error>> {
    let input_dir = tempdir()?;
    let output_dir = tempdir()?;
    let video = create_dummy_file(input_dir.path(), "confused_01.mp4");
    let config = config_for(input_dir.path(), output_dir.path());

    let sheet = InMemorySheet::new().with_caption(false, "confused", "???");
    sheet.fail_writes("quota exceeded");

    let mock_spawner = MockFfmpegSpawner::new();
    let mock_ffprobe = MockFfprobeExecutor::new();

    let single = process_single_video(&sheet, &mock_spawner, &mock_ffprobe, &config, &video);
    assert!(matches!(single, Err(CoreError::SheetApi(msg)) if msg == "quota exceeded"));

    sheet.fail_reads("backend unavailable");
    let result = process_videos(&sheet, &mock_spawner, &mock_ffprobe, &config, &[video])?;
    assert_eq!(result.failed.len(), 1);
    assert!(mock_spawner.get_received_calls().is_empty());
    Ok(())
}

#[test]
fn test_invalid_config_aborts_batch() {
    let input_dir = tempdir().unwrap();
    let output_dir = tempdir().unwrap();
    let mut config = config_for(input_dir.path(), output_dir.path());
    config.chars_per_line = 0;

    let result = process_videos(
        &InMemorySheet::new(),
        &MockFfmpegSpawner::new(),
        &MockFfprobeExecutor::new(),
        &config,
        &[],
    );
    assert!(matches!(result, Err(CoreError::Config(_))));
}

#[test]
fn test_sheet_format_and_statistics() -> Result<(), Box<dyn std::error::Error>> {
    let sheet = InMemorySheet::new()
        .with_caption(false, "sad", "a")
        .with_caption(true, "sad", "b")
        .with_caption(false, "crying", "c");

    assert_eq!(check_sheet_format(&sheet)?, 3);

    let stats = SheetStatistics::collect(&sheet)?;
    assert_eq!(stats.types.len(), 2);
    assert_eq!(stats.types[0].video_type, "sad");
    assert_eq!((stats.types[0].total, stats.types[0].used, stats.types[0].available), (2, 1, 1));
    assert_eq!(stats.available_for("crying"), 1);

    let bad = InMemorySheet::from_grid(vec![vec!["type".to_string(), "text".to_string()]]);
    assert!(matches!(check_sheet_format(&bad), Err(CoreError::SheetFormat(_))));
    Ok(())
}

#[test]
fn test_empty_caption_text_consumes_row_and_fails_video() -> Result<(), Box<dyn std::error::Error>> {
    let input_dir = tempdir()?;
    let output_dir = tempdir()?;
    let video = create_dummy_file(input_dir.path(), "sad_03.mp4");
    let config = config_for(input_dir.path(), output_dir.path());

    let sheet = InMemorySheet::new().with_caption(false, "sad", "   ");
    let mock_spawner = MockFfmpegSpawner::new();
    let mock_ffprobe = MockFfprobeExecutor::new();

    let single = process_single_video(&sheet, &mock_spawner, &mock_ffprobe, &config, &video);
    assert!(matches!(single, Err(CoreError::NoCaptionAvailable(kind)) if kind == "sad"));

    assert_eq!(
        sheet.writes(),
        vec![CellWrite { row: 2, column: 1, value: "TRUE".to_string() }]
    );
    assert!(mock_spawner.get_received_calls().is_empty(), "ffmpeg must not run");
    assert!(!output_dir.path().join("sad_03_edited.mp4").exists());
    Ok(())
}

#[test]
fn test_reordered_columns_mark_the_used_column() -> Result<(), Box<dyn std::error::Error>> {
    let input_dir = tempdir()?;
    let output_dir = tempdir()?;
    let first = create_dummy_file(input_dir.path(), "sad_01.mp4");
    let second = create_dummy_file(input_dir.path(), "sad_02.mp4");
    let config = config_for(input_dir.path(), output_dir.path());

    let sheet = InMemorySheet::from_grid(grid(&[
        &["type", "overlay text", "used?", "mentions toffee?"],
        &["Sad", "Miss you", "FALSE", "FALSE"],
    ]));
    assert_eq!(check_sheet_format(&sheet)?, 1);

    let mock_ffprobe = MockFfprobeExecutor::new();
    mock_ffprobe.expect_duration(&first, 10.0);
    mock_ffprobe.expect_duration(&second, 10.0);
    let mock_spawner = MockFfmpegSpawner::new();
    mock_spawner.add_success_expectation("drawtext", vec![], true);

    let result = process_videos(&sheet, &mock_spawner, &mock_ffprobe, &config, &[first, second])?;

    assert_eq!(result.succeeded, vec!["sad_01.mp4".to_string()]);
    assert_eq!(result.failed, vec!["sad_02.mp4".to_string()]);
    assert_eq!(
        sheet.writes(),
        vec![CellWrite { row: 2, column: 3, value: "TRUE".to_string() }]
    );
    assert_eq!(sheet.cell(2, 1), "Sad", "type cell must be untouched");
    assert_eq!(sheet.cell(2, 3), "TRUE");
    assert_eq!(mock_spawner.get_received_calls().len(), 1);
    Ok(())
}

#[test]
fn test_blank_header_column_is_a_format_error() -> Result<(), Box<dyn std::error::Error>> {
    let input_dir = tempdir()?;
    let output_dir = tempdir()?;
    let video = create_dummy_file(input_dir.path(), "sad_01.mp4");
    let config = config_for(input_dir.path(), output_dir.path());

    let sheet = InMemorySheet::from_grid(grid(&[
        &["", "used?", "mentions toffee?", "type", "overlay text"],
        &["", "FALSE", "FALSE", "Sad", "Miss you"],
    ]));
    assert!(matches!(check_sheet_format(&sheet), Err(CoreError::SheetFormat(_))));

    let mock_spawner = MockFfmpegSpawner::new();
    let result = process_videos(&sheet, &mock_spawner, &MockFfprobeExecutor::new(), &config, &[video])?;
    assert_eq!(result.failed, vec!["sad_01.mp4".to_string()]);
    assert!(sheet.writes().is_empty());
    assert!(mock_spawner.get_received_calls().is_empty());
    Ok(())
}
