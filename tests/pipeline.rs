mod common;

use common::{StopAfter, bmp24, le_i32, le_u16};
use enough::{StopReason, Unstoppable};
use zengray::pipeline::{self, Mode, PipelineConfig, Stage};
use zengray::*;

fn write_input(dir: &std::path::Path, w: u32, h: u32) -> std::path::PathBuf {
    let path = dir.join("input_image.bmp");
    let data = bmp24(w, h, false, |x, y| [(x * 9) as u8, (y * 13) as u8, 77]);
    std::fs::write(&path, data).unwrap();
    path
}

#[test]
fn mode_parsing() {
    assert_eq!("rotate_cw".parse::<Mode>(), Ok(Mode::RotateCw));
    assert_eq!("ROTATE_CCW".parse::<Mode>(), Ok(Mode::RotateCcw));
    assert_eq!("filter".parse::<Mode>(), Ok(Mode::Filter));
    assert_eq!("all".parse::<Mode>(), Ok(Mode::All));
    assert!("sharpen".parse::<Mode>().is_err());
    assert_eq!(Mode::RotateCcw.to_string(), "rotate_ccw");
}

#[test]
fn rotate_cw_writes_swapped_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), 6, 4);
    let output = dir.path().join("output_clockwise.bmp");

    let config = PipelineConfig {
        threads: 3,
        ..Default::default()
    };
    let report = pipeline::run(&input, &output, Mode::RotateCw, &config, Unstoppable).unwrap();
    assert_eq!((report.width, report.height), (6, 4));
    assert_eq!(report.memory_bytes, 24);
    let stages: Vec<Stage> = report.stages.iter().map(|s| s.stage).collect();
    assert_eq!(stages, [Stage::Decode, Stage::RotateCw, Stage::Encode]);
    assert_eq!(report.outputs, [output.clone()]);

    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(le_u16(&bytes, 28), 8);
    assert_eq!(le_i32(&bytes, 18), 4);
    assert_eq!(le_i32(&bytes, 22), 6);

    let expected = rotate_clockwise(&decode_file(&input, Unstoppable).unwrap());
    assert_eq!(bytes, encode_bmp(&expected, Unstoppable).unwrap());
}

#[test]
fn filter_keeps_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), 9, 7);
    let output = dir.path().join("output_filtered.bmp");

    pipeline::run(
        &input,
        &output,
        Mode::Filter,
        &PipelineConfig::default(),
        Unstoppable,
    )
    .unwrap();

    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(le_i32(&bytes, 18), 9);
    assert_eq!(le_i32(&bytes, 22), 7);
    let expected = gaussian_blur(&decode_file(&input, Unstoppable).unwrap());
    assert_eq!(bytes, encode_bmp(&expected, Unstoppable).unwrap());
}

#[test]
fn all_mode_writes_three_files() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), 10, 6);
    let out_dir = dir.path().join("images");

    let report = pipeline::run(
        &input,
        &out_dir,
        Mode::All,
        &PipelineConfig::default(),
        Unstoppable,
    )
    .unwrap();
    assert_eq!(report.outputs.len(), 3);
    let transforms = report
        .stages
        .iter()
        .filter(|s| s.stage != Stage::Encode)
        .count();
    assert_eq!(transforms, 4);

    let gray = decode_file(&input, Unstoppable).unwrap();
    let cw = rotate_clockwise(&gray);
    let ccw = rotate_counterclockwise(&gray);
    let filtered = gaussian_blur(&cw);
    for (name, image) in [
        (pipeline::CLOCKWISE_FILE, &cw),
        (pipeline::COUNTERCLOCKWISE_FILE, &ccw),
        (pipeline::FILTERED_FILE, &filtered),
    ] {
        let bytes = std::fs::read(out_dir.join(name)).unwrap();
        assert_eq!(bytes, encode_bmp(image, Unstoppable).unwrap(), "{name}");
    }
}

#[test]
fn missing_input_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.bmp");
    let err = pipeline::run(
        &dir.path().join("absent.bmp"),
        &output,
        Mode::RotateCcw,
        &PipelineConfig::default(),
        Unstoppable,
    )
    .unwrap_err();
    assert!(matches!(err, BmpError::FileOpen { .. }));
    assert!(!output.exists());
}

#[test]
fn limits_apply_to_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), 8, 8);
    let config = PipelineConfig {
        limits: Limits::max_pixels(10),
        ..Default::default()
    };
    let err = pipeline::run(
        &input,
        &dir.path().join("out.bmp"),
        Mode::Filter,
        &config,
        Unstoppable,
    )
    .unwrap_err();
    assert!(matches!(err, BmpError::LimitExceeded(_)));
}

#[test]
fn stop_before_decode_cancels_run() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), 8, 8);
    let output = dir.path().join("out.bmp");
    let err = pipeline::run(
        &input,
        &output,
        Mode::RotateCw,
        &PipelineConfig::default(),
        StopAfter::new(0),
    )
    .unwrap_err();
    assert!(matches!(err, BmpError::Cancelled(StopReason::Cancelled)));
    assert!(!output.exists());
}

#[test]
fn stop_between_stages_writes_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), 8, 8);
    let output = dir.path().join("out.bmp");
    // decode stage and decode pass pass; the transform stage is refused
    let err = pipeline::run(
        &input,
        &output,
        Mode::Filter,
        &PipelineConfig::default(),
        StopAfter::new(2),
    )
    .unwrap_err();
    assert!(matches!(err, BmpError::Cancelled(_)));
    assert!(!output.exists());
}

#[test]
fn stop_in_all_mode_keeps_earlier_outputs_only() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), 8, 8);
    let out_dir = dir.path().join("images");
    // decode (2), clockwise (1), clockwise encode (2), then the
    // counterclockwise stage is refused
    let err = pipeline::run(
        &input,
        &out_dir,
        Mode::All,
        &PipelineConfig::default(),
        StopAfter::new(5),
    )
    .unwrap_err();
    assert!(matches!(err, BmpError::Cancelled(_)));
    assert!(out_dir.join(pipeline::CLOCKWISE_FILE).exists());
    assert!(!out_dir.join(pipeline::COUNTERCLOCKWISE_FILE).exists());
    assert!(!out_dir.join(pipeline::FILTERED_FILE).exists());
}
