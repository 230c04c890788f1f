//! 통합 테스트 모듈
//!
//! webpconv의 탐색-변환-통계 전체 흐름을 테스트합니다.

#![allow(dead_code)]

use image::{Rgb, RgbImage, Rgba, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// 테스트용 그라디언트 JPEG 생성
fn create_jpeg(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    img.save(&path).unwrap();
    path
}

/// 테스트용 반투명 PNG 생성
fn create_transparent_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    let img = RgbaImage::from_fn(width, height, |x, _| {
        let alpha = if x % 2 == 0 { 0 } else { 255 };
        Rgba([30, 60, 90, alpha])
    });
    img.save(&path).unwrap();
    path
}

/// 투명 색상(tRNS)이 있는 팔레트 PNG 생성
fn create_palette_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    let writer = std::io::BufWriter::new(fs::File::create(&path).unwrap());

    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(png::ColorType::Indexed);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_palette(vec![255, 0, 0, 0, 0, 255]);
    encoder.set_trns(vec![0, 255]);

    let indices: Vec<u8> = (0..width * height).map(|i| (i % 2) as u8).collect();
    let mut png_writer = encoder.write_header().unwrap();
    png_writer.write_image_data(&indices).unwrap();
    png_writer.finish().unwrap();

    path
}

/// 이미지가 아닌 내용의 파일 생성
fn create_corrupt_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"definitely not an image").unwrap();
    path
}

/// images/ 하위 구조를 가진 테스트 디렉토리 생성
fn setup_images_directory() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let images = temp_dir.path().join("images");
    let nested = images.join("gallery");
    fs::create_dir_all(&nested).unwrap();

    create_jpeg(&images, "photo.jpg", 64, 48);
    create_jpeg(&nested, "landscape.jpeg", 80, 40);
    create_transparent_png(&nested, "icon.png", 32, 32);

    temp_dir
}

/// 기본 패턴을 임시 디렉토리 기준으로 변환
fn default_patterns(root: &Path) -> Vec<String> {
    webpconv::config::DEFAULT_PATTERNS
        .iter()
        .map(|p| format!("{}/{}", root.display(), p))
        .collect()
}

fn run(root: &Path) -> webpconv::Statistics {
    let config = webpconv::Config::new(80, default_patterns(root)).unwrap();
    let discovery = webpconv::discover_files(config.patterns()).unwrap();
    webpconv::convert_all(&discovery.files, &config, |_| {})
}

fn count_webp(dir: &Path) -> usize {
    let pattern = format!("{}/**/*.webp", dir.display());
    glob::glob(&pattern).unwrap().filter_map(|e| e.ok()).count()
}

mod discovery_tests {
    use super::*;
    use webpconv::discover_files;

    #[test]
    fn test_default_patterns_find_all_formats() {
        let temp_dir = setup_images_directory();
        create_corrupt_file(temp_dir.path().join("images").as_path(), "readme.txt");

        let discovery = discover_files(&default_patterns(temp_dir.path())).unwrap();

        assert_eq!(discovery.files.len(), 3);
    }

    #[test]
    fn test_files_outside_images_are_ignored() {
        let temp_dir = setup_images_directory();
        create_jpeg(temp_dir.path(), "outside.jpg", 8, 8);

        let discovery = discover_files(&default_patterns(temp_dir.path())).unwrap();

        assert_eq!(discovery.files.len(), 3);
        assert!(discovery
            .files
            .iter()
            .all(|p| !p.ends_with("outside.jpg")));
    }
}

mod converter_tests {
    use super::*;
    use webpconv::processor::{convert_file, output_path_for, ConvertOutcome};
    use webpconv::Config;

    #[test]
    fn test_convert_creates_single_webp() {
        let temp_dir = TempDir::new().unwrap();
        let input = create_jpeg(temp_dir.path(), "photo.jpg", 64, 64);
        let original = fs::read(&input).unwrap();

        let result = convert_file(&input, &Config::default());

        assert!(matches!(result.outcome, ConvertOutcome::Converted { .. }));
        assert_eq!(result.output, output_path_for(&input));
        assert!(result.output.exists());
        // 입력은 그대로, 출력은 하나만
        assert_eq!(fs::read(&input).unwrap(), original);
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_saved_bytes_match_file_sizes() {
        let temp_dir = TempDir::new().unwrap();
        let input = create_jpeg(temp_dir.path(), "photo.jpg", 120, 90);
        let original_size = fs::metadata(&input).unwrap().len();

        let result = convert_file(&input, &Config::default());
        let new_size = fs::metadata(&result.output).unwrap().len();

        assert_eq!(
            result.outcome,
            ConvertOutcome::Converted {
                original_size,
                new_size
            }
        );
        assert_eq!(
            result.outcome.saved_bytes(),
            Some(original_size as i64 - new_size as i64)
        );
    }

    #[test]
    fn test_existing_output_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let input = create_jpeg(temp_dir.path(), "photo.jpg", 16, 16);
        let output = output_path_for(&input);
        fs::write(&output, b"stale").unwrap();

        let result = convert_file(&input, &Config::default());

        assert_eq!(result.outcome, ConvertOutcome::Skipped);
        assert_eq!(fs::read(&output).unwrap(), b"stale");
    }

    #[test]
    fn test_skip_does_not_read_input() {
        let temp_dir = TempDir::new().unwrap();
        let input = create_corrupt_file(temp_dir.path(), "broken.png");
        fs::write(output_path_for(&input), b"already there").unwrap();

        let result = convert_file(&input, &Config::default());

        assert_eq!(result.outcome, ConvertOutcome::Skipped);
    }

    #[test]
    fn test_transparent_png_is_flattened() {
        let temp_dir = TempDir::new().unwrap();
        let input = create_transparent_png(temp_dir.path(), "icon.png", 40, 24);

        let result = convert_file(&input, &Config::default());
        assert!(matches!(result.outcome, ConvertOutcome::Converted { .. }));

        let decoded = image::open(&result.output).unwrap();
        assert!(!decoded.color().has_alpha());
        assert_eq!((decoded.width(), decoded.height()), (40, 24));
    }

    #[test]
    fn test_palette_png_with_transparency_is_flattened() {
        let temp_dir = TempDir::new().unwrap();
        let input = create_palette_png(temp_dir.path(), "palette.png", 30, 20);
        assert!(image::open(&input).unwrap().color().has_alpha());

        let result = convert_file(&input, &Config::default());
        assert!(matches!(result.outcome, ConvertOutcome::Converted { .. }));

        let decoded = image::open(&result.output).unwrap();
        assert!(!decoded.color().has_alpha());
        assert_eq!((decoded.width(), decoded.height()), (30, 20));
    }

    #[test]
    fn test_corrupt_input_is_error_without_output() {
        let temp_dir = TempDir::new().unwrap();
        let input = create_corrupt_file(temp_dir.path(), "broken.jpg");

        let result = convert_file(&input, &Config::default());

        assert!(matches!(result.outcome, ConvertOutcome::Errored { .. }));
        assert!(!result.output.exists());
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_missing_input_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("ghost.png");

        let result = convert_file(&input, &Config::default());

        match result.outcome {
            ConvertOutcome::Errored { message } => assert!(message.contains("ghost.png")),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}

mod batch_tests {
    use super::*;

    #[test]
    fn test_full_run_converts_everything() {
        let temp_dir = setup_images_directory();

        let stats = run(temp_dir.path());

        assert_eq!(stats.total_files, 3);
        assert_eq!(stats.converted, 3);
        assert_eq!(stats.skipped, 0);
        assert_eq!(stats.errors, 0);
        assert_eq!(count_webp(temp_dir.path()), 3);
        assert!(stats.is_consistent());
    }

    #[test]
    fn test_rerun_skips_everything() {
        let temp_dir = setup_images_directory();
        run(temp_dir.path());

        let stats = run(temp_dir.path());

        assert_eq!(stats.total_files, 3);
        assert_eq!(stats.converted, 0);
        assert_eq!(stats.skipped, 3);
        assert_eq!(stats.saved_bytes, 0);
        assert_eq!(stats.average_saved(), None);
        assert_eq!(count_webp(temp_dir.path()), 3);
    }

    #[test]
    fn test_one_new_and_one_existing() {
        let temp_dir = TempDir::new().unwrap();
        let images = temp_dir.path().join("images");
        fs::create_dir(&images).unwrap();

        let fresh = create_jpeg(&images, "fresh.jpg", 200, 150);
        let done = create_jpeg(&images, "done.jpg", 50, 50);
        fs::write(images.join("done.webp"), b"converted earlier").unwrap();
        let original_size = fs::metadata(&fresh).unwrap().len() as i64;

        let stats = run(temp_dir.path());
        let new_size = fs::metadata(images.join("fresh.webp")).unwrap().len() as i64;

        assert_eq!(stats.total_files, 2);
        assert_eq!(stats.converted, 1);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.errors, 0);
        assert_eq!(stats.saved_bytes, original_size - new_size);
        assert!(done.exists());
    }

    #[test]
    fn test_corrupt_file_does_not_abort_batch() {
        let temp_dir = setup_images_directory();
        let images = temp_dir.path().join("images");
        create_corrupt_file(&images, "broken.jpg");
        create_corrupt_file(&images, "empty.png");

        let mut seen = Vec::new();
        let config = webpconv::Config::new(80, default_patterns(temp_dir.path())).unwrap();
        let discovery = webpconv::discover_files(config.patterns()).unwrap();
        let stats = webpconv::convert_all(&discovery.files, &config, |result| {
            seen.push(result.input.clone());
        });

        assert_eq!(stats.total_files, 5);
        assert_eq!(stats.converted, 3);
        assert_eq!(stats.errors, 2);
        assert_eq!(seen.len(), 5);
        assert!(stats.is_consistent());
        assert!(!images.join("broken.webp").exists());
    }

    #[test]
    fn test_total_saved_is_sum_of_files() {
        let temp_dir = setup_images_directory();
        let config = webpconv::Config::new(80, default_patterns(temp_dir.path())).unwrap();
        let discovery = webpconv::discover_files(config.patterns()).unwrap();

        let mut sum = 0;
        let stats = webpconv::convert_all(&discovery.files, &config, |result| {
            sum += result.outcome.saved_bytes().unwrap_or(0);
        });

        assert_eq!(stats.saved_bytes, sum);
    }

    #[test]
    fn test_empty_directory() {
        let temp_dir = TempDir::new().unwrap();

        let stats = run(temp_dir.path());

        assert_eq!(stats.total_files, 0);
        assert!(stats.is_consistent());
        assert_eq!(stats.average_saved(), None);
    }
}

mod stats_tests {
    use webpconv::stats::format_bytes;

    #[test]
    fn test_format_bytes_reference_values() {
        assert_eq!(format_bytes(0.0), "0 Bytes");
        assert_eq!(format_bytes(1536.0), "1.50 KB");
        assert_eq!(format_bytes(1_048_576.0), "1.00 MB");
    }
}

mod error_tests {
    use std::path::PathBuf;
    use webpconv::error::ConvertError;

    #[test]
    fn test_decode_error_display() {
        let error = ConvertError::Decode {
            file: PathBuf::from("broken.jpg"),
            reason: "unexpected EOF".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("이미지 디코딩 실패"));
        assert!(msg.contains("broken.jpg"));
    }

    #[test]
    fn test_invalid_quality_display() {
        let error = ConvertError::InvalidQuality { quality: 0 };
        assert!(error.to_string().contains("1-100"));
    }
}

mod cli_tests {
    use clap::Parser;
    use webpconv::cli::Args;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["webpconv"]).unwrap();
        let config = args.to_config().unwrap();

        assert_eq!(config.quality(), 80);
        assert_eq!(
            config.patterns(),
            ["images/**/*.jpg", "images/**/*.jpeg", "images/**/*.png"]
        );
        assert!(!args.dry_run);
        assert!(!args.json);
    }

    #[test]
    fn test_custom_patterns_and_quality() {
        let args = Args::try_parse_from([
            "webpconv",
            "-q",
            "95",
            "-p",
            "a/**/*.png",
            "--pattern",
            "b/*.jpg",
        ])
        .unwrap();

        assert_eq!(args.quality, 95);
        assert_eq!(args.get_patterns(), vec!["a/**/*.png", "b/*.jpg"]);
    }

    #[test]
    fn test_dry_run_conflicts_with_json() {
        assert!(Args::try_parse_from(["webpconv", "--dry-run", "--json"]).is_err());
        assert!(Args::try_parse_from(["webpconv", "--dry-run"]).is_ok());
        assert!(Args::try_parse_from(["webpconv", "--json"]).is_ok());
    }

    #[test]
    fn test_quality_out_of_range_rejected() {
        assert!(Args::try_parse_from(["webpconv", "--quality", "0"]).is_err());
        assert!(Args::try_parse_from(["webpconv", "--quality", "101"]).is_err());
    }
}
