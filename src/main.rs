//! webpconv - IMAGE FOLDER TO WEBP CONVERTER
//!
//! 메인 엔트리포인트

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use webpconv::{
    cli::Args,
    config::Config,
    convert_all,
    pattern::{discover_files, Discovery},
    processor::{output_path_for, ConvertOutcome, ConvertResult},
    stats::{format_bytes, format_percent, Statistics},
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let config = args.to_config().context("설정 검증 실패")?;

    if !args.json {
        print_header(&args, &config);
    }

    // 이미지 파일 탐색
    let discovery = discover_files(config.patterns()).context("파일 탐색 실패")?;
    report_unreadable(&discovery);
    let files = discovery.files;

    if !args.json {
        println!(
            "  {} 발견된 파일 수: {}",
            "📋".bright_white(),
            files.len().to_string().bright_green()
        );
    }

    if files.is_empty() {
        if args.json {
            print_json_summary(&Statistics::new(0))?;
        } else {
            println!("{}", "⚠️ 처리할 이미지 파일이 없습니다.".yellow());
        }
        write_log_if_requested(&args, &[])?;
        return Ok(());
    }

    // 드라이런 모드
    if args.dry_run {
        print_dry_run(&files);
        write_log_if_requested(&args, &[])?;
        return Ok(());
    }

    run_conversion(&args, &config, &files)
}

/// 헤더 출력
fn print_header(args: &Args, config: &Config) {
    println!("\n{}", "═".repeat(50).bright_blue());
    println!(
        "{}",
        " 🚀 IMAGE FOLDER TO WEBP CONVERTER".bright_white().bold()
    );
    println!("{}", "═".repeat(50).bright_blue());
    println!("  {} 품질: {}", "⚙️".bright_yellow(), config.quality());
    println!(
        "  {} 패턴: {}",
        "🔍".bright_magenta(),
        config.patterns().join(", ")
    );

    if args.dry_run {
        println!(
            "  {} {}",
            "⚠️".bright_yellow(),
            "드라이런 모드 (실제 변환 없음)".yellow()
        );
    }

    println!("{}", "═".repeat(50).bright_blue());
    println!("\n{}", "📁 파일 검색 중...".bright_cyan());
}

/// 탐색 중 읽지 못한 경로 경고
fn report_unreadable(discovery: &Discovery) {
    for (path, reason) in &discovery.unreadable {
        log::warn!("탐색 중 읽을 수 없는 경로: {} ({})", path.display(), reason);
    }
}

/// 드라이런 출력
fn print_dry_run(files: &[PathBuf]) {
    println!("\n{}", "📋 처리 예정 파일 목록:".bright_cyan());

    let mut pending = 0;
    for (i, path) in files.iter().enumerate() {
        let output = output_path_for(path);
        if output.exists() {
            println!(
                "  {}. {} {}",
                i + 1,
                path.display(),
                "(건너뜀: 이미 존재)".dimmed()
            );
        } else {
            pending += 1;
            println!("  {}. {} → {}", i + 1, path.display(), output.display());
        }
    }

    println!(
        "\n{} 총 {} 개 중 {} 개의 파일이 변환될 예정입니다.",
        "ℹ️".bright_blue(),
        files.len().to_string().bright_green(),
        pending.to_string().bright_green()
    );
}

/// 변환 실행
fn run_conversion(args: &Args, config: &Config, files: &[PathBuf]) -> Result<()> {
    let pb = create_progress_bar(files.len(), args.json)?;
    let mut errors: Vec<(PathBuf, String)> = Vec::new();

    if !args.json {
        println!("\n{}", "⚡ 변환 중...".bright_cyan());
    }

    let stats = convert_all(files, config, |result| {
        if let ConvertOutcome::Errored { message } = &result.outcome {
            errors.push((result.input.clone(), message.clone()));
        }

        if !args.json {
            pb.println(describe_result(result));
        }
        pb.inc(1);
    });

    pb.finish_with_message("완료!");

    if !args.json {
        print_errors(&errors, args.verbose);
    }

    write_log_if_requested(args, &errors)?;

    if args.json {
        print_json_summary(&stats)?;
    } else {
        stats.print_summary();
        println!("\n{} 완료!\n", "✨".bright_green());
    }

    Ok(())
}

/// 파일 하나의 처리 결과 한 줄 요약
fn describe_result(result: &ConvertResult) -> String {
    match &result.outcome {
        ConvertOutcome::Converted {
            original_size,
            new_size,
        } => format!(
            "  {} {} → {}  {} → {} (절약 {})",
            "✓".green(),
            file_name(&result.input),
            file_name(&result.output),
            format_bytes(*original_size as f64),
            format_bytes(*new_size as f64),
            format_percent(result.outcome.saved_percent().unwrap_or(0.0))
        ),
        ConvertOutcome::Skipped => format!(
            "  {} 건너뜀 (이미 존재): {}",
            "⏭".yellow(),
            result.output.display()
        ),
        ConvertOutcome::Errored { message } => format!(
            "  {} {}: {}",
            "✗".red(),
            result.input.display(),
            message.dimmed()
        ),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// 진행률 바 생성 (JSON 모드에서는 숨김)
fn create_progress_bar(total: usize, hidden: bool) -> Result<ProgressBar> {
    if hidden {
        return Ok(ProgressBar::hidden());
    }

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")?
            .progress_chars("█▓▒░"),
    );
    Ok(pb)
}

/// 에러 목록 출력
fn print_errors(errors: &[(PathBuf, String)], verbose: bool) {
    if errors.is_empty() {
        return;
    }

    println!("\n{}", "❌ 오류 발생 파일:".bright_red());
    for (path, error) in errors {
        println!("  {} {}", "•".red(), path.display());
        if verbose {
            println!("    {}", error.dimmed());
        }
    }
}

/// JSON 요약 출력
fn print_json_summary(stats: &Statistics) -> Result<()> {
    let json = serde_json::to_string_pretty(&stats.summary()).context("요약 직렬화 실패")?;
    println!("{}", json);
    Ok(())
}

/// `--log`가 지정된 경우에만 에러 로그 작성
fn write_log_if_requested(args: &Args, errors: &[(PathBuf, String)]) -> Result<()> {
    match args.log {
        Some(ref log_path) => write_error_log(log_path, errors),
        None => Ok(()),
    }
}

/// 에러 로그 파일 작성
fn write_error_log(log_path: &Path, errors: &[(PathBuf, String)]) -> Result<()> {
    let to_log_error = |e: std::io::Error| webpconv::ConvertError::LogWrite {
        file: log_path.to_path_buf(),
        reason: e.to_string(),
    };

    let mut log_file = File::create(log_path).map_err(to_log_error)?;

    let mut contents = String::new();
    contents.push_str("webpconv 에러 로그\n");
    contents.push_str(&format!("총 에러 수: {}\n", errors.len()));
    contents.push_str(&"=".repeat(50));
    contents.push('\n');

    for (path, error) in errors {
        contents.push_str(&format!("\n파일: {}\n", path.display()));
        contents.push_str(&format!("에러: {}\n", error));
    }

    log_file
        .write_all(contents.as_bytes())
        .map_err(to_log_error)?;

    log::info!("에러 로그 저장: {}", log_path.display());

    Ok(())
}
