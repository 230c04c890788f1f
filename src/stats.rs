//! 통계 및 유틸리티 모듈
//!
//! 변환 통계 수집 및 포맷팅을 담당합니다.

use colored::Colorize;
use serde::Serialize;
use std::time::{Duration, Instant};

use crate::processor::ConvertOutcome;

/// 바이트 단위 라벨 (GB 이상은 GB로 표시)
const BYTE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// 변환 통계 구조체
#[derive(Debug)]
pub struct Statistics {
    /// 총 파일 수
    pub total_files: usize,
    /// 변환 성공 수
    pub converted: usize,
    /// 건너뛴 수
    pub skipped: usize,
    /// 에러 발생 수
    pub errors: usize,
    /// 절약된 총 바이트 (음수 가능)
    pub saved_bytes: i64,
    /// 변환된 원본 총 바이트
    pub original_bytes: u64,
    /// 생성된 WebP 총 바이트
    pub output_bytes: u64,
    /// 처리 시작 시간
    start_time: Instant,
}

/// JSON 출력용 통계 스냅샷
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub converted: usize,
    pub skipped: usize,
    pub errors: usize,
    pub saved_bytes: i64,
    pub original_bytes: u64,
    pub output_bytes: u64,
    pub average_saved_bytes: Option<f64>,
    pub elapsed_secs: f64,
}

impl Statistics {
    /// 새 통계 인스턴스 생성
    pub fn new(total_files: usize) -> Self {
        Self {
            total_files,
            converted: 0,
            skipped: 0,
            errors: 0,
            saved_bytes: 0,
            original_bytes: 0,
            output_bytes: 0,
            start_time: Instant::now(),
        }
    }

    /// 파일 하나의 결과 반영
    pub fn record(&mut self, outcome: &ConvertOutcome) {
        match outcome {
            ConvertOutcome::Converted {
                original_size,
                new_size,
            } => {
                self.converted += 1;
                self.original_bytes += original_size;
                self.output_bytes += new_size;
                self.saved_bytes += outcome.saved_bytes().unwrap_or(0);
            }
            ConvertOutcome::Skipped => self.skipped += 1,
            ConvertOutcome::Errored { .. } => self.errors += 1,
        }
    }

    /// 처리된 파일 수
    pub fn processed(&self) -> usize {
        self.converted + self.skipped + self.errors
    }

    /// 전체 = 변환 + 건너뜀 + 에러 여부
    pub fn is_consistent(&self) -> bool {
        self.total_files == self.processed()
    }

    /// 변환 파일당 평균 절약 바이트 (변환 0건이면 None)
    pub fn average_saved(&self) -> Option<f64> {
        if self.converted == 0 {
            None
        } else {
            Some(self.saved_bytes as f64 / self.converted as f64)
        }
    }

    /// 경과 시간 반환
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// JSON 출력용 스냅샷 생성
    pub fn summary(&self) -> Summary {
        Summary {
            total: self.total_files,
            converted: self.converted,
            skipped: self.skipped,
            errors: self.errors,
            saved_bytes: self.saved_bytes,
            original_bytes: self.original_bytes,
            output_bytes: self.output_bytes,
            average_saved_bytes: self.average_saved(),
            elapsed_secs: self.elapsed().as_secs_f64(),
        }
    }

    /// 변환 통계 요약 출력
    pub fn print_summary(&self) {
        println!("\n{}", "═".repeat(50).bright_blue());
        println!("{}", " 📊 변환 결과".bright_white().bold());
        println!("{}", "═".repeat(50).bright_blue());

        println!(
            "  {} 전체 파일:    {}",
            "📁".bright_cyan(),
            self.total_files
        );
        println!(
            "  {} 변환:         {}",
            "✅".bright_green(),
            self.converted.to_string().green()
        );
        println!(
            "  {} 건너뜀:       {}",
            "⏭️".bright_yellow(),
            self.skipped.to_string().yellow()
        );

        if self.errors > 0 {
            println!(
                "  {} 실패:         {}",
                "❌".bright_red(),
                self.errors.to_string().red()
            );
        } else {
            println!("  {} 실패:         {}", "✅".bright_green(), "0".green());
        }

        println!(
            "  {} 절약 용량:    {}",
            "💾".bright_magenta(),
            format_bytes(self.saved_bytes as f64)
        );

        if let Some(average) = self.average_saved() {
            println!(
                "  {} 평균 절약:    {} / 파일",
                "📈".bright_white(),
                format_bytes(average)
            );
        }

        println!(
            "  {} 처리 시간:    {:.2}초",
            "⏱️".bright_cyan(),
            self.elapsed().as_secs_f64()
        );

        println!("{}", "═".repeat(50).bright_blue());
    }
}

/// 바이트를 읽기 쉬운 형식으로 변환
///
/// 1024 단위로 나누며 GB보다 큰 단위는 사용하지 않습니다.
/// 음수는 부호를 유지한 채 절댓값 기준으로 단위를 정합니다.
///
/// # Arguments
/// * `bytes` - 바이트 수
///
/// # Returns
/// 형식화된 문자열 (예: "1.25 MB")
///
/// # Examples
/// ```
/// use webpconv::stats::format_bytes;
///
/// assert_eq!(format_bytes(0.0), "0 Bytes");
/// assert_eq!(format_bytes(1536.0), "1.50 KB");
/// assert_eq!(format_bytes(1048576.0), "1.00 MB");
/// ```
pub fn format_bytes(bytes: f64) -> String {
    if bytes == 0.0 {
        return "0 Bytes".to_string();
    }

    let sign = if bytes < 0.0 { "-" } else { "" };
    let mut value = bytes.abs();
    let mut unit = 0;

    while value >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{}{:.2} {}", sign, value, BYTE_UNITS[unit])
}

/// 비율을 소수점 한 자리 퍼센트로 변환
pub fn format_percent(percent: f64) -> String {
    format!("{:.1}%", percent)
}
