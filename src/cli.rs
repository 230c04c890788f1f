//! CLI 인자 파싱 모듈
//!
//! clap을 사용한 명령줄 인자 정의 및 파싱을 담당합니다.

use clap::Parser;
use std::path::PathBuf;

use crate::config::{Config, DEFAULT_PATTERNS, DEFAULT_QUALITY};
use crate::error::Result;

/// webpconv CLI 인자 구조체
#[derive(Parser, Debug)]
#[command(
    name = "webpconv",
    author = "YourName <your@email.com>",
    version,
    about = "IMAGE FOLDER TO WEBP CONVERTER - 폴더 내 JPEG/PNG 이미지를 WebP로 일괄 변환하는 CLI 도구",
    long_about = r#"
IMAGE FOLDER TO WEBP CONVERTER
==============================

글로브 패턴으로 JPEG/PNG 이미지를 찾아
같은 폴더에 같은 이름의 .webp 파일로 변환합니다.

특징:
  • 이미 변환된 파일은 건너뛰기 (재실행 안전)
  • 투명 이미지는 흰색 배경으로 합성
  • 원자적 쓰기로 불완전한 출력 파일 방지
  • 절약 용량 통계 (JSON 출력 지원)

예제:
  webpconv
  webpconv --quality 90
  webpconv -p "photos/**/*.png" -p "photos/**/*.jpg"
  webpconv --dry-run
  webpconv --json --log errors.log
"#
)]
pub struct Args {
    /// WebP 품질 (1-100)
    #[arg(short, long, default_value_t = DEFAULT_QUALITY, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: u8,

    /// 입력 글로브 패턴 (반복 지정 가능, 기본값: images/**/*.{jpg,jpeg,png})
    #[arg(short, long = "pattern")]
    pub patterns: Vec<String>,

    /// 상세 출력 모드
    #[arg(short, long)]
    pub verbose: bool,

    /// 실제 변환 없이 처리될 파일 목록만 표시 (--json과 함께 사용 불가)
    #[arg(long, conflicts_with = "json")]
    pub dry_run: bool,

    /// 요약을 JSON으로 출력
    #[arg(long)]
    pub json: bool,

    /// 에러 로그 파일 경로 (처리할 파일이 없거나 드라이런이면 빈 로그 작성)
    #[arg(long)]
    pub log: Option<PathBuf>,
}

impl Args {
    /// 패턴 목록 반환 (지정되지 않았으면 기본 패턴)
    pub fn get_patterns(&self) -> Vec<String> {
        if self.patterns.is_empty() {
            DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect()
        } else {
            self.patterns.clone()
        }
    }

    /// 검증된 실행 설정 생성
    pub fn to_config(&self) -> Result<Config> {
        Config::new(self.quality, self.get_patterns())
    }
}
