//! webpconv - IMAGE FOLDER TO WEBP CONVERTER
//!
//! 글로브 패턴으로 찾은 JPEG/PNG 이미지를 WebP로 일괄 변환하는 CLI 도구입니다.
//!
//! # 주요 기능
//!
//! - 🔍 **패턴 탐색**: `**` 재귀 매칭을 지원하는 glob 패턴, 중복 경로 제거
//! - ⏭️ **건너뛰기**: 같은 이름의 `.webp`가 이미 있으면 변환하지 않음
//! - 🎨 **투명도 평탄화**: 알파 채널은 흰색 배경 위에 합성
//! - 💾 **원자적 쓰기**: 임시 파일에 쓴 뒤 이동하므로 실패해도 불완전한 파일이 남지 않음
//! - 📈 **절약 통계**: 변환/건너뜀/실패 수와 절약 용량, JSON 요약 출력
//!
//! # 예제
//!
//! ```bash
//! # 기본 사용법 (images/ 아래 jpg, jpeg, png, 품질 80)
//! webpconv
//!
//! # 품질과 패턴 지정
//! webpconv --quality 90 -p "assets/**/*.png"
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod pattern;
pub mod processor;
pub mod stats;

// Re-exports for convenient access
pub use cli::Args;
pub use config::Config;
pub use error::{ConvertError, Result};
pub use pattern::{discover_files, Discovery};
pub use processor::{convert_file, output_path_for, ConvertOutcome, ConvertResult};
pub use stats::{format_bytes, Statistics};

/// 탐색된 모든 파일을 순차적으로 변환
///
/// 파일별 실패는 통계에 집계될 뿐 중단되지 않습니다.
/// 각 결과는 처리 직후 `on_result`로 전달됩니다.
pub fn convert_all<F>(files: &[std::path::PathBuf], config: &Config, mut on_result: F) -> Statistics
where
    F: FnMut(&ConvertResult),
{
    let mut stats = Statistics::new(files.len());

    for path in files {
        let result = convert_file(path, config);
        stats.record(&result.outcome);
        on_result(&result);
    }

    stats
}
