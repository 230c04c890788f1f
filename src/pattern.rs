//! 파일 탐색 모듈
//!
//! glob 패턴을 확장하여 변환할 이미지 파일을 수집합니다.

use glob::{GlobError, MatchOptions};
use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::error::{ConvertError, Result};

/// 탐색 결과
#[derive(Debug, Default)]
pub struct Discovery {
    /// 중복이 제거된 파일 경로
    pub files: Vec<PathBuf>,
    /// 탐색 중 읽을 수 없었던 경로와 사유
    pub unreadable: Vec<(PathBuf, String)>,
}

/// 글로브 패턴 목록으로 파일 탐색
///
/// 여러 패턴에 동시에 매칭된 경로는 한 번만 포함됩니다.
/// 디렉토리는 제외하며, 아무것도 매칭하지 않는 패턴은 결과에 영향을 주지 않습니다.
/// 와일드카드는 `.`으로 시작하는 숨김 파일/디렉토리와 매칭되지 않습니다.
///
/// # Arguments
/// * `patterns` - 글로브 패턴 목록 (`**` 재귀 매칭 지원)
///
/// # Returns
/// 탐색 결과 또는 잘못된 패턴 에러
pub fn discover_files<S: AsRef<str>>(patterns: &[S]) -> Result<Discovery> {
    let mut files = BTreeSet::new();
    let mut unreadable = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        let entries =
            glob::glob_with(pattern, match_options()).map_err(|e| ConvertError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;

        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => {
                    files.insert(path);
                }
                Ok(_) => {}
                Err(error) => unreadable.push(unreadable_entry(error)),
            }
        }
    }

    Ok(Discovery {
        files: files.into_iter().collect(),
        unreadable,
    })
}

/// 숨김 항목은 패턴에 `.`을 직접 적었을 때만 매칭
fn match_options() -> MatchOptions {
    MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    }
}

fn unreadable_entry(error: GlobError) -> (PathBuf, String) {
    let path = error.path().to_path_buf();
    (path, error.error().to_string())
}
