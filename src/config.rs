//! 변환 설정 모듈
//!
//! 한 번의 실행 동안 바뀌지 않는 변환 설정을 정의합니다.

use crate::error::{ConvertError, Result};

/// 기본 WebP 품질
pub const DEFAULT_QUALITY: u8 = 80;

/// 기본 입력 글로브 패턴 (작업 디렉토리 기준)
pub const DEFAULT_PATTERNS: [&str; 3] = [
    "images/**/*.jpg",
    "images/**/*.jpeg",
    "images/**/*.png",
];

/// 검증된 실행 설정
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    quality: u8,
    patterns: Vec<String>,
}

impl Config {
    /// 새 설정 생성
    ///
    /// 품질은 1-100 범위여야 하고 패턴은 최소 하나 있어야 합니다.
    ///
    /// # Examples
    /// ```
    /// use webpconv::config::Config;
    ///
    /// let config = Config::new(75, vec!["photos/**/*.png".to_string()]).unwrap();
    /// assert_eq!(config.quality(), 75);
    /// assert!(Config::new(0, vec!["*.png".to_string()]).is_err());
    /// ```
    pub fn new(quality: u8, patterns: Vec<String>) -> Result<Self> {
        if !(1..=100).contains(&quality) {
            return Err(ConvertError::InvalidQuality { quality });
        }

        if patterns.is_empty() {
            return Err(ConvertError::NoPatterns);
        }

        Ok(Self { quality, patterns })
    }

    /// WebP 품질
    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// 입력 글로브 패턴 목록
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            patterns: DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect(),
        }
    }
}
