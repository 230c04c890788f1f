//! 에러 타입 정의 모듈
//!
//! webpconv에서 발생할 수 있는 모든 에러 타입을 정의합니다.

use std::path::PathBuf;
use thiserror::Error;

/// webpconv에서 발생할 수 있는 에러 타입
#[derive(Error, Debug)]
pub enum ConvertError {
    /// 품질 값이 허용 범위(1-100)를 벗어남
    #[error("유효하지 않은 품질 값입니다 (1-100): {quality}")]
    InvalidQuality { quality: u8 },

    /// 처리할 패턴이 하나도 없음
    #[error("처리할 글로브 패턴이 없습니다")]
    NoPatterns,

    /// 유효하지 않은 패턴
    #[error("유효하지 않은 패턴 ({pattern}): {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// 원본 파일 정보 조회 실패
    #[error("파일 정보를 읽을 수 없습니다 ({file}): {reason}")]
    Metadata { file: PathBuf, reason: String },

    /// 이미지 디코딩 실패
    #[error("이미지 디코딩 실패 ({file}): {reason}")]
    Decode { file: PathBuf, reason: String },

    /// WebP 인코딩 실패
    #[error("WebP 인코딩 실패: {reason}")]
    Encode { reason: String },

    /// 출력 파일 쓰기 실패
    #[error("파일 쓰기 실패 ({file}): {reason}")]
    Write { file: PathBuf, reason: String },

    /// 에러 로그 파일 쓰기 실패
    #[error("에러 로그 쓰기 실패 ({file}): {reason}")]
    LogWrite { file: PathBuf, reason: String },
}

/// webpconv 결과 타입 별칭
pub type Result<T> = std::result::Result<T, ConvertError>;
