//! 이미지 변환 모듈
//!
//! 개별 이미지 파일의 디코딩, 투명도 평탄화, WebP 인코딩과 저장을 담당합니다.

use image::{DynamicImage, ImageReader, Rgb, RgbImage, Rgba};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{ConvertError, Result};

/// 출력 파일 확장자
pub const WEBP_EXTENSION: &str = "webp";

/// libwebp 압축 방식 (0=빠름 ~ 6=최고 압축)
const WEBP_METHOD: i32 = 6;

/// 단일 파일 변환 결과 종류
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertOutcome {
    /// 변환 성공
    Converted { original_size: u64, new_size: u64 },
    /// 출력 파일이 이미 있어 건너뜀
    Skipped,
    /// 변환 실패
    Errored { message: String },
}

impl ConvertOutcome {
    /// 절약된 바이트 수 (변환 성공 시에만, 커졌다면 음수)
    pub fn saved_bytes(&self) -> Option<i64> {
        match self {
            ConvertOutcome::Converted {
                original_size,
                new_size,
            } => Some(*original_size as i64 - *new_size as i64),
            _ => None,
        }
    }

    /// 절약 비율(%) - 원본 크기가 0이면 0
    pub fn saved_percent(&self) -> Option<f64> {
        match self {
            ConvertOutcome::Converted { original_size, .. } => {
                let saved = self.saved_bytes().unwrap_or(0);
                if *original_size == 0 {
                    Some(0.0)
                } else {
                    Some(saved as f64 / *original_size as f64 * 100.0)
                }
            }
            _ => None,
        }
    }
}

/// 파일 변환 결과
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// 입력 이미지 경로
    pub input: PathBuf,
    /// WebP 출력 경로
    pub output: PathBuf,
    /// 결과 종류
    pub outcome: ConvertOutcome,
}

/// 입력 경로에 대응하는 WebP 출력 경로
///
/// # Examples
/// ```
/// use std::path::{Path, PathBuf};
/// use webpconv::processor::output_path_for;
///
/// assert_eq!(
///     output_path_for(Path::new("images/a/photo.jpeg")),
///     PathBuf::from("images/a/photo.webp")
/// );
/// ```
pub fn output_path_for(input: &Path) -> PathBuf {
    input.with_extension(WEBP_EXTENSION)
}

/// 단일 이미지 파일 변환
///
/// 출력 파일이 이미 존재하면 입력을 읽지 않고 건너뜁니다.
/// 모든 실패는 `ConvertOutcome::Errored`로 반환되며 호출자에게 전파되지 않습니다.
///
/// # Arguments
/// * `path` - 변환할 이미지 경로
/// * `config` - 변환 설정
///
/// # Returns
/// 변환 결과를 담은 `ConvertResult`
pub fn convert_file(path: &Path, config: &Config) -> ConvertResult {
    let output = output_path_for(path);

    let outcome = if output.exists() {
        ConvertOutcome::Skipped
    } else {
        match convert_file_internal(path, &output, config.quality()) {
            Ok((original_size, new_size)) => ConvertOutcome::Converted {
                original_size,
                new_size,
            },
            Err(e) => ConvertOutcome::Errored {
                message: e.to_string(),
            },
        }
    };

    log::debug!("{} -> {}: {:?}", path.display(), output.display(), outcome);

    ConvertResult {
        input: path.to_path_buf(),
        output,
        outcome,
    }
}

/// 내부 변환 로직 - (원본 크기, 출력 크기) 반환
fn convert_file_internal(input: &Path, output: &Path, quality: u8) -> Result<(u64, u64)> {
    let original_size = fs::metadata(input)
        .map_err(|e| ConvertError::Metadata {
            file: input.to_path_buf(),
            reason: e.to_string(),
        })?
        .len();

    let encoded = {
        let image = decode_image(input)?;
        let rgb = flatten_to_rgb(image);
        encode_webp(&rgb, quality)?
    };

    let new_size = write_atomically(output, &encoded)?;

    Ok((original_size, new_size))
}

/// 이미지 디코딩 (내용 기반 포맷 추정, 실패 시 확장자 사용)
fn decode_image(path: &Path) -> Result<DynamicImage> {
    let decode_error = |reason: String| ConvertError::Decode {
        file: path.to_path_buf(),
        reason,
    };

    ImageReader::open(path)
        .map_err(|e| decode_error(e.to_string()))?
        .with_guessed_format()
        .map_err(|e| decode_error(e.to_string()))?
        .decode()
        .map_err(|e| decode_error(e.to_string()))
}

/// 이미지를 불투명 RGB로 평탄화
///
/// 알파 채널이 있으면 (투명도가 있는 팔레트 이미지 포함) 흰색 배경 위에 합성하고,
/// 그 외 포맷(그레이스케일, 16비트 등)은 8비트 RGB로 변환합니다. 크기는 유지됩니다.
pub fn flatten_to_rgb(image: DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.into_rgb8();
    }

    let rgba = image.into_rgba8();
    let (width, height) = rgba.dimensions();

    RgbImage::from_fn(width, height, |x, y| {
        let Rgba([r, g, b, a]) = *rgba.get_pixel(x, y);
        Rgb([
            blend_over_white(r, a),
            blend_over_white(g, a),
            blend_over_white(b, a),
        ])
    })
}

/// 흰색 배경 위 알파 합성 (반올림)
fn blend_over_white(channel: u8, alpha: u8) -> u8 {
    let c = u32::from(channel);
    let a = u32::from(alpha);
    ((c * a + 255 * (255 - a) + 127) / 255) as u8
}

/// RGB 이미지를 손실 WebP로 인코딩
///
/// # Arguments
/// * `image` - 불투명 RGB 이미지
/// * `quality` - WebP 품질 (1-100)
///
/// # Returns
/// 인코딩된 WebP 바이트
pub fn encode_webp(image: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let (width, height) = image.dimensions();

    let mut webp_config = webp::WebPConfig::new().map_err(|_| ConvertError::Encode {
        reason: "WebP 인코더 설정을 초기화할 수 없습니다".to_string(),
    })?;
    webp_config.quality = f32::from(quality);
    webp_config.method = WEBP_METHOD;

    let encoded = webp::Encoder::from_rgb(image.as_raw(), width, height)
        .encode_advanced(&webp_config)
        .map_err(|e| ConvertError::Encode {
            reason: format!("{:?}", e),
        })?;

    Ok(encoded.to_vec())
}

/// 출력 디렉토리의 임시 파일에 쓴 뒤 덮어쓰기 없이 최종 경로로 이동
///
/// 실패하면 임시 파일은 삭제되므로 불완전한 `.webp` 파일이 남지 않습니다.
fn write_atomically(output: &Path, bytes: &[u8]) -> Result<u64> {
    let write_error = |reason: String| ConvertError::Write {
        file: output.to_path_buf(),
        reason,
    };

    let dir = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp = tempfile::Builder::new()
        .prefix(".webpconv-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| write_error(e.to_string()))?;

    temp.write_all(bytes)
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|e| write_error(e.to_string()))?;

    temp.persist_noclobber(output)
        .map_err(|e| write_error(e.error.to_string()))?;

    fs::metadata(output)
        .map(|m| m.len())
        .map_err(|e| write_error(e.to_string()))
}
