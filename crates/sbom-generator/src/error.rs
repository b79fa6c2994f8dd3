//! SBOM 생성기 에러 타입
//!
//! [`SbomGeneratorError`]는 생성 파이프라인 내에서 발생할 수 있는 모든 에러를 나타냅니다.
//! `From<SbomGeneratorError> for ModsbomError` 구현을 통해 `?` 연산자로
//! 상위 에러 타입으로 자연스럽게 전파됩니다.
//!
//! # 에러 카테고리
//!
//! - **애플리케이션 탐색**: `Discovery`
//! - **모듈 해석**: `Resolution` ([`ResolutionScope`]로 전역/애플리케이션 구분)
//! - **문서 합성**: `Synthesis`
//! - **파일 쓰기**: `Write`
//! - **프로젝트 유형 탐지**: `Detection`
//! - **설정**: `Config`

use std::fmt;

use modsbom_core::error::{GenerationError, ModsbomError};

/// 모듈 해석이 실패한 범위
///
/// 전역 해석 실패는 실행 전체를 중단시키고, 애플리케이션 해석 실패는
/// 해당 애플리케이션만 실패로 기록됩니다. 애플리케이션 이름과 무관하게
/// 두 범위는 타입으로 구분됩니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionScope {
    /// 저장소 전역 모듈 목록 (`go list -m -json all`)
    Global,
    /// 애플리케이션 패키지 목록 (`go list -json -deps`)
    App(String),
}

impl ResolutionScope {
    /// 애플리케이션 범위를 생성합니다.
    pub fn app(name: impl Into<String>) -> Self {
        Self::App(name.into())
    }

    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global)
    }
}

impl fmt::Display for ResolutionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => f.write_str("global"),
            Self::App(name) => write!(f, "app:{name}"),
        }
    }
}

/// SBOM 생성기 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum SbomGeneratorError {
    /// 애플리케이션 디렉토리 탐색 실패
    #[error("discovery error: {path}: {reason}")]
    Discovery {
        /// 탐색 대상 디렉토리
        path: String,
        /// 실패 사유
        reason: String,
    },

    /// 외부 도구 호출 또는 출력 해석 실패
    #[error("resolution error [{scope}]: {reason}")]
    Resolution {
        /// 전역 또는 애플리케이션 범위
        scope: ResolutionScope,
        /// 실패 사유
        reason: String,
    },

    /// 합성기에 잘못된 중간 데이터가 전달됨
    #[error("synthesis error: {0}")]
    Synthesis(String),

    /// SBOM 파일 쓰기 실패
    #[error("write error: {path}: {source}")]
    Write {
        /// 출력 파일 경로
        path: String,
        /// 원본 I/O 에러
        source: std::io::Error,
    },

    /// 프로젝트 유형 탐지 실패
    #[error("detection error: {path}: {reason}")]
    Detection {
        /// 탐지 실패 경로
        path: String,
        /// 실패 사유
        reason: String,
    },

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },
}

impl SbomGeneratorError {
    /// scope를 지정한 해석 에러를 생성합니다.
    pub fn resolution(scope: &ResolutionScope, reason: impl Into<String>) -> Self {
        Self::Resolution {
            scope: scope.clone(),
            reason: reason.into(),
        }
    }

    /// 실행 전체를 중단해야 하는 에러인지 반환합니다.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Discovery { .. } | Self::Config { .. } => true,
            Self::Resolution { scope, .. } => scope.is_global(),
            Self::Synthesis(_) | Self::Write { .. } | Self::Detection { .. } => false,
        }
    }

    /// 실패 단계 이름 (요약 출력용)
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Discovery { .. } => "discovery",
            Self::Resolution { .. } => "resolution",
            Self::Synthesis(_) => "synthesis",
            Self::Write { .. } => "write",
            Self::Detection { .. } => "detection",
            Self::Config { .. } => "config",
        }
    }
}

impl From<SbomGeneratorError> for ModsbomError {
    fn from(err: SbomGeneratorError) -> Self {
        match err {
            SbomGeneratorError::Discovery { path, reason } => {
                ModsbomError::Generation(GenerationError::Discovery(format!("{path}: {reason}")))
            }
            SbomGeneratorError::Resolution {
                scope: ResolutionScope::Global,
                reason,
            } => ModsbomError::Generation(GenerationError::GlobalResolution(reason)),
            SbomGeneratorError::Resolution {
                scope: ResolutionScope::App(name),
                reason,
            } => ModsbomError::Generation(GenerationError::Resolution(format!("{name}: {reason}"))),
            SbomGeneratorError::Synthesis(msg) => {
                ModsbomError::Generation(GenerationError::Synthesis(msg))
            }
            SbomGeneratorError::Write { path, source } => {
                ModsbomError::Generation(GenerationError::Write(format!("{path}: {source}")))
            }
            SbomGeneratorError::Detection { path, reason } => {
                ModsbomError::Generation(GenerationError::Detection(format!("{path}: {reason}")))
            }
            SbomGeneratorError::Config { field, reason } => ModsbomError::Config(
                modsbom_core::error::ConfigError::InvalidValue { field, reason },
            ),
        }
    }
}
