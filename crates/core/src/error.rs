//! 에러 타입 -- 도메인별 에러 정의

/// modsbom 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum ModsbomError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// SBOM 생성 파이프라인 에러
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ModsbomError {
    /// 실행 전체를 중단시켜야 하는 에러인지 반환합니다.
    ///
    /// 애플리케이션 단위의 해석/합성/쓰기 실패는 치명적이지 않습니다.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Generation(GenerationError::Discovery(_))
            | Self::Generation(GenerationError::GlobalResolution(_)) => true,
            Self::Generation(_) => false,
            Self::Config(_) | Self::Io(_) => true,
        }
    }
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// SBOM 생성 파이프라인 에러
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// 애플리케이션 디렉토리 탐색 실패
    #[error("discovery failed: {0}")]
    Discovery(String),

    /// 저장소 전역 모듈 목록 해석 실패
    #[error("global module resolution failed: {0}")]
    GlobalResolution(String),

    /// 애플리케이션 모듈 목록 해석 실패
    #[error("module resolution failed: {0}")]
    Resolution(String),

    /// SBOM 문서 합성 실패
    #[error("synthesis failed: {0}")]
    Synthesis(String),

    /// SBOM 파일 쓰기 실패
    #[error("write failed: {0}")]
    Write(String),

    /// 프로젝트 유형 탐지 실패
    #[error("project detection failed: {0}")]
    Detection(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::InvalidValue {
            field: "sbom.entry_point".to_owned(),
            reason: "must not be empty".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("sbom.entry_point"));
        assert!(msg.contains("must not be empty"));
    }

    #[test]
    fn config_error_converts_into_top_level() {
        let err: ModsbomError = ConfigError::FileNotFound {
            path: "modsbom.toml".to_owned(),
        }
        .into();
        assert!(matches!(err, ModsbomError::Config(_)));
        assert!(err.to_string().contains("modsbom.toml"));
    }

    #[test]
    fn discovery_and_global_resolution_are_fatal() {
        let discovery: ModsbomError = GenerationError::Discovery("cmd".to_owned()).into();
        let global: ModsbomError = GenerationError::GlobalResolution("exit 1".to_owned()).into();
        assert!(discovery.is_fatal());
        assert!(global.is_fatal());
    }

    #[test]
    fn per_application_errors_are_not_fatal() {
        for err in [
            GenerationError::Resolution("api: exit 1".to_owned()),
            GenerationError::Synthesis("empty name".to_owned()),
            GenerationError::Write("sbom-api.json".to_owned()),
        ] {
            let err: ModsbomError = err.into();
            assert!(!err.is_fatal(), "{err} should not be fatal");
        }
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: ModsbomError = io_err.into();
        assert!(matches!(err, ModsbomError::Io(_)));
    }
}
