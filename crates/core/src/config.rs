//! 설정 관리 -- modsbom.toml 파싱 및 런타임 설정
//!
//! [`ModsbomConfig`]는 모든 설정 섹션을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`MODSBOM_SBOM_APPS_DIR=cmd` 형식)
//! 3. 설정 파일 (`modsbom.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), modsbom_core::error::ModsbomError> {
//! use modsbom_core::config::ModsbomConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = ModsbomConfig::load("modsbom.toml").await?;
//!
//! // 파일이 없으면 기본값 사용
//! let config = ModsbomConfig::load_or_default("modsbom.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = ModsbomConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::{Component, Path};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ConfigError, ModsbomError};

/// 경로 문자열 최대 길이
const MAX_PATH_LEN: usize = 4096;

/// 외부 도구 타임아웃 상한 (1시간)
pub const MAX_TOOL_TIMEOUT_SECS: u64 = 3600;

/// modsbom 통합 설정
///
/// `modsbom.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModsbomConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// SBOM 생성 설정
    #[serde(default)]
    pub sbom: SbomConfig,
}

impl ModsbomConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ModsbomError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 설정 파일이 없으면 기본값에서 시작하여 로드합니다.
    ///
    /// 파일이 존재하지만 읽거나 파싱할 수 없으면 에러를 반환합니다.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ModsbomError> {
        let path = path.as_ref();
        match Self::load(path).await {
            Err(ModsbomError::Config(ConfigError::FileNotFound { .. })) => {
                debug!(path = %path.display(), "config file not found, using defaults");
                let mut config = Self::default();
                config.apply_env_overrides();
                config.validate()?;
                Ok(config)
            }
            other => other,
        }
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ModsbomError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ModsbomError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                ModsbomError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, ModsbomError> {
        toml::from_str(toml_str).map_err(|e| {
            ModsbomError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `MODSBOM_{SECTION}_{FIELD}`
    /// 예: `MODSBOM_SBOM_GO_BINARY=/usr/local/go/bin/go`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "MODSBOM_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "MODSBOM_GENERAL_LOG_FORMAT");

        // SBOM
        override_string(&mut self.sbom.repo_root, "MODSBOM_SBOM_REPO_ROOT");
        override_string(&mut self.sbom.apps_dir, "MODSBOM_SBOM_APPS_DIR");
        override_string(&mut self.sbom.entry_point, "MODSBOM_SBOM_ENTRY_POINT");
        override_string(&mut self.sbom.output_dir, "MODSBOM_SBOM_OUTPUT_DIR");
        override_string(&mut self.sbom.output_prefix, "MODSBOM_SBOM_OUTPUT_PREFIX");
        override_string(&mut self.sbom.go_binary, "MODSBOM_SBOM_GO_BINARY");
        override_u64(
            &mut self.sbom.tool_timeout_secs,
            "MODSBOM_SBOM_TOOL_TIMEOUT_SECS",
        );
        override_string(&mut self.sbom.supplier_name, "MODSBOM_SBOM_SUPPLIER_NAME");
        override_string(&mut self.sbom.app_version, "MODSBOM_SBOM_APP_VERSION");
        override_bool(
            &mut self.sbom.detect_project_type,
            "MODSBOM_SBOM_DETECT_PROJECT_TYPE",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), ModsbomError> {
        // log_level 검증
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        // log_format 검증
        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        self.sbom.validate()
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// SBOM 생성 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SbomConfig {
    /// 저장소 루트 (전역 모듈 목록을 조회할 위치)
    pub repo_root: String,
    /// 애플리케이션 디렉토리 (repo_root 기준 상대 경로)
    pub apps_dir: String,
    /// 애플리케이션으로 인정할 진입점 파일명
    pub entry_point: String,
    /// SBOM 출력 디렉토리
    pub output_dir: String,
    /// 출력 파일명 접두사 (`<prefix><app>.json`)
    pub output_prefix: String,
    /// go 실행 파일
    pub go_binary: String,
    /// 외부 도구 호출 타임아웃 (초). 0이면 무제한
    pub tool_timeout_secs: u64,
    /// 애플리케이션 컴포넌트의 supplier 이름
    pub supplier_name: String,
    /// 애플리케이션 컴포넌트 버전
    pub app_version: String,
    /// 생성 전에 프로젝트 유형 탐지를 수행할지 여부
    pub detect_project_type: bool,
}

impl Default for SbomConfig {
    fn default() -> Self {
        Self {
            repo_root: ".".to_owned(),
            apps_dir: "cmd".to_owned(),
            entry_point: "main.go".to_owned(),
            output_dir: ".".to_owned(),
            output_prefix: "sbom-".to_owned(),
            go_binary: "go".to_owned(),
            tool_timeout_secs: 300,
            supplier_name: "SBOM Generator".to_owned(),
            app_version: "1.0.0".to_owned(),
            detect_project_type: true,
        }
    }
}

impl SbomConfig {
    /// `[sbom]` 섹션의 유효성을 검증합니다.
    ///
    /// # 검증 규칙
    ///
    /// - 경로/이름 필드는 비어 있으면 안 됨
    /// - `entry_point`, `output_prefix`: 경로 구분자 불가
    /// - `apps_dir`: `..` 컴포넌트 불가
    /// - `tool_timeout_secs`: 0-3600
    pub fn validate(&self) -> Result<(), ModsbomError> {
        for (field, value) in [
            ("sbom.repo_root", &self.repo_root),
            ("sbom.apps_dir", &self.apps_dir),
            ("sbom.entry_point", &self.entry_point),
            ("sbom.output_dir", &self.output_dir),
            ("sbom.go_binary", &self.go_binary),
            ("sbom.supplier_name", &self.supplier_name),
            ("sbom.app_version", &self.app_version),
        ] {
            if value.is_empty() {
                return Err(invalid(field, "must not be empty"));
            }
            if value.len() > MAX_PATH_LEN {
                return Err(invalid(
                    field,
                    &format!("exceeds maximum length {MAX_PATH_LEN}"),
                ));
            }
        }

        if has_separator(&self.entry_point) {
            return Err(invalid("sbom.entry_point", "must be a bare file name"));
        }

        if has_separator(&self.output_prefix) {
            return Err(invalid(
                "sbom.output_prefix",
                "must not contain path separators",
            ));
        }

        if Path::new(&self.apps_dir)
            .components()
            .any(|c| c == Component::ParentDir)
        {
            return Err(invalid(
                "sbom.apps_dir",
                "contains path traversal pattern '..'",
            ));
        }

        if self.tool_timeout_secs > MAX_TOOL_TIMEOUT_SECS {
            return Err(invalid(
                "sbom.tool_timeout_secs",
                &format!("must be 0 (no timeout) or 1-{MAX_TOOL_TIMEOUT_SECS}"),
            ));
        }

        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ModsbomError {
    ConfigError::InvalidValue {
        field: field.to_owned(),
        reason: reason.to_owned(),
    }
    .into()
}

fn has_separator(value: &str) -> bool {
    value.contains('/') || value.contains('\\')
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}

fn override_u64(target: &mut u64, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<u64>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u64 from env var, ignoring"
            ),
        }
    }
}
