//! SBOM 생성기 설정
//!
//! [`SbomGeneratorConfig`]는 core의 [`SbomConfig`](modsbom_core::config::SbomConfig)에서
//! 파생되며, 문자열 경로를 실행 시 사용할 경로/기간 타입으로 해석하는 헬퍼를 제공합니다.
//!
//! # 사용 예시
//!
//! ```
//! use modsbom_generator::SbomGeneratorConfig;
//!
//! // 기본값으로 생성
//! let config = SbomGeneratorConfig::default();
//! config.validate().unwrap();
//!
//! // 빌더로 생성
//! use modsbom_generator::SbomGeneratorConfigBuilder;
//!
//! let config = SbomGeneratorConfigBuilder::new()
//!     .apps_dir("services")
//!     .tool_timeout_secs(60)
//!     .build()
//!     .unwrap();
//! ```

use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use modsbom_core::config::{MAX_TOOL_TIMEOUT_SECS, SbomConfig};

use crate::error::SbomGeneratorError;

/// 출력 파일 확장자
pub const OUTPUT_EXTENSION: &str = "json";

/// SBOM 생성기 설정
///
/// # 필드
///
/// - **repo_root**: 전역 모듈 목록을 조회할 저장소 루트
/// - **apps_dir**: 애플리케이션 디렉토리 (repo_root 기준)
/// - **entry_point**: 애플리케이션 진입점 파일명
/// - **output_dir** / **output_prefix**: `<output_dir>/<prefix><app>.json`
/// - **go_binary**: 외부 의존성 해석 도구
/// - **tool_timeout_secs**: 도구 호출 타임아웃 (0이면 무제한)
/// - **supplier_name** / **app_version**: 애플리케이션 컴포넌트 메타데이터
/// - **detect_project_type**: 생성 전 프로젝트 유형 탐지 여부
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SbomGeneratorConfig {
    pub repo_root: String,
    pub apps_dir: String,
    pub entry_point: String,
    pub output_dir: String,
    pub output_prefix: String,
    pub go_binary: String,
    pub tool_timeout_secs: u64,
    pub supplier_name: String,
    pub app_version: String,
    pub detect_project_type: bool,
}

impl Default for SbomGeneratorConfig {
    fn default() -> Self {
        Self::from_core(&SbomConfig::default())
    }
}

impl SbomGeneratorConfig {
    /// core의 `SbomConfig`에서 생성기 설정을 생성합니다.
    pub fn from_core(core: &SbomConfig) -> Self {
        Self {
            repo_root: core.repo_root.clone(),
            apps_dir: core.apps_dir.clone(),
            entry_point: core.entry_point.clone(),
            output_dir: core.output_dir.clone(),
            output_prefix: core.output_prefix.clone(),
            go_binary: core.go_binary.clone(),
            tool_timeout_secs: core.tool_timeout_secs,
            supplier_name: core.supplier_name.clone(),
            app_version: core.app_version.clone(),
            detect_project_type: core.detect_project_type,
        }
    }

    /// 애플리케이션 디렉토리 절대/상대 경로 (`repo_root/apps_dir`)
    pub fn apps_root(&self) -> PathBuf {
        Path::new(&self.repo_root).join(&self.apps_dir)
    }

    /// 도구 호출 타임아웃. 0이면 `None`
    pub fn tool_timeout(&self) -> Option<Duration> {
        (self.tool_timeout_secs > 0).then(|| Duration::from_secs(self.tool_timeout_secs))
    }

    /// 애플리케이션 이름에 대한 출력 파일 경로
    pub fn output_path(&self, app_name: &str) -> PathBuf {
        Path::new(&self.output_dir).join(format!(
            "{}{}.{}",
            self.output_prefix, app_name, OUTPUT_EXTENSION
        ))
    }

    /// 설정 값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), SbomGeneratorError> {
        for (field, value) in [
            ("repo_root", &self.repo_root),
            ("apps_dir", &self.apps_dir),
            ("entry_point", &self.entry_point),
            ("output_dir", &self.output_dir),
            ("go_binary", &self.go_binary),
            ("supplier_name", &self.supplier_name),
            ("app_version", &self.app_version),
        ] {
            if value.is_empty() {
                return Err(config_error(field, "must not be empty"));
            }
        }

        if self.entry_point.contains(['/', '\\']) {
            return Err(config_error("entry_point", "must be a bare file name"));
        }

        if self.output_prefix.contains(['/', '\\']) {
            return Err(config_error(
                "output_prefix",
                "must not contain path separators",
            ));
        }

        if Path::new(&self.apps_dir)
            .components()
            .any(|c| c == Component::ParentDir)
        {
            return Err(config_error(
                "apps_dir",
                "contains path traversal pattern '..'",
            ));
        }

        if self.tool_timeout_secs > MAX_TOOL_TIMEOUT_SECS {
            return Err(config_error(
                "tool_timeout_secs",
                &format!("must be 0 (no timeout) or 1-{MAX_TOOL_TIMEOUT_SECS}"),
            ));
        }

        Ok(())
    }
}

fn config_error(field: &str, reason: &str) -> SbomGeneratorError {
    SbomGeneratorError::Config {
        field: field.to_owned(),
        reason: reason.to_owned(),
    }
}

/// [`SbomGeneratorConfig`] 빌더
///
/// 유연한 설정 구성 및 빌드 시 유효성 검증을 제공합니다.
#[derive(Default)]
pub struct SbomGeneratorConfigBuilder {
    config: SbomGeneratorConfig,
}

impl SbomGeneratorConfigBuilder {
    /// 기본값을 가진 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 기존 설정에서 시작하는 빌더를 생성합니다.
    pub fn from_config(config: SbomGeneratorConfig) -> Self {
        Self { config }
    }

    pub fn repo_root(mut self, path: impl Into<String>) -> Self {
        self.config.repo_root = path.into();
        self
    }

    pub fn apps_dir(mut self, dir: impl Into<String>) -> Self {
        self.config.apps_dir = dir.into();
        self
    }

    pub fn entry_point(mut self, file_name: impl Into<String>) -> Self {
        self.config.entry_point = file_name.into();
        self
    }

    pub fn output_dir(mut self, dir: impl Into<String>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn output_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.output_prefix = prefix.into();
        self
    }

    pub fn go_binary(mut self, binary: impl Into<String>) -> Self {
        self.config.go_binary = binary.into();
        self
    }

    /// 도구 호출 타임아웃(초)을 설정합니다. 0이면 무제한입니다.
    pub fn tool_timeout_secs(mut self, secs: u64) -> Self {
        self.config.tool_timeout_secs = secs;
        self
    }

    pub fn supplier_name(mut self, name: impl Into<String>) -> Self {
        self.config.supplier_name = name.into();
        self
    }

    pub fn app_version(mut self, version: impl Into<String>) -> Self {
        self.config.app_version = version.into();
        self
    }

    pub fn detect_project_type(mut self, enabled: bool) -> Self {
        self.config.detect_project_type = enabled;
        self
    }

    /// 설정을 검증하고 빌드합니다.
    ///
    /// # Errors
    ///
    /// 유효성 검증 실패 시 `SbomGeneratorError::Config` 반환
    pub fn build(self) -> Result<SbomGeneratorConfig, SbomGeneratorError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
