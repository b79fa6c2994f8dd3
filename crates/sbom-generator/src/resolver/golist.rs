//! `go list` 기반 [`ModuleLister`] 구현
//!
//! - 전역: `go list -m -json all` (저장소 루트에서 실행)
//! - 애플리케이션: `go list -json -deps ./...` (애플리케이션 루트에서 실행)
//!
//! 두 호출 모두 `GO111MODULE=on` 환경에서 실행되며, 설정된 타임아웃을 넘기면
//! 프로세스를 종료하고 해석 에러로 보고합니다.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, warn};

use super::ModuleLister;
use crate::config::SbomGeneratorConfig;
use crate::error::{ResolutionScope, SbomGeneratorError};

/// 에러 메시지에 포함할 stderr 최대 길이
const MAX_STDERR_LEN: usize = 2048;

const LIST_MODULES_ARGS: [&str; 4] = ["list", "-m", "-json", "all"];
const LIST_PACKAGES_ARGS: [&str; 4] = ["list", "-json", "-deps", "./..."];

/// `go` 툴체인을 호출하는 lister
#[derive(Debug, Clone)]
pub struct GoListClient {
    go_binary: String,
    timeout: Option<Duration>,
}

impl GoListClient {
    /// 실행 파일과 타임아웃으로 클라이언트를 생성합니다.
    pub fn new(go_binary: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            go_binary: go_binary.into(),
            timeout,
        }
    }

    /// 생성기 설정에서 클라이언트를 생성합니다.
    pub fn from_config(config: &SbomGeneratorConfig) -> Self {
        Self::new(config.go_binary.clone(), config.tool_timeout())
    }

    async fn run(
        &self,
        dir: &Path,
        args: &[&str],
        scope: &ResolutionScope,
    ) -> Result<Vec<u8>, SbomGeneratorError> {
        debug!(
            %scope,
            dir = %dir.display(),
            command = %format!("{} {}", self.go_binary, args.join(" ")),
            "invoking dependency tool"
        );

        let mut command = Command::new(&self.go_binary);
        command
            .args(args)
            .current_dir(dir)
            .env("GO111MODULE", "on")
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, command.output())
                .await
                .map_err(|_| {
                    warn!(%scope, timeout = ?limit, "dependency tool timed out");
                    SbomGeneratorError::resolution(
                        scope,
                        format!("{} timed out after {limit:?}", self.go_binary),
                    )
                })?,
            None => command.output().await,
        }
        .map_err(|e| {
            SbomGeneratorError::resolution(
                scope,
                format!("failed to run {}: {e}", self.go_binary),
            )
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SbomGeneratorError::resolution(
                scope,
                format!(
                    "{} {} failed ({}): {}",
                    self.go_binary,
                    args.join(" "),
                    output.status,
                    truncate(stderr.trim(), MAX_STDERR_LEN)
                ),
            ));
        }

        Ok(output.stdout)
    }
}

impl Default for GoListClient {
    fn default() -> Self {
        Self::from_config(&SbomGeneratorConfig::default())
    }
}

impl ModuleLister for GoListClient {
    async fn list_modules(&self, repo_root: &Path) -> Result<Vec<u8>, SbomGeneratorError> {
        self.run(repo_root, &LIST_MODULES_ARGS, &ResolutionScope::Global)
            .await
    }

    async fn list_packages(
        &self,
        app_root: &Path,
        scope: &str,
    ) -> Result<Vec<u8>, SbomGeneratorError> {
        self.run(app_root, &LIST_PACKAGES_ARGS, &ResolutionScope::app(scope))
            .await
    }
}

/// 문자 경계를 지키며 문자열을 자릅니다.
fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
