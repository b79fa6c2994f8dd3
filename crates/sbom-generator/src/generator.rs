//! SBOM 생성 오케스트레이터 -- 실행 전체 흐름 관리
//!
//! # 내부 아키텍처
//!
//! ```text
//! repo_root --> ModuleResolver::resolve_global_modules --> GlobalIndirectIndex (실행당 1회)
//!                                                                  |
//! apps_root --> discover_applications --> [Application] ...        | (읽기 전용 공유)
//!                                              |                   |
//!                                              v                   v
//!                        resolve_app_modules --> AppModuleSet --> join::attribute
//!                                                                  |
//!                                                       cyclonedx::synthesize
//!                                                                  |
//!                                             writer::write_document --> sbom-<app>.json
//! ```
//!
//! 애플리케이션은 탐색 순서대로 하나씩 처리됩니다. 한 애플리케이션의 해석/합성/쓰기
//! 실패는 [`RunSummary`]에 기록되고 다음 애플리케이션으로 넘어갑니다.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::SbomGeneratorConfig;
use crate::detect::{self, ProjectTypes};
use crate::discover::discover_applications;
use crate::error::SbomGeneratorError;
use crate::join;
use crate::resolver::{GoListClient, ModuleLister, ModuleResolver};
use crate::sbom::{SynthesisOptions, synthesize, write_document};
use crate::types::{Application, GlobalIndirectIndex};

/// 생성에 성공한 SBOM 정보
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedSbom {
    /// 애플리케이션 이름
    pub app: String,
    /// 출력 파일 경로
    pub path: PathBuf,
    /// 라이브러리 컴포넌트 수
    pub component_count: usize,
    /// 간접 의존성 컴포넌트 수
    pub indirect_count: usize,
}

/// 생성에 실패한 애플리케이션 정보
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppFailure {
    /// 애플리케이션 이름
    pub app: String,
    /// 실패 단계 (`resolution`, `synthesis`, `write`)
    pub stage: String,
    /// 실패 사유
    pub reason: String,
}

impl AppFailure {
    fn new(app: &Application, err: &SbomGeneratorError) -> Self {
        Self {
            app: app.name.clone(),
            stage: err.stage().to_owned(),
            reason: err.to_string(),
        }
    }
}

/// 실행 결과 요약
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// 탐색된 애플리케이션 수
    pub apps_discovered: usize,
    /// 생성된 SBOM (처리 순서)
    pub generated: Vec<GeneratedSbom>,
    /// 실패한 애플리케이션 (처리 순서)
    pub failed: Vec<AppFailure>,
}

impl RunSummary {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    /// 생성된 모든 문서의 컴포넌트 수 합계
    pub fn total_components(&self) -> usize {
        self.generated.iter().map(|g| g.component_count).sum()
    }
}

/// 애플리케이션별 SBOM 생성기
///
/// [`SbomGeneratorBuilder`]로 생성합니다. 외부 도구 호출은 `L`([`ModuleLister`])에
/// 위임되므로 테스트에서는 mock lister를 주입할 수 있습니다.
pub struct SbomGenerator<L> {
    config: SbomGeneratorConfig,
    resolver: ModuleResolver<L>,
    options: SynthesisOptions,
}

impl<L: ModuleLister> SbomGenerator<L> {
    /// 생성기 설정
    pub fn config(&self) -> &SbomGeneratorConfig {
        &self.config
    }

    /// 내부 lister 참조
    pub fn lister(&self) -> &L {
        self.resolver.lister()
    }

    /// 전체 실행: 전역 인덱스 해석, 애플리케이션 탐색, 애플리케이션별 생성
    ///
    /// # Errors
    ///
    /// 전역 해석 실패, 애플리케이션 디렉토리 탐색 실패, 애플리케이션이 하나도
    /// 없는 경우. 애플리케이션별 실패는 에러가 아니라 요약에 기록됩니다.
    pub async fn run(&self) -> Result<RunSummary, SbomGeneratorError> {
        let repo_root = Path::new(&self.config.repo_root);
        let index = self.resolver.resolve_global_modules(repo_root).await?;

        let apps = self.discover().await?;
        info!(
            apps = apps.len(),
            apps_root = %self.config.apps_root().display(),
            "applications discovered"
        );

        let mut summary = RunSummary {
            apps_discovered: apps.len(),
            ..Default::default()
        };

        for app in &apps {
            match self.generate_one(app, &index).await {
                Ok(generated) => {
                    info!(
                        app = %generated.app,
                        path = %generated.path.display(),
                        components = generated.component_count,
                        indirect = generated.indirect_count,
                        "SBOM generated"
                    );
                    summary.generated.push(generated);
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!(app = %app.name, stage = e.stage(), error = %e, "SBOM generation failed");
                    summary.failed.push(AppFailure::new(app, &e));
                }
            }
        }

        info!(
            generated = summary.generated.len(),
            failed = summary.failed.len(),
            "SBOM generation finished"
        );
        Ok(summary)
    }

    /// 애플리케이션 하나의 SBOM을 생성하여 파일로 씁니다.
    pub async fn generate_one(
        &self,
        app: &Application,
        index: &GlobalIndirectIndex,
    ) -> Result<GeneratedSbom, SbomGeneratorError> {
        let modules = self.resolver.resolve_app_modules(app).await?;
        let attributed = join::attribute(modules, index);
        let document = synthesize(&app.name, &attributed, &self.options)?;

        let path = self.config.output_path(&app.name);
        write_document(&document, &path).await?;

        Ok(GeneratedSbom {
            app: app.name.clone(),
            path,
            component_count: document.component_count(),
            indirect_count: document.indirect_count(),
        })
    }

    /// 저장소 루트의 프로젝트 유형을 탐지합니다.
    pub async fn detect_project_types(&self) -> Result<ProjectTypes, SbomGeneratorError> {
        detect_in_background(PathBuf::from(&self.config.repo_root)).await
    }

    async fn discover(&self) -> Result<Vec<Application>, SbomGeneratorError> {
        let apps_root = self.config.apps_root();
        let entry_point = self.config.entry_point.clone();

        let root = apps_root.clone();
        let apps = tokio::task::spawn_blocking(move || discover_applications(&root, &entry_point))
            .await
            .map_err(|e| SbomGeneratorError::Discovery {
                path: apps_root.display().to_string(),
                reason: format!("discovery task failed: {e}"),
            })??;

        if apps.is_empty() {
            return Err(SbomGeneratorError::Discovery {
                path: apps_root.display().to_string(),
                reason: format!("no applications found (entry point '{}')", self.config.entry_point),
            });
        }

        for app in &apps {
            debug!(app = %app, "application queued");
        }
        Ok(apps)
    }
}

/// 블로킹 스레드에서 프로젝트 유형을 탐지합니다.
pub async fn detect_in_background(root: PathBuf) -> Result<ProjectTypes, SbomGeneratorError> {
    let path = root.display().to_string();
    tokio::task::spawn_blocking(move || detect::detect_project_types(&root))
        .await
        .map_err(|e| SbomGeneratorError::Detection {
            path,
            reason: format!("detection task failed: {e}"),
        })?
}

/// [`SbomGenerator`] 빌더
pub struct SbomGeneratorBuilder {
    config: SbomGeneratorConfig,
}

impl SbomGeneratorBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self {
            config: SbomGeneratorConfig::default(),
        }
    }

    /// 생성기 설정을 지정합니다.
    pub fn config(mut self, config: SbomGeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// 설정의 `go_binary`/타임아웃으로 [`GoListClient`]를 만들어 생성기를 빌드합니다.
    pub fn build(self) -> Result<SbomGenerator<GoListClient>, SbomGeneratorError> {
        let lister = GoListClient::from_config(&self.config);
        self.build_with_lister(lister)
    }

    /// 지정한 lister로 생성기를 빌드합니다.
    ///
    /// # Errors
    ///
    /// 설정 검증 실패 시 `SbomGeneratorError::Config`
    pub fn build_with_lister<L: ModuleLister>(
        self,
        lister: L,
    ) -> Result<SbomGenerator<L>, SbomGeneratorError> {
        self.config.validate()?;
        let options = SynthesisOptions::from_config(&self.config);
        Ok(SbomGenerator {
            config: self.config,
            resolver: ModuleResolver::new(lister),
            options,
        })
    }
}

impl Default for SbomGeneratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
