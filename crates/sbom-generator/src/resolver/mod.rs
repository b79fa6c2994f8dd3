//! 모듈 해석기 -- 외부 의존성 도구 호출과 결과 해석
//!
//! [`ModuleLister`] trait은 외부 도구 호출을 추상화합니다. 운영 환경에서는
//! [`GoListClient`]가 `go list`를 실행하고, 테스트에서는 고정된 스트림을 돌려주는
//! mock 구현을 사용합니다.
//!
//! # 아키텍처
//!
//! ```text
//!   repo_root ──> ModuleLister::list_modules ──> stream::parse_global_index ──> GlobalIndirectIndex
//!   app_root  ──> ModuleLister::list_packages ─> stream::parse_app_modules ──> AppModuleSet
//! ```
//!
//! 두 경로 모두 [`ModuleRecord::into_effective`](crate::types::ModuleRecord::into_effective)
//! 로 대체 규칙을 적용한 뒤 키를 계산하므로 조인 키가 어긋나지 않습니다.

pub mod golist;
pub mod stream;

use std::future::Future;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{ResolutionScope, SbomGeneratorError};
use crate::types::{AppModuleSet, Application, GlobalIndirectIndex};

pub use golist::GoListClient;

/// 외부 의존성 해석 도구 추상화
///
/// 두 메서드 모두 JSON 객체를 이어 붙인 원본 출력 바이트를 반환합니다.
pub trait ModuleLister: Send + Sync {
    /// 저장소의 전체 모듈 그래프를 간접 의존성 플래그와 함께 나열합니다.
    ///
    /// # Errors
    ///
    /// 도구 실행 실패, 비정상 종료, 타임아웃 시 `SbomGeneratorError::Resolution`
    fn list_modules(
        &self,
        repo_root: &Path,
    ) -> impl Future<Output = Result<Vec<u8>, SbomGeneratorError>> + Send;

    /// 애플리케이션 빌드 대상에서 도달 가능한 모든 패키지를 나열합니다.
    ///
    /// `scope`는 에러 메시지에 사용할 애플리케이션 이름입니다.
    fn list_packages(
        &self,
        app_root: &Path,
        scope: &str,
    ) -> impl Future<Output = Result<Vec<u8>, SbomGeneratorError>> + Send;
}

/// 모듈 해석기
///
/// [`ModuleLister`]의 출력을 타입이 있는 모듈 집합으로 변환합니다.
pub struct ModuleResolver<L> {
    lister: L,
}

impl<L: ModuleLister> ModuleResolver<L> {
    /// 새 해석기를 생성합니다.
    pub fn new(lister: L) -> Self {
        Self { lister }
    }

    /// 내부 lister 참조
    pub fn lister(&self) -> &L {
        &self.lister
    }

    /// 저장소 전역 간접 의존성 인덱스를 만듭니다.
    pub async fn resolve_global_modules(
        &self,
        repo_root: &Path,
    ) -> Result<GlobalIndirectIndex, SbomGeneratorError> {
        debug!(repo_root = %repo_root.display(), "resolving global module index");
        let output = self.lister.list_modules(repo_root).await?;
        let index = stream::parse_global_index(output.as_slice(), &ResolutionScope::Global)?;
        info!(
            modules = index.len(),
            indirect = index.indirect_count(),
            "global module index resolved"
        );
        Ok(index)
    }

    /// 애플리케이션이 실제로 사용하는 모듈 집합을 만듭니다.
    pub async fn resolve_app_modules(
        &self,
        app: &Application,
    ) -> Result<AppModuleSet, SbomGeneratorError> {
        debug!(app = %app.name, root = %app.root.display(), "resolving application modules");
        let output = self.lister.list_packages(&app.root, &app.name).await?;
        let modules = stream::parse_app_modules(output.as_slice(), &ResolutionScope::app(&app.name))?;
        debug!(app = %app.name, modules = modules.len(), "application modules resolved");
        Ok(modules)
    }
}
