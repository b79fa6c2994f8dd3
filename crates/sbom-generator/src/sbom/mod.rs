//! SBOM 문서 합성 및 출력
//!
//! - [`cyclonedx`]: 귀속이 끝난 모듈 목록을 CycloneDX 1.6 문서로 변환 (순수 함수)
//! - [`writer`]: 문서를 pretty JSON으로 직렬화하여 파일에 기록

pub mod cyclonedx;
pub mod writer;

pub use cyclonedx::{
    ComponentDescriptor, ComponentType, Metadata, Property, SbomDocument, Supplier, Tools,
    synthesize,
};
pub use writer::write_document;

use crate::config::SbomGeneratorConfig;

/// 애플리케이션 컴포넌트 기본 버전
pub const DEFAULT_APP_VERSION: &str = "1.0.0";

/// 애플리케이션 컴포넌트 기본 공급자 이름
pub const DEFAULT_SUPPLIER_NAME: &str = "SBOM Generator";

/// 문서 합성 옵션
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisOptions {
    /// 애플리케이션 컴포넌트의 공급자 이름
    pub supplier_name: String,
    /// 애플리케이션 컴포넌트 버전
    pub app_version: String,
}

impl SynthesisOptions {
    /// 생성기 설정에서 옵션을 만듭니다.
    pub fn from_config(config: &SbomGeneratorConfig) -> Self {
        Self {
            supplier_name: config.supplier_name.clone(),
            app_version: config.app_version.clone(),
        }
    }
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            supplier_name: DEFAULT_SUPPLIER_NAME.to_owned(),
            app_version: DEFAULT_APP_VERSION.to_owned(),
        }
    }
}
