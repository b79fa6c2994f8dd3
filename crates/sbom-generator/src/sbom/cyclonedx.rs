//! CycloneDX 1.6 JSON SBOM 합성
//!
//! [CycloneDX](https://cyclonedx.org/) 1.6 사양에 따른 문서를 만듭니다.
//! 타임스탬프와 시리얼 번호를 넣지 않으므로 같은 입력에서는 항상 같은 문서가 나옵니다.

use serde::{Deserialize, Serialize};

use super::SynthesisOptions;
use crate::error::SbomGeneratorError;
use crate::types::AttributedModule;

/// CycloneDX 1.6 JSON 스키마 URL
pub const SCHEMA_URL: &str = "http://cyclonedx.org/schema/bom-1.6.schema.json";
/// BOM 형식 이름
pub const BOM_FORMAT: &str = "CycloneDX";
/// 사양 버전
pub const SPEC_VERSION: &str = "1.6";
/// 간접 의존성 표시 property 이름
pub const INDIRECT_PROPERTY: &str = "indirect";

/// CycloneDX BOM 루트
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SbomDocument {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub bom_format: String,
    pub spec_version: String,
    pub version: u32,
    pub metadata: Metadata,
    #[serde(default)]
    pub components: Vec<ComponentDescriptor>,
}

impl SbomDocument {
    /// 메타데이터에 기록된 애플리케이션 컴포넌트
    pub fn application(&self) -> Option<&ComponentDescriptor> {
        self.metadata
            .tools
            .components
            .iter()
            .find(|c| c.component_type == ComponentType::Application)
    }

    /// 라이브러리 컴포넌트 수
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// 간접 의존성으로 표시된 컴포넌트 수
    pub fn indirect_count(&self) -> usize {
        self.components.iter().filter(|c| c.is_indirect()).count()
    }
}

/// CycloneDX 메타데이터
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub tools: Tools,
}

/// 도구 정보 (1.5부터의 components 형식)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tools {
    #[serde(default)]
    pub components: Vec<ComponentDescriptor>,
}

/// 컴포넌트 유형
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Library,
    Application,
}

/// CycloneDX 컴포넌트
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDescriptor {
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<Supplier>,
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purl: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Property>,
}

impl ComponentDescriptor {
    /// `indirect=true` property가 있는지 반환합니다.
    pub fn is_indirect(&self) -> bool {
        self.properties
            .iter()
            .any(|p| p.name == INDIRECT_PROPERTY && p.value == "true")
    }
}

/// 공급자 (organizational entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub name: String,
}

/// 이름/값 property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub value: String,
}

/// Go 모듈의 package URL을 만듭니다.
pub fn golang_purl(path: &str, version: &str) -> String {
    format!("pkg:golang/{path}@{version}")
}

/// 애플리케이션 하나의 SBOM 문서를 합성합니다.
///
/// 컴포넌트 순서는 `modules` 순서를 따릅니다.
///
/// # Errors
///
/// 애플리케이션 이름이 비어 있거나 경로/버전이 빈 모듈이 있으면
/// `SbomGeneratorError::Synthesis` 반환
pub fn synthesize(
    app_name: &str,
    modules: &[AttributedModule],
    options: &SynthesisOptions,
) -> Result<SbomDocument, SbomGeneratorError> {
    if app_name.is_empty() {
        return Err(SbomGeneratorError::Synthesis(
            "application name is empty".to_owned(),
        ));
    }

    let components = modules
        .iter()
        .map(library_component)
        .collect::<Result<Vec<_>, _>>()?;

    let application = ComponentDescriptor {
        component_type: ComponentType::Application,
        supplier: Some(Supplier {
            name: options.supplier_name.clone(),
        }),
        name: app_name.to_owned(),
        version: options.app_version.clone(),
        purl: None,
        properties: Vec::new(),
    };

    Ok(SbomDocument {
        schema: SCHEMA_URL.to_owned(),
        bom_format: BOM_FORMAT.to_owned(),
        spec_version: SPEC_VERSION.to_owned(),
        version: 1,
        metadata: Metadata {
            tools: Tools {
                components: vec![application],
            },
        },
        components,
    })
}

fn library_component(attributed: &AttributedModule) -> Result<ComponentDescriptor, SbomGeneratorError> {
    let module = &attributed.module;
    if module.path().is_empty() || module.version().is_empty() {
        return Err(SbomGeneratorError::Synthesis(format!(
            "module with empty path or version: '{}'",
            module.key()
        )));
    }

    let properties = if attributed.indirect {
        vec![Property {
            name: INDIRECT_PROPERTY.to_owned(),
            value: "true".to_owned(),
        }]
    } else {
        Vec::new()
    };

    Ok(ComponentDescriptor {
        component_type: ComponentType::Library,
        supplier: None,
        name: module.path().to_owned(),
        version: module.version().to_owned(),
        purl: Some(golang_purl(module.path(), module.version())),
        properties,
    })
}
