//! SBOM 문서 파일 출력

use std::path::Path;

use tracing::debug;

use super::SbomDocument;
use crate::error::SbomGeneratorError;

/// 문서를 들여쓰기된 JSON 바이트로 직렬화합니다 (끝에 개행 포함).
pub fn to_pretty_json(document: &SbomDocument) -> Result<Vec<u8>, SbomGeneratorError> {
    let mut bytes = serde_json::to_vec_pretty(document)
        .map_err(|e| SbomGeneratorError::Synthesis(format!("CycloneDX serialization failed: {e}")))?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// 문서를 `path`에 씁니다. 기존 파일은 덮어씁니다.
///
/// 상위 디렉토리가 없으면 만듭니다.
///
/// # Errors
///
/// 직렬화 실패 시 `Synthesis`, 디렉토리 생성이나 파일 쓰기 실패 시 `Write`
pub async fn write_document(document: &SbomDocument, path: &Path) -> Result<(), SbomGeneratorError> {
    let bytes = to_pretty_json(document)?;
    let write_error = |source| SbomGeneratorError::Write {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
    }
    tokio::fs::write(path, &bytes).await.map_err(write_error)?;

    debug!(path = %path.display(), bytes = bytes.len(), "SBOM document written");
    Ok(())
}
