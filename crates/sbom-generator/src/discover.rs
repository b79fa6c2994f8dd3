//! 애플리케이션 탐색기
//!
//! 애플리케이션 디렉토리의 직계 하위 디렉토리 중 진입점 파일(기본 `main.go`)을
//! 가진 디렉토리를 애플리케이션으로 인식합니다.
//!
//! 결과 순서는 디렉토리 목록 순서이며 정렬을 보장하지 않습니다.

use std::path::Path;

use tracing::{debug, warn};

use crate::error::SbomGeneratorError;
use crate::types::Application;

/// 애플리케이션 디렉토리를 탐색합니다 (동기 I/O).
///
/// `tokio::task::spawn_blocking` 내에서 호출되어야 합니다.
///
/// # Errors
///
/// 루트 디렉토리를 읽을 수 없으면 `SbomGeneratorError::Discovery` 반환
pub fn discover_applications(
    apps_root: &Path,
    entry_point: &str,
) -> Result<Vec<Application>, SbomGeneratorError> {
    let entries = std::fs::read_dir(apps_root).map_err(|e| SbomGeneratorError::Discovery {
        path: apps_root.display().to_string(),
        reason: e.to_string(),
    })?;

    let mut apps = Vec::new();

    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(dir = %apps_root.display(), error = %e, "failed to read directory entry");
                continue;
            }
        };

        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        // 심볼릭 링크를 따라가되 진입점은 일반 파일이어야 함
        let entry_file = path.join(entry_point);
        match std::fs::metadata(&entry_file) {
            Ok(meta) if meta.is_file() => {
                debug!(app = %path.display(), "application discovered");
                apps.push(Application::from_root(path));
            }
            _ => {
                debug!(dir = %path.display(), entry_point, "no entry point, skipping");
            }
        }
    }

    Ok(apps)
}
