//! 프로젝트 유형 탐지
//!
//! 저장소 트리를 재귀적으로 순회하며 파일 이름으로 사용된 기술 스택을 분류합니다.
//! SBOM 생성 파이프라인과 데이터 의존성이 없는 선택적 사전 단계입니다.
//!
//! | 파일 | 유형 |
//! |------|------|
//! | `go.mod`, `*.go` | `go` |
//! | `package.json` | `nodejs` |
//! | `requirements.txt`, `setup.py` | `python` |
//! | `pom.xml`, `build.gradle` | `java` |
//! | `Dockerfile*` (앞 20줄 안에 `FROM ` 줄) | `docker` |

use std::collections::BTreeSet;
use std::fmt;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::SbomGeneratorError;

/// Dockerfile 판정 시 검사하는 최대 줄 수
const DOCKERFILE_SCAN_LINES: usize = 20;

/// 탐지 가능한 프로젝트 유형
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
    Docker,
    Go,
    Java,
    #[serde(rename = "nodejs")]
    NodeJs,
    Python,
}

impl ProjectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Docker => "docker",
            Self::Go => "go",
            Self::Java => "java",
            Self::NodeJs => "nodejs",
            Self::Python => "python",
        }
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 탐지된 프로젝트 유형 집합 (이름순 정렬)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProjectTypes(BTreeSet<ProjectKind>);

impl ProjectTypes {
    /// 유형을 추가한 집합을 반환합니다.
    #[must_use]
    pub fn with(mut self, kind: ProjectKind) -> Self {
        self.0.insert(kind);
        self
    }

    pub fn contains(&self, kind: ProjectKind) -> bool {
        self.0.contains(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ProjectKind> + '_ {
        self.0.iter().copied()
    }
}

/// 비어 있으면 `unknown`, 아니면 `+`로 연결 (예: `docker+go`)
impl fmt::Display for ProjectTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("unknown");
        }
        for (i, kind) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("+")?;
            }
            f.write_str(kind.as_str())?;
        }
        Ok(())
    }
}

/// `root` 이하 전체 트리에서 프로젝트 유형을 탐지합니다 (동기 I/O).
///
/// # Errors
///
/// 순회 중 항목을 읽을 수 없으면 `SbomGeneratorError::Detection` 반환
pub fn detect_project_types(root: &Path) -> Result<ProjectTypes, SbomGeneratorError> {
    let types = WalkDir::new(root)
        .into_iter()
        .try_fold(ProjectTypes::default(), |types, entry| -> Result<_, SbomGeneratorError> {
            let entry = entry.map_err(|e| SbomGeneratorError::Detection {
                path: e
                    .path()
                    .unwrap_or(root)
                    .display()
                    .to_string(),
                reason: e.to_string(),
            })?;
            if entry.file_type().is_dir() {
                return Ok(types);
            }
            let name = entry.file_name().to_string_lossy();
            Ok(classify_file(types, &name, entry.path()))
        })?;

    debug!(root = %root.display(), project_types = %types, "project types detected");
    Ok(types)
}

/// 파일 하나를 분류하여 누적 집합에 반영합니다.
fn classify_file(types: ProjectTypes, file_name: &str, path: &Path) -> ProjectTypes {
    match file_name {
        "go.mod" => types.with(ProjectKind::Go),
        "package.json" => types.with(ProjectKind::NodeJs),
        "requirements.txt" | "setup.py" => types.with(ProjectKind::Python),
        "pom.xml" | "build.gradle" => types.with(ProjectKind::Java),
        _ => {
            let mut types = types;
            if file_name.ends_with(".go") {
                types = types.with(ProjectKind::Go);
            }
            if file_name.starts_with("Dockerfile") && is_dockerfile(path) {
                types = types.with(ProjectKind::Docker);
            }
            types
        }
    }
}

/// 앞부분에 `FROM ` 지시자가 있는 파일인지 확인합니다 (대소문자 무시).
///
/// 줄은 바이트 단위로 읽으므로 UTF-8이 아닌 줄이 있어도 검사를 계속합니다.
/// 읽을 수 없는 파일은 Dockerfile이 아닌 것으로 봅니다.
fn is_dockerfile(path: &Path) -> bool {
    let Ok(file) = std::fs::File::open(path) else {
        return false;
    };
    BufReader::new(file)
        .split(b'\n')
        .take(DOCKERFILE_SCAN_LINES)
        .map_while(Result::ok)
        .any(|line| is_from_instruction(&line))
}

fn is_from_instruction(line: &[u8]) -> bool {
    line.trim_ascii()
        .get(..5)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(b"FROM "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn empty_tree_is_unknown() {
        let tmp = tempfile::tempdir().unwrap();
        let types = detect_project_types(tmp.path()).unwrap();
        assert!(types.is_empty());
        assert_eq!(types.to_string(), "unknown");
    }

    #[test]
    fn go_repository() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "go.mod", "module example.com/app\n");
        write(tmp.path(), "cmd/api/main.go", "package main\n");

        let types = detect_project_types(tmp.path()).unwrap();
        assert!(types.contains(ProjectKind::Go));
        assert_eq!(types.to_string(), "go");
    }

    #[test]
    fn go_source_without_go_mod_counts() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "tools/gen.go", "package tools\n");
        assert_eq!(detect_project_types(tmp.path()).unwrap().to_string(), "go");
    }

    #[test]
    fn mixed_kinds_are_sorted_and_joined() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "go.mod", "module m\n");
        write(tmp.path(), "web/package.json", "{}");
        write(tmp.path(), "scripts/requirements.txt", "requests\n");
        write(tmp.path(), "legacy/pom.xml", "<project/>");
        write(tmp.path(), "Dockerfile", "# build\nfrom golang:1.22 AS build\n");

        let types = detect_project_types(tmp.path()).unwrap();
        assert_eq!(types.to_string(), "docker+go+java+nodejs+python");
    }

    #[test]
    fn dockerfile_requires_from_line() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "Dockerfile.dev", "# just a comment\nRUN echo hi\n");
        assert_eq!(detect_project_types(tmp.path()).unwrap().to_string(), "unknown");
    }

    #[test]
    fn dockerfile_from_line_after_limit_is_ignored() {
        let tmp = tempfile::tempdir().unwrap();
        let mut content = "# comment\n".repeat(DOCKERFILE_SCAN_LINES);
        content.push_str("FROM alpine\n");
        write(tmp.path(), "Dockerfile", &content);
        assert!(!detect_project_types(tmp.path()).unwrap().contains(ProjectKind::Docker));
    }

    #[test]
    fn indented_from_line_counts() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "deploy/Dockerfile.prod", "\n   FROM scratch\n");
        assert!(detect_project_types(tmp.path()).unwrap().contains(ProjectKind::Docker));
    }

    #[test]
    fn non_utf8_line_before_from_still_counts() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("Dockerfile"), b"# caf\xe9 build\nFROM alpine\n").unwrap();
        assert!(detect_project_types(tmp.path()).unwrap().contains(ProjectKind::Docker));
    }

    #[test]
    fn from_instruction_matching() {
        assert!(is_from_instruction(b"FROM golang:1.22 AS build"));
        assert!(is_from_instruction(b"\tfrom alpine\r"));
        // 양쪽 공백을 제거한 뒤 비교
        assert!(!is_from_instruction(b"FROM   "));
        assert!(!is_from_instruction(b"FROMalpine"));
        assert!(!is_from_instruction(b"# FROM alpine"));
    }

    #[test]
    fn directory_names_are_not_classified() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("package.json")).unwrap();
        assert!(detect_project_types(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_root_is_detection_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = detect_project_types(&tmp.path().join("nope")).unwrap_err();
        assert!(matches!(err, SbomGeneratorError::Detection { .. }));
        assert!(!err.is_fatal());
    }

    #[test]
    fn serializes_as_list_of_names() {
        let types = ProjectTypes::default()
            .with(ProjectKind::NodeJs)
            .with(ProjectKind::Go);
        assert_eq!(serde_json::to_string(&types).unwrap(), r#"["go","nodejs"]"#);
    }
}
