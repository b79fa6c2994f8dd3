//! 도메인 타입 -- 모듈 레코드, 조인 키, 애플리케이션
//!
//! 두 개의 독립적인 모듈 목록(저장소 전역, 애플리케이션 단위)은 포인터가 아니라
//! 유효 경로/버전에서 파생된 [`ModuleKey`]로만 연결됩니다.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 버전 정보가 없는 모듈에 부여하는 버전
pub const UNKNOWN_VERSION: &str = "unknown";

/// 모듈 조인 키 (`유효경로@유효버전`)
///
/// 생성 후 변경되지 않는 값 타입입니다. 같은 유효 경로와 버전을 가진 두 레코드는
/// 어떤 경로로 발견되었든 같은 의존성으로 취급합니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleKey(String);

impl ModuleKey {
    /// 경로와 버전으로 키를 생성합니다.
    pub fn new(path: &str, version: &str) -> Self {
        Self(format!("{path}@{version}"))
    }

    /// 키 문자열을 반환합니다.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 모듈 대체 대상 (`replace` 지시자)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Replacement {
    /// 대체 모듈 경로
    #[serde(default)]
    pub path: String,
    /// 대체 모듈 버전 (로컬 디렉토리 대체는 비어 있음)
    #[serde(default)]
    pub version: String,
}

/// 외부 도구가 출력한 모듈 레코드
///
/// `go list -m -json` 의 `Path`, `Version`, `Indirect`, `Replace` 필드에 대응합니다.
/// 누락된 필드는 빈 값/false로 디코딩됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModuleRecord {
    /// 모듈 경로
    #[serde(default)]
    pub path: String,
    /// 모듈 버전
    #[serde(default)]
    pub version: String,
    /// 간접 의존성 여부
    #[serde(default)]
    pub indirect: bool,
    /// 대체 대상
    #[serde(default, rename = "Replace")]
    pub replacement: Option<Replacement>,
}

/// 빈 유효 버전 처리 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingVersion {
    /// 빈 버전을 그대로 둠 (전역 목록)
    Keep,
    /// 빈 버전을 [`UNKNOWN_VERSION`]으로 대체 (애플리케이션 목록)
    Placeholder,
}

impl ModuleRecord {
    /// 대체 규칙을 적용하여 유효 모듈로 변환합니다.
    ///
    /// 대체 대상이 있으면 원래 경로/버전은 버려지고 대체 대상의 경로/버전이
    /// 유효 식별자가 됩니다. 조인 키는 이 시점에 한 번만 계산됩니다.
    pub fn into_effective(self, missing_version: MissingVersion) -> EffectiveModule {
        let (path, version) = match self.replacement {
            Some(replacement) => (replacement.path, replacement.version),
            None => (self.path, self.version),
        };

        let version = if version.is_empty() && missing_version == MissingVersion::Placeholder {
            UNKNOWN_VERSION.to_owned()
        } else {
            version
        };

        EffectiveModule {
            key: ModuleKey::new(&path, &version),
            path,
            version,
            indirect: self.indirect,
        }
    }
}

/// 대체 규칙이 적용된 모듈
///
/// 필드는 읽기 전용이며 키는 생성 시점에 고정됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveModule {
    key: ModuleKey,
    path: String,
    version: String,
    indirect: bool,
}

impl EffectiveModule {
    /// 조인 키
    pub fn key(&self) -> &ModuleKey {
        &self.key
    }

    /// 유효 경로
    pub fn path(&self) -> &str {
        &self.path
    }

    /// 유효 버전
    pub fn version(&self) -> &str {
        &self.version
    }

    /// 도구가 보고한 간접 의존성 플래그
    pub fn indirect(&self) -> bool {
        self.indirect
    }
}

/// `go list -json -deps` 의 패키지 레코드
///
/// 버전이 있는 모듈에 속하지 않는 패키지(표준 라이브러리 등)는 `Module`이 없습니다.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PackageRecord {
    /// 패키지 import 경로
    #[serde(default)]
    pub import_path: String,
    /// 패키지가 속한 모듈
    #[serde(default)]
    pub module: Option<ModuleRecord>,
}

/// 빌드 가능한 애플리케이션
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Application {
    /// 애플리케이션 루트 디렉토리
    pub root: PathBuf,
    /// 애플리케이션 이름 (루트의 마지막 경로 요소)
    pub name: String,
}

impl Application {
    /// 루트 경로에서 애플리케이션을 생성합니다.
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { root, name }
    }

    /// 루트 경로
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl fmt::Display for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.root.display())
    }
}

/// 애플리케이션 하나가 실제로 사용하는 모듈 집합
///
/// 키별로 처음 본 레코드가 남고 이후 중복은 조용히 버려집니다.
#[derive(Debug, Clone, Default)]
pub struct AppModuleSet {
    modules: IndexMap<ModuleKey, EffectiveModule>,
}

impl AppModuleSet {
    /// 빈 집합을 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 같은 키가 없을 때만 모듈을 추가합니다. 추가되었으면 `true`.
    pub fn insert_first_seen(&mut self, module: EffectiveModule) -> bool {
        match self.modules.entry(module.key().clone()) {
            indexmap::map::Entry::Occupied(_) => false,
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(module);
                true
            }
        }
    }

    /// 키로 모듈을 조회합니다.
    pub fn get(&self, key: &ModuleKey) -> Option<&EffectiveModule> {
        self.modules.get(key)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// 발견 순서대로 모듈을 순회합니다.
    pub fn iter(&self) -> impl Iterator<Item = &EffectiveModule> {
        self.modules.values()
    }
}

impl IntoIterator for AppModuleSet {
    type Item = EffectiveModule;
    type IntoIter = indexmap::map::IntoValues<ModuleKey, EffectiveModule>;

    fn into_iter(self) -> Self::IntoIter {
        self.modules.into_values()
    }
}

impl FromIterator<EffectiveModule> for AppModuleSet {
    fn from_iter<I: IntoIterator<Item = EffectiveModule>>(iter: I) -> Self {
        let mut set = Self::new();
        for module in iter {
            set.insert_first_seen(module);
        }
        set
    }
}

/// 저장소 전역 간접 의존성 인덱스
///
/// 실행당 한 번 생성되며 이후 읽기만 합니다. 공개된 변경 메서드가 없으므로
/// 여러 애플리케이션 처리에서 동기화 없이 공유할 수 있습니다.
#[derive(Debug, Clone, Default)]
pub struct GlobalIndirectIndex {
    entries: HashMap<ModuleKey, bool>,
}

impl GlobalIndirectIndex {
    /// 키의 간접 의존성 여부를 반환합니다.
    ///
    /// 인덱스에 없는 키는 직접 의존성(`false`)으로 취급합니다.
    pub fn is_indirect(&self, key: &ModuleKey) -> bool {
        self.entries.get(key).copied().unwrap_or(false)
    }

    /// 인덱스가 키를 본 적이 있는지 반환합니다.
    pub fn contains(&self, key: &ModuleKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 간접 의존성으로 표시된 키 수
    pub fn indirect_count(&self) -> usize {
        self.entries.values().filter(|indirect| **indirect).count()
    }
}

/// 같은 키가 반복되면 마지막 값이 남습니다.
impl FromIterator<(ModuleKey, bool)> for GlobalIndirectIndex {
    fn from_iter<I: IntoIterator<Item = (ModuleKey, bool)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// 간접 의존성 귀속이 끝난 모듈
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributedModule {
    /// 유효 모듈
    pub module: EffectiveModule,
    /// 전역 인덱스 기준 간접 의존성 여부
    pub indirect: bool,
}
