//! `go list` JSON 스트림 디코더
//!
//! `go list -json` 은 JSON 배열이 아니라 객체를 이어 붙인 스트림을 출력합니다.
//! [`serde_json::StreamDeserializer`]로 레코드를 하나씩 디코딩하므로 전체 크기를
//! 미리 알 필요가 없습니다.

use std::io::Read;

use serde::de::DeserializeOwned;
use tracing::trace;

use crate::error::{ResolutionScope, SbomGeneratorError};
use crate::types::{
    AppModuleSet, GlobalIndirectIndex, MissingVersion, ModuleRecord, PackageRecord,
};

/// 스트림에서 레코드를 하나씩 디코딩하여 `f`에 전달합니다.
fn for_each_record<T, R, F>(
    reader: R,
    scope: &ResolutionScope,
    mut f: F,
) -> Result<usize, SbomGeneratorError>
where
    T: DeserializeOwned,
    R: Read,
    F: FnMut(T),
{
    let mut count = 0;
    for record in serde_json::Deserializer::from_reader(reader).into_iter::<T>() {
        let record = record.map_err(|e| {
            SbomGeneratorError::resolution(scope, format!("malformed record #{}: {e}", count + 1))
        })?;
        f(record);
        count += 1;
    }
    Ok(count)
}

/// 전역 모듈 스트림(`go list -m -json all`)에서 간접 의존성 인덱스를 만듭니다.
///
/// 각 레코드에 대체 규칙을 적용한 뒤 키를 계산합니다. 빈 버전은 그대로 둡니다.
pub fn parse_global_index<R: Read>(
    reader: R,
    scope: &ResolutionScope,
) -> Result<GlobalIndirectIndex, SbomGeneratorError> {
    let mut entries = Vec::new();
    let count = for_each_record(reader, scope, |record: ModuleRecord| {
        let module = record.into_effective(MissingVersion::Keep);
        entries.push((module.key().clone(), module.indirect()));
    })?;
    trace!(%scope, records = count, "global module stream decoded");
    Ok(entries.into_iter().collect())
}

/// 애플리케이션 패키지 스트림(`go list -json -deps`)에서 모듈 집합을 만듭니다.
///
/// 모듈이 없는 패키지는 건너뛰고, 빈 버전은 `unknown`으로 대체하며,
/// 키별로 처음 본 모듈만 남깁니다.
pub fn parse_app_modules<R: Read>(
    reader: R,
    scope: &ResolutionScope,
) -> Result<AppModuleSet, SbomGeneratorError> {
    let mut modules = AppModuleSet::new();
    let mut skipped = 0usize;
    let count = for_each_record(reader, scope, |package: PackageRecord| {
        match package.module {
            Some(record) => {
                modules.insert_first_seen(record.into_effective(MissingVersion::Placeholder));
            }
            None => {
                trace!(%scope, package = %package.import_path, "package without module skipped");
                skipped += 1;
            }
        }
    })?;
    trace!(
        %scope,
        packages = count,
        skipped,
        modules = modules.len(),
        "package stream decoded"
    );
    Ok(modules)
}
