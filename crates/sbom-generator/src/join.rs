//! 간접 의존성 귀속 -- 애플리케이션 모듈 집합과 전역 인덱스 조인
//!
//! 애플리케이션 단위 해석은 *어떤* 모듈이 쓰이는지에 대해, 전역 해석은 자신이 본
//! 키의 *간접 여부*에 대해서만 권위를 가집니다. 전역 인덱스에 없는 키는
//! 에러가 아니라 직접 의존성으로 취급합니다 (테스트/도구 전용 모듈 등).

use tracing::trace;

use crate::types::{AppModuleSet, AttributedModule, GlobalIndirectIndex};

/// 모듈 집합의 각 모듈에 전역 간접 플래그를 붙입니다.
///
/// 결과 순서는 모듈 집합의 발견 순서를 따릅니다.
pub fn attribute(modules: AppModuleSet, index: &GlobalIndirectIndex) -> Vec<AttributedModule> {
    modules
        .into_iter()
        .map(|module| {
            let indirect = index.is_indirect(module.key());
            if !index.contains(module.key()) {
                trace!(key = %module.key(), "module absent from global index, treated as direct");
            }
            AttributedModule { module, indirect }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MissingVersion, ModuleKey, ModuleRecord};

    fn module_set(entries: &[(&str, &str)]) -> AppModuleSet {
        entries
            .iter()
            .map(|(path, version)| {
                ModuleRecord {
                    path: (*path).to_owned(),
                    version: (*version).to_owned(),
                    ..Default::default()
                }
                .into_effective(MissingVersion::Placeholder)
            })
            .collect()
    }

    #[test]
    fn indirect_flag_comes_from_global_index() {
        let index: GlobalIndirectIndex = [(ModuleKey::new("lib/a", "1.0"), true)]
            .into_iter()
            .collect();
        let attributed = attribute(module_set(&[("lib/a", "1.0"), ("lib/b", "2.0")]), &index);

        assert_eq!(attributed.len(), 2);
        assert!(attributed[0].indirect);
        assert!(!attributed[1].indirect);
    }

    #[test]
    fn app_level_indirect_flag_is_ignored() {
        let mut record = ModuleRecord {
            path: "lib/a".to_owned(),
            version: "1.0".to_owned(),
            ..Default::default()
        };
        record.indirect = true;
        let set: AppModuleSet = [record.into_effective(MissingVersion::Placeholder)]
            .into_iter()
            .collect();

        let attributed = attribute(set, &GlobalIndirectIndex::default());
        assert!(!attributed[0].indirect);
    }

    #[test]
    fn key_seen_as_direct_stays_direct() {
        let index: GlobalIndirectIndex = [(ModuleKey::new("lib/a", "1.0"), false)]
            .into_iter()
            .collect();
        let attributed = attribute(module_set(&[("lib/a", "1.0")]), &index);
        assert!(!attributed[0].indirect);
    }

    #[test]
    fn version_mismatch_does_not_match() {
        let index: GlobalIndirectIndex = [(ModuleKey::new("lib/a", "1.0"), true)]
            .into_iter()
            .collect();
        let attributed = attribute(module_set(&[("lib/a", "1.1")]), &index);
        assert!(!attributed[0].indirect);
    }

    #[test]
    fn empty_set_yields_nothing() {
        assert!(attribute(AppModuleSet::new(), &GlobalIndirectIndex::default()).is_empty());
    }
}
