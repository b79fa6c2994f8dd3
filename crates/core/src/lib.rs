//! modsbom 공통 타입 -- 워크스페이스 전역 에러와 설정
//!
//! - [`config`]: `modsbom.toml` 로딩, 환경변수 오버라이드, 검증
//! - [`error`]: 최상위 에러 타입 (`ModsbomError`)

pub mod config;
pub mod error;

// --- 주요 타입 re-export ---

// 에러
pub use error::{ConfigError, GenerationError, ModsbomError};

// 설정
pub use config::{GeneralConfig, ModsbomConfig, SbomConfig};
