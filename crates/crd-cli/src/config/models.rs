use charmm_crd::engine::config::{ReaderConfig, WriterConfig};

/// Fully resolved settings for one command invocation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppConfig {
    pub reader: ReaderConfig,
    pub writer: WriterConfig,
}
