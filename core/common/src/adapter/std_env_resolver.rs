//! 標準環境変数解決実装（std::env を委譲）

use crate::ports::outbound::EnvResolver;
use std::collections::HashMap;
use std::env;

/// 標準環境変数解決実装
#[derive(Debug, Clone, Default)]
pub struct StdEnvResolver;

impl EnvResolver for StdEnvResolver {
    fn raw_var(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

/// 固定のマップから引く EnvResolver（テスト・埋め込み用）
#[derive(Debug, Clone, Default)]
pub struct MapEnvResolver {
    vars: HashMap<String, String>,
}

impl MapEnvResolver {
    pub fn new<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvResolver for MapEnvResolver {
    fn raw_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}
