//! Environment variable loading utilities
//!
//! Every setting is read from a `<PREFIX>_<NAME>` variable. Unparseable
//! values fall back to the supplied default rather than failing startup.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Loader for environment variables sharing a common prefix
#[derive(Debug)]
pub struct EnvLoader {
    prefix: String,
}

impl EnvLoader {
    /// Create a new environment loader with the given prefix
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }

    fn key(&self, suffix: &str) -> String {
        format!("{}_{}", self.prefix, suffix)
    }

    /// Load a string value with default
    pub fn load_string(&self, suffix: &str, default: &str) -> String {
        env::var(self.key(suffix)).unwrap_or_else(|_| default.to_string())
    }

    /// Load a parsed value with default
    pub fn load_parsed<T>(&self, suffix: &str, default: T) -> T
    where
        T: FromStr,
    {
        self.load_optional(suffix).unwrap_or(default)
    }

    /// Load an optional value
    pub fn load_optional<T>(&self, suffix: &str) -> Option<T>
    where
        T: FromStr,
    {
        let key = self.key(suffix);
        let raw = env::var(&key).ok()?;
        match raw.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring unparseable value for {}: {:?}", key, raw);
                None
            }
        }
    }

    /// Load a path value, ignoring empty strings
    pub fn load_path(&self, suffix: &str, default: PathBuf) -> PathBuf {
        match env::var(self.key(suffix)) {
            Ok(value) if !value.trim().is_empty() => PathBuf::from(value),
            _ => default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_load_string() {
        let loader = EnvLoader::new("PR_AGENT_TEST");
        env::remove_var("PR_AGENT_TEST_BRANCH");
        assert_eq!(loader.load_string("BRANCH", "main"), "main");

        env::set_var("PR_AGENT_TEST_BRANCH", "develop");
        assert_eq!(loader.load_string("BRANCH", "main"), "develop");

        env::remove_var("PR_AGENT_TEST_BRANCH");
    }

    #[test]
    #[serial]
    fn test_load_parsed_falls_back_on_garbage() {
        let loader = EnvLoader::new("PR_AGENT_TEST");
        env::remove_var("PR_AGENT_TEST_LIMIT");
        assert_eq!(loader.load_parsed::<usize>("LIMIT", 42), 42);

        env::set_var("PR_AGENT_TEST_LIMIT", "123");
        assert_eq!(loader.load_parsed::<usize>("LIMIT", 42), 123);

        env::set_var("PR_AGENT_TEST_LIMIT", "lots");
        assert_eq!(loader.load_parsed::<usize>("LIMIT", 42), 42);

        env::remove_var("PR_AGENT_TEST_LIMIT");
    }

    #[test]
    #[serial]
    fn test_load_path_ignores_blank() {
        let loader = EnvLoader::new("PR_AGENT_TEST");
        env::set_var("PR_AGENT_TEST_DIR", "   ");
        assert_eq!(
            loader.load_path("DIR", PathBuf::from("templates")),
            PathBuf::from("templates")
        );

        env::set_var("PR_AGENT_TEST_DIR", "/srv/templates");
        assert_eq!(
            loader.load_path("DIR", PathBuf::from("templates")),
            PathBuf::from("/srv/templates")
        );

        env::remove_var("PR_AGENT_TEST_DIR");
    }
}
