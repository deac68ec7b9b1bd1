//! Start-up configuration for the interop backend.

use std::env;

/// Environment variable naming an extra GL library to try first (Linux).
pub const GL_LIBRARY_ENV: &str = "CLGL_GL_LIBRARY";

/// Environment variable forcing the format-table check on (`1`) or off (`0`).
pub const VERIFY_FORMATS_ENV: &str = "CLGL_VERIFY_FORMATS";

/// Settings read once when an [`InteropDevice`](crate::InteropDevice) is
/// created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteropConfig {
    /// GL libraries searched, in order, for `glXGetProcAddress`.
    pub gl_library_paths: Vec<String>,
    /// Re-validate the format table against the raw enumeration at start-up.
    pub verify_format_table: bool,
}

impl Default for InteropConfig {
    fn default() -> Self {
        Self {
            gl_library_paths: vec!["libGL.so.1".to_owned(), "libGL.so".to_owned()],
            verify_format_table: cfg!(debug_assertions),
        }
    }
}

impl InteropConfig {
    /// Defaults, overridden by `CLGL_GL_LIBRARY` and `CLGL_VERIFY_FORMATS`.
    pub fn from_env() -> Self {
        Self::default().with_overrides(
            env::var(GL_LIBRARY_ENV).ok().as_deref(),
            env::var(VERIFY_FORMATS_ENV).ok().as_deref(),
        )
    }

    fn with_overrides(mut self, gl_library: Option<&str>, verify: Option<&str>) -> Self {
        if let Some(path) = gl_library.map(str::trim).filter(|p| !p.is_empty()) {
            self.gl_library_paths.insert(0, path.to_owned());
        }
        match verify.map(str::trim) {
            Some("1") | Some("true") => self.verify_format_table = true,
            Some("0") | Some("false") => self.verify_format_table = false,
            Some(other) => {
                tracing::warn!("ignoring {VERIFY_FORMATS_ENV}={other:?}, expected 0 or 1");
            }
            None => {}
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = InteropConfig::default();
        assert_eq!(config.gl_library_paths, ["libGL.so.1", "libGL.so"]);
        assert_eq!(config.verify_format_table, cfg!(debug_assertions));
    }

    #[test]
    fn library_override_is_tried_first() {
        let config = InteropConfig::default().with_overrides(Some("/opt/amd/libGL.so.1"), None);
        assert_eq!(config.gl_library_paths[0], "/opt/amd/libGL.so.1");
        assert_eq!(config.gl_library_paths.len(), 3);

        let config = InteropConfig::default().with_overrides(Some("  "), None);
        assert_eq!(config.gl_library_paths.len(), 2);
    }

    #[test]
    fn verify_override() {
        let on = InteropConfig::default().with_overrides(None, Some("1"));
        assert!(on.verify_format_table);
        let off = InteropConfig::default().with_overrides(None, Some("0"));
        assert!(!off.verify_format_table);
        let junk = InteropConfig::default().with_overrides(None, Some("maybe"));
        assert_eq!(junk.verify_format_table, cfg!(debug_assertions));
    }
}
