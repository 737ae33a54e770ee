//! Shared utility functions.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Format an elapsed time in milliseconds with three decimals.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use pmse_harness::utils::format_elapsed;
///
/// assert_eq!(format_elapsed(Duration::from_micros(1500)), "1.500 [ms]");
/// assert_eq!(format_elapsed(Duration::from_secs(2)), "2000.000 [ms]");
/// ```
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.3} [ms]", elapsed.as_secs_f64() * 1000.0)
}

/// Column at which test statuses start: longest name plus `padding`.
///
/// Returns `padding` for an empty list.
pub fn status_column<S: AsRef<str>>(names: &[S], padding: usize) -> usize {
    names
        .iter()
        .map(|n| n.as_ref().chars().count())
        .max()
        .unwrap_or(0)
        + padding
}

/// Check that a name is usable as a single path component.
///
/// Rejects empty names, path separators, `.`/`..` and null bytes, so a
/// name can never point outside the directory it is joined onto.
pub fn is_safe_path_component(name: &str) -> bool {
    !name.is_empty()
        && !name.contains('/')
        && !name.contains('\\')
        && name != "."
        && name != ".."
        && !name.contains('\0')
}

/// Anchor a relative path at the current directory.
///
/// Child processes run from a different directory than ours, so paths shared
/// with them must be absolute. Falls back to the path as given when the
/// current directory cannot be read.
pub fn absolute_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::ZERO), "0.000 [ms]");
        assert_eq!(format_elapsed(Duration::from_nanos(1_234_567)), "1.235 [ms]");
    }

    #[test]
    fn test_status_column() {
        assert_eq!(status_column(&["a.js", "longer.js"], 8), 17);
        assert_eq!(status_column::<&str>(&[], 8), 8);
    }

    #[test]
    fn test_safe_path_component() {
        assert!(is_safe_path_component("write_workload"));
        assert!(is_safe_path_component("read-90.update-10"));
        assert!(!is_safe_path_component(""));
        assert!(!is_safe_path_component("."));
        assert!(!is_safe_path_component(".."));
        assert!(!is_safe_path_component("a/b"));
        assert!(!is_safe_path_component("a\\b"));
        assert!(!is_safe_path_component("a\0b"));
    }

    #[test]
    fn test_absolute_path() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(absolute_path("db"), cwd.join("db"));
        assert_eq!(absolute_path("/mnt/pmem"), PathBuf::from("/mnt/pmem"));
    }
}
