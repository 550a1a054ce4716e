use crate::utils::error::Result;
use std::fs;
use std::path::Path;

/// Replace every literal occurrence of each placeholder token, in order.
/// Unmatched tokens are left as-is. Plain text replacement only; no regex
/// semantics, no longest-match promise, so overlapping tokens must be listed
/// longest first.
pub fn render_str(text: &str, replacements: &[(&str, &str)]) -> String {
    let mut out = text.to_string();
    for (token, value) in replacements {
        out = out.replace(token, value);
    }
    out
}

pub fn render(template_path: &Path, replacements: &[(&str, &str)]) -> Result<String> {
    let text = fs::read_to_string(template_path)?;
    Ok(render_str(&text, replacements))
}

/// chmod u+x 的等價操作
pub fn make_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_mode(perms.mode() | 0o100);
        fs::set_permissions(path, perms)?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}

/// Write a generated script and mark it executable for the current user.
pub fn write_executable(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents)?;
    make_executable(path)
}
