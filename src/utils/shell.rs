//! Small helpers to assemble the POSIX shell scripts this tool generates
//! (GUI launcher, per-case `runcase`).

pub const SHEBANG: &str = "#!/bin/sh\n\n";

pub fn script_comment(text: &str) -> String {
    format!("# {}\n", text)
}

/// `PATH=...:$PATH` prepend block, exported for the rest of the script.
pub fn prepend_path(var: &str, dir: &std::path::Path) -> String {
    format!("{var}=\"{}\":${var}\nexport {var}\n\n", dir.display(), var = var)
}

/// Forward the launcher's own positional arguments to the wrapped command.
pub fn positional_args() -> &'static str {
    "\"$@\""
}

pub fn generated_stamp(tool: &str, version: &str) -> String {
    format!(
        "# Generated by {} {} on {}\n\n",
        tool,
        version,
        chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_prepend_path_block() {
        let block = prepend_path("PATH", Path::new("/opt/calypso/bin"));
        assert_eq!(block, "PATH=\"/opt/calypso/bin\":$PATH\nexport PATH\n\n");
    }

    #[test]
    fn test_generated_stamp_is_a_comment() {
        let stamp = generated_stamp("study-gen", "0.4.1");
        assert!(stamp.starts_with("# Generated by study-gen 0.4.1 on "));
        assert!(stamp.ends_with("\n\n"));
    }
}
