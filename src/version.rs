//! Version string for `--version`

use std::path::Path;

use crate::probe::Prober;

/// `boxfetch v{version}`, plus `({branch}@{commit})` when the crate's source
/// directory is a git checkout
pub fn version_string(prober: &dyn Prober) -> String {
    describe(prober, Path::new(env!("CARGO_MANIFEST_DIR")))
}

fn describe(prober: &dyn Prober, source_dir: &Path) -> String {
    let base = format!("boxfetch v{}", env!("CARGO_PKG_VERSION"));
    match git_revision(prober, source_dir) {
        Some(revision) => format!("{} ({})", base, revision),
        None => base,
    }
}

fn git_revision(prober: &dyn Prober, source_dir: &Path) -> Option<String> {
    if !source_dir.join(".git").exists() {
        return None;
    }
    let dir = source_dir.to_str()?;

    let git = |args: &[&str]| {
        let mut full = vec!["-C", dir, "rev-parse"];
        full.extend_from_slice(args);
        prober.command("git", &full).non_empty().map(str::to_string)
    };

    let branch = git(&["--abbrev-ref", "HEAD"])?;
    let commit = git(&["--short", "HEAD"])?;
    Some(format!("{}@{}", branch, commit))
}
