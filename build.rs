use std::process::Command;

/// Runs git with `args` and returns trimmed stdout, or `None` outside a checkout.
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim().to_string())
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");

    let hash = git(&["rev-parse", "--short", "HEAD"])
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| "unknown".to_string());
    let commit_date = git(&["log", "-1", "--format=%cd", "--date=format:%Y-%m-%d"])
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    // A release build sits exactly on a version tag with a clean tree
    let version = env!("CARGO_PKG_VERSION");
    let clean = git(&["status", "--porcelain"]).is_some_and(|s| s.is_empty());
    let tagged = git(&["tag", "--points-at", "HEAD"]).is_some_and(|tags| {
        tags.lines()
            .any(|tag| tag == version || tag.strip_prefix('v') == Some(version))
    });

    println!("cargo:rustc-env=GIT_HASH={}", hash);
    println!("cargo:rustc-env=GIT_COMMIT_DATE={}", commit_date);
    println!("cargo:rustc-env=IS_RELEASE={}", clean && tagged);
}
