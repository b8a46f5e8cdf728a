//! Stamps the binary with the commit and date it was built from

use std::process::Command;

use chrono::Utc;

fn git_commit() -> Option<String> {
    // release pipelines build from a tarball and pass the commit in
    if let Ok(commit) = std::env::var("ECSDEPLOY_GIT_COMMIT") {
        return Some(commit);
    }
    let output = Command::new("git")
        .args(["rev-parse", "--short=10", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|hash| hash.trim().to_string())
}

fn main() {
    let commit = git_commit().unwrap_or_else(|| "unknown".to_string());
    let built_at = Utc::now().format("%Y-%m-%dT%H:%M:%SZ");

    println!("cargo:rustc-env=ECSDEPLOY_COMMIT={commit}");
    println!("cargo:rustc-env=ECSDEPLOY_BUILT_AT={built_at}");
    println!("cargo:rerun-if-env-changed=ECSDEPLOY_GIT_COMMIT");
    println!("cargo:rerun-if-changed=../.git/HEAD");
}
