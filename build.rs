use std::path::Path;
use std::process::Command;

/// Embeds `<short-hash>[-dirty]` as `SCORESCRIBE_BUILD_ID` for `--version` output.
fn main() {
    let build_id = match git(&["rev-parse", "--short", "HEAD"]) {
        Some(hash) => {
            let dirty = git(&["status", "--porcelain", "--untracked-files=no"])
                .is_some_and(|status| !status.is_empty());
            if dirty { format!("{hash}-dirty") } else { hash }
        }
        None => "unknown".to_string(),
    };

    println!("cargo:rustc-env=SCORESCRIBE_BUILD_ID={build_id}");

    for watched in [".git/HEAD", ".git/index", ".git/packed-refs"] {
        if Path::new(watched).exists() {
            println!("cargo:rerun-if-changed={watched}");
        }
    }
    println!("cargo:rerun-if-changed=build.rs");
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    // `status --porcelain` legitimately prints nothing on a clean tree.
    if text.is_empty() && args.first() != Some(&"status") {
        return None;
    }
    Some(text)
}
