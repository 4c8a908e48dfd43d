use std::process::Command;

fn main() {
    let package_version = env!("CARGO_PKG_VERSION");

    // Append git revision info when building from a checkout: 1.1.1 (rev 42, dirty)
    let version = match get_git_commit_count() {
        Some(count) if is_git_dirty().unwrap_or(false) => {
            format!("{package_version} (rev {count}, dirty)")
        }
        Some(count) => format!("{package_version} (rev {count})"),
        None => package_version.to_string(),
    };

    println!("cargo:rustc-env=GOST_VERSION={}", version);

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
    println!("cargo:rerun-if-changed=.git/index");
}

fn get_git_commit_count() -> Option<u32> {
    let output = Command::new("git")
        .args(["rev-list", "--count", "HEAD"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    String::from_utf8_lossy(&output.stdout).trim().parse::<u32>().ok()
}

fn is_git_dirty() -> Option<bool> {
    let output = Command::new("git")
        .args(["status", "--porcelain"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    // Any porcelain output means uncommitted changes
    Some(!String::from_utf8_lossy(&output.stdout).trim().is_empty())
}
