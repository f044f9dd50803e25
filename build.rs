//! Build script for wl-rdp-input
//!
//! Stamps the replay banner with build date, time and commit.

use std::process::Command;

fn command_output(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn main() {
    let stamps = [
        ("BUILD_DATE", command_output("date", &["+%Y-%m-%d"])),
        ("BUILD_TIME", command_output("date", &["+%H:%M:%S"])),
        ("GIT_HASH", command_output("git", &["rev-parse", "--short", "HEAD"])),
    ];

    for (name, value) in stamps {
        let value = value.unwrap_or_else(|| "unknown".to_string());
        println!("cargo:rustc-env={}={}", name, value);
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
}
