#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::Command;

// Helper to run a command and return its output.
pub fn run_command(command: &str, args: &[&str], cwd: &Path) -> String {
    let output = Command::new(command)
        .args(args)
        .current_dir(cwd)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .output()
        .unwrap_or_else(|e| panic!("Failed to execute command {}: {}", command, e));

    if !output.status.success() {
        panic!(
            "Command `{} {}` failed with exit code {:?}:\nSTDOUT: {}\nSTDERR: {}",
            command,
            args.join(" "),
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
    }

    String::from_utf8(output.stdout).expect("Failed to convert stdout to string")
}

pub fn git(repo_path: &Path, args: &[&str]) -> String {
    run_command("git", args, repo_path)
}

fn configure_identity(repo_path: &Path) {
    git(repo_path, &["config", "user.name", "Test User"]);
    git(repo_path, &["config", "user.email", "test@example.com"]);
    git(repo_path, &["config", "commit.gpgsign", "false"]);
}

// Empty repository on branch `main`, no commits.
pub fn init_repo(repo_path: &Path) {
    git(repo_path, &["init", "--quiet"]);
    git(repo_path, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    configure_identity(repo_path);
}

pub fn write_file(repo_path: &Path, name: &str, content: &str) {
    fs::write(repo_path.join(name), content).unwrap();
}

pub fn commit_file(repo_path: &Path, name: &str, content: &str, message: &str) {
    write_file(repo_path, name, content);
    git(repo_path, &["add", name]);
    git(repo_path, &["commit", "--quiet", "-m", message]);
}

// Repository with one commit containing a.txt and b.txt.
pub fn setup_test_repo(repo_path: &Path) {
    init_repo(repo_path);
    write_file(repo_path, "a.txt", "alpha\n");
    write_file(repo_path, "b.txt", "beta\n");
    git(repo_path, &["add", "a.txt", "b.txt"]);
    git(repo_path, &["commit", "--quiet", "-m", "Initial commit"]);
}

// 2 modified files, 1 untracked file, 1 stash entry, branch `main`, no upstream.
pub fn setup_scenario_repo(repo_path: &Path) {
    setup_test_repo(repo_path);

    write_file(repo_path, "a.txt", "alpha, stashed edit\n");
    git(repo_path, &["stash", "--quiet"]);

    write_file(repo_path, "a.txt", "alpha v2\n");
    write_file(repo_path, "b.txt", "beta v2\n");
    write_file(repo_path, "c.txt", "not tracked\n");
}

// Bare-bones "server" repository plus a clone of it tracking origin/main.
pub fn setup_clone(origin_path: &Path, clone_path: &Path) {
    setup_test_repo(origin_path);
    let origin = origin_path.to_str().unwrap();
    let clone = clone_path.to_str().unwrap();
    run_command("git", &["clone", "--quiet", origin, clone], origin_path);
    configure_identity(clone_path);
}
