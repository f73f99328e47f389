use crate::errors::{AppError, AppResult, GitError};
use std::path::{Path, PathBuf};

/// Name of the metadata entry marking a repository root. It is a directory
/// for ordinary clones and a file for worktrees and submodules.
pub const GIT_DIR_NAME: &str = ".git";

/// True iff `path` contains git metadata. Filesystem errors count as `false`.
pub fn is_repository(path: impl AsRef<Path>) -> bool {
    path.as_ref().join(GIT_DIR_NAME).exists()
}

/// 查找 Git 仓库根目录
///
/// Relative paths are resolved against the working directory first, so
/// the walk can climb above `.`.
pub fn find_repository_root(start_path: impl AsRef<Path>) -> AppResult<PathBuf> {
    let start = start_path.as_ref();
    let mut current = resolve_start(start)?;

    loop {
        if is_repository(&current) {
            return Ok(current);
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => return Err(GitError::NotARepository(start.display().to_string()).into()),
        }
    }
}

fn resolve_start(start: &Path) -> AppResult<PathBuf> {
    if let Ok(canonical) = start.canonicalize() {
        return Ok(canonical);
    }
    std::path::absolute(start)
        .map_err(|e| AppError::IO(format!("resolving {}", start.display()), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_is_repository() {
        let temp_dir = TempDir::new().unwrap();
        assert!(!is_repository(temp_dir.path()));

        fs::create_dir(temp_dir.path().join(".git")).unwrap();
        assert!(is_repository(temp_dir.path()));
    }

    #[test]
    fn test_is_repository_with_git_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(".git"), "gitdir: ../main/.git/worktrees/wt\n").unwrap();
        assert!(is_repository(temp_dir.path()));
    }

    #[test]
    fn test_is_repository_missing_path() {
        assert!(!is_repository("/definitely/not/a/real/path/for/gitstate"));
    }

    #[test]
    fn test_find_repository_root_from_nested_dir() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join(".git")).unwrap();
        let nested = temp_dir.path().join("src").join("deep");
        fs::create_dir_all(&nested).unwrap();

        let root = find_repository_root(&nested).unwrap();
        assert_eq!(root, temp_dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_find_repository_root_through_dot_components() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join(".git")).unwrap();
        let nested = temp_dir.path().join("src");
        fs::create_dir_all(&nested).unwrap();

        let relative = nested.join("..").join("src").join(".");
        let root = find_repository_root(&relative).unwrap();
        assert_eq!(root, temp_dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_find_repository_root_missing() {
        let err = find_repository_root("/definitely/not/a/real/path/for/gitstate").unwrap_err();
        assert!(matches!(err, AppError::Git(GitError::NotARepository(_))));
    }
}
