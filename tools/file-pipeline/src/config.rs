use std::path::{Path, PathBuf};

/// Environment variable consulted when `--root` is not given.
pub const ROOT_ENV_VAR: &str = "FILE_PIPELINE_ROOT";

/// Directory name used for the project root when nothing else is configured.
pub const DEFAULT_ROOT_NAME: &str = "project_root";

/// Fixed directory tree of a project, derived from its root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub root: PathBuf,
    pub data_dir: PathBuf,
    pub raw_dir: PathBuf,
    pub processed_dir: PathBuf,
    pub logs_dir: PathBuf,
    pub backups_dir: PathBuf,
    pub output_dir: PathBuf,
    pub restore_dir: PathBuf,
    pub pre_restore_dir: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let data_dir = root.join("data");
        let backups_dir = root.join("backups");

        Self {
            raw_dir: data_dir.join("raw"),
            processed_dir: data_dir.join("processed"),
            logs_dir: root.join("logs"),
            output_dir: root.join("output"),
            restore_dir: root.join("restore"),
            pre_restore_dir: backups_dir.join("pre_restore_tmp"),
            data_dir,
            backups_dir,
            root,
        }
    }

    /// Directories created by the scaffolder, parents first.
    pub fn directories(&self) -> Vec<PathBuf> {
        vec![
            self.root.clone(),
            self.data_dir.clone(),
            self.raw_dir.clone(),
            self.processed_dir.clone(),
            self.logs_dir.clone(),
            self.backups_dir.clone(),
            self.output_dir.clone(),
        ]
    }

    pub fn log_file(&self) -> PathBuf {
        self.logs_dir.join("log.txt")
    }

    pub fn processed_json(&self) -> PathBuf {
        self.output_dir.join("processed_data.json")
    }

    pub fn metadata_json(&self) -> PathBuf {
        self.output_dir.join("metadata.json")
    }

    pub fn report_file(&self) -> PathBuf {
        self.output_dir.join("report.txt")
    }
}

/// Picks the project root: explicit flag, then [`ROOT_ENV_VAR`], then
/// `<cwd>/project_root`. Relative paths are resolved against `cwd`.
pub fn resolve_root(explicit: Option<PathBuf>, cwd: &Path) -> PathBuf {
    let root = match explicit {
        Some(dir) => dir,
        None => match std::env::var(ROOT_ENV_VAR) {
            Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => PathBuf::from(DEFAULT_ROOT_NAME),
        },
    };

    if root.is_absolute() {
        root
    } else {
        cwd.join(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_matches_fixed_tree() {
        let layout = ProjectLayout::new("/work/project_root");

        assert_eq!(layout.raw_dir, PathBuf::from("/work/project_root/data/raw"));
        assert_eq!(layout.processed_dir, PathBuf::from("/work/project_root/data/processed"));
        assert_eq!(layout.log_file(), PathBuf::from("/work/project_root/logs/log.txt"));
        assert_eq!(
            layout.pre_restore_dir,
            PathBuf::from("/work/project_root/backups/pre_restore_tmp")
        );

        let dirs = layout.directories();
        assert_eq!(dirs.len(), 7);
        assert_eq!(dirs[0], layout.root);
        // Parents always precede their children
        for (i, dir) in dirs.iter().enumerate() {
            if let Some(parent) = dir.parent() {
                if let Some(pos) = dirs.iter().position(|d| d == parent) {
                    assert!(pos < i);
                }
            }
        }
    }

    #[test]
    fn test_resolve_root_prefers_explicit_path() {
        let root = resolve_root(Some(PathBuf::from("custom")), Path::new("/home/user"));
        assert_eq!(root, PathBuf::from("/home/user/custom"));

        let root = resolve_root(Some(PathBuf::from("/abs/root")), Path::new("/home/user"));
        assert_eq!(root, PathBuf::from("/abs/root"));
    }
}
