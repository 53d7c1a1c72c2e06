use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch directory holding a config that keeps the binary offline.
pub struct Sandbox {
    pub dir: TempDir,
    pub config: PathBuf,
    pub stats: PathBuf,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let stats = dir.path().join("quiz_stats.json");
        let config = dir.path().join("langquiz.toml");
        std::fs::write(
            &config,
            format!(
                "stats_file = {:?}\n\n[generation]\nenabled = false\n",
                stats.display().to_string()
            ),
        )
        .unwrap();
        Self { dir, config, stats }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

#[allow(deprecated)]
pub fn langquiz() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("langquiz").unwrap();
    cmd.env_remove("RUST_LOG").env("NO_COLOR", "1");
    cmd
}
