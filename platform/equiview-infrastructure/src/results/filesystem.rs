use super::record_load_metrics;
use equiview_domain::repositories::results::{BacktestResultSource, ResultQuery};
use equiview_domain::value_objects::backtest_result::BacktestResult;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime};

/// Reads results saved as JSON. `root` is either a single result file, which
/// answers every query, or a directory of `<run_id>.json` files.
#[derive(Debug, Clone)]
pub struct FilesystemResultSource {
    root: PathBuf,
}

impl FilesystemResultSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn load(&self, query: &ResultQuery) -> Result<BacktestResult, String> {
        if self.root.is_file() {
            let result = read_result(&self.root)?;
            if let ResultQuery::Run(run_id) = query {
                if &result.run_id != run_id {
                    tracing::warn!(
                        requested = %run_id,
                        found = %result.run_id,
                        path = %self.root.display(),
                        "result file holds a different run"
                    );
                }
            }
            return Ok(result);
        }
        if !self.root.is_dir() {
            return Err(format!("results path not found: {}", self.root.display()));
        }

        match query {
            ResultQuery::Latest => {
                let path = self.latest_file()?;
                read_result(&path)
            }
            ResultQuery::Run(run_id) => self.find_run(run_id),
        }
    }

    fn json_files(&self) -> Result<Vec<(PathBuf, SystemTime)>, String> {
        let entries = fs::read_dir(&self.root)
            .map_err(|err| format!("failed to list {}: {}", self.root.display(), err))?;
        let mut files = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|err| format!("failed to list {}: {}", self.root.display(), err))?;
            let path = entry.path();
            let is_json = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            if !is_json || !path.is_file() {
                continue;
            }
            let modified = entry
                .metadata()
                .and_then(|meta| meta.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            files.push((path, modified));
        }
        Ok(files)
    }

    fn latest_file(&self) -> Result<PathBuf, String> {
        self.json_files()?
            .into_iter()
            // newest first; equal mtimes fall back to the greatest file name
            .max_by(|(a_path, a_time), (b_path, b_time)| {
                a_time.cmp(b_time).then_with(|| a_path.cmp(b_path))
            })
            .map(|(path, _)| path)
            .ok_or_else(|| format!("no result files in {}", self.root.display()))
    }

    fn find_run(&self, run_id: &str) -> Result<BacktestResult, String> {
        if run_id.is_empty() || run_id.contains(['/', '\\']) || run_id == ".." {
            return Err(format!("invalid run id: {run_id:?}"));
        }
        let direct = self.root.join(format!("{run_id}.json"));
        if direct.is_file() {
            let result = read_result(&direct)?;
            if result.run_id == run_id {
                return Ok(result);
            }
            tracing::warn!(
                requested = %run_id,
                found = %result.run_id,
                path = %direct.display(),
                "result file holds a different run; scanning directory"
            );
        }

        // file names need not match run ids; fall back to reading each file
        for (path, _) in self.json_files()? {
            if path == direct {
                continue;
            }
            match read_result(&path) {
                Ok(result) if result.run_id == run_id => return Ok(result),
                Ok(_) => {}
                Err(err) => tracing::debug!(error = %err, "skipping unreadable result file"),
            }
        }
        Err(format!(
            "run not found: {run_id} (searched {})",
            self.root.display()
        ))
    }
}

fn read_result(path: &Path) -> Result<BacktestResult, String> {
    let raw = fs::read_to_string(path)
        .map_err(|err| format!("failed to read result {}: {}", path.display(), err))?;
    serde_json::from_str(&raw)
        .map_err(|err| format!("failed to parse result {}: {}", path.display(), err))
}

impl BacktestResultSource for FilesystemResultSource {
    fn load_result(&self, query: &ResultQuery) -> Result<BacktestResult, String> {
        let _span = tracing::info_span!(
            "infra.results.filesystem",
            root = %self.root.display(),
            query = %query
        )
        .entered();
        let start = Instant::now();
        let result = self.load(query);
        record_load_metrics("filesystem", start, &result);
        result
    }
}
