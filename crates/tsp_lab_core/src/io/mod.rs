pub mod instance;
pub mod options;
pub mod result;
pub mod solutions;

use std::{fs, path::Path};

use crate::{Error, Result};

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("failed to read {}: {e}", path.display()),
        ))
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::{
        fs,
        path::PathBuf,
        time::{SystemTime, UNIX_EPOCH},
    };

    /// Writes `contents` to a fresh file under a unique temp directory.
    pub(crate) fn temp_file(name: &str, file_name: &str, contents: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after epoch")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("tsp-lab-tests-{name}-{nanos}"));
        fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join(file_name);
        fs::write(&path, contents).expect("write fixture");
        path
    }

    pub(crate) fn cleanup(path: &std::path::Path) {
        if let Some(dir) = path.parent() {
            fs::remove_dir_all(dir).expect("cleanup temp dir");
        }
    }
}
