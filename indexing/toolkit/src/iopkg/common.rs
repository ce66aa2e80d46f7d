use crate::error::CliError;
use byteindex::BuilderConfig;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;

/// Path argument that selects stdin or stdout instead of a file.
pub const STDIO_PATH: &str = "-";

pub fn open_input(path: &str) -> Result<Box<dyn io::Read>, CliError> {
    if path == STDIO_PATH {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(path).map_err(|source| CliError::Open {
        path: path.into(),
        source,
    })?;
    advise_sequential(&file);
    Ok(Box::new(file))
}

/// Hints the kernel that the input is read front to back. Failure is ignored.
#[cfg(target_os = "linux")]
pub fn advise_sequential(file: &File) -> bool {
    use std::os::unix::io::AsRawFd;
    use tracing::debug;

    // SAFETY: the descriptor stays open for the lifetime of `file`.
    let rc = unsafe { libc::posix_fadvise(file.as_raw_fd(), 0, 0, libc::POSIX_FADV_SEQUENTIAL) };
    if rc != 0 {
        debug!(errno = rc, "posix_fadvise failed");
    }
    rc == 0
}

#[cfg(not(target_os = "linux"))]
pub fn advise_sequential(_file: &File) -> bool {
    false
}

/// Creates or truncates the output. Files are created `rw-rw-rw-` before the umask.
pub fn open_output(path: &str) -> Result<Box<dyn io::Write>, CliError> {
    if path == STDIO_PATH {
        return Ok(Box::new(io::stdout().lock()));
    }
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o666);
    }
    let file = options.open(path).map_err(|source| CliError::Open {
        path: path.into(),
        source,
    })?;
    Ok(Box::new(file))
}

pub fn load_config(path: &Path) -> Result<BuilderConfig, CliError> {
    let file = File::open(path).map_err(|source| CliError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let config: BuilderConfig =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::Config {
            path: path.to_path_buf(),
            source,
        })?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};

    #[test]
    fn test_open_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        match open_input(missing.to_str().unwrap()) {
            Err(CliError::Open { path, source }) => {
                assert_eq!(path, missing);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            Err(other) => panic!("unexpected error {other}"),
            Ok(_) => panic!("opened a missing file"),
        }
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_advise_sequential_on_file() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        fs::write(tmp.path(), b"a\nb\n").unwrap();
        let file = File::open(tmp.path()).unwrap();
        assert!(advise_sequential(&file));

        let mut contents = Vec::new();
        open_input(tmp.path().to_str().unwrap())
            .unwrap()
            .read_to_end(&mut contents)
            .unwrap();
        assert_eq!(contents, b"a\nb\n");
    }

    #[test]
    fn test_output_is_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.idx");
        fs::write(&path, b"previous contents").unwrap();

        let mut output = open_output(path.to_str().unwrap()).unwrap();
        output.write_all(b"new").unwrap();
        drop(output);

        let mut contents = Vec::new();
        open_input(path.to_str().unwrap())
            .unwrap()
            .read_to_end(&mut contents)
            .unwrap();
        assert_eq!(contents, b"new");
    }

    #[test]
    fn test_load_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "input_buffer_size": 1024, "output_buffer_entries": 8 }"#).unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.input_buffer_size, 1024);
        assert_eq!(config.output_buffer_entries, 8);

        fs::write(&path, r#"{ "output_buffer_entries": 0 }"#).unwrap();
        assert!(matches!(load_config(&path), Err(CliError::Index(_))));

        fs::write(&path, "not json").unwrap();
        assert!(matches!(load_config(&path), Err(CliError::Config { .. })));
    }
}
