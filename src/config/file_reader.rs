use std::fs::{read_dir, read_to_string};
use std::io::Error as ioError;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FileReaderError {
    #[error("error reading contents: `{0}`")]
    Read(#[from] ioError),
    #[error("file not found: `{0}`")]
    FileNotFound(String),
    #[error("dir not found: `{0}`")]
    DirNotFound(String),
}

pub trait FileReader {
    fn read(&self, file_path: &Path) -> Result<String, FileReaderError>;

    /// Lists the entries of a directory that are not themselves directories, sorted by path.
    fn read_dir(&self, dir_path: &Path) -> Result<Vec<PathBuf>, FileReaderError>;
}

#[derive(Debug, Default)]
pub struct LocalFile;

impl FileReader for LocalFile {
    fn read(&self, file_path: &Path) -> Result<String, FileReaderError> {
        if !file_path.is_file() {
            return Err(FileReaderError::FileNotFound(format!(
                "{}",
                file_path.display()
            )));
        }
        Ok(read_to_string(file_path)?)
    }

    fn read_dir(&self, dir_path: &Path) -> Result<Vec<PathBuf>, FileReaderError> {
        if !dir_path.is_dir() {
            return Err(FileReaderError::DirNotFound(format!(
                "{}",
                dir_path.display()
            )));
        }
        let mut file_paths = Vec::new();
        for entry in read_dir(dir_path)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                continue;
            }
            file_paths.push(entry.path());
        }
        file_paths.sort();
        Ok(file_paths)
    }
}

#[cfg(test)]
pub mod test {
    use super::*;
    use mockall::{mock, predicate};
    use std::fs::{create_dir, File};
    use std::io::{ErrorKind, Write};
    use tempfile::TempDir;

    mock! {
        pub FileReaderMock {}

        impl FileReader for FileReaderMock {
            fn read(&self, file_path: &Path) -> Result<String, FileReaderError>;
            fn read_dir(&self, dir_path: &Path) -> Result<Vec<PathBuf>, FileReaderError>;
        }
    }

    impl MockFileReaderMock {
        pub fn should_read(&mut self, path: &Path, content: &str) {
            let content = content.to_string();
            self.expect_read()
                .with(predicate::eq(PathBuf::from(path)))
                .times(1)
                .returning(move |_| Ok(content.clone()));
        }

        pub fn should_not_read_io_error(&mut self, path: &Path) {
            self.expect_read()
                .with(predicate::eq(PathBuf::from(path)))
                .once()
                .returning(move |_| Err(FileReaderError::Read(ioError::from(ErrorKind::PermissionDenied))));
        }

        pub fn should_read_dir(&mut self, path: &Path, content: Vec<PathBuf>) {
            self.expect_read_dir()
                .with(predicate::eq(PathBuf::from(path)))
                .times(1)
                .returning(move |_| Ok(content.clone()));
        }

        pub fn should_not_read_dir(&mut self, path: &Path) {
            let message = path.display().to_string();
            self.expect_read_dir()
                .with(predicate::eq(PathBuf::from(path)))
                .times(1)
                .returning(move |_| Err(FileReaderError::DirNotFound(message.clone())));
        }
    }

    #[test]
    fn file_not_found_should_return_error() {
        let reader = LocalFile;
        let result = reader.read(Path::new("/a/path/that/does/not/exist"));
        assert_eq!(
            String::from("file not found: `/a/path/that/does/not/exist`"),
            result.unwrap_err().to_string()
        );
    }

    #[test]
    fn dir_not_found_should_return_error() {
        let reader = LocalFile;
        let result = reader.read_dir(Path::new("/a/path/that/does/not/exist"));
        assert_eq!(
            String::from("dir not found: `/a/path/that/does/not/exist`"),
            result.unwrap_err().to_string()
        );
    }

    #[test]
    fn read_dir_skips_sub_directories_and_sorts() {
        let dir = TempDir::new().unwrap();
        for name in ["b.yaml", "a.yaml"] {
            let mut file = File::create(dir.path().join(name)).unwrap();
            writeln!(file, "serviceName: {name}").unwrap();
        }
        create_dir(dir.path().join("nested")).unwrap();

        let files = LocalFile.read_dir(dir.path()).unwrap();

        assert_eq!(
            vec![dir.path().join("a.yaml"), dir.path().join("b.yaml")],
            files
        );
    }

    #[test]
    fn read_file_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("synapse.yaml");
        std::fs::write(&path, "serviceName: synapse\n").unwrap();

        assert_eq!("serviceName: synapse\n", LocalFile.read(&path).unwrap());
    }
}
