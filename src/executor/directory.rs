use std::io;
use std::path::Path;

/// Changes the working directory the following commands are spawned in.
pub trait DirectoryChanger {
    fn change_dir(&self, dir: &Path) -> io::Result<()>;
}

/// Changes the current directory of the whole process.
///
/// This is shared state: configurations must be executed one at a time while it is in use.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessDirectory;

impl DirectoryChanger for ProcessDirectory {
    fn change_dir(&self, dir: &Path) -> io::Result<()> {
        std::env::set_current_dir(dir)
    }
}

#[cfg(test)]
pub mod test {
    use super::*;
    use mockall::{mock, predicate};
    use std::path::PathBuf;

    mock! {
        pub DirectoryChangerMock {}

        impl DirectoryChanger for DirectoryChangerMock {
            fn change_dir(&self, dir: &Path) -> io::Result<()>;
        }
    }

    impl MockDirectoryChangerMock {
        pub fn should_not_change_dir(&mut self, dir: &Path) {
            self.expect_change_dir()
                .with(predicate::eq(PathBuf::from(dir)))
                .times(1)
                .returning(|_| Err(io::Error::from(io::ErrorKind::NotFound)));
        }
    }

    #[test]
    fn change_to_missing_dir_fails() {
        let result = ProcessDirectory.change_dir(Path::new("/a/path/that/does/not/exist"));
        assert_eq!(io::ErrorKind::NotFound, result.unwrap_err().kind());
    }

    #[test]
    fn change_to_current_dir() {
        let current = std::env::current_dir().unwrap();
        assert!(ProcessDirectory.change_dir(&current).is_ok());
        assert_eq!(current, std::env::current_dir().unwrap());
    }
}
