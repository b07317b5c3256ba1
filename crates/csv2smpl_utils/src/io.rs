use std::{
    ffi::OsStr,
    fs::File,
    io,
    path::{Path, PathBuf},
};
/// associating a extension with a enum
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

pub struct FileLoader {}
impl FileLoader {
    /// Opens a file, reporting the path in the error when it doesn't exist
    pub fn open(file_path: &Path) -> io::Result<File> {
        File::open(file_path).map_err(|e| io::Error::new(e.kind(), format!("could not open {}: {e}", file_path.display())))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum FileType {
    Csv,
    Npz,
    Unknown,
}
impl FileType {
    pub fn value(&self) -> &'static [&'static str] {
        match self {
            Self::Csv => &["csv"],
            Self::Npz => &["npz"],
            Self::Unknown => &[],
        }
    }
    /// Case insensitive lookup, anything unlisted (including an empty
    /// extension) is `Unknown`
    pub fn find_match(ext: &str) -> Self {
        let ext = ext.to_ascii_lowercase();
        Self::iter().find(|filetype| filetype.value().contains(&ext.as_str())).unwrap_or(Self::Unknown)
    }
    /// A trailing dot (`motion.`) counts as no extension
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(OsStr::to_str) {
            Some(ext) if !ext.is_empty() => Self::find_match(ext),
            _ => Self::Unknown,
        }
    }
    pub fn main_extension(&self) -> &'static str {
        self.value().first().copied().unwrap_or_default()
    }
}

/// Appends the extension of `file_type` unless the path already has it
pub fn with_extension_of(path: &Path, file_type: FileType) -> PathBuf {
    if FileType::from_path(path) == file_type {
        return path.to_path_buf();
    }
    let mut with_suffix = path.as_os_str().to_owned();
    with_suffix.push(".");
    with_suffix.push(file_type.main_extension());
    PathBuf::from(with_suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_extension_case_insensitive() {
        assert_eq!(FileType::from_path(Path::new("walk.csv")), FileType::Csv);
        assert_eq!(FileType::from_path(Path::new("walk.CSV")), FileType::Csv);
        assert_eq!(FileType::from_path(Path::new("out/motion.npz")), FileType::Npz);
        assert_eq!(FileType::from_path(Path::new("motion")), FileType::Unknown);
        assert_eq!(FileType::from_path(Path::new("motion.smpl")), FileType::Unknown);
        assert_eq!(FileType::from_path(Path::new("motion.")), FileType::Unknown);
        assert_eq!(FileType::find_match(""), FileType::Unknown);
        assert_eq!(FileType::Unknown.main_extension(), "");
    }

    #[test]
    fn appends_missing_extension() {
        assert_eq!(with_extension_of(Path::new("motion.npz"), FileType::Npz), PathBuf::from("motion.npz"));
        assert_eq!(with_extension_of(Path::new("motion"), FileType::Npz), PathBuf::from("motion.npz"));
        assert_eq!(with_extension_of(Path::new("motion.v2"), FileType::Npz), PathBuf::from("motion.v2.npz"));
    }

    #[test]
    fn open_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");
        let err = FileLoader::open(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(err.to_string().contains("absent.csv"));
    }
}
