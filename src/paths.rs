//! On-disk layout: a storage root holding one directory per section.

use crate::error::{StoreError, StoreResult};
use crate::note::Section;
use std::fs;
use std::path::{Path, PathBuf};

pub const DIR_MODE: u32 = 0o755;

#[derive(Debug, Clone)]
pub struct Paths {
    root: PathBuf,
    sections: Vec<Section>,
}

impl Paths {
    /// Resolves the layout under `root` and creates every missing directory.
    ///
    /// The notes and trash directories are always created, even when the
    /// configured section list leaves them out, because restoring from the
    /// trash falls back to the notes section.
    pub fn resolve(root: &Path, sections: &[Section]) -> StoreResult<Self> {
        let mut ordered: Vec<Section> = Vec::new();
        for section in sections.iter().copied() {
            if !ordered.contains(&section) {
                ordered.push(section);
            }
        }
        if ordered.is_empty() {
            ordered.push(Section::Notes);
        }
        if !ordered.contains(&Section::Trash) {
            ordered.push(Section::Trash);
        }

        let paths = Paths { root: root.to_path_buf(), sections: ordered };
        create_dir(&paths.root)?;
        for section in Section::ALL {
            if paths.sections.contains(&section)
                || section == Section::DEFAULT_ACTIVE
                || section == Section::Trash
            {
                create_dir(&paths.dir_for(section))?;
            }
        }
        log::debug!("storage layout ready at {}", paths.root.display());
        Ok(paths)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Sections in display order; always ends up containing the trash.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn dir_for(&self, section: Section) -> PathBuf {
        self.root.join(section.dir_name())
    }
}

fn create_dir(path: &Path) -> StoreResult<()> {
    if path.is_dir() {
        return Ok(());
    }
    builder()
        .create(path)
        .map_err(|e| StoreError::io("create data dir", path, e))
}

#[cfg(unix)]
fn builder() -> fs::DirBuilder {
    use std::os::unix::fs::DirBuilderExt;
    let mut b = fs::DirBuilder::new();
    b.recursive(true).mode(DIR_MODE);
    b
}

#[cfg(not(unix))]
fn builder() -> fs::DirBuilder {
    let mut b = fs::DirBuilder::new();
    b.recursive(true);
    b
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn resolve_creates_section_dirs() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().join("data");
        let paths =
            Paths::resolve(&root, &[Section::Notes, Section::Trash]).unwrap();
        assert!(paths.dir_for(Section::Notes).is_dir());
        assert!(paths.dir_for(Section::Trash).is_dir());
        assert!(!paths.dir_for(Section::Todo).exists());
        assert_eq!(paths.root(), root.as_path());
    }

    #[test]
    fn trash_is_always_part_of_the_layout() {
        let tmp = tempdir().unwrap();
        let paths = Paths::resolve(tmp.path(), &[Section::Todo]).unwrap();
        assert_eq!(paths.sections(), &[Section::Todo, Section::Trash]);
        assert!(paths.dir_for(Section::Notes).is_dir());
        assert!(paths.dir_for(Section::Todo).is_dir());
    }

    #[test]
    fn duplicate_sections_are_collapsed() {
        let tmp = tempdir().unwrap();
        let paths = Paths::resolve(
            tmp.path(),
            &[Section::Notes, Section::Notes, Section::Trash],
        )
        .unwrap();
        assert_eq!(paths.sections(), &[Section::Notes, Section::Trash]);
    }

    #[cfg(unix)]
    #[test]
    fn new_dirs_use_0755() {
        use std::os::unix::fs::PermissionsExt;
        let tmp = tempdir().unwrap();
        let paths = Paths::resolve(tmp.path(), &[Section::Notes]).unwrap();
        let mode = fs::metadata(paths.dir_for(Section::Notes))
            .unwrap()
            .permissions()
            .mode();
        // umask may only remove bits
        assert_eq!(mode & 0o777 & !DIR_MODE, 0);
    }

    #[test]
    fn resolve_fails_when_root_is_a_file() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("taken");
        fs::write(&file, "x").unwrap();
        let err = Paths::resolve(&file, &[Section::Notes]).unwrap_err();
        assert!(err.to_string().contains("create data dir"));
    }
}
