use std::path::PathBuf;

use crate::{Error, Result, fs::read_bytes};

/// Text stored when the user never supplied a description.
pub const NO_INFORMATION: &str = "Нет информации";

/// What to store as a lake's picture when a draft is saved.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum PictureChoice {
    /// Leave the stored picture as it is. Behaves like [`PictureChoice::Placeholder`]
    /// for new records.
    #[default]
    Keep,
    /// Store the placeholder image.
    Placeholder,
    /// Store the raw bytes of a user chosen image file.
    File(PathBuf),
}

/// Unvalidated form input for a lake record.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LakeDraft {
    pub name: String,
    pub picture: PictureChoice,
    /// `None` when the user has not entered a description.
    pub description: Option<String>,
}

impl LakeDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_picture(mut self, picture: PictureChoice) -> Self {
        self.picture = picture;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The trimmed name, rejecting blank input.
    pub fn validated_name(&self) -> Result<&str> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Error::EmptyName);
        }

        Ok(name)
    }

    /// The description to store, substituting [`NO_INFORMATION`] for missing or blank text.
    pub fn normalized_description(&self) -> String {
        match self.description.as_deref() {
            Some(text) if !text.trim().is_empty() => text.to_string(),
            _ => NO_INFORMATION.to_string(),
        }
    }

    /// Resolve the picture bytes to store. `Ok(None)` means the stored picture must be
    /// left unchanged.
    pub(crate) fn picture_bytes<F>(&self, placeholder: F) -> Result<Option<Vec<u8>>>
    where
        F: FnOnce() -> Result<Vec<u8>>,
    {
        match &self.picture {
            PictureChoice::Keep => Ok(None),
            PictureChoice::Placeholder => placeholder().map(Some),
            PictureChoice::File(path) => read_bytes(path).map(Some),
        }
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use super::*;

    #[test]
    fn test_blank_name_rejected() {
        assert!(matches!(
            LakeDraft::new("   ").validated_name(),
            Err(Error::EmptyName)
        ));
        assert!(matches!(
            LakeDraft::new("").validated_name(),
            Err(Error::EmptyName)
        ));
    }

    #[test]
    fn test_name_trimmed() {
        assert_eq!(LakeDraft::new("  Baikal \n").validated_name().unwrap(), "Baikal");
    }

    #[test]
    fn test_untouched_description() {
        assert_eq!(LakeDraft::new("Baikal").normalized_description(), NO_INFORMATION);
        assert_eq!(
            LakeDraft::new("Baikal")
                .with_description(" \n\t")
                .normalized_description(),
            NO_INFORMATION
        );
    }

    #[test]
    fn test_description_kept_verbatim() {
        let draft = LakeDraft::new("Baikal").with_description("  Deepest lake\n");

        assert_eq!(draft.normalized_description(), "  Deepest lake\n");
    }

    #[test]
    fn test_picture_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("baikal.jpg");
        fs::write(&path, b"jpeg").unwrap();

        let placeholder = || Ok(b"placeholder".to_vec());

        let keep = LakeDraft::new("Baikal");
        assert_eq!(keep.picture_bytes(placeholder).unwrap(), None);

        let reset = LakeDraft::new("Baikal").with_picture(PictureChoice::Placeholder);
        assert_eq!(
            reset.picture_bytes(placeholder).unwrap(),
            Some(b"placeholder".to_vec())
        );

        let file = LakeDraft::new("Baikal").with_picture(PictureChoice::File(path));
        assert_eq!(file.picture_bytes(placeholder).unwrap(), Some(b"jpeg".to_vec()));
    }

    #[test]
    fn test_picture_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let draft = LakeDraft::new("Baikal")
            .with_picture(PictureChoice::File(dir.path().join("missing.png")));

        let err = draft.picture_bytes(|| Ok(Vec::new())).unwrap_err();

        assert!(matches!(err, Error::Io { .. }));
    }
}
