//! Native file picker used by the Browse button

use std::path::PathBuf;

use super::constants::IMAGE_EXTENSIONS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseOutcome {
    Selected(String),
    Cancelled,
    Failed(String),
}

impl From<Option<PathBuf>> for BrowseOutcome {
    fn from(picked: Option<PathBuf>) -> Self {
        match picked {
            Some(path) => match path.into_os_string().into_string() {
                Ok(path) => BrowseOutcome::Selected(path),
                Err(raw) => BrowseOutcome::Failed(format!("selected path is not valid UTF-8: {raw:?}")),
            },
            None => BrowseOutcome::Cancelled,
        }
    }
}

/// Show the image picker; blocks until the dialog closes
pub fn browse_for_image() -> BrowseOutcome {
    rfd::FileDialog::new()
        .set_title("Select Image")
        .add_filter("Images", IMAGE_EXTENSIONS)
        .pick_file()
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_selection_is_cancelled() {
        assert_eq!(BrowseOutcome::from(None), BrowseOutcome::Cancelled);
    }

    #[test]
    fn test_selection_keeps_path() {
        let picked = Some(PathBuf::from("/home/user/arlo.png"));
        assert_eq!(
            BrowseOutcome::from(picked),
            BrowseOutcome::Selected("/home/user/arlo.png".to_string())
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_selection_fails() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let picked = Some(PathBuf::from(OsString::from_vec(vec![0x66, 0x6f, 0x80])));
        assert!(matches!(BrowseOutcome::from(picked), BrowseOutcome::Failed(_)));
    }
}
