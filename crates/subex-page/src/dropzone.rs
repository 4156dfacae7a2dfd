use std::path::{Path, PathBuf};

/// Video container formats the extraction server accepts.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "mov", "wmv", "flv", "webm", "m4v"];

/// Highlight state of an upload drop zone.
///
/// Drag events fire for every child element the pointer crosses, so the zone
/// counts enters and leaves and stays highlighted while the count is positive.
#[derive(Debug, Default)]
pub struct DropZone {
    depth: u32,
}

/// Files from a drop, split by whether they look like videos.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DropOutcome {
    pub accepted: Vec<PathBuf>,
    pub rejected: Vec<PathBuf>,
}

impl DropZone {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drag_enter(&mut self) {
        self.depth = self.depth.saturating_add(1);
    }

    pub fn drag_leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn is_highlighted(&self) -> bool {
        self.depth > 0
    }

    /// Clear the highlight and sort the dropped files.
    pub fn drop_files<I>(&mut self, files: I) -> DropOutcome
    where
        I: IntoIterator<Item = PathBuf>,
    {
        self.depth = 0;
        let mut outcome = DropOutcome::default();
        for file in files {
            if is_video(&file) {
                outcome.accepted.push(file);
            } else {
                outcome.rejected.push(file);
            }
        }
        tracing::debug!(
            accepted = outcome.accepted.len(),
            rejected = outcome.rejected.len(),
            "files dropped"
        );
        outcome
    }
}

fn is_video(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| VIDEO_EXTENSIONS.iter().any(|v| v.eq_ignore_ascii_case(e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_enter_leave_keeps_highlight() {
        let mut zone = DropZone::new();
        zone.drag_enter();
        zone.drag_enter();
        zone.drag_leave();
        assert!(zone.is_highlighted());
        zone.drag_leave();
        assert!(!zone.is_highlighted());
    }

    #[test]
    fn extra_leave_does_not_underflow() {
        let mut zone = DropZone::new();
        zone.drag_leave();
        assert!(!zone.is_highlighted());
        zone.drag_enter();
        assert!(zone.is_highlighted());
    }

    #[test]
    fn drop_resets_highlight_and_sorts_files() {
        let mut zone = DropZone::new();
        zone.drag_enter();
        zone.drag_enter();

        let outcome = zone.drop_files([
            PathBuf::from("ep01.MKV"),
            PathBuf::from("notes.txt"),
            PathBuf::from("clip.webm"),
            PathBuf::from("README"),
        ]);

        assert!(!zone.is_highlighted());
        assert_eq!(
            outcome.accepted,
            vec![PathBuf::from("ep01.MKV"), PathBuf::from("clip.webm")]
        );
        assert_eq!(
            outcome.rejected,
            vec![PathBuf::from("notes.txt"), PathBuf::from("README")]
        );
    }
}
