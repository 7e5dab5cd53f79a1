//! Object path conventions for course assets.

use std::path::MAIN_SEPARATOR;

/// Fixed path of a course's thumbnail blob. Re-uploading overwrites it.
pub fn course_thumbnail(course_id: i64) -> String {
    format!("courses/{course_id}/thumbnail")
}

/// Path of one lesson attachment, keyed by its original filename.
pub fn video_attachment(course_id: i64, video_id: i64, filename: &str) -> String {
    format!(
        "courses/{course_id}/videos/{video_id}/attachments/{}",
        sanitize_filename(filename)
    )
}

/// Strip directory components from an uploaded filename so it cannot escape
/// the attachment prefix.
fn sanitize_filename(filename: &str) -> String {
    filename
        .rsplit(['/', '\\', MAIN_SEPARATOR])
        .next()
        .unwrap_or(filename)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumbnail_path_is_fixed() {
        assert_eq!(course_thumbnail(42), "courses/42/thumbnail");
    }

    #[test]
    fn attachment_path_includes_filename() {
        assert_eq!(
            video_attachment(1, 2, "slides.pdf"),
            "courses/1/videos/2/attachments/slides.pdf"
        );
    }

    #[test]
    fn attachment_filename_cannot_traverse() {
        assert_eq!(
            video_attachment(1, 2, "../../etc/passwd"),
            "courses/1/videos/2/attachments/passwd"
        );
        assert_eq!(
            video_attachment(1, 2, "dir\\notes.txt"),
            "courses/1/videos/2/attachments/notes.txt"
        );
    }
}
