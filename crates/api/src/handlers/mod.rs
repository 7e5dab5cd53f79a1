pub mod categories;
pub mod course_videos;
pub mod courses;
pub mod enrollments;
pub mod notes;
pub mod objects;
pub mod prerequisites;
pub mod sections;
pub mod users;
pub mod video_host;
