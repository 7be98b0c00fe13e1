mod validator;

pub use validator::{extract_video_id, is_valid_video_link};
