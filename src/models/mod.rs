mod form;
mod generation;

pub use form::{Focus, LinkStatus};
pub use generation::{BlogPost, ErrorBody, GenerateRequest, GenerationResult, SocialPost};
