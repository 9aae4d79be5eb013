mod mock_content_extractor;
mod paddle_vl_adapter;

pub use mock_content_extractor::{MockContentExtractor, MockReply};
pub use paddle_vl_adapter::{DEFAULT_MAX_TOKENS, DEFAULT_PROMPT, PaddleVlAdapter, parse_completion};
