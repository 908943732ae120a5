pub mod extractor;
pub mod jwt;
pub mod locale;
pub mod test_utils;
pub mod time;
