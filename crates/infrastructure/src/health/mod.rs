mod http;

pub use http::HttpHealthChecker;
