pub use http::HTTP;

mod http;
