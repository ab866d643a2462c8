pub mod cover;
pub mod http;
pub mod session_file;
pub mod wire;

pub use cover::FsCoverImageReader;
pub use http::HttpProjectApi;
pub use session_file::FileSessionStore;
