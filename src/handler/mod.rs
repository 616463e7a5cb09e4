// Request handler module
// Routes requests and serves the image listing

pub mod images;
pub mod router;

pub use router::handle_request;
