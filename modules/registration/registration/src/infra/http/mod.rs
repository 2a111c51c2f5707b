pub mod error;
pub mod tls;
pub mod transport;

pub use error::HttpError;
pub use transport::{HttpTransport, TransportConfig, TransportResponse, TransportSecurity};
