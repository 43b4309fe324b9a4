pub mod mock_transport;
pub mod responses;

pub use mock_transport::*;
pub use responses::*;
