pub mod response;
pub mod stock;

pub use response::*;
pub use stock::*;
