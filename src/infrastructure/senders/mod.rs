pub mod http_gateway;
pub mod simulated;
