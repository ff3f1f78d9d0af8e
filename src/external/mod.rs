pub mod market_api;
pub mod stub;
pub mod transport;

pub use market_api::{MarketApi, PricingApi};
pub use stub::{StubGate, StubResponse, StubTransport};
pub use transport::{HttpTransport, Transport};
