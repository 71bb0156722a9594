//! topup-ario: wire adapters for the ar.io ecosystem services.
//! - `AntClient` queries the ARIO token process for raw-unit balances.
//! - `TurboClient` submits signed top-up requests to the payment service.
//! Both implement the topup-core collaborator traits over reqwest.

pub mod ant;
pub mod signing;
pub mod turbo;

pub use ant::AntClient;
pub use turbo::TurboClient;

/// ARIO token process queried for balances.
pub const DEFAULT_PROCESS_ID: &str = "qNvAoz0TgcH7DMg8BCVn8jF32QH5L6T29VjHxhHqqGE";
/// Gateway compute endpoint serving process state.
pub const DEFAULT_GATEWAY_URL: &str = "https://cu.ardrive.io";
/// Turbo payment service accepting ARIO top-ups.
pub const DEFAULT_PAYMENT_URL: &str = "https://payment.ardrive.io";
