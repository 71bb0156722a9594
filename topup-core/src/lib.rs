//! topup-core: domain logic for the ARIO wallet top-up tool.
//! - Amount spec parsing and calculation (absolute or percentage of balance).
//! - Raw-unit / decimal balance conversions at the fixed 6-decimal ARIO scale.
//! - The four-stage top-up pipeline behind injectable collaborator traits.

pub mod amount;
pub mod balance;
pub mod error;
pub mod service;
pub mod wallet;

pub use amount::{calculate, AmountKind, AmountSpec, CalculatedAmount};
pub use balance::{Balance, TokenAmount, TOKEN_DECIMALS};
pub use error::{TopupError, TopupResult};
pub use service::{BalanceSource, TopupGateway, TopupReceipt, TopupReport, TopupService};
pub use wallet::{load_wallet, wallet_label, LoadedWallet, Wallet};
