//! Notification message templates.

use rust_decimal::Decimal;
use topup_core::TopupReport;

/// Successful top-up announcement.
pub fn success(report: &TopupReport) -> String {
    format!(
        "✅ ARIO Top-up Successful\n\nWallet: {}\nAmount: {} ARIO\nStatus: {}\nTransaction ID: {}\nRemaining Balance: {:.6} ARIO",
        report.public_key,
        report.topup_amount,
        report.status,
        report.transaction_id,
        report.remaining_balance,
    )
}

/// Generic failure announcement. `requested` carries the raw amount spec when
/// one was given on the command line.
pub fn error(public_key: &str, message: &str, requested: Option<&str>) -> String {
    let mut text = format!(
        "❌ ARIO Top-up Error\n\nWallet: {}\nError: {}",
        public_key, message
    );
    if let Some(spec) = requested {
        text.push_str(&format!("\nRequested: {}", spec));
    }
    text
}

/// The requested amount exceeded the available balance.
pub fn insufficient_balance(public_key: &str, available: Decimal, requested: Decimal) -> String {
    format!(
        "❌ ARIO Top-up Failed\n\nWallet: {}\nReason: Insufficient balance\nAvailable: {} ARIO\nRequested: {} ARIO",
        public_key, available, requested
    )
}

/// The wallet held nothing to top up with.
pub fn no_balance(public_key: &str) -> String {
    format!(
        "❌ ARIO Top-up Failed\n\nWallet: {}\nReason: No balance available\nBalance: 0 ARIO",
        public_key
    )
}

/// The amount spec itself was rejected.
pub fn invalid_amount(public_key: &str, reason: &str, requested: &str) -> String {
    format!(
        "❌ ARIO Top-up Failed\n\nWallet: {}\nReason: {}\nRequested: {}",
        public_key, reason, requested
    )
}
