//! Display helpers for addresses.

/// Shorten an address to `first8...last6` for compact display.
///
/// Addresses too short to shorten are returned unchanged.
pub fn truncate_address(address: &str) -> String {
    const HEAD: usize = 8;
    const TAIL: usize = 6;

    if address.len() <= HEAD + TAIL + 3 || !address.is_ascii() {
        return address.to_string();
    }
    format!(
        "{}...{}",
        &address[..HEAD],
        &address[address.len() - TAIL..]
    )
}
