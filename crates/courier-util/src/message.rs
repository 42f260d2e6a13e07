pub const SHOPIFY_TAG: &str = "[Shopify]";

/// Tag a message relayed from the Shopify integration.
pub fn shopify_message(msg: &str) -> String {
    format!("{SHOPIFY_TAG} {msg}")
}
