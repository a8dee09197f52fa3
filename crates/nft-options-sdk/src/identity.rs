use tokio::sync::watch;

use crate::service::AddressResolver;

/// The connected wallet's address, as last resolved.
///
/// An empty string means "not resolved". Only the node writes to it.
#[derive(Debug)]
pub struct IdentityBinding {
    tx: watch::Sender<String>,
}

impl Default for IdentityBinding {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityBinding {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(String::new());
        Self { tx }
    }

    pub fn current(&self) -> String {
        self.tx.borrow().clone()
    }

    pub fn is_resolved(&self) -> bool {
        !self.tx.borrow().is_empty()
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.tx.subscribe()
    }

    /// Look up the address and bind it. A failed lookup binds "".
    pub(crate) async fn resolve<R: AddressResolver + ?Sized>(&self, resolver: &R) {
        let address = match resolver.resolve_address().await {
            Ok(address) => address,
            Err(e) => {
                log::debug!("address resolution failed: {e}");
                String::new()
            }
        };
        self.tx.send_if_modified(|current| {
            if *current == address {
                return false;
            }
            *current = address;
            true
        });
    }
}

/// Compact form of an address for narrow displays: `0xAb...1234`.
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 9 {
        return address.to_string();
    }
    let head: String = chars[..5].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
