use std::collections::HashSet;
use std::net::IpAddr;

/// Addresses that failed post-publish verification. Entries are never
/// removed for the lifetime of a session.
#[derive(Debug, Clone, Default)]
pub struct Blocklist {
    addresses: HashSet<IpAddr>,
}

impl Blocklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the address was not blocked before.
    pub fn insert(&mut self, address: IpAddr) -> bool {
        self.addresses.insert(address)
    }

    pub fn contains(&self, address: &IpAddr) -> bool {
        self.addresses.contains(address)
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IpAddr> {
        self.addresses.iter()
    }
}

impl FromIterator<IpAddr> for Blocklist {
    fn from_iter<T: IntoIterator<Item = IpAddr>>(iter: T) -> Self {
        Self {
            addresses: iter.into_iter().collect(),
        }
    }
}
