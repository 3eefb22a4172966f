/*!
Key-material chain for the QSP session guard.

Each accepted transition folds its inputs into the SHA-256 of the previous
chain value. The result is a reproducible fingerprint of the session's
trajectory for audit and debugging. It is not a key derivation function
and nothing in this crate encrypts with it.
*/

use byteorder::{BigEndian, ByteOrder};
use sha2::{Digest, Sha256};

use crate::core::constants::{labels, KEY_MATERIAL_SIZE};

/// Key-material chain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyChain {
    material: Option<[u8; KEY_MATERIAL_SIZE]>,
}

fn be64(value: u64) -> [u8; 8] {
    let mut buf = [0u8; 8];
    BigEndian::write_u64(&mut buf, value);
    buf
}

impl KeyChain {
    /// Create an empty chain (no handshake yet)
    pub fn new() -> Self {
        Self::default()
    }

    /// Current chain value, empty before the handshake
    pub fn material(&self) -> &[u8] {
        match &self.material {
            Some(material) => material,
            None => &[],
        }
    }

    /// Hex fingerprint of the current chain value
    pub fn fingerprint(&self) -> String {
        hex::encode(self.material())
    }

    /// Seed the chain: `H("hs" || be64(sid) || be64(epoch) || mode)`
    pub fn seed(&mut self, session_id: u64, epoch: u64, mode: &str) {
        let mut hasher = Sha256::new();
        hasher.update(labels::HANDSHAKE);
        hasher.update(be64(session_id));
        hasher.update(be64(epoch));
        hasher.update(mode.as_bytes());
        self.material = Some(hasher.finalize().into());
    }

    /// Fold a rekey: `H(km || "rekey" || be64(epoch) || payload)`
    pub fn rekey(&mut self, epoch: u64, payload: &[u8]) {
        self.fold(labels::REKEY, epoch, payload);
    }

    /// Fold accepted application data: `H(km || "app" || be64(epoch) || payload)`
    pub fn app_data(&mut self, epoch: u64, payload: &[u8]) {
        self.fold(labels::APP_DATA, epoch, payload);
    }

    /// Fold a local epoch advance: `H(km || "advance" || be64(epoch))`
    pub fn advance(&mut self, epoch: u64) {
        self.fold(labels::ADVANCE, epoch, &[]);
    }

    fn fold(&mut self, label: &[u8], epoch: u64, payload: &[u8]) {
        let mut hasher = Sha256::new();
        hasher.update(self.material());
        hasher.update(label);
        hasher.update(be64(epoch));
        hasher.update(payload);
        self.material = Some(hasher.finalize().into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_chain() {
        let chain = KeyChain::new();
        assert!(chain.material().is_empty());
        assert_eq!(chain.fingerprint(), "");
    }

    #[test]
    fn test_seed_matches_manual_hash() {
        let mut chain = KeyChain::new();
        chain.seed(777, 1, "PQC_ONLY");

        let mut expected = Vec::new();
        expected.extend_from_slice(b"hs");
        expected.extend_from_slice(&777u64.to_be_bytes());
        expected.extend_from_slice(&1u64.to_be_bytes());
        expected.extend_from_slice(b"PQC_ONLY");
        let digest = Sha256::digest(&expected);

        assert_eq!(chain.material(), digest.as_slice());
        assert_eq!(chain.fingerprint().len(), KEY_MATERIAL_SIZE * 2);
    }

    #[test]
    fn test_rekey_chains_previous_value() {
        let mut chain = KeyChain::new();
        chain.seed(888, 1, "PQC_ONLY");
        let seeded = chain.material().to_vec();
        chain.rekey(2, b"ok");

        let mut expected = seeded.clone();
        expected.extend_from_slice(b"rekey");
        expected.extend_from_slice(&2u64.to_be_bytes());
        expected.extend_from_slice(b"ok");
        assert_eq!(chain.material(), Sha256::digest(&expected).as_slice());
    }

    #[test]
    fn test_distinct_trajectories() {
        let mut a = KeyChain::new();
        let mut b = KeyChain::new();
        a.seed(1, 1, "PQC+QKD");
        b.seed(1, 1, "PQC_ONLY");
        assert_ne!(a.fingerprint(), b.fingerprint());

        let mut c = KeyChain::new();
        let mut d = KeyChain::new();
        c.seed(1, 1, "PQC+QKD");
        d.seed(1, 1, "PQC+QKD");
        c.rekey(2, b"");
        d.advance(2);
        assert_ne!(c.fingerprint(), d.fingerprint());
    }
}
