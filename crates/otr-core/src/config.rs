//! Authentication context configuration

use otr_proto::PROTOCOL_VERSION_2;

/// Key id given to the first local ephemeral key.
pub const DEFAULT_LOCAL_DH_KEY_ID: u32 = 1;

/// Authentication context configuration
///
/// Survives [`crate::AuthContext::reset`]; only per-handshake material is
/// cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Protocol version written into outgoing messages
    pub protocol_version: u16,
    /// Key id of the local ephemeral DH key
    pub local_dh_key_id: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { protocol_version: PROTOCOL_VERSION_2, local_dh_key_id: DEFAULT_LOCAL_DH_KEY_ID }
    }
}
