use serde::{Deserialize, Serialize};
use std::fmt;

/// Provider account credentials, sent as two static auth headers.
#[derive(Clone, Default, Deserialize, Serialize)]
pub struct AccountConfig {
    pub email: String,

    pub key: String,
}

impl fmt::Debug for AccountConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountConfig")
            .field("email", &self.email)
            .field("key", &"<redacted>")
            .finish()
    }
}
