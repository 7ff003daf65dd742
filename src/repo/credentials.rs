use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;

use crate::domain::merchant::MerchantCredentials;

pub const PUBLIC_KEY_LEN: usize = 24;
pub const SECRET_KEY_LEN: usize = 32;

/// URL-safe random token drawn from the operating system RNG.
pub fn random_token(len: usize) -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

pub fn merchant_credentials() -> MerchantCredentials {
    MerchantCredentials {
        public_key: format!("pk_live_{}", random_token(PUBLIC_KEY_LEN)),
        secret_key: format!("sk_live_{}", random_token(SECRET_KEY_LEN)),
        sandbox_public_key: format!("pk_test_{}", random_token(PUBLIC_KEY_LEN)),
        sandbox_secret_key: format!("sk_test_{}", random_token(SECRET_KEY_LEN)),
    }
}

pub fn webhook_secret() -> String {
    format!("whsec_{}", random_token(SECRET_KEY_LEN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn tokens_are_url_safe_and_sized() {
        let t = random_token(40);
        assert_eq!(t.len(), 40);
        assert!(t.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn credential_pairs_are_distinct() {
        let c = merchant_credentials();
        let all: HashSet<&str> = [
            c.public_key.as_str(),
            c.secret_key.as_str(),
            c.sandbox_public_key.as_str(),
            c.sandbox_secret_key.as_str(),
        ]
        .into_iter()
        .collect();
        assert_eq!(all.len(), 4);
        assert!(c.public_key.starts_with("pk_live_"));
        assert!(c.sandbox_secret_key.starts_with("sk_test_"));
        assert!(c.public_key.len() >= 21 + "pk_live_".len());
    }

    #[test]
    fn webhook_secret_has_prefix() {
        let s = webhook_secret();
        assert!(s.starts_with("whsec_"));
        assert_eq!(s.len(), "whsec_".len() + SECRET_KEY_LEN);
    }
}
