//! Authentication: password hashing and bearer token issuance/verification.

use anyhow::{anyhow, bail, Result};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use super::models::{UserAccount, UserRole};

/// Token lifetime: one hour.
const TOKEN_TTL_SECS: u64 = 60 * 60;

mod label_argon2 {
    use anyhow::{anyhow, Result};
    use argon2::{
        password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
        Argon2,
    };

    pub fn hash(plain: &[u8]) -> Result<String> {
        let argon2 = Argon2::default();
        let salt = SaltString::generate(&mut OsRng);
        let hash_string = argon2
            .hash_password(plain, &salt)
            .map_err(|err| anyhow!("{}", err))?
            .to_string();
        Ok(hash_string)
    }

    pub fn verify(plain_pw: &[u8], target_hash: &str) -> Result<bool> {
        let argon2 = Argon2::default();
        let password_hash = PasswordHash::new(target_hash).map_err(|err| anyhow!("{}", err))?;
        Ok(argon2.verify_password(plain_pw, &password_hash).is_ok())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum LabelHasher {
    Argon2,
}

impl FromStr for LabelHasher {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "argon2" => Ok(LabelHasher::Argon2),
            _ => bail!("Unknown hasher {}", s),
        }
    }
}

impl LabelHasher {
    pub fn hash<T: AsRef<str>>(&self, plain: T) -> Result<String> {
        match self {
            LabelHasher::Argon2 => label_argon2::hash(plain.as_ref().as_bytes()),
        }
    }

    pub fn verify<T: AsRef<str>>(&self, plain_pw: T, target_hash: T) -> Result<bool> {
        match self {
            LabelHasher::Argon2 => {
                label_argon2::verify(plain_pw.as_ref().as_bytes(), target_hash.as_ref())
            }
        }
    }
}

/// Bearer token claims. The role claim reflects the role at issuance time and
/// is informational for clients; the admin check re-reads the stored role.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: UserRole,
    pub exp: u64,
}

/// Issues and verifies HMAC-signed bearer tokens against a shared secret.
#[derive(Clone)]
pub struct TokenAuthority {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenAuthority {
    pub fn new(secret: &str) -> Self {
        TokenAuthority {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn issue(&self, account: &UserAccount) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|err| anyhow!("{}", err))?
            .as_secs();
        let claims = Claims {
            sub: account.id.clone(),
            email: account.email.clone(),
            role: account.role,
            exp: now + TOKEN_TTL_SECS,
        };
        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|err| anyhow!("{}", err))
    }

    pub fn verify(&self, token: &str) -> Result<Claims> {
        let data = jsonwebtoken::decode::<Claims>(
            token,
            &self.decoding_key,
            &Validation::default(),
        )
        .map_err(|err| anyhow!("{}", err))?;
        Ok(data.claims)
    }
}
