use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;
use super::errors::TokenError;

/// JWT token handler for encoding and decoding tokens.
///
/// Generic over the claims type. Only the HMAC family (HS256, HS384, HS512)
/// is accepted, since the handler signs with a shared secret.
///
/// `decode` checks the signature and the claim shape only. Expiry is left to
/// the caller so it can be evaluated against an injected clock.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key, signing with HS256.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Create a JWT handler for an explicit HMAC algorithm.
    ///
    /// # Errors
    /// * `UnsupportedAlgorithm` - Algorithm is not HS256, HS384 or HS512
    pub fn with_algorithm(secret: &[u8], algorithm: Algorithm) -> Result<Self, JwtError> {
        match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(Self {
                algorithm,
                ..Self::new(secret)
            }),
            other => Err(JwtError::UnsupportedAlgorithm(format!("{:?}", other))),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Encode claims into a JWT token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode a JWT token and verify its signature.
    ///
    /// # Errors
    /// * `BadSignature` - Signature does not verify, or the header names another algorithm
    /// * `Expired` - Only if the claims type is validated for `exp` by jsonwebtoken
    /// * `Malformed` - Anything else: bad segments, base64, JSON or missing claims
    pub fn decode<T: for<'de> Deserialize<'de>>(&self, token: &str) -> Result<T, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        decode::<T>(token, &self.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::BadSignature
                }
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestClaims {
        sub: String,
        role: String,
    }

    fn test_claims() -> TestClaims {
        TestClaims {
            sub: "alice@example.com".to_string(),
            role: "member".to_string(),
        }
    }

    #[test]
    fn test_encode_and_decode() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!");

        let token = handler
            .encode(&test_claims())
            .expect("Failed to encode token");
        assert_eq!(token.split('.').count(), 3);

        let decoded: TestClaims = handler.decode(&token).expect("Failed to decode token");
        assert_eq!(decoded, test_claims());
    }

    #[test]
    fn test_decode_invalid_token() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!");

        let result = handler.decode::<TestClaims>("invalid.token.here");
        assert_eq!(result, Err(TokenError::Malformed));

        let result = handler.decode::<TestClaims>("");
        assert_eq!(result, Err(TokenError::Malformed));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let handler1 = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!");
        let handler2 = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!");

        let token = handler1
            .encode(&test_claims())
            .expect("Failed to encode token");

        let result = handler2.decode::<TestClaims>(&token);
        assert_eq!(result, Err(TokenError::BadSignature));
    }

    #[test]
    fn test_decode_with_other_algorithm() {
        let secret = b"shared_secret_at_least_32_bytes_long!";
        let hs512 = JwtHandler::with_algorithm(secret, Algorithm::HS512).unwrap();
        let hs256 = JwtHandler::new(secret);
        assert_eq!(hs512.algorithm(), Algorithm::HS512);
        assert_eq!(hs256.algorithm(), Algorithm::HS256);

        let token = hs512.encode(&test_claims()).unwrap();

        let result = hs256.decode::<TestClaims>(&token);
        assert_eq!(result, Err(TokenError::BadSignature));
    }

    #[test]
    fn test_decode_missing_claim() {
        #[derive(Serialize)]
        struct Partial {
            sub: String,
        }

        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!");
        let token = handler
            .encode(&Partial {
                sub: "alice@example.com".to_string(),
            })
            .unwrap();

        let result = handler.decode::<TestClaims>(&token);
        assert_eq!(result, Err(TokenError::Malformed));
    }

    #[test]
    fn test_with_algorithm_rejects_asymmetric() {
        let result = JwtHandler::with_algorithm(b"secret", Algorithm::RS256);
        assert!(matches!(result, Err(JwtError::UnsupportedAlgorithm(_))));
    }
}
