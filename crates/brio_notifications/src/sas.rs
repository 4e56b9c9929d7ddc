//! Shared Access Signature tokens for the notification hub
//!
//! One canonical form is used for every request: the token audience is the hub
//! URL (`{endpoint}/{hub}`, without `/messages`), lower-cased, and every byte
//! outside `A-Z a-z 0-9 - _ . ~` is percent-encoded with uppercase hex.

use base64::{engine::general_purpose::STANDARD as base64_engine, Engine as _};
use brio_config::KeyEncoding;
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sha2::Sha256;
use std::fmt;

use crate::error::NotificationError;

type HmacSha256 = Hmac<Sha256>;

/// Token lifetime when none is configured
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 600;

/// Characters left as-is when encoding token components
const TOKEN_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encodes a token component. Spaces become `%20`, never `+`.
pub fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, TOKEN_COMPONENT).to_string()
}

/// The parts of a hub connection string needed to sign requests
#[derive(Clone, PartialEq, Eq)]
pub struct HubConnection {
    /// `https://<namespace>.servicebus.windows.net`, no trailing slash
    pub endpoint: String,
    pub hub: String,
    pub key_name: String,
    pub key: String,
}

impl fmt::Debug for HubConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HubConnection")
            .field("endpoint", &self.endpoint)
            .field("hub", &self.hub)
            .field("key_name", &self.key_name)
            .field("key", &"<redacted>")
            .finish()
    }
}

impl HubConnection {
    /// Parses `Endpoint=sb://..;SharedAccessKeyName=..;SharedAccessKey=..[;EntityPath=..]`.
    ///
    /// The hub comes from `EntityPath` when present, otherwise from `hub_name`.
    ///
    /// # Errors
    ///
    /// `NotificationError::ConfigError` when the endpoint, key name, key or hub
    /// is missing, or the endpoint scheme is not `sb`, `http` or `https`.
    pub fn parse(connection_string: &str, hub_name: Option<&str>) -> Result<Self, NotificationError> {
        let mut endpoint = None;
        let mut key_name = None;
        let mut key = None;
        let mut entity_path = None;

        for part in connection_string.split(';') {
            let Some((name, value)) = part.split_once('=') else {
                continue;
            };
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match name.trim() {
                "Endpoint" => endpoint = Some(value),
                "SharedAccessKeyName" => key_name = Some(value),
                "SharedAccessKey" => key = Some(value),
                "EntityPath" => entity_path = Some(value),
                _ => {}
            }
        }

        let endpoint = endpoint.ok_or_else(|| missing("Endpoint"))?;
        let endpoint = normalize_endpoint(endpoint)?;
        let key_name = key_name.ok_or_else(|| missing("SharedAccessKeyName"))?;
        let key = key.ok_or_else(|| missing("SharedAccessKey"))?;

        let hub = entity_path
            .or_else(|| hub_name.map(str::trim).filter(|h| !h.is_empty()))
            .ok_or_else(|| {
                NotificationError::ConfigError(
                    "Hub name is missing (no EntityPath and no hub_name configured)".to_string(),
                )
            })?;

        Ok(Self {
            endpoint,
            hub: hub.to_string(),
            key_name: key_name.to_string(),
            key: key.to_string(),
        })
    }

    /// `{endpoint}/{hub}`, the token audience
    pub fn hub_url(&self) -> String {
        format!("{}/{}", self.endpoint, self.hub)
    }

    pub fn messages_url(&self) -> String {
        format!("{}/messages", self.hub_url())
    }

    pub fn installation_url(&self, installation_id: &str) -> String {
        format!(
            "{}/installations/{}",
            self.hub_url(),
            encode_component(installation_id)
        )
    }
}

fn missing(part: &str) -> NotificationError {
    NotificationError::ConfigError(format!("Connection string has no {}", part))
}

fn normalize_endpoint(raw: &str) -> Result<String, NotificationError> {
    let endpoint = if let Some(rest) = raw.strip_prefix("sb://") {
        format!("https://{}", rest)
    } else if raw.starts_with("https://") || raw.starts_with("http://") {
        raw.to_string()
    } else {
        return Err(NotificationError::ConfigError(format!(
            "Unsupported endpoint scheme in {}",
            raw
        )));
    };
    Ok(endpoint.trim_end_matches('/').to_string())
}

/// Bytes used as the HMAC key
///
/// # Errors
///
/// `NotificationError::ConfigError` when a base64 key does not decode.
pub fn signing_key(key: &str, encoding: KeyEncoding) -> Result<Vec<u8>, NotificationError> {
    match encoding {
        KeyEncoding::Raw => Ok(key.as_bytes().to_vec()),
        KeyEncoding::Base64 => base64_engine.decode(key.trim()).map_err(|e| {
            NotificationError::ConfigError(format!("SharedAccessKey is not valid base64: {}", e))
        }),
    }
}

/// A signed `SharedAccessSignature` authorization value
///
/// All string fields are already percent-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationToken {
    pub resource: String,
    pub signature: String,
    pub expiry: i64,
    pub key_name: String,
}

impl NotificationToken {
    /// Signs a token for the connection's hub, valid `ttl_secs` from now.
    pub fn generate(
        connection: &HubConnection,
        ttl_secs: u64,
        encoding: KeyEncoding,
    ) -> Result<Self, NotificationError> {
        let ttl = i64::try_from(ttl_secs).unwrap_or(i64::MAX);
        let expiry = chrono::Utc::now().timestamp().saturating_add(ttl);
        let key = signing_key(&connection.key, encoding)?;
        Self::generate_at(&connection.hub_url(), &connection.key_name, &key, expiry)
    }

    /// Signs a token for `resource` expiring at `expiry` (seconds since the epoch).
    pub fn generate_at(
        resource: &str,
        key_name: &str,
        key: &[u8],
        expiry: i64,
    ) -> Result<Self, NotificationError> {
        let resource = encode_component(&resource.to_lowercase());
        let string_to_sign = format!("{}\n{}", resource, expiry);

        let mut mac = HmacSha256::new_from_slice(key)
            .map_err(|e| NotificationError::ConfigError(format!("Invalid signing key: {}", e)))?;
        mac.update(string_to_sign.as_bytes());
        let signature = base64_engine.encode(mac.finalize().into_bytes());

        Ok(Self {
            resource,
            signature: encode_component(&signature),
            expiry,
            key_name: encode_component(key_name),
        })
    }
}

impl fmt::Display for NotificationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SharedAccessSignature sr={}&sig={}&se={}&skn={}",
            self.resource, self.signature, self.expiry, self.key_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONNECTION: &str = "Endpoint=sb://brio-ns.servicebus.windows.net/;SharedAccessKeyName=DefaultFullSharedAccessSignature;SharedAccessKey=s3cr3t+Key/=";

    #[test]
    fn test_parse_connection_string() {
        let conn = HubConnection::parse(CONNECTION, Some("Envios")).unwrap();
        assert_eq!(conn.endpoint, "https://brio-ns.servicebus.windows.net");
        assert_eq!(conn.hub, "Envios");
        assert_eq!(conn.key_name, "DefaultFullSharedAccessSignature");
        assert_eq!(conn.key, "s3cr3t+Key/=");
        assert_eq!(
            conn.messages_url(),
            "https://brio-ns.servicebus.windows.net/Envios/messages"
        );
    }

    #[test]
    fn test_entity_path_wins_over_configured_hub() {
        let cs = format!("{};EntityPath=tracking-hub", CONNECTION);
        let conn = HubConnection::parse(&cs, Some("Envios")).unwrap();
        assert_eq!(conn.hub, "tracking-hub");
    }

    #[test]
    fn test_http_endpoint_is_kept() {
        let cs = "Endpoint=http://127.0.0.1:9000/;SharedAccessKeyName=n;SharedAccessKey=k";
        let conn = HubConnection::parse(cs, Some("h")).unwrap();
        assert_eq!(conn.endpoint, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            HubConnection::parse(CONNECTION, None),
            Err(NotificationError::ConfigError(_))
        ));
        assert!(matches!(
            HubConnection::parse(CONNECTION, Some("  ")),
            Err(NotificationError::ConfigError(_))
        ));
        assert!(HubConnection::parse("SharedAccessKeyName=n;SharedAccessKey=k", Some("h")).is_err());
        assert!(HubConnection::parse("Endpoint=sb://x/;SharedAccessKey=k", Some("h")).is_err());
        assert!(HubConnection::parse("Endpoint=sb://x/;SharedAccessKeyName=n", Some("h")).is_err());
        assert!(HubConnection::parse("Endpoint=ftp://x/;SharedAccessKeyName=n;SharedAccessKey=k", Some("h")).is_err());
        assert!(HubConnection::parse("", Some("h")).is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let conn = HubConnection::parse(CONNECTION, Some("Envios")).unwrap();
        let debug = format!("{:?}", conn);
        assert!(!debug.contains("s3cr3t"));
    }

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("a b/c+d~é"), "a%20b%2Fc%2Bd~%C3%A9");
        assert_eq!(encode_component("Key-Name_1.0"), "Key-Name_1.0");
    }

    #[test]
    fn test_pinned_token() {
        let token = NotificationToken::generate_at(
            "https://brio-ns.servicebus.windows.net/Envios",
            "DefaultFullSharedAccessSignature",
            b"s3cr3t+Key/=",
            1_700_000_600,
        )
        .unwrap();

        assert_eq!(
            token.to_string(),
            "SharedAccessSignature sr=https%3A%2F%2Fbrio-ns.servicebus.windows.net%2Fenvios\
             &sig=JtOoiq5LOyAvNoeWfPC3l%2FeXBq%2FxirV8MGelIuDcRvw%3D\
             &se=1700000600&skn=DefaultFullSharedAccessSignature"
        );
    }

    #[test]
    fn test_base64_key_encoding() {
        let key = signing_key("cmF3LXNlY3JldC1ieXRlcw==", KeyEncoding::Base64).unwrap();
        assert_eq!(key, b"raw-secret-bytes");

        let token = NotificationToken::generate_at(
            "https://brio-ns.servicebus.windows.net/envios",
            "DefaultFullSharedAccessSignature",
            &key,
            1_700_000_600,
        )
        .unwrap();
        assert_eq!(token.signature, "TpKigDVGahjkUvzCuqJyRyG3s971TDtRUiEppo%2FlA40%3D");

        assert!(signing_key("not base64!!", KeyEncoding::Base64).is_err());
        assert_eq!(signing_key("abc", KeyEncoding::Raw).unwrap(), b"abc");
    }

    #[test]
    fn test_generate_uses_ttl() {
        let conn = HubConnection::parse(CONNECTION, Some("Envios")).unwrap();
        let before = chrono::Utc::now().timestamp();
        let token = NotificationToken::generate(&conn, DEFAULT_TOKEN_TTL_SECS, KeyEncoding::Raw).unwrap();
        let after = chrono::Utc::now().timestamp();

        assert!(token.expiry >= before + 600 && token.expiry <= after + 600);
        assert_eq!(
            token.resource,
            "https%3A%2F%2Fbrio-ns.servicebus.windows.net%2Fenvios"
        );
    }
}
