//! Endpoint address resolution.
//!
//! An endpoint may carry a transport annotation in its scheme, e.g.
//! `http+unix:///run/satori.sock:/v1/events`. A URL cannot hold a
//! filesystem path as its host, so for Unix sockets the path is moved into
//! the host position as unpadded URL-safe base64 and decoded again when
//! dialing.

use std::fmt;
use std::path::PathBuf;

use data_encoding::BASE64URL_NOPAD;
use reqwest::Url;

/// Socket family used to reach the endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transport {
    Tcp,
    Tcp4,
    Tcp6,
    Unix,
    /// Unrecognised annotation, kept so the dial error can name it.
    Other(String),
}

impl Transport {
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "tcp" => Transport::Tcp,
            "tcp4" => Transport::Tcp4,
            "tcp6" => Transport::Tcp6,
            "unix" => Transport::Unix,
            _ => Transport::Other(name.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Transport::Tcp => "tcp",
            Transport::Tcp4 => "tcp4",
            Transport::Tcp6 => "tcp6",
            Transport::Unix => "unix",
            Transport::Other(name) => name,
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolve an endpoint address into a transport family and a WebSocket
/// target. Never fails: anything that does not parse as a URL is returned
/// verbatim as a TCP target.
pub fn resolve(address: &str) -> (Transport, String) {
    let fallback = (Transport::Tcp, address.to_string());

    let Ok(url) = Url::parse(address) else {
        return fallback;
    };
    let Some((_, rest)) = address.split_once("://") else {
        return fallback;
    };

    let (scheme, annotation) = match url.scheme().split_once('+') {
        Some((scheme, annotation)) => (scheme, Some(annotation)),
        None => (url.scheme(), None),
    };
    let scheme = match scheme {
        "http" => "ws",
        "https" => "wss",
        other => other,
    };
    let transport = annotation.map_or(Transport::Tcp, Transport::from_name);

    let rest = match transport {
        Transport::Unix => {
            let (socket, path) = rest.split_once(':').unwrap_or((rest, ""));
            format!("{}{path}", encode_socket_path(socket))
        }
        _ => rest.to_string(),
    };

    (transport, format!("{scheme}://{rest}"))
}

/// Encode a filesystem path into a host-safe token.
pub fn encode_socket_path(path: &str) -> String {
    BASE64URL_NOPAD.encode(path.as_bytes())
}

/// Inverse of [`encode_socket_path`].
pub fn decode_socket_path(token: &str) -> Option<PathBuf> {
    let bytes = BASE64URL_NOPAD.decode(token.as_bytes()).ok()?;
    String::from_utf8(bytes).ok().map(PathBuf::from)
}

/// Host component of a resolved target (`ws://host:port/path` -> `host`).
pub fn target_host(target: &str) -> &str {
    let rest = target.split_once("://").map_or(target, |(_, rest)| rest);
    let authority = rest
        .split(|c| c == '/' || c == '?' || c == '#')
        .next()
        .unwrap_or(rest);
    match authority.rsplit_once(':') {
        Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) => host,
        _ => authority,
    }
}

/// Recover the socket path from a target produced for [`Transport::Unix`].
/// A host that is not a valid token is taken as a literal path.
pub fn socket_path_from_target(target: &str) -> PathBuf {
    let host = target_host(target);
    decode_socket_path(host).unwrap_or_else(|| PathBuf::from(host))
}
