// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session identity for web requests.
//!
//! In `token` mode a client is known by an opaque token the server issues on
//! first contact; the client sends it back in the body or the
//! [`SESSION_HEADER`] header. In `remote_addr` mode the caller's IP address
//! is the session.

use std::net::SocketAddr;

use axum::http::HeaderMap;
use banter_config::model::SessionMode;
use banter_core::SessionId;

/// Header carrying the session token in both directions.
pub const SESSION_HEADER: &str = "x-session-id";

/// How the session for a request was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// The client presented a token (or was identified by address).
    Existing(SessionId),
    /// A fresh token was issued for this request.
    Issued(SessionId),
}

impl Resolved {
    pub fn session(&self) -> &SessionId {
        match self {
            Resolved::Existing(id) | Resolved::Issued(id) => id,
        }
    }
}

/// Resolves the session for a request.
///
/// Returns `None` only in `remote_addr` mode when the peer address is unknown.
pub fn resolve(
    mode: SessionMode,
    body_session: Option<&str>,
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
) -> Option<Resolved> {
    match mode {
        SessionMode::Token => {
            let presented = body_session
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .or_else(|| header_token(headers));
            Some(match presented {
                Some(token) => Resolved::Existing(SessionId::from(token)),
                None => Resolved::Issued(SessionId::from(uuid::Uuid::new_v4().to_string())),
            })
        }
        SessionMode::RemoteAddr => {
            peer.map(|addr| Resolved::Existing(SessionId::from(addr.ip().to_string())))
        }
    }
}

fn header_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(SESSION_HEADER, HeaderValue::from_str(token).unwrap());
        headers
    }

    #[test]
    fn token_mode_issues_uuid_on_first_contact() {
        let resolved = resolve(SessionMode::Token, None, &HeaderMap::new(), None).unwrap();
        let Resolved::Issued(id) = resolved else {
            panic!("expected a fresh token");
        };
        assert!(uuid::Uuid::parse_str(id.as_str()).is_ok());
    }

    #[test]
    fn body_token_wins_over_header() {
        let resolved =
            resolve(SessionMode::Token, Some("from-body"), &headers_with("from-header"), None);
        assert_eq!(
            resolved,
            Some(Resolved::Existing(SessionId::from("from-body")))
        );
    }

    #[test]
    fn header_token_used_when_body_is_blank() {
        let resolved = resolve(SessionMode::Token, Some("  "), &headers_with("abc"), None);
        assert_eq!(resolved.unwrap().session().as_str(), "abc");
    }

    #[test]
    fn remote_addr_mode_uses_ip_without_port() {
        let peer: SocketAddr = "10.0.0.7:53211".parse().unwrap();
        let resolved = resolve(
            SessionMode::RemoteAddr,
            Some("ignored"),
            &headers_with("ignored"),
            Some(peer),
        );
        assert_eq!(resolved, Some(Resolved::Existing(SessionId::from("10.0.0.7"))));
        assert_eq!(
            resolve(SessionMode::RemoteAddr, None, &HeaderMap::new(), None),
            None
        );
    }
}
