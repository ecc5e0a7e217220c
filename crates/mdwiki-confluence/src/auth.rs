//! `Authorization` header construction.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use mdwiki_config::Credentials;

/// `Authorization` header value for the given credentials.
pub(crate) fn authorization_header(credentials: &Credentials) -> String {
    match credentials {
        Credentials::Basic { username, password } => {
            let encoded = STANDARD.encode(format!("{username}:{password}"));
            format!("Basic {encoded}")
        }
        Credentials::Token(token) => format!("Bearer {token}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_header() {
        let header = authorization_header(&Credentials::Basic {
            username: "admin".to_owned(),
            password: "secret".to_owned(),
        });
        assert_eq!(header, "Basic YWRtaW46c2VjcmV0");
    }

    #[test]
    fn test_bearer_header() {
        let header = authorization_header(&Credentials::Token("pat-123".to_owned()));
        assert_eq!(header, "Bearer pat-123");
    }
}
