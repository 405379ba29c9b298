//! Expected configuration per auth mode and mismatch detection.

use crate::registry::{AuthType, BearerTokenState};

/// Heading and bullet list describing the correct setup for an auth mode.
pub fn expected_shape(auth: AuthType) -> (&'static str, &'static [&'static str]) {
    match auth {
        AuthType::ApiKey => (
            "For API key auth, connection should have:",
            &[
                "bearer_token: EMPTY string",
                "Secret scope with key 'api_key'",
                "API key passed in params at runtime",
            ],
        ),
        AuthType::BearerToken => (
            "For bearer token auth, connection should have:",
            &[
                "bearer_token: secret reference",
                "Secret scope with key 'bearer_token'",
                "Token automatically included in Authorization header",
            ],
        ),
        AuthType::None => (
            "For public APIs, connection should have:",
            &["bearer_token: EMPTY string", "No secret scope needed"],
        ),
    }
}

/// Mismatches between the registered auth mode and the connection's actual
/// bearer token. A missing option counts as non-empty.
pub fn collect_issues(auth: AuthType, bearer: &BearerTokenState) -> Vec<String> {
    let mut issues = Vec::new();
    match auth {
        AuthType::ApiKey if !bearer.is_empty() => {
            issues.push("Connection has non-empty bearer_token for api_key auth".to_string());
        }
        AuthType::BearerToken if !bearer.is_secret_ref() => {
            issues.push("Connection doesn't reference secret for bearer_token auth".to_string());
        }
        AuthType::None if !bearer.is_empty() => {
            issues.push(
                "Connection has non-empty bearer_token for public API (should be empty string)"
                    .to_string(),
            );
        }
        _ => {}
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        api_key_empty = { AuthType::ApiKey, BearerTokenState::Empty, 0 },
        api_key_secret = { AuthType::ApiKey, BearerTokenState::SecretRef, 1 },
        api_key_missing = { AuthType::ApiKey, BearerTokenState::Missing, 1 },
        bearer_secret = { AuthType::BearerToken, BearerTokenState::SecretRef, 0 },
        bearer_empty = { AuthType::BearerToken, BearerTokenState::Empty, 1 },
        bearer_missing = { AuthType::BearerToken, BearerTokenState::Missing, 1 },
        public_empty = { AuthType::None, BearerTokenState::Empty, 0 },
        public_missing = { AuthType::None, BearerTokenState::Missing, 1 },
    )]
    fn issue_count_per_combination(auth: AuthType, bearer: BearerTokenState, expected: usize) {
        assert_eq!(collect_issues(auth, &bearer).len(), expected);
    }

    #[test]
    fn literal_token_flags_every_auth_mode_but_bearer_ref() {
        let bearer = BearerTokenState::Other("hunter2".to_string());
        assert!(collect_issues(AuthType::ApiKey, &bearer)[0].contains("non-empty bearer_token"));
        assert!(collect_issues(AuthType::BearerToken, &bearer)[0]
            .contains("doesn't reference secret"));
        assert!(collect_issues(AuthType::None, &bearer)[0].contains("public API"));
    }

    #[test]
    fn every_auth_mode_has_a_shape_description() {
        for auth in [AuthType::None, AuthType::ApiKey, AuthType::BearerToken] {
            let (heading, bullets) = expected_shape(auth);
            assert!(heading.contains("connection should have:"));
            assert!(!bullets.is_empty());
        }
    }
}
