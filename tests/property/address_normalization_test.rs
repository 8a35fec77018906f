//! Property-based tests for address bar normalization.

use gbrowser::services::address::normalize_address;
use proptest::prelude::*;

fn arb_host() -> impl Strategy<Value = String> {
    ("[a-z][a-z0-9]{0,10}", "[a-z]{2,6}").prop_map(|(name, tld)| format!("{}.{}", name, tld))
}

fn arb_path() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z0-9]{1,8}", 0..4).prop_map(|parts| {
        parts.iter().map(|p| format!("/{}", p)).collect::<String>()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Whatever is accepted is an http(s) URL.
    #[test]
    fn accepted_input_is_http_or_https(input in ".{0,40}") {
        if let Some(url) = normalize_address(&input) {
            prop_assert!(url.scheme() == "http" || url.scheme() == "https");
        }
    }

    /// Whitespace-only input is always dropped.
    #[test]
    fn blank_input_is_dropped(input in "[ \t\n]{0,10}") {
        prop_assert!(normalize_address(&input).is_none());
    }

    /// A bare host and path gets https:// and keeps its host and path.
    #[test]
    fn schemeless_input_gets_https(host in arb_host(), path in arb_path()) {
        let url = normalize_address(&format!("{}{}", host, path)).unwrap();
        prop_assert_eq!(url.scheme(), "https");
        prop_assert_eq!(url.host_str(), Some(host.as_str()));
        let expected_path = if path.is_empty() { "/".to_string() } else { path.clone() };
        prop_assert_eq!(url.path(), expected_path.as_str());
    }

    /// An explicit http:// is kept as typed.
    #[test]
    fn explicit_http_scheme_is_kept(host in arb_host(), path in arb_path()) {
        let url = normalize_address(&format!("http://{}{}", host, path)).unwrap();
        prop_assert_eq!(url.scheme(), "http");
    }

    /// Surrounding whitespace never changes the result.
    #[test]
    fn surrounding_whitespace_is_ignored(host in arb_host(), pad_l in "[ \t]{0,4}", pad_r in "[ \t]{0,4}") {
        let padded = format!("{}{}{}", pad_l, host, pad_r);
        prop_assert_eq!(normalize_address(&padded), normalize_address(&host));
    }

    /// Normalizing an already normalized URL is a no-op.
    #[test]
    fn normalization_is_idempotent(host in arb_host(), path in arb_path()) {
        let once = normalize_address(&format!("{}{}", host, path)).unwrap();
        let twice = normalize_address(once.as_str()).unwrap();
        prop_assert_eq!(once, twice);
    }
}
