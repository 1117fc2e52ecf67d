//! Integration tests for the share-token codec

use pauta_cli::token;

#[test]
fn test_round_trip_for_varied_outlet_names() {
    let names = [
        "Canal A",
        "Página/12",
        "ñoño & asociados S.A.",
        "90.1 FM \"La Redonda\"",
        "  espacios  internos  ",
        "",
        "名字とニュース",
    ];
    for name in names {
        let encoded = token::encode(name).expect("encode succeeds");
        assert_eq!(token::decode(&encoded).as_deref(), Some(name), "name {name:?}");
    }
}

#[test]
fn test_decode_never_panics_on_garbage() {
    let garbage = [
        "",
        "x",
        "====",
        "not a token at all",
        "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA",
        "!!!%%%",
    ];
    for input in garbage {
        assert_eq!(token::decode(input), None, "input {input:?}");
    }
}

#[test]
fn test_tokens_fit_in_a_query_string_unescaped() {
    let encoded = token::encode("Canal con espacios y acentós").unwrap();
    assert!(encoded
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    assert!(!encoded.contains('='));
}

#[test]
fn test_share_url_and_legacy_fallback() {
    let url = token::share_url("https://example.com/", "Canal A").unwrap();
    assert_eq!(token::outlet_from_url(&url).as_deref(), Some("Canal A"));

    // A legacy plain link still resolves when the token is absent or broken.
    assert_eq!(
        token::outlet_from_url("https://example.com/?medio=Canal%20B").as_deref(),
        Some("Canal B")
    );
    assert_eq!(
        token::outlet_from_url("https://example.com/?s=roto&medio=Canal%20B").as_deref(),
        Some("Canal B")
    );
    assert_eq!(token::outlet_from_url("https://example.com/"), None);
}
