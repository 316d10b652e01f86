use wjson_core::{decode, decode_wide, decode_with_encoding, encode, encode_string, encode_wide,
    encode_with_encoding};

/// Assert that decode → encode reproduces `canonical`, and that decoding the
/// output again yields the same value.
fn assert_roundtrip(json: &str, canonical: &str) {
    let value = decode(json).expect("decode failed");
    let encoded = encode_string(&value);
    assert_eq!(
        encoded, canonical,
        "Roundtrip failed:\n  input:  {json}\n  output: {encoded}"
    );
    let again = decode(&encoded).expect("re-decode failed");
    assert_eq!(again, value, "value changed after re-decoding {encoded}");
}

/// Canonical input must come back byte for byte.
fn assert_canonical(json: &str) {
    assert_roundtrip(json, json);
}

// ============================================================================
// Primitive Roundtrips
// ============================================================================

#[test]
fn roundtrip_literals() {
    assert_canonical("null");
    assert_canonical("true");
    assert_canonical("false");
}

#[test]
fn roundtrip_integers() {
    assert_canonical("0");
    assert_canonical("42");
    assert_canonical("-7");
    assert_canonical("2147483647");
}

#[test]
fn roundtrip_negative_zero_integer() {
    assert_roundtrip("-0", "0");
}

#[test]
fn roundtrip_floats() {
    assert_canonical("3.14");
    assert_canonical("-0.5");
    assert_canonical("0.016");
    assert_roundtrip("1e2", "100.0");
    assert_roundtrip("1.50", "1.5");
    assert_roundtrip("1E-2", "0.01");
}

#[test]
fn roundtrip_strings() {
    assert_canonical(r#""hello""#);
    assert_canonical(r#""""#);
    assert_canonical(r#""tab\there \"q\" back\\slash""#);
    assert_roundtrip(r#""\/""#, r#""/""#);
    assert_roundtrip(r#""\u20ac""#, "\"€\"");
    assert_canonical(r#""\ud800""#);
}

// ============================================================================
// Container Roundtrips
// ============================================================================

#[test]
fn roundtrip_containers() {
    assert_canonical("[]");
    assert_canonical("{}");
    assert_canonical(r#"[1,1.2,"x",[],{}]"#);
    assert_canonical(r#"{"a":{"b":[null,true]},"c":-1}"#);
}

#[test]
fn roundtrip_whitespace_is_dropped() {
    assert_roundtrip("[ 1 , 2 ]", "[1,2]");
    assert_roundtrip("{ \"k\" : [ ] }", r#"{"k":[]}"#);
}

#[test]
fn roundtrip_object_keys_sorted() {
    assert_roundtrip(r#"{"b":1,"a":2}"#, r#"{"a":2,"b":1}"#);
}

#[test]
fn roundtrip_duplicate_keys_collapse() {
    assert_roundtrip(r#"{"k":1,"k":[2]}"#, r#"{"k":[2]}"#);
}

// ============================================================================
// Byte-level Roundtrips
// ============================================================================

#[test]
fn roundtrip_utf8_bytes() {
    let src = "{\"price\":\"12€\",\"smile\":\"😀\"}".as_bytes();
    let value = decode(src).unwrap();
    assert_eq!(encode(&value).unwrap(), src);
}

#[test]
fn roundtrip_latin1_bytes() {
    let src: &[u8] = b"[\"gar\xe7on\",\"\xa9\"]";
    let value = decode_with_encoding(src, "latin1").unwrap();
    assert_eq!(encode_with_encoding(&value, "latin1").unwrap(), src);
}

#[test]
fn transcode_latin1_to_utf8() {
    let value = decode_with_encoding(b"\"gar\xe7on\"", "latin1").unwrap();
    assert_eq!(encode(&value).unwrap(), "\"garçon\"".as_bytes());
}

#[test]
fn roundtrip_wide_text() {
    let value = decode(r#"{"list":[1,2.5,"€"]}"#).unwrap();
    let wide = encode_wide(&value);
    assert_eq!(decode_wide(&wide).unwrap(), value);
}
