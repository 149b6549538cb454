use pretty_assertions::assert_eq;
use tally_engine::decode_document;

#[test]
fn utf8_passes_through() {
    let decoded = decode_document("==+== Paper #1\nnaïve\n".as_bytes()).unwrap();
    assert_eq!(decoded.text, "==+== Paper #1\nnaïve\n");
    assert_eq!(decoded.encoding_label, "UTF-8");
}

#[test]
fn decode_strips_utf8_bom() {
    let bytes = b"\xEF\xBB\xBF==+== Paper #2\n";
    let decoded = decode_document(bytes).unwrap();
    assert_eq!(decoded.text, "==+== Paper #2\n");
    assert_eq!(decoded.encoding_label, "UTF-8");
}

#[test]
fn legacy_bytes_fall_back_to_detection() {
    let bytes = b"==+== Paper #3\nLe r\xe9sultat est tr\xe8s int\xe9ressant et la m\xe9thode propos\xe9e \xe9l\xe9gante.\nLa pr\xe9sentation des exp\xe9riences est d\xe9taill\xe9e.\n";
    let decoded = decode_document(bytes).unwrap();
    assert!(decoded.text.contains("résultat"), "{:?}", decoded.text);
    assert_ne!(decoded.encoding_label, "UTF-8");
}
