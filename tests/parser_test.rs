use mailcode::parse_email_body;

#[test]
fn test_empty_input() {
    let parsed = parse_email_body("");
    assert!(parsed.is_empty());
    assert!(!parsed.truncated);
}

#[test]
fn test_no_blank_line_treats_whole_input_as_body() {
    let raw = "just a line of text without any header separator";
    let parsed = parse_email_body(raw);
    assert_eq!(parsed.text, raw);
    assert!(!parsed.truncated);
}

#[test]
fn test_base64_round_trip() {
    let raw = "From: a@example.com\r\n\
               Content-Type: text/plain; charset=utf-8\r\n\
               Content-Transfer-Encoding: base64\r\n\
               \r\n\
               SGVsbG8sIOS4lueVjCE=";
    let parsed = parse_email_body(raw);
    assert_eq!(parsed.text, "Hello, 世界!");
}

#[test]
fn test_quoted_printable_utf8() {
    let raw = "Content-Type: text/plain; charset=utf-8\r\n\
               Content-Transfer-Encoding: quoted-printable\r\n\
               \r\n\
               caf=C3=A9";
    let parsed = parse_email_body(raw);
    assert_eq!(parsed.text, "café");
}

#[test]
fn test_declared_charset_reinterpretation() {
    // "你好" in GB2312, base64-encoded
    let raw = "Content-Type: text/plain; charset=gb2312\r\n\
               Content-Transfer-Encoding: base64\r\n\
               \r\n\
               xOO6ww==";
    let parsed = parse_email_body(raw);
    assert_eq!(parsed.text, "你好");
}

#[test]
fn test_multipart_alternative_takes_first_of_each_kind() {
    let raw = "From: a@example.com\r\n\
               Content-Type: multipart/alternative; boundary=\"SEP\"\r\n\
               \r\n\
               preamble that must be discarded\r\n\
               --SEP\r\n\
               Content-Type: text/plain\r\n\
               \r\n\
               plain wins\r\n\
               --SEP\r\n\
               Content-Type: text/html\r\n\
               \r\n\
               <p>html wins</p>\r\n\
               --SEP\r\n\
               Content-Type: text/plain\r\n\
               \r\n\
               later part must lose\r\n\
               --SEP--\r\n";
    let parsed = parse_email_body(raw);
    assert_eq!(parsed.text, "plain wins");
    assert_eq!(parsed.html, "<p>html wins</p>");
    assert!(!parsed.text.contains("preamble"));
}

#[test]
fn test_multipart_missing_closing_delimiter() {
    let raw = "Content-Type: multipart/mixed; boundary=zz\r\n\
               \r\n\
               --zz\r\n\
               Content-Type: text/plain\r\n\
               \r\n\
               tail part without a closing delimiter";
    let parsed = parse_email_body(raw);
    assert_eq!(parsed.text, "tail part without a closing delimiter");
}

#[test]
fn test_folded_content_type_header() {
    let raw = "Content-Type: multipart/alternative;\r\n\
               \tboundary=\"XYZ\"\r\n\
               \r\n\
               --XYZ\r\n\
               Content-Type: text/plain\r\n\
               \r\n\
               folded ok\r\n\
               --XYZ--\r\n";
    let parsed = parse_email_body(raw);
    assert_eq!(parsed.text, "folded ok");
}

#[test]
fn test_message_rfc822_part_recovers_nested_html() {
    let raw = "Content-Type: multipart/mixed; boundary=outer\r\n\
               \r\n\
               --outer\r\n\
               Content-Type: message/rfc822\r\n\
               \r\n\
               From: inner@example.com\r\n\
               Content-Type: text/html\r\n\
               \r\n\
               <html><body>Nested!</body></html>\r\n\
               --outer--\r\n";
    let parsed = parse_email_body(raw);
    assert!(parsed.html.contains("Nested!"));
}

#[test]
fn test_rfc822_headers_part_is_skipped() {
    let raw = "Content-Type: multipart/mixed; boundary=fw\r\n\
               \r\n\
               --fw\r\n\
               Content-Type: text/rfc822-headers\r\n\
               \r\n\
               From: original@example.com\r\n\
               Subject: 99999 should not surface\r\n\
               --fw\r\n\
               Content-Type: text/plain\r\n\
               \r\n\
               forwarded body\r\n\
               --fw--\r\n";
    let parsed = parse_email_body(raw);
    assert_eq!(parsed.text, "forwarded body");
}

#[test]
fn test_untyped_body_sniffs_html_document() {
    let raw = "From: a@example.com\r\n\
               Subject: x\r\n\
               \r\n\
               <html><body>Doc</body></html>";
    let parsed = parse_email_body(raw);
    assert_eq!(parsed.html, "<html><body>Doc</body></html>");
    assert_eq!(parsed.text, "");
}

#[test]
fn test_html_sniff_inside_base64_untyped_body() {
    // some services wrap a whole HTML document in an untyped base64 body
    let raw = "Content-Transfer-Encoding: base64\r\n\
               \r\n\
               PGh0bWw+PGJvZHk+PHA+SW5uZXIgc2VjcmV0IDc0MDE8L3A+PC9ib2R5PjwvaHRtbD4=";
    let parsed = parse_email_body(raw);
    assert!(parsed.html.contains("Inner secret 7401"));
    assert_eq!(parsed.text, "");
}

#[test]
fn test_text_only_message_synthesizes_html() {
    let raw = "Content-Type: text/plain\r\n\
               \r\n\
               a < b\r\n\
               second line";
    let parsed = parse_email_body(raw);
    assert_eq!(parsed.text, "a < b\r\nsecond line");
    assert_eq!(
        parsed.html,
        "<div style=\"white-space:pre-wrap\">a &lt; b\r\nsecond line</div>"
    );
}

#[test]
fn test_synthesized_html_reparses_unchanged() {
    let first = parse_email_body("Content-Type: text/plain\r\n\r\nplain & simple");
    assert!(!first.html.is_empty());

    let html = &first.html;
    let reparsed = parse_email_body(&format!("Content-Type: text/html\r\n\r\n{html}"));
    assert_eq!(reparsed.html, first.html);
    assert_eq!(reparsed.text, "");
}

#[test]
fn test_multipart_without_boundary_falls_back() {
    let raw = "Content-Type: multipart/mixed\r\n\
               \r\n\
               <html><body>loose</body></html>";
    let parsed = parse_email_body(raw);
    assert_eq!(parsed.html, "<html><body>loose</body></html>");
}

fn nested_multipart(depth: usize) -> String {
    if depth == 0 {
        return "Content-Type: text/plain\r\n\r\ncore".to_string();
    }
    let inner = nested_multipart(depth - 1);
    format!(
        "Content-Type: multipart/mixed; boundary=b{depth}\r\n\r\n--b{depth}\r\n{inner}\r\n--b{depth}--\r\n"
    )
}

#[test]
fn test_nesting_within_depth_limit() {
    let parsed = parse_email_body(&nested_multipart(3));
    assert_eq!(parsed.text, "core");
    assert!(!parsed.truncated);
}

#[test]
fn test_pathological_nesting_degrades_to_truncated_text() {
    let parsed = parse_email_body(&nested_multipart(40));
    assert!(parsed.truncated);
    assert!(!parsed.text.is_empty());
}
