use foreshadow_types::{SwapSpec, SwapStyle};
use proptest::prelude::*;

// ── SwapStyle ────────────────────────────────────────────────────

#[test]
fn parse_inner_html() {
    assert_eq!(SwapStyle::parse("innerHTML"), SwapStyle::InnerHtml);
}

#[test]
fn parse_outer_html() {
    assert_eq!(SwapStyle::parse("outerHTML"), SwapStyle::OuterHtml);
}

#[test]
fn parse_other_styles() {
    assert_eq!(
        SwapStyle::parse("beforeend"),
        SwapStyle::Other("beforeend".to_string())
    );
    assert_eq!(SwapStyle::parse("none"), SwapStyle::Other("none".to_string()));
}

#[test]
fn parse_is_case_sensitive() {
    // The host reports exact style strings; "innerhtml" is not a
    // whole-subtree style.
    assert_eq!(
        SwapStyle::parse("innerhtml"),
        SwapStyle::Other("innerhtml".to_string())
    );
}

#[test]
fn supports_skeleton_only_for_whole_subtree_styles() {
    assert!(SwapStyle::InnerHtml.supports_skeleton());
    assert!(SwapStyle::OuterHtml.supports_skeleton());
    assert!(!SwapStyle::Other("beforeend".to_string()).supports_skeleton());
    assert!(!SwapStyle::Other("none".to_string()).supports_skeleton());
}

#[test]
fn display_matches_wire_form() {
    assert_eq!(SwapStyle::InnerHtml.to_string(), "innerHTML");
    assert_eq!(SwapStyle::OuterHtml.to_string(), "outerHTML");
    assert_eq!(SwapStyle::Other("delete".to_string()).to_string(), "delete");
}

#[test]
fn serde_roundtrip_uses_wire_form() {
    let style = SwapStyle::OuterHtml;
    let json = serde_json::to_string(&style).unwrap();
    assert_eq!(json, "\"outerHTML\"");
    let back: SwapStyle = serde_json::from_str(&json).unwrap();
    assert_eq!(back, style);
}

// ── SwapSpec ─────────────────────────────────────────────────────

#[test]
fn default_spec_is_inner_html() {
    assert_eq!(SwapSpec::default().style, SwapStyle::InnerHtml);
}

#[test]
fn spec_new_keeps_style() {
    let spec = SwapSpec::new(SwapStyle::OuterHtml);
    assert_eq!(spec.style, SwapStyle::OuterHtml);
}

// ── Properties ───────────────────────────────────────────────────

proptest! {
    /// parse/as_str roundtrips for arbitrary host style strings.
    #[test]
    fn parse_as_str_roundtrip(s in "[a-zA-Z]{0,24}") {
        let style = SwapStyle::parse(&s);
        prop_assert_eq!(style.as_str(), s.as_str());
    }
}
