//! Markdown-to-HTML conversion for note descriptions.
//!
//! Pure delegation to pulldown-cmark; no custom parsing. The output is
//! inserted into the page as-is, so the renderer's own escaping is the only
//! protection against injected markup (an explicit non-goal to harden).

use pulldown_cmark::{html, Options, Parser};

/// Convert a note's raw description to HTML.
pub fn render_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, Options::empty());
    let mut out = String::with_capacity(text.len() * 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_wraps_in_paragraph() {
        let html = render_markdown("hello");
        assert!(html.contains("<p>hello</p>"));
    }

    #[test]
    fn test_image_reference_becomes_img_element() {
        let html = render_markdown("caption\n![](/uploads/photo-1700000000000.png)");
        assert!(html.contains("caption"));
        assert!(html.contains(r#"<img src="/uploads/photo-1700000000000.png""#));
    }

    #[test]
    fn test_emphasis() {
        let html = render_markdown("some *emphasis* here");
        assert!(html.contains("<em>emphasis</em>"));
    }

    #[test]
    fn test_raw_angle_brackets_survive_renderer_escaping() {
        // pulldown-cmark passes raw HTML through; this documents the
        // original behavior of trusting the renderer's output verbatim.
        let html = render_markdown("plain <b>bold</b>");
        assert!(html.contains("<b>bold</b>"));
    }
}
