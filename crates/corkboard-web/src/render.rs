//! The note-board page template.
//!
//! Pure rendering: an ordered sequence of rendered notes plus an optional
//! error message in, full page markup out. The markdown-rendered note body
//! is inserted without additional escaping; everything else goes through
//! `html_escape`.

/// A note prepared for display.
#[derive(Debug, Clone)]
pub struct RenderedNote {
    pub id: i64,
    /// Markdown-rendered description HTML.
    pub html: String,
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Render the full index page.
pub fn render_index(notes: &[RenderedNote], error_message: Option<&str>) -> String {
    let error_banner = match error_message {
        Some(msg) => format!(
            r#"<div class="error">{}</div>"#,
            html_escape(msg)
        ),
        None => String::new(),
    };

    let note_items = notes
        .iter()
        .map(|note| {
            format!(
                r#"<div class="note" data-note-id="{id}">{body}</div>"#,
                id = note.id,
                body = note.html,
            )
        })
        .collect::<Vec<_>>()
        .join("\n            ");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Corkboard</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
            background: #f5f2ec;
            color: #333;
            max-width: 640px;
            margin: 0 auto;
            padding: 24px 16px;
        }}
        h1 {{
            font-size: 22px;
        }}
        form {{
            background: #fff;
            border: 1px solid #e0dcd2;
            border-radius: 8px;
            padding: 16px;
            margin-bottom: 24px;
        }}
        textarea {{
            width: 100%;
            box-sizing: border-box;
            min-height: 72px;
            border: 1px solid #ccc;
            border-radius: 4px;
            padding: 8px;
            font: inherit;
        }}
        .actions {{
            display: flex;
            justify-content: space-between;
            align-items: center;
            margin-top: 8px;
        }}
        button {{
            border: none;
            border-radius: 4px;
            background: #b5651d;
            color: #fff;
            padding: 8px 20px;
            font-size: 14px;
            cursor: pointer;
        }}
        .error {{
            background: #fdecea;
            border: 1px solid #f5c6c0;
            color: #92342b;
            border-radius: 4px;
            padding: 10px 14px;
            margin-bottom: 16px;
        }}
        .note {{
            background: #fff;
            border: 1px solid #e0dcd2;
            border-radius: 8px;
            padding: 4px 16px;
            margin-bottom: 12px;
            overflow-wrap: break-word;
        }}
        .note img {{
            max-width: 100%;
        }}
    </style>
</head>
<body>
    <h1>Corkboard</h1>
    {error_banner}
    <form method="POST" action="/note" enctype="multipart/form-data">
        <textarea name="description" placeholder="Pin a note (markdown welcome)"></textarea>
        <div class="actions">
            <input type="file" name="image" accept="image/jpeg,image/png,image/gif">
            <button type="submit">Pin it</button>
        </div>
    </form>
    {note_items}
</body>
</html>"#,
        error_banner = error_banner,
        note_items = note_items,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_notes() -> Vec<RenderedNote> {
        vec![
            RenderedNote {
                id: 2,
                html: "<p>note2</p>".to_string(),
            },
            RenderedNote {
                id: 1,
                html: "<p>note1</p>".to_string(),
            },
        ]
    }

    #[test]
    fn test_notes_appear_in_given_order() {
        let page = render_index(&sample_notes(), None);
        let pos2 = page.find("note2").unwrap();
        let pos1 = page.find("note1").unwrap();
        assert!(pos2 < pos1, "note2 must precede note1 in document order");
    }

    #[test]
    fn test_note_html_is_inserted_unescaped() {
        let page = render_index(&sample_notes(), None);
        assert!(page.contains("<p>note2</p>"));
    }

    #[test]
    fn test_no_error_banner_by_default() {
        let page = render_index(&sample_notes(), None);
        assert!(!page.contains(r#"class="error""#));
    }

    #[test]
    fn test_error_banner_present_and_escaped() {
        let page = render_index(&[], Some("Failed to save <note>"));
        assert!(page.contains(r#"class="error""#));
        assert!(page.contains("Failed to save &lt;note&gt;"));
        assert!(!page.contains("Failed to save <note>"));
    }

    #[test]
    fn test_form_posts_multipart_to_note_route() {
        let page = render_index(&[], None);
        assert!(page.contains(r#"action="/note""#));
        assert!(page.contains(r#"enctype="multipart/form-data""#));
        assert!(page.contains(r#"name="description""#));
        assert!(page.contains(r#"name="image""#));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;"
        );
    }
}
