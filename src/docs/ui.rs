//! Browsable documentation page.
//!
//! Swagger UI is loaded from a CDN and pointed at the JSON document, so the
//! binary ships no static assets.

const SWAGGER_UI_VERSION: &str = "5";

/// Render the Swagger UI page for the document served at `spec_url`.
pub fn render_page(title: &str, spec_url: &str) -> String {
    let title = escape_html(title);
    let spec_url = escape_html(spec_url);
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>{title}</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@{version}/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@{version}/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = () => {{
      window.ui = SwaggerUIBundle({{
        url: "{spec_url}",
        dom_id: "#swagger-ui",
      }});
    }};
  </script>
</body>
</html>
"##,
        version = SWAGGER_UI_VERSION,
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_points_at_document() {
        let page = render_page("API Dokumentacioni", "/api-docs/openapi.json");
        assert!(page.contains("<title>API Dokumentacioni</title>"));
        assert!(page.contains(r#"url: "/api-docs/openapi.json""#));
        assert!(page.contains("SwaggerUIBundle"));
        assert!(page.contains(r##"dom_id: "#swagger-ui""##));
        assert!(page.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_title_is_escaped() {
        let page = render_page("<script>", "/doc.json");
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<title><script>"));
    }
}
