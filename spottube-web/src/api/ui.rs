//! Landing page and shared page helpers

use axum::response::{Html, IntoResponse};

/// Serve the landing page with the Spotify login entry point
pub async fn landing_page() -> impl IntoResponse {
    let version = env!("CARGO_PKG_VERSION");
    let git_hash = env!("GIT_HASH");

    let html = format!(
        r#"<html>
    <head>
        <title>Spotify-To-YouTube App</title>
        <style>
            body {{
                font-family: Arial, sans-serif;
                display: flex;
                justify-content: center;
                align-items: center;
                height: 100vh;
                background-color: #f0f0f0;
            }}
            .container {{
                text-align: center;
                background: white;
                padding: 50px;
                border-radius: 8px;
                box-shadow: 0 0 10px rgba(0, 0, 0, 0.1);
            }}
            h1 {{
                color: #333;
                margin-bottom: 20px;
            }}
            .login-button {{
                padding: 10px 20px;
                font-size: 16px;
                color: white;
                background-color: #1DB954;
                border: none;
                border-radius: 4px;
                text-decoration: none;
                cursor: pointer;
            }}
            .login-button:hover {{
                background-color: #1aa34a;
            }}
            .build-info {{
                margin-top: 30px;
                font-size: 12px;
                color: #999;
            }}
        </style>
    </head>
    <body>
        <div class="container">
            <h1>Welcome to my Spotify-To-YouTube App</h1>
            <a href="/login" class="login-button">Login with Spotify</a>
            <p class="build-info">spottube-web v{version} [{git_hash}]</p>
        </div>
    </body>
</html>"#
    );

    Html(html)
}

/// Minimal HTML escaping for vendor-supplied text interpolated into pages
pub(crate) fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(escape_html("Road Trip 2024"), "Road Trip 2024");
    }

    #[test]
    fn test_markup_characters_are_escaped() {
        assert_eq!(
            escape_html(r#"<b>"Bob" & Carol's</b>"#),
            "&lt;b&gt;&quot;Bob&quot; &amp; Carol&#39;s&lt;/b&gt;"
        );
    }
}
