use axum::response::{Html, IntoResponse, Response};

use crate::links::save::SavedLink;
use crate::web::html_escape;

/// The result page shown to web-form users: the shortened link plus copy,
/// view-JSON, and start-over buttons.
pub fn result_page(saved: &SavedLink) -> Response {
    let link = html_escape(&saved.link);
    let state_url = html_escape(&saved.state_url);

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Shortened link</title>
    <style>
        body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: #f0f2f5; display: flex; justify-content: center; align-items: center; min-height: 100vh; margin: 0; }}
        .card {{ background: #ffffff; border-radius: 10px; padding: 30px; max-width: 500px; width: 100%; text-align: center; box-shadow: 0 4px 8px rgba(0, 0, 0, 0.1); }}
        h3, h4 {{ color: #333; margin: 10px 0; }}
        p {{ word-break: break-all; }}
        button, .button {{ background-color: #007bff; color: white; border: none; padding: 10px 20px; margin: 5px; border-radius: 5px; cursor: pointer; font-size: 16px; text-decoration: none; display: inline-block; }}
        button:hover, .button:hover {{ background-color: #0056b3; }}
    </style>
    <script type="text/javascript">
        function copy_to_clipboard(text) {{
            try {{
                navigator.clipboard.writeText(text);
            }}
            catch (err) {{
                console.error("Couldn't write to clipboard:", err)
            }}
        }}
    </script>
</head>
<body>
    <div class="card">
        <h3>Your shortened link:</h3>
        <p><a href="{link}">{link}</a></p>
        <h4>
            <button onclick="copy_to_clipboard('{link}'); return false;">Copy Link</button>
            <a class="button" href="{state_url}">View JSON</a>
            <a class="button" href="shortener.html">Start Over</a>
        </h4>
    </div>
</body>
</html>"#,
        link = link,
        state_url = state_url,
    );

    Html(html).into_response()
}
