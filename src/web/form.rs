use axum::extract::Query;
use axum::response::Html;
use serde::Deserialize;

use crate::web::html_escape;

/// Query-string prefill for the form fields.
#[derive(Debug, Default, Deserialize)]
pub struct FormPrefill {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// GET / and GET /shortener.html — the link submission form.
/// Fields can be prefilled via `filename`, `title`, and `text` query params.
pub async fn shortener_page(Query(prefill): Query<FormPrefill>) -> Html<String> {
    let filename = html_escape(prefill.filename.as_deref().unwrap_or(""));
    let title = html_escape(prefill.title.as_deref().unwrap_or(""));
    let text = html_escape(prefill.text.as_deref().unwrap_or(""));

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Link shortener</title>
    <style>
        body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: #f0f2f5; display: flex; justify-content: center; align-items: center; min-height: 100vh; margin: 0; }}
        .card {{ background: #ffffff; border-radius: 10px; padding: 30px; max-width: 560px; width: 100%; box-shadow: 0 4px 8px rgba(0, 0, 0, 0.1); }}
        h3 {{ color: #333; margin-top: 0; }}
        label {{ display: block; color: #555; margin: 12px 0 4px; }}
        input, textarea {{ width: 100%; box-sizing: border-box; padding: 8px; border: 1px solid #ccc; border-radius: 5px; font-size: 14px; }}
        textarea {{ height: 8em; font-family: monospace; }}
        button {{ background-color: #007bff; color: white; border: none; padding: 10px 20px; margin-top: 16px; border-radius: 5px; cursor: pointer; font-size: 16px; }}
        button:hover {{ background-color: #0056b3; }}
        .hint {{ color: #888; font-size: 12px; }}
    </style>
</head>
<body>
    <div class="card">
        <h3>Shorten a viewer link</h3>
        <form action="shortng" method="post">
            <input type="hidden" name="client" value="web">
            <label for="text">Link or state JSON</label>
            <textarea id="text" name="text" required>{text}</textarea>
            <p class="hint">Paste a viewer link, raw state JSON, or a previously shortened link to update it.</p>
            <label for="filename">Filename (optional)</label>
            <input type="text" id="filename" name="filename" value="{filename}">
            <label for="title">Title (optional)</label>
            <input type="text" id="title" name="title" value="{title}">
            <label for="password">Password (optional, allows editing after the open window closes)</label>
            <input type="password" id="password" name="password">
            <button type="submit">Shorten</button>
        </form>
    </div>
</body>
</html>"#,
        text = text,
        filename = filename,
        title = title,
    );

    Html(html)
}
