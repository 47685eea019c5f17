//! The one HTML page: a discussion list filled in by a single fetch.

use axum::response::Html;
use axum::{routing::get, Router};

use crate::state::AppState;

/// GET / -- static page that loads `/api/v1/discussions` once.
///
/// A failed request is logged to the browser console and the list stays
/// empty. There is no retry.
pub async fn index() -> Html<&'static str> {
    Html(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Discussions</title>
  <style>
    body { font-family: system-ui, sans-serif; max-width: 960px; margin: 2rem auto; }
    ul { list-style: none; padding-left: 0; }
    li { border-bottom: 1px solid #eee; padding: 0.5rem 0; }
    .subject { font-weight: 600; }
    .muted { color: #666; font-size: 0.9rem; }
  </style>
</head>
<body>
  <h1>Discussions</h1>
  <ul id="discussions"></ul>
  <script>
    async function loadDiscussions() {
      try {
        const res = await fetch('/api/v1/discussions');
        if (!res.ok) {
          throw new Error('HTTP ' + res.status);
        }
        const discussions = await res.json();
        const list = document.getElementById('discussions');
        for (const d of discussions) {
          const li = document.createElement('li');
          const subject = document.createElement('div');
          subject.className = 'subject';
          subject.textContent = d.subject;
          const meta = document.createElement('div');
          meta.className = 'muted';
          meta.textContent = d.username + ' · ' + d.status + ' · ' + d.responses_count + ' responses';
          li.appendChild(subject);
          li.appendChild(meta);
          list.appendChild(li);
        }
      } catch (err) {
        console.error('Failed to load discussions', err);
      }
    }
    loadDiscussions();
  </script>
</body>
</html>
"#,
    )
}

/// Mount the page at the root.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}
