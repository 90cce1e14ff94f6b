//! Server-rendered pages. All of them sit behind the session gate.

use axum::{extract::State, response::Html};
use tracing::instrument;

use crate::error::AppError;
use crate::export::escape_html;
use crate::extractors::auth::AuthUser;
use crate::state::AppState;

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{} | ContentCraft</title>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        escape_html(title)
    ))
}

pub async fn home() -> Html<String> {
    layout(
        "AI-assisted blogging",
        "<main>\n<h1>ContentCraft</h1>\n\
         <p>Plan, write and illustrate blog posts with AI assistance.</p>\n\
         <ul>\n<li>Outline and draft posts in your brand voice</li>\n\
         <li>Generate and manage hero images</li>\n\
         <li>Track what you create</li>\n</ul>\n\
         <p><a href=\"/auth/signin\">Sign in</a> or <a href=\"/dashboard\">open your dashboard</a>.</p>\n\
         </main>",
    )
}

pub async fn sign_in() -> Html<String> {
    layout(
        "Sign in",
        "<main>\n<h1>Sign in</h1>\n\
         <form id=\"signin\">\n\
         <label>Email <input name=\"email\" type=\"email\" required></label>\n\
         <label>Password <input name=\"password\" type=\"password\" required></label>\n\
         <button type=\"submit\">Sign in</button>\n\
         <p id=\"error\" role=\"alert\"></p>\n</form>\n\
         <script>\n\
         document.getElementById('signin').addEventListener('submit', async (e) => {\n\
           e.preventDefault();\n\
           const form = new FormData(e.target);\n\
           const res = await fetch('/api/v1/auth/login', {\n\
             method: 'POST',\n\
             headers: { 'Content-Type': 'application/json' },\n\
             body: JSON.stringify(Object.fromEntries(form)),\n\
           });\n\
           if (res.ok) { window.location = '/dashboard'; return; }\n\
           const body = await res.json();\n\
           document.getElementById('error').textContent = body.error;\n\
         });\n\
         </script>\n</main>",
    )
}

/// Overview of the signed-in user's content and recent activity.
#[instrument(skip(state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn dashboard(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Html<String>, AppError> {
    let blogs = state.store.list_user_blogs(auth_user.user_id).await?;
    let media = state.store.list_user_media(auth_user.user_id).await?;
    let activity = state.store.usage_stats(auth_user.user_id, 30).await?;

    let activity_html = if activity.is_empty() {
        "<p>No recent activity yet.</p>\n\
         <p>Start creating content to see your activity here.</p>"
            .to_string()
    } else {
        let items: String = activity
            .iter()
            .map(|a| format!("<li>{}: {}</li>\n", escape_html(&a.action), a.count))
            .collect();
        format!("<ul>\n{items}</ul>")
    };

    let body = format!(
        "<main>\n<h1>Welcome back, {}</h1>\n\
         <section>\n<p>Blogs: {}</p>\n<p>Media: {}</p>\n</section>\n\
         <section>\n<h2>Recent Activity</h2>\n{activity_html}\n</section>\n</main>",
        escape_html(&auth_user.name),
        blogs.len(),
        media.len(),
    );
    Ok(layout("Dashboard", &body))
}
