//! Server-rendered HTML pages.
//!
//! Inline templates; every value coming from the store or the request is
//! escaped with [`html_escape`].

use crate::model::event::{EventSummaryView, EventView};
use kernel::model::{account::Account, role::Role};
use strum::IntoEnumIterator;

pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

const STYLES: &str = r#"
    body { font-family: sans-serif; max-width: 900px; margin: 40px auto; padding: 0 20px; }
    nav a { margin-right: 12px; }
    .error { color: #a94442; background: #f2dede; padding: 10px; border-radius: 4px; }
    .event img { max-width: 240px; }
    .label { font-weight: bold; display: inline-block; width: 140px; }
"#;

fn layout(title: &str, current: Option<&Account>, body: &str) -> String {
    let nav = match current {
        Some(account) => format!(
            r#"<span>{} ({})</span> <a href="/logout">Logout</a>"#,
            html_escape(&account.username),
            html_escape(account.role.as_ref()),
        ),
        None => r#"<a href="/login">Login</a> <a href="/register">Register</a>"#.to_string(),
    };
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <style>{STYLES}</style>
</head>
<body>
    <nav><a href="/">Home</a> {nav}</nav>
    {body}
</body>
</html>"#,
        title = html_escape(title),
    )
}

pub fn home_page(current: Option<&Account>, events: &[EventSummaryView]) -> String {
    let items = if events.is_empty() {
        "<p>No events yet.</p>".to_string()
    } else {
        let rows: String = events
            .iter()
            .map(|e| {
                format!(
                    r#"<li><a href="/evento/{}">{}</a> ({}, {})</li>"#,
                    e.id,
                    html_escape(&e.name),
                    html_escape(&e.event_type),
                    html_escape(&e.start_date),
                )
            })
            .collect();
        format!("<ul>{rows}</ul>")
    };
    layout(
        "Events",
        current,
        &format!("<h1>Events</h1>\n    {items}"),
    )
}

pub fn event_page(current: Option<&Account>, event: &EventView) -> String {
    let organizer = event
        .organizer
        .as_deref()
        .map_or_else(|| "-".to_string(), html_escape);
    let speakers = if event.speakers.is_empty() {
        "<li>-</li>".to_string()
    } else {
        event
            .speakers
            .iter()
            .map(|s| format!("<li>{}</li>", html_escape(s)))
            .collect()
    };
    let body = format!(
        r#"<div class="event">
        <h1>{name}</h1>
        <img src="/static/img/{image}" alt="{name}">
        <p>{description}</p>
        <div><span class="label">Type</span>{event_type}</div>
        <div><span class="label">Dates</span>{start_date} - {end_date}</div>
        <div><span class="label">Starts at</span>{start_time}</div>
        <div><span class="label">Address</span>{address}</div>
        <div><span class="label">Price</span>{price}</div>
        <div><span class="label">Organizer</span>{organizer}</div>
        <h2>Speakers</h2>
        <ul>{speakers}</ul>
    </div>"#,
        name = html_escape(&event.name),
        image = html_escape(&event.image_file),
        description = html_escape(&event.description),
        event_type = html_escape(&event.event_type),
        start_date = html_escape(&event.start_date),
        end_date = html_escape(&event.end_date),
        start_time = html_escape(&event.start_time),
        address = html_escape(&event.address),
        price = html_escape(&event.price),
    );
    layout(&event.name, current, &body)
}

pub fn login_page(error: Option<&str>) -> String {
    let error_html = error_block(error);
    layout(
        "Login",
        None,
        &format!(
            r#"<h1>Login</h1>
    {error_html}
    <form method="POST" action="/login">
        <label for="username">Username</label>
        <input type="text" id="username" name="username" required autofocus>
        <label for="password">Password</label>
        <input type="password" id="password" name="password" required>
        <button type="submit">Login</button>
    </form>
    <p>No account yet? <a href="/register">Register</a></p>"#
        ),
    )
}

pub fn register_page(error: Option<&str>) -> String {
    let error_html = error_block(error);
    let options: String = Role::iter()
        .map(|role| format!(r#"<option value="{role}">{role}</option>"#))
        .collect();
    layout(
        "Register",
        None,
        &format!(
            r#"<h1>Register</h1>
    {error_html}
    <form method="POST" action="/register">
        <label for="username">Username</label>
        <input type="text" id="username" name="username" maxlength="15" required>
        <label for="email">Email</label>
        <input type="email" id="email" name="email" maxlength="50" required>
        <label for="password">Password</label>
        <input type="password" id="password" name="password" required>
        <label for="role">Role</label>
        <select id="role" name="role">{options}</select>
        <button type="submit">Register</button>
    </form>"#
        ),
    )
}

fn error_block(error: Option<&str>) -> String {
    error.map_or(String::new(), |e| {
        format!(r#"<div class="error">{}</div>"#, html_escape(e))
    })
}

pub fn html_escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
