//! Server-rendered HTML for the three pages.
//!
//! Deliberately tiny: a shared shell, a flash banner, and the page bodies.
//! Every piece of interpolated text goes through [`escape_html`].

use luxrent_core::catalogue::Car;
use luxrent_core::session::Session;

use crate::flash::Flash;

const STYLESHEET: &str = "/static/style.css";
const SCRIPT: &str = "/static/app.js";
const CAR_IMAGE_DIR: &str = "/static/cars/";

/// Escape the five HTML-significant characters.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn login_page(flash: &Flash) -> String {
    shell(
        "Sign in",
        &format!(
            r#"<main class="auth">
  <h1>Luxury Car Rental</h1>
  {banner}
  <form method="post" action="/login">
    <label for="email">Email</label>
    <input id="email" name="email" type="email" required>
    <button type="submit">Sign in</button>
  </form>
  <p>New here? <a href="/register">Create an account</a></p>
</main>"#,
            banner = banner(flash),
        ),
    )
}

pub fn register_page(flash: &Flash) -> String {
    shell(
        "Create account",
        &format!(
            r#"<main class="auth">
  <h1>Create your account</h1>
  {banner}
  <form method="post" action="/register">
    <label for="name">Name</label>
    <input id="name" name="name" type="text" required>
    <label for="email">Email</label>
    <input id="email" name="email" type="email" required>
    <button type="submit">Register</button>
  </form>
  <p>Already registered? <a href="/">Sign in</a></p>
</main>"#,
            banner = banner(flash),
        ),
    )
}

pub fn dashboard_page(session: &Session, cars: &[Car], flash: &Flash) -> String {
    let cards: String = cars.iter().map(car_card).collect();
    shell(
        "Dashboard",
        &format!(
            r#"<header class="topbar">
  <span>Welcome, {name}</span>
  <a href="/logout">Log out</a>
</header>
<main class="dashboard">
  {banner}
  <input id="carFilter" type="search" placeholder="Filter cars">
  <ul class="cars">
{cards}  </ul>
</main>"#,
            name = escape_html(&session.display_name),
            banner = banner(flash),
        ),
    )
}

fn car_card(car: &Car) -> String {
    let name = escape_html(car.name);
    format!(
        r#"    <li data-car-item data-name="{name}">
      <img src="{src}" alt="{name}">
      <h2>{name}</h2>
      <button type="button">Rent</button>
    </li>
"#,
        src = escape_html(&image_src(car.image)),
    )
}

fn image_src(image: &str) -> String {
    if image.starts_with("http://") || image.starts_with("https://") {
        image.to_string()
    } else {
        format!("{CAR_IMAGE_DIR}{image}")
    }
}

fn banner(flash: &Flash) -> String {
    let mut out = String::new();
    if let Some(error) = &flash.error {
        out.push_str(&format!(
            r#"<div class="toast error" data-toast>{}</div>"#,
            escape_html(error)
        ));
    }
    if let Some(success) = &flash.success {
        out.push_str(&format!(
            r#"<div class="toast success" data-toast>{}</div>"#,
            escape_html(success)
        ));
    }
    out
}

fn shell(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title} | Luxury Car Rental</title>
  <link rel="stylesheet" href="{STYLESHEET}">
</head>
<body>
{body}
<script src="{SCRIPT}" defer></script>
</body>
</html>
"#,
        title = escape_html(title),
    )
}
