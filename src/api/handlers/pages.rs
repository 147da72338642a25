//! Server-rendered pages
//!
//! The admin panel is two HTML pages built from string templates. All
//! record fields pass through `escape_html` before interpolation.

use crate::db::models::Record;

/// Escape text for interpolation into HTML element content or attributes
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render the record list page with the add form and per-row controls
pub fn render_list_page(records: &[Record], username: &str) -> String {
    let mut rows = String::new();
    for record in records {
        let name = escape_html(&record.name);
        let email = escape_html(&record.email);
        rows.push_str(&format!(
            concat!(
                "      <tr data-id=\"{id}\">\n",
                "        <td>{id}</td>\n",
                "        <td class=\"field\" data-field=\"name\">{name}</td>\n",
                "        <td class=\"field\" data-field=\"email\">{email}</td>\n",
                "        <td>\n",
                "          <button type=\"button\" class=\"edit\">Edit</button>\n",
                "          <a class=\"delete\" href=\"/delete/{id}\" ",
                "onclick=\"return confirm('Delete record {id}?')\">Delete</a>\n",
                "        </td>\n",
                "      </tr>\n",
            ),
            id = record.id,
            name = name,
            email = email,
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Vista Admin</title>
  <link rel="stylesheet" href="/static/style.css">
</head>
<body>
  <header>
    <h1>Records</h1>
    <p>Signed in as <strong>{username}</strong>
      <button type="button" id="logout">Log out</button></p>
  </header>
  <form method="post" action="/add" class="add-form">
    <input name="name" placeholder="Name" required>
    <input name="email" type="email" placeholder="Email" required>
    <button type="submit">Add</button>
  </form>
  <table id="records">
    <thead>
      <tr><th>Id</th><th>Name</th><th>Email</th><th>Actions</th></tr>
    </thead>
    <tbody>
{rows}    </tbody>
  </table>
  <script src="/static/edit.js"></script>
</body>
</html>
"#,
        username = escape_html(username),
        rows = rows,
    )
}

/// Render the login form page
pub fn render_login_page() -> String {
    r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Vista Admin - Login</title>
  <link rel="stylesheet" href="/static/style.css">
</head>
<body>
  <main class="login">
    <h1>Sign in</h1>
    <form id="login-form">
      <input name="username" placeholder="Username" autocomplete="username" required>
      <input name="password" type="password" placeholder="Password"
             autocomplete="current-password" required>
      <button type="submit">Sign in</button>
      <p id="login-error" class="error" hidden></p>
    </form>
  </main>
  <script src="/static/login.js"></script>
</body>
</html>
"#
    .to_string()
}
