//! Page templates and rendering

use minijinja::{context, Environment};

use crate::auth::Identity;
use crate::error::Result;

const HOME_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>Gatehouse</title>
</head>
<body>
  <h1>Gatehouse</h1>
{% for message in messages %}
  <p class="flash">{{ message }}</p>
{% endfor %}
{% if current_user %}
  <p>Logged in as {{ current_user }}</p>
  <p><a href="/restricted">Members area</a></p>
  <p><a href="/log-out">Log out</a></p>
{% else %}
  <form action="/log-in" method="POST">
    <label for="username">Username</label>
    <input id="username" name="username" type="text" required />
    <label for="password">Password</label>
    <input id="password" name="password" type="password" required />
    <button type="submit">Log in</button>
  </form>
  <p><a href="/sign-up">Sign up</a></p>
{% endif %}
</body>
</html>
"#;

const SIGN_UP_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>Sign up - Gatehouse</title>
</head>
<body>
  <h1>Sign up</h1>
  <form action="/sign-up" method="POST">
    <label for="username">Username</label>
    <input id="username" name="username" type="text" required />
    <label for="password">Password</label>
    <input id="password" name="password" type="password" required />
    <button type="submit">Sign up</button>
  </form>
  <p><a href="/">Back home</a></p>
</body>
</html>
"#;

const RESTRICTED_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>Members area - Gatehouse</title>
</head>
<body>
  <h1>Members area</h1>
  <p>Welcome, {{ username }}.</p>
  <p>Visits: {{ page_count }}</p>
  <p><a href="/">Back home</a></p>
</body>
</html>
"#;

/// Template environment built once at startup
#[derive(Clone)]
pub struct Pages {
    env: Environment<'static>,
}

impl Pages {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template("home.html", HOME_TEMPLATE)?;
        env.add_template("sign-up.html", SIGN_UP_TEMPLATE)?;
        env.add_template("restricted.html", RESTRICTED_TEMPLATE)?;
        Ok(Self { env })
    }

    /// Home page. `messages` are the flash messages drained for this render.
    pub fn home(&self, current_user: Option<&Identity>, messages: &[String]) -> Result<String> {
        let template = self.env.get_template("home.html")?;
        Ok(template.render(context! {
            current_user => current_user.map(|i| i.username.clone()),
            messages => messages,
        })?)
    }

    /// Registration form
    pub fn sign_up(&self) -> Result<String> {
        let template = self.env.get_template("sign-up.html")?;
        Ok(template.render(context! {})?)
    }

    /// Members-only page with the session's visit count
    pub fn restricted(&self, username: &str, page_count: u64) -> Result<String> {
        let template = self.env.get_template("restricted.html")?;
        Ok(template.render(context! {
            username => username,
            page_count => page_count,
        })?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity {
            id: "user-1".to_string(),
            username: "alice".to_string(),
        }
    }

    #[test]
    fn test_home_shows_login_form_when_anonymous() {
        let pages = Pages::new().unwrap();
        let html = pages.home(None, &[]).unwrap();
        assert!(html.contains("action=\"/log-in\""));
        assert!(!html.contains("Logged in as"));
    }

    #[test]
    fn test_home_shows_current_user() {
        let pages = Pages::new().unwrap();
        let html = pages.home(Some(&identity()), &[]).unwrap();
        assert!(html.contains("Logged in as alice"));
        assert!(!html.contains("action=\"/log-in\""));
    }

    #[test]
    fn test_home_renders_flash_messages() {
        let pages = Pages::new().unwrap();
        let messages = vec!["Incorrect password".to_string()];
        let html = pages.home(None, &messages).unwrap();
        assert!(html.contains("Incorrect password"));
    }

    #[test]
    fn test_restricted_shows_visit_count() {
        let pages = Pages::new().unwrap();
        let html = pages.restricted("alice", 2).unwrap();
        assert!(html.contains("Welcome, alice."));
        assert!(html.contains("Visits: 2"));
    }
}
