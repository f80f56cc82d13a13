use maud::{html, Markup, DOCTYPE};

const HTMX_SRC: &str = "https://unpkg.com/htmx.org@1.9.12";

/// Page shell. `signed_in` carries the admin's email when a session is active.
pub fn desktop_layout(title: &str, signed_in: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " | Terminus DAO" }
                link rel="stylesheet" href="/static/site.css";
                script src=(HTMX_SRC) defer {};
            }
            body {
              header class="site-header" {
                  a class="brand" href="/" { "Terminus DAO" }
                  nav {
                      ul {
                          li { a href="/#events" { "Events" } }
                          li { a href="/#sponsors" { "Sponsors" } }
                          li { a href="/admin" { "Admin" } }
                      }
                  }
                  @if let Some(email) = signed_in {
                      form class="inline" method="post" action="/admin/logout" {
                          span class="user-email" { (email) }
                          button type="submit" class="btn-link" { "Sign out" }
                      }
                  }
              }
                (content)
              footer class="site-footer" {
                  p { "Atlanta Blockchain Center" }
              }
            }
        }
    }
}
