use html_escape::encode_text;

#[derive(Debug)]
pub struct Notice {
    kind: &'static str,
    text: String,
}

impl Notice {
    pub fn ok(text: String) -> Self {
        Self { kind: "ok", text }
    }

    pub fn error(text: String) -> Self {
        Self { kind: "error", text }
    }
}

pub fn render_index(date_display: &str, notice: Option<&Notice>) -> String {
    let banner = match notice {
        Some(notice) => format!(
            r#"<div class="status" data-type="{}">{}</div>"#,
            notice.kind,
            encode_text(&notice.text)
        ),
        None => String::new(),
    };

    INDEX_HTML
        .replace("{{DATE}}", &encode_text(date_display))
        .replace("{{NOTICE}}", &banner)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Attendance Registration</title>
  <style>
    :root {
      --bg: #fdf5ea;
      --olive-light: #c3cba6;
      --olive-dark: #4a5c3d;
      --ink: #2b2a28;
      --card: rgba(255, 255, 255, 0.92);
      --shadow: 0 24px 60px rgba(74, 92, 61, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", "Segoe UI", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(520px, 100%);
      background: var(--card);
      border-radius: 22px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 22px;
    }

    header {
      display: flex;
      flex-direction: column;
      align-items: center;
      gap: 6px;
      text-align: center;
    }

    h1 {
      margin: 0;
      font-size: clamp(1.6rem, 4vw, 2.2rem);
      font-weight: 800;
      letter-spacing: 1px;
      color: var(--olive-dark);
    }

    .subtitle {
      margin: 0;
      color: var(--olive-dark);
      font-size: 1rem;
    }

    form {
      display: grid;
      gap: 14px;
    }

    label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: #6b6f5a;
    }

    input {
      width: 100%;
      border: 1px solid rgba(74, 92, 61, 0.25);
      border-radius: 10px;
      background: rgba(195, 203, 166, 0.13);
      padding: 12px 14px;
      font-size: 1rem;
      color: var(--ink);
    }

    input:focus {
      outline: 2px solid var(--olive-light);
      outline-offset: 1px;
    }

    button {
      appearance: none;
      border: 0;
      border-radius: 10px;
      background: var(--olive-light);
      color: white;
      font-weight: 700;
      font-size: 1rem;
      padding: 0.6rem 1.2rem;
      cursor: pointer;
      transition: background 150ms ease;
    }

    button:hover {
      background: var(--olive-dark);
    }

    .status {
      border-radius: 10px;
      padding: 12px 14px;
      font-size: 0.95rem;
    }

    .status[data-type="ok"] {
      background: rgba(45, 122, 75, 0.12);
      color: #2d7a4b;
    }

    .status[data-type="error"] {
      background: rgba(198, 59, 43, 0.1);
      color: #c63b2b;
    }

    @media (max-width: 480px) {
      .app {
        padding: 28px 22px;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Attendance Registration</h1>
      <p class="subtitle">Marking attendance for <strong>{{DATE}}</strong></p>
    </header>

    {{NOTICE}}

    <form method="post" action="/submit">
      <div>
        <label for="name">Enter Name</label>
        <input id="name" name="name" type="text" placeholder="e.g. Ali Hasan" />
      </div>
      <div>
        <label for="phone">Enter Phone Number</label>
        <input id="phone" name="phone" type="text" placeholder="e.g. +65 8123 4567" />
      </div>
      <button type="submit">Submit</button>
    </form>
  </main>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_index_substitutes_date() {
        let page = render_index("27-08-26", None);
        assert!(page.contains("27-08-26"));
        assert!(!page.contains("{{DATE}}"));
        assert!(!page.contains("{{NOTICE}}"));
    }

    #[test]
    fn render_index_escapes_notice_text() {
        let notice = Notice::error("<script>alert(1)</script>".to_string());
        let page = render_index("27-08-26", Some(&notice));
        assert!(!page.contains("<script>alert(1)"));
        assert!(page.contains("&lt;script&gt;"));
    }
}
