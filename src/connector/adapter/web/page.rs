use super::views::{MessageView, SessionView};

pub const PAGE_TITLE: &str = "DeepSeek - Powered by GROQ";

/// Single-page chat UI. Model text is only ever assigned through `textContent`.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>DeepSeek - Powered by GROQ</title>
<style>
  body { margin: 0; font-family: system-ui, sans-serif; display: flex; height: 100vh; }
  aside { width: 260px; background: #f5f6f8; padding: 16px; box-sizing: border-box; }
  aside ul { padding-left: 18px; color: #444; }
  main { flex: 1; display: flex; flex-direction: column; padding: 16px 32px; box-sizing: border-box; }
  #log { flex: 1; overflow-y: auto; }
  .msg { margin: 10px 0; padding: 10px 14px; border-radius: 8px; white-space: pre-wrap; }
  .msg.user { background: #e8f0fe; }
  .msg.assistant { background: #fff; border: 1px solid #eee; }
  .thinking { background-color: #f0f0f0; padding: 10px; border-radius: 5px; margin-bottom: 10px; }
  .error { background: #fdecea; color: #8a1c1c; padding: 10px; border-radius: 5px; margin: 8px 0; }
  #spinner { color: #777; font-style: italic; display: none; }
  form { display: flex; gap: 8px; }
  #prompt { flex: 1; padding: 10px; font-size: 1rem; }
  button { padding: 8px 14px; cursor: pointer; }
</style>
</head>
<body>
<aside>
  <h2>&#129302; DeepSeek Chatbot</h2>
  <ul>
    <li>This is a custom chatbot powered by GROQ.</li>
    <li>Click 'Reset Chat' to start a new conversation.</li>
  </ul>
  <button id="reset">Reset Chat</button>
</aside>
<main>
  <h1>DeepSeek - Powered by GROQ</h1>
  <div id="log"></div>
  <div id="errors"></div>
  <div id="spinner">Thinking...</div>
  <form id="composer">
    <input id="prompt" autocomplete="off" placeholder="What's on your mind?">
    <button type="submit">Send</button>
  </form>
</main>
<script>
const KEY = "thinkchat-session";
const log = document.getElementById("log");
const errors = document.getElementById("errors");
const spinner = document.getElementById("spinner");
const prompt = document.getElementById("prompt");

async function api(method, path, body) {
  const res = await fetch(path, {
    method,
    headers: body ? { "Content-Type": "application/json" } : {},
    body: body ? JSON.stringify(body) : undefined,
  });
  const data = await res.json().catch(() => ({}));
  if (!res.ok) { const err = new Error(data.error || res.statusText); err.status = res.status; throw err; }
  return data;
}

function showError(text) {
  const div = document.createElement("div");
  div.className = "error";
  div.textContent = text;
  errors.appendChild(div);
}

function render(session) {
  log.replaceChildren();
  for (const m of session.messages) {
    const div = document.createElement("div");
    div.className = "msg " + m.role;
    if (m.role === "assistant" && m.reasoning) {
      const think = document.createElement("div");
      think.className = "thinking";
      const label = document.createElement("strong");
      label.textContent = "Thinking:";
      think.appendChild(label);
      think.appendChild(document.createElement("br"));
      think.appendChild(document.createTextNode(m.reasoning));
      div.appendChild(think);
    }
    div.appendChild(document.createTextNode(m.role === "assistant" ? m.answer : m.content));
    log.appendChild(div);
  }
  log.scrollTop = log.scrollHeight;
}

async function start() {
  const id = sessionStorage.getItem(KEY);
  if (id) {
    try { render(await api("GET", "/api/sessions/" + id)); return; }
    catch (e) { if (e.status !== 404) { showError(e.message); return; } }
  }
  const session = await api("POST", "/api/sessions");
  sessionStorage.setItem(KEY, session.id);
  render(session);
}

document.getElementById("composer").addEventListener("submit", async (ev) => {
  ev.preventDefault();
  const text = prompt.value;
  if (!text.trim()) return;
  prompt.value = "";
  prompt.disabled = true;
  spinner.style.display = "block";
  errors.replaceChildren();
  try {
    const turn = await api("POST", "/api/sessions/" + sessionStorage.getItem(KEY) + "/messages", { content: text });
    render(turn.session);
    if (turn.error) showError(turn.error);
  } catch (e) {
    showError(e.message);
  } finally {
    spinner.style.display = "none";
    prompt.disabled = false;
    prompt.focus();
  }
});

document.getElementById("reset").addEventListener("click", async () => {
  errors.replaceChildren();
  try { render(await api("POST", "/api/sessions/" + sessionStorage.getItem(KEY) + "/reset")); }
  catch (e) { showError(e.message); }
});

start().catch((e) => showError(e.message));
</script>
</body>
</html>
"##;

/// Server-rendered, script-free view of a transcript.
pub fn render_transcript_html(session: &SessionView) -> String {
    let mut html = String::with_capacity(1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>");
    html.push_str(PAGE_TITLE);
    html.push_str("</title></head>\n<body>\n<h1>");
    html.push_str(PAGE_TITLE);
    html.push_str("</h1>\n<p>Session ");
    html.push_str(&html_escape(&session.id));
    html.push_str("</p>\n");

    for message in &session.messages {
        render_message(&mut html, message);
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_message(html: &mut String, message: &MessageView) {
    html.push_str("<div class=\"msg ");
    html.push_str(message.role.as_str());
    html.push_str("\">\n");

    if let Some(reasoning) = message.reasoning.as_deref().filter(|r| !r.is_empty()) {
        html.push_str(
            "<div style=\"background-color: #f0f0f0; padding: 10px; border-radius: 5px; margin-bottom: 10px;\">\
             <strong>Thinking:</strong><br>",
        );
        html.push_str(&html_escape(reasoning));
        html.push_str("</div>\n");
    }

    html.push_str("<p>");
    html.push_str(&html_escape(&message.answer));
    html.push_str("</p>\n</div>\n");
}

/// Escape HTML special characters for safe embedding in HTML documents.
pub fn html_escape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}
