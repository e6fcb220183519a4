//! Embedded single-page frontend.
//!
//! Inline CSS and JavaScript only; the page talks to `/api/query`,
//! `/api/status` and `/api/recent`.

/// The complete HTML page served at `/`.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Alexandria Transit Assistant</title>
<style>
*,*::before,*::after{box-sizing:border-box;margin:0;padding:0}
:root{
  --bg:#f4f7fb;
  --card:#ffffff;
  --text:#1d2939;
  --muted:#667085;
  --accent:#1570ef;
  --accent-hover:#175cd3;
  --border:#d0d5dd;
  --ok:#12b76a;
  --warn:#f79009;
  --bad:#f04438;
}
body{font-family:system-ui,-apple-system,"Segoe UI",Tahoma,sans-serif;background:var(--bg);color:var(--text);line-height:1.5}
header{background:var(--accent);color:#fff;padding:1.25rem 1rem;text-align:center}
header h1{font-size:1.4rem}
header p{opacity:.85;font-size:.95rem}
main{max-width:860px;margin:1.5rem auto;padding:0 1rem;display:grid;gap:1rem}
.card{background:var(--card);border:1px solid var(--border);border-radius:10px;padding:1rem}
.row{display:flex;gap:.5rem}
#query{flex:1;padding:.7rem .8rem;border:1px solid var(--border);border-radius:8px;font-size:1rem}
button{padding:.7rem 1.1rem;border:0;border-radius:8px;background:var(--accent);color:#fff;font-size:1rem;cursor:pointer}
button:hover{background:var(--accent-hover)}
button:disabled{opacity:.6;cursor:wait}
#status{display:flex;gap:1rem;flex-wrap:wrap;font-size:.9rem;color:var(--muted)}
.dot{display:inline-block;width:.6rem;height:.6rem;border-radius:50%;margin-inline-end:.35rem;background:var(--muted)}
.dot.online{background:var(--ok)}
.dot.error{background:var(--warn)}
.dot.offline{background:var(--bad)}
#answer{white-space:pre-wrap;min-height:3rem}
#answer[dir=rtl]{text-align:right}
.chips{display:flex;flex-wrap:wrap;gap:.4rem;margin-top:.5rem}
.chip{border:1px solid var(--border);border-radius:999px;padding:.25rem .7rem;font-size:.85rem;cursor:pointer;background:#fff}
.chip:hover{border-color:var(--accent);color:var(--accent)}
h2{font-size:1rem;margin-bottom:.25rem}
</style>
</head>
<body>
<header>
  <h1>🚌 Alexandria Transit Assistant</h1>
  <p>Ask for a route in English or Arabic · اسأل عن طريقك بالعربي أو بالإنجليزي</p>
</header>
<main>
  <section class="card">
    <div id="status"><span><span class="dot" id="otp-dot"></span><span id="otp-text">Checking OTP…</span></span><span id="stops-text"></span></div>
  </section>
  <section class="card">
    <form class="row" id="ask">
      <input id="query" autocomplete="off" placeholder="e.g. from Victoria to Sidi Gaber / من المنشية للسيوف">
      <button id="send" type="submit">Ask</button>
    </form>
    <div class="chips" id="examples"></div>
  </section>
  <section class="card">
    <h2>Answer</h2>
    <div id="answer">Your trip plan will appear here.</div>
  </section>
  <section class="card">
    <h2>Recent places</h2>
    <div class="chips" id="recent"></div>
  </section>
</main>
<script>
const EXAMPLES = [
  "عايز أروح من الفلكي لسيدي جابر",
  "من المنشية للسيوف",
  "I want to go from Victoria to Sidi Gaber",
  "How do I go from Falaki to Montazah?"
];
const $ = (id) => document.getElementById(id);

function renderMarkdown(text) {
  const esc = text.replace(/&/g, "&amp;").replace(/</g, "&lt;").replace(/>/g, "&gt;");
  return esc.replace(/\*\*(.+?)\*\*/g, "<strong>$1</strong>");
}

function chip(parent, label, onClick) {
  const el = document.createElement("span");
  el.className = "chip";
  el.textContent = label;
  el.onclick = onClick;
  parent.appendChild(el);
}

async function loadStatus() {
  try {
    const res = await fetch("/api/status");
    const s = await res.json();
    const state = s.otp_status ? "online" : (s.otp_detail && s.otp_detail.includes("status") ? "error" : "offline");
    $("otp-dot").className = "dot " + state;
    $("otp-text").textContent = "OTP " + state + " (" + s.otp_url + ")";
    $("stops-text").textContent = s.geocoder_stops + " stops loaded";
  } catch (e) {
    $("otp-dot").className = "dot offline";
    $("otp-text").textContent = "Status unavailable";
  }
}

async function loadRecent() {
  try {
    const res = await fetch("/api/recent");
    const data = await res.json();
    const box = $("recent");
    box.innerHTML = "";
    (data.recent || []).forEach((name) => chip(box, name, () => {
      $("query").value = ($("query").value ? $("query").value + " " : "from ") + name;
      $("query").focus();
    }));
  } catch (e) {}
}

async function ask(query) {
  const answer = $("answer");
  $("send").disabled = true;
  answer.textContent = "…";
  try {
    const res = await fetch("/api/query", {
      method: "POST",
      headers: {"Content-Type": "application/json"},
      body: JSON.stringify({query})
    });
    const data = await res.json();
    if (!res.ok || !data.success) {
      answer.textContent = data.error || "Request failed";
      return;
    }
    answer.dir = data.language === "ar" ? "rtl" : "ltr";
    answer.innerHTML = renderMarkdown(data.response);
    loadRecent();
  } catch (e) {
    answer.textContent = "Network error: " + e;
  } finally {
    $("send").disabled = false;
  }
}

$("ask").addEventListener("submit", (ev) => {
  ev.preventDefault();
  const q = $("query").value.trim();
  if (q) ask(q);
});
EXAMPLES.forEach((q) => chip($("examples"), q, () => { $("query").value = q; ask(q); }));
loadStatus();
loadRecent();
setInterval(loadStatus, 30000);
</script>
</body>
</html>
"##;
