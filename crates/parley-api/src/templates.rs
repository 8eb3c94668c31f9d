//! Server-rendered chat page.

use parley_chat::render::escape_text;
use parley_chat::{render, render_html, Style, Transcript};

use crate::state::AppState;

/// Build the full page: heading, input form, then the transcript.
///
/// `error` is shown as a banner above the transcript when the last
/// submission failed.
pub fn chat_page(state: &AppState, transcript: &Transcript, error: Option<&str>) -> String {
    let ui = &state.config.ui;
    let blocks = render(transcript, &state.render_options);

    let subtitle_style = match ui.style {
        Style::Styled => " style=\"color:gray\"",
        Style::Plain => "",
    };

    let banner = error
        .map(|msg| format!("<div class=\"error\" role=\"alert\">{}</div>", escape_text(msg)))
        .unwrap_or_default();

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width,initial-scale=1">
<title>{title}</title>
<style>
body{{font-family:'Segoe UI',sans-serif;max-width:760px;margin:0 auto;padding:24px}}
h1{{font-size:28px;margin-bottom:4px}}
form{{display:flex;flex-direction:column;gap:8px;margin:16px 0}}
.input-row{{display:flex;gap:8px}}
.input-row input{{flex:1;padding:8px 12px;font-size:16px;border:1px solid #ccc;border-radius:6px}}
.input-row button{{padding:8px 16px;font-size:16px;border-radius:6px;cursor:pointer}}
.error{{background:#fdecea;color:#b71c1c;padding:10px 12px;border-radius:8px;margin-bottom:10px}}
.transcript{{overflow-y:auto}}
.turn > b + p{{display:inline;margin:0}}
</style>
</head>
<body>
<h1>{title}</h1>
<p{subtitle_style}>{subtitle}</p>
<form method="post" action="/send">
<label for="message">{input_label}</label>
<div class="input-row">
<input id="message" name="message" type="text" autocomplete="off" autofocus>
<button type="submit">Send</button>
</div>
</form>
{banner}
<div class="transcript" id="transcript">
{transcript}
</div>
</body>
</html>
"##,
        title = escape_text(&ui.title),
        subtitle_style = subtitle_style,
        subtitle = escape_text(&ui.subtitle),
        input_label = escape_text(ui.input_label()),
        banner = banner,
        transcript = render_html(&blocks),
    )
}
