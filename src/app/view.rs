//! HTML rendering of a [`LifetimeReport`].

use crate::{Lifetime, LifetimeReport};

fn caption(lifetime: Lifetime) -> &'static str {
    match lifetime {
        Lifetime::Transient => "a new instance every time it is injected",
        Lifetime::Scoped => "one instance per request",
        Lifetime::Singleton => "one instance for the whole application",
    }
}

/// Renders the sample page: one table row per injection site.
pub fn render_index(report: &LifetimeReport) -> String {
    let scope = report
        .scope
        .map(|id| id.to_string())
        .unwrap_or_else(|| "none".to_string());

    let mut rows = String::new();
    for (lifetime, pair) in report.pairs() {
        let verdict = if pair.same { "same" } else { "different" };
        rows.push_str(&format!(
            "      <tr>\n        <th rowspan=\"2\">{lifetime}<br><small>{caption}</small></th>\n        \
             <td>{name}Service1</td><td><code>{first}</code></td>\n        \
             <td rowspan=\"2\" class=\"{verdict}\">{verdict}</td>\n      </tr>\n      \
             <tr><td>{name}Service2</td><td><code>{second}</code></td></tr>\n",
            caption = caption(lifetime),
            name = lifetime,
            first = pair.first,
            second = pair.second,
        ));
    }

    format!(
        "<!DOCTYPE html>
<html lang=\"en\">
  <head>
    <meta charset=\"utf-8\">
    <title>Service lifetimes</title>
    <style>
      body {{ font-family: sans-serif; margin: 2rem; }}
      table {{ border-collapse: collapse; }}
      th, td {{ border: 1px solid #ccc; padding: 0.4rem 0.8rem; text-align: left; }}
      .same {{ color: #2a7a2a; }}
      .different {{ color: #a33; }}
    </style>
  </head>
  <body>
    <h1>Service lifetimes</h1>
    <p>Request scope: <code>{scope}</code>. Reload the page to start a new scope.</p>
    <table>
      <tr><th>Lifetime</th><th>Injected as</th><th>Identifier</th><th>Instances</th></tr>
{rows}    </table>
  </body>
</html>
"
    )
}
