//! HTML inventory page.

use std::fmt::Write;

use chrono::{DateTime, Local};
use quick_xml::escape::escape;

use crate::inventory::Inventory;

const HEAD: &str = r#"<head>
  <meta http-equiv="Content-Type" content="text/html; charset=utf-8" />
  <title>IPS Inventory Info</title>
  <style type="text/css">
    #container {
      width: 780px;
      background: #FFFFFF;
      margin: 0 auto;
      border: 1px solid #000000;
      text-align: left;
      font-size: 0.75em;
    }
    #mainContent {
      margin: 0 0 0 0px;
      padding: 0 20px 20px 20px;
      line-height: 0.5;
    }
  </style>
</head>
<body>
  <!--container div tag-->
  <div id="container">
    <!--mainContent div tag-->
    <div id="mainContent">
      <h1>IPS Inventory Info</h1>
"#;

const TAIL: &str = "      </div>
  </div>
</body>
";

/// Render the inventory as a static HTML page stamped with `collected_at`.
pub fn render_html(inventory: &Inventory, collected_at: DateTime<Local>) -> String {
    let mut out = String::from(HEAD);

    let _ = writeln!(
        out,
        "      <p>Data collected on {}.</p>",
        collected_at.format("%A %b %d, %Y @%X")
    );
    out.push_str("      <BR>\n");

    for (host, record) in inventory {
        let _ = writeln!(out, "<h4>{}</h4>", escape(&host.to_uppercase()));
        for (field, value) in record.fields() {
            let _ = writeln!(
                out,
                "<p> -{}: {}</p>",
                escape(field.label()),
                escape(value)
            );
        }
        out.push_str("<BR>\n");
    }

    out.push_str(TAIL);
    out
}
