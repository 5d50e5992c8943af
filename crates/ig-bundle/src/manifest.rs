//! `manifest.json` and `browserconfig.xml` generation.

use serde::Serialize;

use crate::config::ManifestConfig;
use crate::error::BundleError;

pub const MANIFEST_NAME: &str = "manifest.json";
pub const BROWSERCONFIG_NAME: &str = "browserconfig.xml";

#[derive(Debug, Serialize)]
struct WebManifest<'a> {
    name: &'a str,
    short_name: &'a str,
    icons: Vec<ManifestIcon>,
    theme_color: &'a str,
    background_color: &'a str,
    display: &'a str,
}

#[derive(Debug, Serialize)]
struct ManifestIcon {
    src: &'static str,
    sizes: &'static str,
    #[serde(rename = "type")]
    kind: &'static str,
}

/// Pretty-printed web app manifest pointing at `/icon-192.png`.
pub fn manifest_json(cfg: &ManifestConfig) -> Result<String, BundleError> {
    let manifest = WebManifest {
        name: &cfg.name,
        short_name: &cfg.short_name,
        icons: vec![ManifestIcon {
            src: "/icon-192.png",
            sizes: "192x192",
            kind: "image/png",
        }],
        theme_color: &cfg.theme_color,
        background_color: &cfg.background_color,
        display: &cfg.display,
    };
    serde_json::to_string_pretty(&manifest).map_err(|e| BundleError::EncodingFailure {
        size: 192,
        format: "json",
        reason: e.to_string(),
    })
}

/// Microsoft tile config referencing `/mstile-150x150.png`.
pub fn browserconfig_xml(tile_color: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<browserconfig>
  <msapplication>
    <tile>
      <square150x150logo src="/mstile-150x150.png"/>
      <TileColor>{}</TileColor>
    </tile>
  </msapplication>
</browserconfig>"#,
        escape_xml(tile_color)
    )
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{browserconfig_xml, manifest_json};
    use crate::config::ManifestConfig;

    #[test]
    fn default_manifest_layout() {
        let json = manifest_json(&ManifestConfig::default()).expect("serialize");
        let expected = r##"{
  "name": "",
  "short_name": "",
  "icons": [
    {
      "src": "/icon-192.png",
      "sizes": "192x192",
      "type": "image/png"
    }
  ],
  "theme_color": "#ffffff",
  "background_color": "#ffffff",
  "display": "standalone"
}"##;
        assert_eq!(json, expected);
    }

    #[test]
    fn browserconfig_starts_with_declaration() {
        let xml = browserconfig_xml("#da532c");
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="utf-8"?>"#));
        assert!(xml.contains(r#"<square150x150logo src="/mstile-150x150.png"/>"#));
        assert!(xml.contains("<TileColor>#da532c</TileColor>"));
    }

    #[test]
    fn tile_color_is_escaped() {
        let xml = browserconfig_xml("<red&blue>");
        assert!(xml.contains("<TileColor>&lt;red&amp;blue&gt;</TileColor>"));
    }
}
