//! Self-contained HTML page embedding an SVG document next to the legend.
//!
//! The SVG text is inserted verbatim; nothing here looks at grid geometry.
use std::fmt;

use crate::grid::ItemStyle;
use crate::render::{Legend, LEGEND_TITLE};

const PAGE_TITLE: &str = "Hex Grid Generator";

const STYLESHEET: &str = r#"        body {
            margin: 0;
            padding: 20px;
            font-family: Arial, sans-serif;
            background-color: #f5f5f5;
        }
        .container {
            display: flex;
            gap: 20px;
            max-width: 100%;
        }
        .svg-container {
            flex: 1;
            background: white;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
            overflow: auto;
            max-height: 80vh;
        }
        .svg-container svg {
            display: block;
            margin: 0;
        }
        .legend {
            width: 250px;
            background: white;
            padding: 20px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
            height: fit-content;
        }
        .legend h3 {
            margin-top: 0;
            color: #333;
        }
        .legend-items {
            display: flex;
            flex-direction: column;
            gap: 10px;
        }
        .legend-item {
            display: flex;
            align-items: center;
            gap: 10px;
        }
        .legend-symbol {
            width: 20px;
            height: 20px;
            border: 1px solid #333;
            display: flex;
            align-items: center;
            justify-content: center;
        }
        .legend-symbol.fill {
            border-radius: 0;
        }
        .legend-symbol.dot {
            border-radius: 50%;
            background: white;
        }
        .legend-symbol .dot {
            width: 8px;
            height: 8px;
            border-radius: 50%;
        }
        .legend-name {
            font-size: 14px;
            color: #555;
        }
        h1 {
            color: #333;
            margin-bottom: 20px;
        }
"#;

/// An HTML page wrapping an already rendered SVG document.
pub struct HtmlPage<'a> {
    svg: &'a str,
    legend: &'a Legend,
}

impl<'a> HtmlPage<'a> {
    pub fn new(svg: &'a str, legend: &'a Legend) -> Self {
        Self { svg, legend }
    }
}

impl fmt::Display for HtmlPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<!DOCTYPE html>")?;
        writeln!(f, r#"<html lang="en">"#)?;
        writeln!(f, "<head>")?;
        writeln!(f, r#"    <meta charset="UTF-8">"#)?;
        writeln!(
            f,
            r#"    <meta name="viewport" content="width=device-width, initial-scale=1.0">"#
        )?;
        writeln!(f, "    <title>{PAGE_TITLE}</title>")?;
        writeln!(f, "    <style>")?;
        write!(f, "{STYLESHEET}")?;
        writeln!(f, "    </style>")?;
        writeln!(f, "</head>")?;
        writeln!(f, "<body>")?;
        writeln!(f, "    <h1>{PAGE_TITLE}</h1>")?;
        writeln!(f, r#"    <div class="container">"#)?;
        writeln!(f, r#"        <div class="svg-container">"#)?;
        writeln!(f, "{}", self.svg)?;
        writeln!(f, "        </div>")?;
        self.write_legend(f)?;
        writeln!(f, "    </div>")?;
        writeln!(f, "</body>")?;
        write!(f, "</html>")
    }
}

impl HtmlPage<'_> {
    fn write_legend(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, r#"        <div class="legend">"#)?;
        writeln!(f, "            <h3>{LEGEND_TITLE}</h3>")?;
        writeln!(f, r#"            <div class="legend-items">"#)?;
        for entry in &self.legend.entries {
            writeln!(f, r#"                <div class="legend-item">"#)?;
            match entry.style {
                ItemStyle::Fill => writeln!(
                    f,
                    r#"                    <div class="legend-symbol fill" style="background-color: {};"></div>"#,
                    entry.color
                )?,
                ItemStyle::Dot => writeln!(
                    f,
                    r#"                    <div class="legend-symbol dot"><div class="dot" style="background-color: {};"></div></div>"#,
                    entry.color
                )?,
            }
            writeln!(
                f,
                r#"                    <span class="legend-name">{}</span>"#,
                Escaped(&entry.label())
            )?;
            writeln!(f, "                </div>")?;
        }
        writeln!(f, "            </div>")?;
        writeln!(f, "        </div>")
    }
}

/// Minimal HTML text escaping.
struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&#39;")?,
                c => write!(f, "{c}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::grid::{DiceExpr, ItemType};

    fn legend() -> Legend {
        Legend::from_items(&[
            ItemType::new("A", 10.0, ItemStyle::Fill, Color::rgb(0x11, 0x22, 0x33)),
            ItemType::new("B", 20.0, ItemStyle::Dot, Color::rgb(0x44, 0x55, 0x66))
                .with_dice(DiceExpr::new(1, 6, 0)),
            ItemType::new("C", 30.0, ItemStyle::Fill, Color::rgb(0x77, 0x88, 0x99)),
        ])
    }

    #[test]
    fn embeds_the_svg_verbatim() {
        let svg = "<svg width=\"1\" height=\"1\"><path d=\"M 0 0 Z\"/></svg>";
        let legend = legend();
        let html = HtmlPage::new(svg, &legend).to_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(svg));
        assert!(html.contains(r#"<div class="svg-container">"#));
        assert!(html.ends_with("</html>"));
    }

    #[test]
    fn legend_lists_items_in_configuration_order() {
        let legend = legend();
        let html = HtmlPage::new("<svg/>", &legend).to_string();
        let a = html.find("A (10.0%)").unwrap();
        let b = html.find("B (20.0%) - 1d6").unwrap();
        let c = html.find("C (30.0%)").unwrap();
        assert!(a < b && b < c);
        assert_eq!(html.matches(r#"class="legend-item""#).count(), 3);
        assert!(html.contains(r##"<div class="legend-symbol fill" style="background-color: #112233;">"##));
        assert!(html.contains(r##"<div class="dot" style="background-color: #445566;">"##));
    }

    #[test]
    fn item_names_are_escaped() {
        let legend = Legend::from_items(&[ItemType::new(
            "<Ruins & \"Caves\">",
            5.0,
            ItemStyle::Fill,
            Color::BLACK,
        )]);
        let html = HtmlPage::new("<svg/>", &legend).to_string();
        assert!(html.contains("&lt;Ruins &amp; &quot;Caves&quot;&gt; (5.0%)"));
    }
}
