// src/atcoder.rs
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

use crate::http::{get_html, norm_text, FetchError};

const HOME_URL: &str = "https://atcoder.jp/home";
const SITE_BASE: &str = "https://atcoder.jp";

static SEL_TABLE: Lazy<Selector> = Lazy::new(|| selector("#contest-table-upcoming"));
static SEL_ROW: Lazy<Selector> = Lazy::new(|| selector("tbody tr"));
static SEL_TIME: Lazy<Selector> = Lazy::new(|| selector("time.fixtime-short"));
static SEL_LINK: Lazy<Selector> = Lazy::new(|| selector("td a"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

#[derive(Debug, Clone)]
pub struct Contest {
    pub start_time: String, // as shown on the page, e.g. "2026-10-25 21:00:00+0900"
    pub name: String,
    pub link: Option<String>,
}

pub async fn collect(client: &Client) -> Result<Vec<Contest>, FetchError> {
    let html = get_html(client, HOME_URL).await?;
    parse(&html)
}

pub fn parse(html: &str) -> Result<Vec<Contest>, FetchError> {
    let doc = Html::parse_document(html);
    let table = doc
        .select(&SEL_TABLE)
        .next()
        .ok_or(FetchError::Markup("#contest-table-upcoming not found"))?;

    let base = Url::parse(SITE_BASE).ok();
    let mut out = Vec::new();
    for row in table.select(&SEL_ROW) {
        let Some(time) = row.select(&SEL_TIME).next() else { continue };
        // first anchor wraps the time (timeanddate.com), the second is the contest
        let Some(anchor) = row.select(&SEL_LINK).nth(1) else { continue };

        let start_time = norm_text(&time.text().collect::<String>());
        let name = norm_text(&anchor.text().collect::<String>());
        if start_time.is_empty() || name.is_empty() {
            continue;
        }

        let link = anchor
            .value()
            .attr("href")
            .zip(base.as_ref())
            .and_then(|(href, base)| base.join(href.trim()).ok())
            .map(|u| u.to_string());

        out.push(Contest { start_time, name, link });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOME: &str = r#"
<html><body>
<div id="contest-table-active"><table><tbody>
  <tr><td><a href="x"><time class="fixtime fixtime-short">2026-10-19 12:00:00+0900</time></a></td>
      <td><span>Ⓗ</span> <a href="/contests/ahc055">AtCoder Heuristic Contest 055</a></td></tr>
</tbody></table></div>
<div id="contest-table-upcoming">
  <table class="table">
    <thead><tr><th>Start Time</th><th>Contest Name</th></tr></thead>
    <tbody>
      <tr>
        <td class="text-center"><a href="http://www.timeanddate.com/worldclock/fixedtime.html?iso=20261025T2100&p1=248" target="blank"><time class="fixtime fixtime-short">2026-10-25 21:00:00+0900</time></a></td>
        <td><span aria-hidden="true">Ⓐ</span> <a href="/contests/abc428">
            AtCoder Beginner Contest 428
        </a></td>
      </tr>
      <tr>
        <td class="text-center"><a href="http://www.timeanddate.com/"><time class="fixtime fixtime-short">2026-11-01 21:00:00+0900</time></a></td>
        <td><span>Ⓡ</span> <a href="https://atcoder.jp/contests/arc210">AtCoder Regular Contest 210 (Div. 1)</a></td>
      </tr>
      <tr><td>TBD</td><td>no anchors here</td></tr>
    </tbody>
  </table>
</div>
</body></html>"#;

    #[test]
    fn parses_upcoming_table_only() {
        let got = parse(HOME).unwrap();
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].start_time, "2026-10-25 21:00:00+0900");
        assert_eq!(got[0].name, "AtCoder Beginner Contest 428");
        assert_eq!(got[0].link.as_deref(), Some("https://atcoder.jp/contests/abc428"));
        assert_eq!(got[1].name, "AtCoder Regular Contest 210 (Div. 1)");
        assert_eq!(got[1].link.as_deref(), Some("https://atcoder.jp/contests/arc210"));
    }

    #[test]
    fn empty_upcoming_table_is_empty() {
        let html = r#"<div id="contest-table-upcoming"><table><tbody></tbody></table></div>"#;
        assert!(parse(html).unwrap().is_empty());
    }

    #[test]
    fn missing_table_is_markup_error() {
        assert!(matches!(parse("<html><body>maintenance</body></html>"), Err(FetchError::Markup(_))));
        assert!(parse("").is_err());
    }
}
