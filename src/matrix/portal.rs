//! National portal adapter.
//!
//! # Responsibilities
//! - Fetch the disponibilidade page with its own timeout budget
//! - Decode the status-image colors into `MatrixRow`s
//! - Drop malformed rows silently (layout failure != outage)
//!
//! # Design Decisions
//! - The page is scanned with plain substring passes rather than a DOM
//!   parser: the only structure we rely on is tr/td nesting and the color
//!   name inside the image path, and the adapter is disposable by design
//! - The User-Agent advertises a randomized Chrome version per fetch, the
//!   same trick the portal's other consumers use to avoid being shaped

use std::time::Duration;

use rand::Rng;

use crate::config::PortalConfig;
use crate::matrix::{MatrixRow, PortalStatus, CHANNEL_COLUMNS};

#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    #[error("portal fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),
}

/// Fetches and decodes the national availability table.
pub struct PortalSource {
    client: reqwest::Client,
    url: String,
}

impl PortalSource {
    pub fn new(config: &PortalConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    pub async fn fetch(&self) -> Result<Vec<MatrixRow>, PortalError> {
        let version: u32 = rand::thread_rng().gen_range(110..130);
        let user_agent = format!(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) Chrome/{}.0.0.0 Safari/537.36",
            version
        );
        let html = self
            .client
            .get(&self.url)
            .header(reqwest::header::USER_AGENT, user_agent)
            .send()
            .await?
            .text()
            .await?;
        Ok(decode_matrix(&html))
    }
}

/// Decode the availability table out of the portal page.
///
/// Scans the first `tabelaListagemDados` table; each row needs a non-empty
/// state cell plus at least five status columns or it is dropped.
pub fn decode_matrix(html: &str) -> Vec<MatrixRow> {
    let table = match table_slice(html) {
        Some(t) => t,
        None => return Vec::new(),
    };

    let mut rows = Vec::new();
    for row_html in slices_between(table, "<tr", "</tr>") {
        let cells: Vec<&str> = slices_between(row_html, "<td", "</td>").collect();
        if cells.len() < CHANNEL_COLUMNS + 1 {
            continue;
        }
        let state = strip_tags(cells[0]).trim().to_string();
        if state.is_empty() {
            continue;
        }
        let mut channels = [PortalStatus::Unknown; CHANNEL_COLUMNS];
        for (i, channel) in channels.iter_mut().enumerate() {
            *channel = decode_cell(cells[i + 1]);
        }
        rows.push(MatrixRow { state, channels });
    }
    rows
}

fn table_slice(html: &str) -> Option<&str> {
    let start = html.find("tabelaListagemDados")?;
    let rest = &html[start..];
    let end = rest.find("</table>").unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Iterate over the contents between each `open`..`close` pair.
fn slices_between<'a>(
    html: &'a str,
    open: &'a str,
    close: &'a str,
) -> impl Iterator<Item = &'a str> {
    let mut cursor = html;
    std::iter::from_fn(move || {
        let start = cursor.find(open)?;
        let after_tag = cursor[start..].find('>').map(|i| start + i + 1)?;
        let end = cursor[after_tag..]
            .find(close)
            .map(|i| after_tag + i)
            .unwrap_or(cursor.len());
        let slice = &cursor[after_tag..end];
        cursor = &cursor[end..];
        Some(slice)
    })
}

fn decode_cell(cell: &str) -> PortalStatus {
    let src = attr_value(cell, "src").unwrap_or_default().to_lowercase();
    if src.contains("verde") {
        PortalStatus::Online
    } else if src.contains("amarela") {
        PortalStatus::Unstable
    } else if src.contains("vermelha") {
        PortalStatus::Offline
    } else {
        PortalStatus::Unknown
    }
}

fn attr_value<'a>(html: &'a str, attr: &str) -> Option<&'a str> {
    let pos = html.find(attr)?;
    let rest = &html[pos + attr.len()..];
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    let quote = rest.chars().next()?;
    if quote != '"' && quote != '\'' {
        return rest.split([' ', '>', '/']).next();
    }
    let inner = &rest[1..];
    inner.find(quote).map(|end| &inner[..end])
}

fn strip_tags(html: &str) -> String {
    let mut out = String::new();
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(img: &str) -> String {
        format!("<td align=\"center\"><img src=\"{}\" /></td>", img)
    }

    fn row(state: &str, colors: [&str; 5]) -> String {
        let mut html = format!("<tr><td>{}</td>", state);
        for color in colors {
            html.push_str(&cell(&format!("imagens/bola_{}_P.png", color)));
        }
        html.push_str("</tr>");
        html
    }

    fn page(rows: &[String]) -> String {
        format!(
            "<html><body><table class=\"tabelaListagemDados\">{}</table></body></html>",
            rows.join("")
        )
    }

    #[test]
    fn decodes_colors() {
        let html = page(&[row("PR", ["verde", "amarela", "vermelha", "verde", "verde"])]);
        let rows = decode_matrix(&html);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].state, "PR");
        assert_eq!(
            rows[0].channels,
            [
                PortalStatus::Online,
                PortalStatus::Unstable,
                PortalStatus::Offline,
                PortalStatus::Online,
                PortalStatus::Online,
            ]
        );
    }

    #[test]
    fn missing_image_is_unknown() {
        let html = page(&[format!(
            "<tr><td>SP</td><td></td>{}</tr>",
            cell("bola_verde_P.png").repeat(4)
        )]);
        let rows = decode_matrix(&html);
        assert_eq!(rows[0].channels[0], PortalStatus::Unknown);
    }

    #[test]
    fn short_and_blank_rows_are_dropped() {
        let html = page(&[
            "<tr><td>AM</td><td>x</td></tr>".to_string(),
            row("", ["verde"; 5]),
            row("MG", ["verde"; 5]),
        ]);
        let rows = decode_matrix(&html);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].state, "MG");
    }

    #[test]
    fn page_without_table_yields_no_rows() {
        assert!(decode_matrix("<html><body>em manutencao</body></html>").is_empty());
    }
}
