use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt::Write;

const INDEX_HTML: &str = include_str!("../index.html");

// alphanumerics and "_.-~/" pass through, everything else is percent-encoded
const QUERY: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

pub enum Outcome<'a> {
    Empty,
    Recommended(&'a [String]),
    NotFound(&'a str),
}

pub fn imdb_link(title: &str) -> String {
    format!(
        "https://www.imdb.com/find/?q={}&ref_=nv_sr_sm",
        utf8_percent_encode(title, QUERY)
    )
}

pub fn render(titles: &[String], selected: Option<&str>, outcome: Outcome) -> String {
    let mut options = String::new();
    for title in titles {
        let marker = if Some(title.as_str()) == selected {
            " selected"
        } else {
            ""
        };
        let title = escape(title);
        let _ = writeln!(
            options,
            "            <option value=\"{}\"{}>{}</option>",
            title, marker, title
        );
    }

    let mut results = String::new();
    match outcome {
        Outcome::Empty => {}
        Outcome::Recommended(recommended) => {
            results.push_str("    <h3 class=\"results-title\">✨ Recommended Movies ✨</h3>\n");
            results.push_str("    <div class=\"grid\">\n");
            for title in recommended {
                let _ = writeln!(
                    results,
                    "        <div class=\"movie-card\"><a class=\"movie-link\" href=\"{}\" target=\"_blank\">🎥 <span class=\"movie-title\">{}</span></a></div>",
                    escape(&imdb_link(title)),
                    escape(title)
                );
            }
            results.push_str("    </div>\n");
        }
        Outcome::NotFound(title) => {
            let _ = writeln!(
                results,
                "    <h3 class=\"notice\">No movie titled \"{}\" in the catalog</h3>",
                escape(title)
            );
        }
    }

    INDEX_HTML
        .replace("{{OPTIONS}}", options.trim_end_matches('\n'))
        .replace("{{RESULTS}}", results.trim_end_matches('\n'))
}

fn escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            // keeps titles from forming template placeholders
            '{' => escaped.push_str("&#123;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_quotes_title() {
        assert_eq!(
            imdb_link("The Dark Knight"),
            "https://www.imdb.com/find/?q=The%20Dark%20Knight&ref_=nv_sr_sm"
        );
        assert_eq!(
            imdb_link("Face/Off"),
            "https://www.imdb.com/find/?q=Face/Off&ref_=nv_sr_sm"
        );
        assert_eq!(
            imdb_link("Amélie & Co?"),
            "https://www.imdb.com/find/?q=Am%C3%A9lie%20%26%20Co%3F&ref_=nv_sr_sm"
        );
    }

    #[test]
    fn page_lists_every_title_and_marks_selection() {
        let titles = vec!["Avatar".to_string(), "Spectre".to_string()];
        let html = render(&titles, Some("Spectre"), Outcome::Empty);
        assert!(html.contains("<option value=\"Avatar\">Avatar</option>"));
        assert!(html.contains("<option value=\"Spectre\" selected>Spectre</option>"));
        assert!(!html.contains("movie-card\">"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn recommendations_render_as_links() {
        let titles = vec!["Avatar".to_string()];
        let recommended = vec!["Star Trek".to_string()];
        let html = render(&titles, Some("Avatar"), Outcome::Recommended(&recommended));
        assert!(html.contains("Recommended Movies"));
        assert!(html.contains(
            "href=\"https://www.imdb.com/find/?q=Star%20Trek&amp;ref_=nv_sr_sm\""
        ));
        assert!(html.contains("<span class=\"movie-title\">Star Trek</span>"));
    }

    #[test]
    fn titles_are_html_escaped() {
        let titles = vec!["<script>alert(1)</script>".to_string()];
        let html = render(&titles, None, Outcome::NotFound("Tom & Jerry"));
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Tom &amp; Jerry"));

        let titles = vec!["{{RESULTS}}".to_string()];
        let html = render(&titles, None, Outcome::NotFound("x"));
        assert!(html.contains("&#123;&#123;RESULTS}}"));
    }
}
