//! Legend markup handling.
//!
//! Scene files come from outside the engine, so legend markup is escaped
//! unless the scene marks it as trusted.

/// Control id of the legend container.
pub const LEGEND_CONTROL: &str = "legend";

/// Markup ready for injection into the legend container.
pub fn prepare_legend(markup: &str, trusted: bool) -> String {
    if trusted {
        markup.to_string()
    } else {
        escape_html(markup)
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untrusted_markup_is_escaped() {
        let out = prepare_legend(r#"<script>alert("x")</script>"#, false);
        assert_eq!(out, "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;");
    }

    #[test]
    fn trusted_markup_passes_through() {
        let markup = "<span style='color:#990099'>SERFR2</span>";
        assert_eq!(prepare_legend(markup, true), markup);
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(escape_html("SFO arrivals, 2016"), "SFO arrivals, 2016");
    }
}
