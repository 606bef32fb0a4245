//! Reply email rendering.

use crate::server::{collaborator::mail::Email, pipeline::record::ReplyContext};

/// Renders the email sent when an administrator replies to a contact message.
///
/// Every line of `body` becomes its own paragraph in the HTML part. Recipient supplied
/// text is escaped.
pub fn reply_email(context: &ReplyContext, body: &str) -> Email {
    let paragraphs: String = body
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| format!("<p>{}</p>", escape_html(line)))
        .collect();

    let html = format!(
        "<p>Hi {},</p>{}<p>Thanks for getting in touch.</p>",
        escape_html(&context.name),
        paragraphs
    );
    let text = format!(
        "Hi {},\n\n{}\n\nThanks for getting in touch.",
        context.name, body
    );

    Email {
        to: context.email.clone(),
        subject: format!("Re: {}", context.subject),
        html,
        text,
    }
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
