//! HTML template for the printable card profile.
//!
//! The page is self-contained (inline styles, no external assets) so the
//! headless browser can print it without network access.

use cardhub_entity::client::Client;

/// Escape text for safe interpolation into HTML.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn push_row(body: &mut String, label: &str, value: &str) {
    body.push_str(&format!(
        "<div class=\"row\"><span class=\"label\">{}</span><span>{}</span></div>\n",
        escape_html(label),
        escape_html(value)
    ));
}

/// Render the profile page for `client`, linking back to its public URL.
pub fn render_profile_html(client: &Client, public_url: &str) -> String {
    let mut body = String::new();

    body.push_str(&format!("<h1>{}</h1>\n", escape_html(&client.name)));
    if let Some(title) = &client.title {
        body.push_str(&format!("<p class=\"title\">{}</p>\n", escape_html(title)));
    }
    if let Some(company) = &client.company {
        body.push_str(&format!(
            "<p class=\"company\">{}</p>\n",
            escape_html(company)
        ));
    }

    for phone in client.phones() {
        push_row(&mut body, "Phone", phone);
    }
    for email in client.emails() {
        push_row(&mut body, "Email", email);
    }
    if let Some(address) = &client.address {
        push_row(&mut body, "Address", address);
    }
    if let Some(website) = &client.website {
        push_row(&mut body, "Web", website);
    }
    if let Some(portfolio) = &client.portfolio {
        push_row(&mut body, "Portfolio", portfolio);
    }

    let social = &client.social.0;
    for (label, link) in [
        ("LinkedIn", &social.linkedin),
        ("Twitter", &social.twitter),
        ("Instagram", &social.instagram),
        ("Facebook", &social.facebook),
        ("YouTube", &social.youtube),
        ("GitHub", &social.github),
    ] {
        if let Some(url) = link {
            push_row(&mut body, label, url);
        }
    }

    let hours = &client.working_hours.0;
    for (label, range) in [
        ("Mon-Fri", &hours.weekdays),
        ("Saturday", &hours.saturday),
        ("Sunday", &hours.sunday),
    ] {
        if let Some(range) = range {
            push_row(&mut body, label, range);
        }
    }

    if let Some(bio) = &client.bio {
        body.push_str(&format!("<p class=\"bio\">{}</p>\n", escape_html(bio)));
    }

    body.push_str(&format!(
        "<p class=\"link\">{}</p>\n",
        escape_html(public_url)
    ));

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         <style>\n\
         body {{ font-family: 'Helvetica Neue', Arial, sans-serif; margin: 2.5rem; color: #1a1a2e; }}\n\
         h1 {{ margin-bottom: 0.2rem; font-size: 2rem; }}\n\
         .title {{ margin: 0; color: #555; font-size: 1.1rem; }}\n\
         .company {{ margin: 0 0 1.2rem; font-weight: 600; }}\n\
         .row {{ margin: 0.25rem 0; }}\n\
         .label {{ display: inline-block; width: 6.5rem; color: #888; font-size: 0.85rem; text-transform: uppercase; }}\n\
         .bio {{ margin-top: 1.2rem; line-height: 1.5; white-space: pre-wrap; }}\n\
         .link {{ margin-top: 1.5rem; font-size: 0.8rem; color: #888; }}\n\
         </style>\n\
         </head>\n\
         <body>\n{body}</body>\n\
         </html>\n",
        title = escape_html(&client.name),
        body = body
    )
}
