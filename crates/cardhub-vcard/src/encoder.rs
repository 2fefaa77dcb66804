//! vCard 3.0 text encoding.

use cardhub_entity::client::Client;

/// Escape a text value per RFC 2426 §2.4.2.
///
/// Backslash, semicolon, comma, and line breaks corrupt the payload for
/// any conforming parser if embedded raw. Backslash must be escaped
/// first.
fn escape(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace('\r', "")
        .replace(',', "\\,")
        .replace(';', "\\;")
}

/// Encode a client's contact fields as a vCard 3.0 payload.
///
/// Pure and side-effect free: byte-identical input yields byte-identical
/// output. Lines are CRLF-terminated. Every populated phone and email
/// slot is emitted as its own typed line, in slot order, without
/// deduplication.
pub fn encode_vcard(client: &Client) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("BEGIN:VCARD".to_string());
    lines.push("VERSION:3.0".to_string());

    // N splits the display name into a first token and the remaining
    // tokens joined by space; FN keeps the display name verbatim.
    let mut tokens = client.name.split_whitespace();
    let given = tokens.next().unwrap_or_default();
    let family = tokens.collect::<Vec<_>>().join(" ");
    lines.push(format!("N:{};{};;;", escape(&family), escape(given)));
    lines.push(format!("FN:{}", escape(&client.name)));

    if let Some(company) = &client.company {
        lines.push(format!("ORG:{}", escape(company)));
    }
    if let Some(title) = &client.title {
        lines.push(format!("TITLE:{}", escape(title)));
    }

    for phone in client.phones() {
        lines.push(format!("TEL;TYPE=WORK,VOICE:{phone}"));
    }
    for email in client.emails() {
        lines.push(format!("EMAIL;TYPE=INTERNET:{email}"));
    }

    if let Some(address) = &client.address {
        lines.push(format!("ADR;TYPE=WORK:;;{};;;;", escape(address)));
    }
    if let Some(website) = &client.website {
        lines.push(format!("URL:{website}"));
    }
    if let Some(bio) = &client.bio {
        lines.push(format!("NOTE:{}", escape(bio)));
    }

    lines.push("END:VCARD".to_string());

    let mut out = lines.join("\r\n");
    out.push_str("\r\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardhub_entity::client::{ClientStatus, HistoryEntry};
    use chrono::Utc;
    use sqlx::types::Json;
    use uuid::Uuid;

    fn sample_client() -> Client {
        Client {
            id: Uuid::nil(),
            slug: "jane-doe".into(),
            name: "Jane Doe".into(),
            title: Some("CEO".into()),
            phone1: Some("555-1000".into()),
            phone2: Some("555-2000".into()),
            phone3: None,
            email1: Some("jane@x.com".into()),
            email2: None,
            email3: None,
            company: Some("Acme".into()),
            bio: None,
            address: None,
            website: Some("https://acme.example".into()),
            portfolio: None,
            map_url: None,
            social: Json(Default::default()),
            working_hours: Json(Default::default()),
            photo_url: None,
            pdf_url: None,
            vcard_url: None,
            qr_code_url: None,
            status: ClientStatus::Pending,
            history: Json(Vec::<HistoryEntry>::new()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// Undo RFC 2426 escaping, the way a conformant parser would.
    fn unescape(value: &str) -> String {
        let mut out = String::with_capacity(value.len());
        let mut chars = value.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                match chars.next() {
                    Some('n') => out.push('\n'),
                    Some(other) => out.push(other),
                    None => {}
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn encoding_is_deterministic() {
        let client = sample_client();
        assert_eq!(encode_vcard(&client), encode_vcard(&client));
    }

    #[test]
    fn name_splits_into_given_and_family() {
        let mut client = sample_client();
        client.name = "Jane van der Doe".into();
        let card = encode_vcard(&client);
        assert!(card.contains("N:van der Doe;Jane;;;\r\n"));
        assert!(card.contains("FN:Jane van der Doe\r\n"));
    }

    #[test]
    fn every_populated_slot_gets_its_own_line() {
        let card = encode_vcard(&sample_client());
        assert_eq!(card.matches("TEL;TYPE=WORK,VOICE:").count(), 2);
        assert_eq!(card.matches("EMAIL;TYPE=INTERNET:").count(), 1);
    }

    #[test]
    fn bio_special_characters_round_trip() {
        let mut client = sample_client();
        let bio = "Line one\nsecond; has, commas\\and a slash";
        client.bio = Some(bio.into());
        let card = encode_vcard(&client);

        let note_line = card
            .lines()
            .find(|l| l.starts_with("NOTE:"))
            .expect("NOTE line present");
        // The raw value must not leak unescaped structure into the line.
        assert!(!note_line.contains("\n"));
        assert_eq!(unescape(&note_line["NOTE:".len()..]), bio);
    }

    #[test]
    fn envelope_lines_present() {
        let card = encode_vcard(&sample_client());
        assert!(card.starts_with("BEGIN:VCARD\r\nVERSION:3.0\r\n"));
        assert!(card.ends_with("END:VCARD\r\n"));
    }
}
