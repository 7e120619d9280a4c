//! Marketing attribution parameters forwarded across the funnel pages.

/// The only query parameters the funnel forwards, in the order they are
/// emitted regardless of their order in the inbound URL.
pub const TRACKING_KEYS: [&str; 9] = [
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_content",
    "utm_term",
    "utm_id",
    "xcod",
    "sck",
    "subid",
];

fn decode_component(raw: &str) -> String {
    // query components encode spaces as '+'
    let raw = raw.replace('+', " ");
    match urlencoding::decode(&raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw,
    }
}

/// Splits a raw query string (with or without the leading `?`) into decoded
/// key/value pairs, preserving URL order.
pub fn parse_pairs(query: &str) -> Vec<(String, String)> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

/// Builds the reusable tracking fragment: allow-listed keys only, in
/// allow-list order, re-encoded and joined with `&`. Empty when nothing
/// matched, otherwise prefixed with `?`. Captured once at page load.
pub fn extract(query: &str) -> String {
    let pairs = parse_pairs(query);
    let fragments: Vec<String> = TRACKING_KEYS
        .iter()
        .filter_map(|key| {
            pairs.iter().find(|(k, _)| k == key).map(|(k, v)| {
                format!("{}={}", urlencoding::encode(k), urlencoding::encode(v))
            })
        })
        .collect();

    if fragments.is_empty() {
        String::new()
    } else {
        format!("?{}", fragments.join("&"))
    }
}

/// Appends a previously captured tracking fragment to an outbound URL,
/// switching to `&` when the base already carries a query.
pub fn append_to(base_url: &str, fragment: &str) -> String {
    if fragment.is_empty() {
        return base_url.to_string();
    }
    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", base_url, separator, &fragment[1..])
}

/// First decoded value for `key` in the query, if present.
pub fn first_param(query: &str, key: &str) -> Option<String> {
    parse_pairs(query)
        .into_iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v)
}

/// Query string for the chat funnel page: every original parameter, in URL
/// order, with an authoritative `cpf` value overwriting any inbound one.
pub fn chat_query(query: &str, cpf: &str) -> String {
    let mut pairs = parse_pairs(query);
    if let Some(first) = pairs.iter().position(|(k, _)| k == "cpf") {
        pairs[first].1 = cpf.to_string();
        // keep only the authoritative occurrence
        let mut seen = 0;
        pairs.retain(|(k, _)| {
            if k == "cpf" {
                seen += 1;
                seen == 1
            } else {
                true
            }
        });
    } else {
        pairs.push(("cpf".to_string(), cpf.to_string()));
    }

    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
