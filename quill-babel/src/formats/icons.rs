//! Icon mapping for the tree visualization format

/// Get the Unicode icon for a source-tree node
///
/// `node_type` is an element's tag name, or `"#document"` / `"#text"` for the
/// document root and text runs. Unknown tags share a neutral icon.
pub fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "#document" => "⧉",
        "#text" => "◦",
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => "§",
        "p" => "¶",
        "ul" | "ol" => "☰",
        "li" => "•",
        "dl" | "dt" | "dd" => "≔",
        "pre" => "𝒱",
        "code" => "ƒ",
        "strong" | "b" => "𝐁",
        "em" | "i" => "𝐼",
        "a" => "⊕",
        "sup" => "³",
        "img" => "▣",
        "blockquote" => "\"",
        "br" => "↵",
        "hr" => "⎯",
        "table" => "⊞",
        "tr" => "≡",
        "div" | "section" | "aside" => "➔",
        _ => "○",
    }
}
