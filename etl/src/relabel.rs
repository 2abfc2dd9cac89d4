//! Category keys: splitting composite labels and normalizing irregular codes.
//!
//! Source labels carry a code and a display name in one field
//! (`"11 - Agricultura, cría y explotación de animales..."` in the industry
//! workbooks, `"B.1bP---Producto interno bruto"` in the state files). Aggregate
//! rows use irregular codes, or no code at all, so the split result goes
//! through a fixed override table.

/// Separator between code and name in the industry workbooks.
pub const INDUSTRY_SEPARATOR: &str = " - ";

/// Separator between code and name in the state files.
pub const REGIONAL_SEPARATOR: &str = "---";

/// A plain `from -> to` lookup table.
pub type OverrideTable = &'static [(&'static str, &'static str)];

/// Industry codes normalized to the canonical aggregate codes.
pub const INDUSTRY_CODE_OVERRIDES: OverrideTable = &[
    ("____aB.1bP", "PIB"),
    ("____aB.1bV", "VAB"),
    ("Actividades primarias", "1"),
    ("Actividades secundarias", "2"),
    ("Actividades terciarias", "4"),
];

/// State-file codes normalized to the canonical aggregate codes.
pub const REGIONAL_CODE_OVERRIDES: OverrideTable = &[
    ("B.1bP", "PIB"),
    ("Actividad económica total", "VAB"),
    ("Actividades primarias", "1"),
    ("Actividades secundarias", "2"),
    ("Actividades terciarias", "4"),
];

/// State-file names replaced by the better-known term.
pub const REGIONAL_NAME_OVERRIDES: OverrideTable =
    &[("Actividad económica total", "Valor agregado bruto")];

/// Code and display name of one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryKey {
    pub code: String,
    pub name: String,
}

/// Split `label` at the first `separator`.
///
/// Without a separator the whole trimmed label serves as both code and name,
/// which is how the unnumbered aggregates (`"Actividades primarias"`) arrive.
pub fn split_category(label: &str, separator: &str) -> CategoryKey {
    match label.split_once(separator) {
        Some((code, name)) => CategoryKey {
            code: code.trim().to_string(),
            name: name.trim().to_string(),
        },
        None => {
            let whole = label.trim().to_string();
            CategoryKey { code: whole.clone(), name: whole }
        }
    }
}

/// Replacement for `value` in `table`, if any.
pub fn lookup(table: OverrideTable, value: &str) -> Option<&'static str> {
    table.iter().find(|(from, _)| *from == value).map(|(_, to)| *to)
}

/// `value` replaced through `table`, or unchanged.
pub fn relabel(table: OverrideTable, value: String) -> String {
    match lookup(table, &value) {
        Some(to) => to.to_string(),
        None => value,
    }
}

/// Strip the source's internal prefix from a state-file row label.
///
/// `"4|<C1>B.1bP---Producto interno bruto "` becomes
/// `"B.1bP---Producto interno bruto"`.
pub fn clean_regional_label(raw: &str) -> String {
    let tail = raw.rsplit('|').next().unwrap_or(raw);
    tail.replace("<C1>", "").trim().to_string()
}
