/// Reserved words of the ezsql dialect, in suggestion order.
pub const KEYWORDS: &[&str] = &[
    "case",
    "when",
    "else",
    "end",
    "true",
    "false",
    "null",
    "select",
    "from",
    "where",
    "between",
    "join",
    "like",
    "regexp",
    "create",
    "persistence",
    "import",
];
