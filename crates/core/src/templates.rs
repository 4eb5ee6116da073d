use crate::models::HdTemplate;

/// Parses the table printed by `chdman listtemplates`.
///
/// Rows look like `  0  Conner  CFA170A  332  16  63  163 MB`. Anything
/// that does not start with a numeric id (banner, column header, ruler) is
/// skipped, as are rows too short to hold every column.
///
/// The manufacturer is always the single token after the id; chdman's
/// built-in table only has one-word manufacturers. A multi-word name would
/// fold its tail into `model`, which keeps every token and the label intact.
pub fn parse_templates(output: &str) -> Vec<HdTemplate> {
    output.lines().filter_map(parse_row).collect()
}

fn parse_row(line: &str) -> Option<HdTemplate> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let id = tokens.first()?.parse::<u32>().ok()?;

    let size_len = match tokens.as_slice() {
        [.., number, unit] if is_size_number(number) && is_unit(unit) => 2,
        _ => 1,
    };
    // id, manufacturer, at least one model token, cyl, heads, sectors, size
    if tokens.len() < 6 + size_len {
        return None;
    }

    let size_start = tokens.len() - size_len;
    let geometry = &tokens[size_start - 3..size_start];
    let cylinders = geometry[0].parse().ok()?;
    let heads = geometry[1].parse().ok()?;
    let sectors = geometry[2].parse().ok()?;

    Some(HdTemplate {
        id,
        manufacturer: tokens[1].to_string(),
        model: tokens[2..size_start - 3].join(" "),
        cylinders,
        heads,
        sectors,
        size: tokens[size_start..].join(" "),
    })
}

fn is_unit(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_alphabetic())
}

fn is_size_number(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit() || c == '.')
}
