use std::collections::{HashMap, HashSet};

/// A structured ingredient line parsed from free text
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientLine {
    pub quantity: Option<f64>,
    pub unit: String,
    pub name: String,
}

const DEFAULT_SYNONYMS: &[(&str, &str)] = &[
    ("tablespoons", "tbsp"),
    ("tablespoon", "tbsp"),
    ("tbsps", "tbsp"),
    ("tbs", "tbsp"),
    ("teaspoons", "tsp"),
    ("teaspoon", "tsp"),
    ("tsps", "tsp"),
    ("ounces", "oz"),
    ("ounce", "oz"),
    ("cups", "cup"),
    ("pounds", "pound"),
    ("lbs", "pound"),
    ("lb", "pound"),
    ("grams", "g"),
    ("gram", "g"),
    ("kilograms", "kg"),
    ("kilogram", "kg"),
    ("milliliters", "ml"),
    ("millilitres", "ml"),
    ("liters", "l"),
    ("litres", "l"),
];

const DEFAULT_UNITS: &[&str] = &["tbsp", "tsp", "oz", "cup", "pound", "kg", "g", "ml", "l"];

/// Unit vocabulary: synonym -> canonical abbreviation, plus the set of
/// canonical units the parser will consume.
#[derive(Debug, Clone)]
pub struct UnitTable {
    synonyms: HashMap<String, String>,
    units: HashSet<String>,
}

impl Default for UnitTable {
    fn default() -> Self {
        Self {
            synonyms: DEFAULT_SYNONYMS
                .iter()
                .map(|(long, short)| (long.to_string(), short.to_string()))
                .collect(),
            units: DEFAULT_UNITS.iter().map(|u| u.to_string()).collect(),
        }
    }
}

impl UnitTable {
    /// Extend the defaults. A synonym's target becomes a known unit.
    pub fn with_synonyms<I, K, V>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (long, short) in extra {
            let short = short.as_ref().to_lowercase();
            self.units.insert(short.clone());
            self.synonyms.insert(long.as_ref().to_lowercase(), short);
        }
        self
    }

    /// Canonical form of `token` if it names a known unit
    pub fn canonical(&self, token: &str) -> Option<&str> {
        let token = token.trim_end_matches(['.', ',']);
        let canonical = self
            .synonyms
            .get(token)
            .map(String::as_str)
            .unwrap_or(token);

        self.units.get(canonical).map(String::as_str)
    }
}

/// Remove "(...)" groups, collapsing them to a single space
fn strip_parenthesized(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut depth = 0usize;

    for c in text.chars() {
        match c {
            '(' => {
                depth += 1;
                output.push(' ');
            }
            ')' if depth > 0 => depth -= 1,
            _ if depth == 0 => output.push(c),
            _ => {}
        }
    }

    output
}

fn parse_number(token: &str) -> Option<f64> {
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '/') {
        return None;
    }

    match token.split_once('/') {
        Some((numerator, denominator)) => {
            let numerator: f64 = numerator.parse().ok()?;
            let denominator: f64 = denominator.parse().ok()?;
            if denominator == 0.0 {
                None
            } else {
                Some(numerator / denominator)
            }
        }
        None => token.parse().ok(),
    }
}

/// A leading amount token: "2", "2.5", "1/2", a range "4-6" (averaged) or a
/// hyphenated mixed number "1-1/2".
fn parse_amount(token: &str) -> Option<f64> {
    match token.split_once('-') {
        Some((low, high)) => {
            let low_value = parse_number(low)?;
            let high_value = parse_number(high)?;

            let is_mixed_number =
                high.contains('/') && !low.contains(['/', '.']) && high_value < 1.0;
            if is_mixed_number {
                Some(low_value + high_value)
            } else {
                Some((low_value + high_value) / 2.0)
            }
        }
        None => parse_number(token),
    }
}

/// Parse one raw ingredient string.
///
/// Best effort: text without a recognizable leading amount comes back as a
/// name with no quantity and no unit.
pub fn parse_ingredient(raw: &str, units: &UnitTable) -> IngredientLine {
    let cleaned = strip_parenthesized(&raw.to_lowercase());
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();

    let Some(mut quantity) = tokens.first().and_then(|t| parse_amount(t)) else {
        return IngredientLine {
            quantity: None,
            unit: String::new(),
            name: tokens.join(" "),
        };
    };
    let mut rest = &tokens[1..];

    // "1 1/2 cups"
    if let Some(fraction) = rest
        .first()
        .filter(|t| t.contains('/') && !t.contains('-'))
        .and_then(|t| parse_number(t))
        .filter(|f| *f < 1.0)
    {
        quantity += fraction;
        rest = &rest[1..];
    }

    let unit = match rest.first().and_then(|t| units.canonical(t)) {
        Some(unit) => {
            let unit = unit.to_string();
            rest = &rest[1..];
            unit
        }
        None => String::new(),
    };

    IngredientLine {
        quantity: Some(quantity),
        unit,
        name: rest.join(" "),
    }
}

pub fn parse_ingredients(raw_lines: &[String], units: &UnitTable) -> Vec<IngredientLine> {
    raw_lines
        .iter()
        .map(|line| parse_ingredient(line, units))
        .collect()
}

/// Render a quantity the way a cook reads it: whole numbers plainly,
/// fractional parts as sixteenths or coarser ("1 1/2"), anything else with
/// two decimals.
pub fn format_quantity(quantity: Option<f64>) -> String {
    let Some(quantity) = quantity else {
        return String::new();
    };

    // scaling back and forth leaves noise like 0.9999999999999999
    let quantity = (quantity * 1e6).round() / 1e6;
    let whole = quantity.trunc();
    let fraction = quantity - whole;
    if fraction.abs() < 1e-6 {
        return format!("{}", whole as i64);
    }

    for denominator in 2..=16u32 {
        let numerator = (fraction * f64::from(denominator)).round();
        if numerator >= 1.0 && (numerator / f64::from(denominator) - fraction).abs() < 1e-3 {
            let numerator = numerator as u32;
            if numerator == denominator {
                return format!("{}", whole as i64 + 1);
            }
            if whole == 0.0 {
                return format!("{}/{}", numerator, denominator);
            }
            return format!("{} {}/{}", whole as i64, numerator, denominator);
        }
    }

    format!("{:.2}", quantity)
}
