//! Report rendering - text and JSON tier lists

use std::fmt::{self, Write};

use anyhow::Result;
use tierlist_core::{DominanceTierList, FlatTierList, TierList};

/// Render a tier list as plain text
pub fn render_text(tiers: &TierList) -> Result<String> {
    let mut out = String::new();
    match tiers {
        TierList::Flat(list) => render_flat(&mut out, list)?,
        TierList::Dominance(list) => render_dominance(&mut out, list)?,
    }
    Ok(out)
}

/// Render a tier list as pretty-printed JSON
pub fn render_json(tiers: &TierList) -> Result<String> {
    let mut json = serde_json::to_string_pretty(tiers)?;
    json.push('\n');
    Ok(json)
}

fn render_flat(out: &mut String, list: &FlatTierList) -> fmt::Result {
    for tier in &list.tiers {
        writeln!(out, "\nTier {}", tier.tier)?;
        for entry in &tier.entries {
            writeln!(out, "{}\t{}", entry.id, format_weight(entry.weight))?;
        }
    }
    Ok(())
}

fn render_dominance(out: &mut String, list: &DominanceTierList) -> fmt::Result {
    for tier in &list.tiers {
        writeln!(out, "\nTier {}", tier.tier)?;
        for member in &tier.members {
            writeln!(out, "{}", member.id)?;
        }
    }

    writeln!(out, "\nDominator Sets:")?;
    for set in &list.dominators {
        let names: Vec<&str> = set.dominators.iter().map(|m| m.id.as_str()).collect();
        writeln!(out, "{} is dominated by: {}", set.strategy.id, names.join(", "))?;
    }
    Ok(())
}

/// Weight rounded to 5 decimals; whole numbers keep one decimal ("1.0")
fn format_weight(weight: f64) -> String {
    let rounded = (weight * 1e5).round() / 1e5;
    if rounded.fract() == 0.0 {
        format!("{:.1}", rounded)
    } else {
        format!("{}", rounded)
    }
}
