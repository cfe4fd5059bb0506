//! Input loading - strategy list and matchup matrix CSV files

use std::path::Path;

use anyhow::{bail, Context, Result};

/// Strategy list: header of attribute names, one strategy per line
pub const ROSTER_FILE: &str = "pokemon_list.csv";

/// Matchup matrix: one row of comma-separated scores per line
pub const MATRIX_FILE: &str = "matrix.csv";

/// Load roster labels and the raw matrix from `dir`
pub fn load_input(dir: &Path) -> Result<(Vec<String>, Vec<Vec<f64>>)> {
    if !dir.is_dir() {
        bail!("Directory {} does not exist", dir.display());
    }
    let roster_path = dir.join(ROSTER_FILE);
    let matrix_path = dir.join(MATRIX_FILE);
    for path in [&roster_path, &matrix_path] {
        if !path.is_file() {
            bail!("File {} does not exist", path.display());
        }
    }

    tracing::info!("Loading strategy list and matrix from {}", dir.display());
    let roster = parse_roster(&read(&roster_path)?)
        .with_context(|| format!("Failed to parse {}", roster_path.display()))?;
    let matrix = parse_matrix(&read(&matrix_path)?)
        .with_context(|| format!("Failed to parse {}", matrix_path.display()))?;
    tracing::debug!(strategies = roster.len(), rows = matrix.len(), "input loaded");

    Ok((roster, matrix))
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Parse the strategy list into display labels.
///
/// Label format: `"{n}: {FM}.{CM}.{CM2} {Name}"`, with move initials taken
/// from the `fmove`, `cmove` and `cmove2` columns (empty when absent).
pub fn parse_roster(content: &str) -> Result<Vec<String>> {
    let mut lines = content.lines().filter(|l| !l.trim().is_empty());
    let header = match lines.next() {
        Some(header) => header,
        None => bail!("missing header line"),
    };
    let attrs: Vec<&str> = header.split(',').map(str::trim).collect();

    let labels = lines
        .enumerate()
        .map(|(i, line)| {
            let values: Vec<&str> = line.split(',').map(str::trim).collect();
            let field = |name: &str| {
                attrs
                    .iter()
                    .position(|a| *a == name)
                    .and_then(|p| values.get(p).copied())
                    .unwrap_or("")
            };
            format!(
                "{}: {}.{}.{} {}",
                i + 1,
                initials(field("fmove")),
                initials(field("cmove")),
                initials(field("cmove2")),
                capitalize(field("name"))
            )
        })
        .collect();

    Ok(labels)
}

/// Parse comma-separated rows of numbers
pub fn parse_matrix(content: &str) -> Result<Vec<Vec<f64>>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(line_no, line)| {
            line.split(',')
                .enumerate()
                .map(|(col, cell)| {
                    let cell = cell.trim();
                    cell.parse::<f64>().with_context(|| {
                        format!(
                            "line {}, column {}: invalid number '{}'",
                            line_no + 1,
                            col + 1,
                            cell
                        )
                    })
                })
                .collect()
        })
        .collect()
}

/// "Razor Leaf" -> "RL"
pub fn initials(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// "VENUSAUR" -> "Venusaur"
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials() {
        assert_eq!(initials("Razor Leaf"), "RL");
        assert_eq!(initials("frenzy plant"), "FP");
        assert_eq!(initials("Vine  Whip"), "VW");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("VENUSAUR"), "Venusaur");
        assert_eq!(capitalize("mr. mime"), "Mr. mime");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_parse_roster_labels() {
        let content = "name,fmove,cmove,cmove2\n\
                       venusaur,Vine Whip,Frenzy Plant,Sludge Bomb\n\
                       AZUMARILL,Bubble,Ice Beam,Play Rough\n";
        let labels = parse_roster(content).unwrap();
        assert_eq!(labels, vec!["1: VW.FP.SB Venusaur", "2: B.IB.PR Azumarill"]);
    }

    #[test]
    fn test_parse_roster_missing_columns() {
        let content = "name,fmove\nmedicham,Counter\n\nregisteel,Lock On\n";
        let labels = parse_roster(content).unwrap();
        assert_eq!(labels, vec!["1: C.. Medicham", "2: LO.. Registeel"]);
    }

    #[test]
    fn test_parse_roster_empty() {
        assert!(parse_roster("").is_err());
        assert!(parse_roster("name,fmove\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_matrix() {
        let matrix = parse_matrix("0,1.5,-2\n-1.5,0,3\n\n2,-3,0\n").unwrap();
        assert_eq!(
            matrix,
            vec![
                vec![0.0, 1.5, -2.0],
                vec![-1.5, 0.0, 3.0],
                vec![2.0, -3.0, 0.0],
            ]
        );
    }

    #[test]
    fn test_parse_matrix_reports_position() {
        let err = parse_matrix("0,1\n1,abc\n").unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("line 2, column 2"), "{}", message);
    }

    #[test]
    fn test_load_input_missing_directory() {
        let err = load_input(Path::new("/definitely/not/here")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
