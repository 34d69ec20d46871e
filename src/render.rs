use crate::error::QlogError;
use crate::game::GameSummary;
use itertools::Itertools;
use std::collections::HashMap;
use std::io::Write;
use std::str::FromStr;

/// How finished games are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Indented `game_<N>:` blocks.
    Yaml,
    /// One `key:value` line per game, ready for journal tools.
    Kvc,
}

impl OutputFormat {
    pub const NAMES: &'static [&'static str] = &["yaml", "kvc"];
}

impl FromStr for OutputFormat {
    type Err = QlogError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yaml" => Ok(OutputFormat::Yaml),
            "kvc" => Ok(OutputFormat::Kvc),
            other => Err(QlogError::Format(other.to_string())),
        }
    }
}

// Map entries in hash order, or by key when asked to.
fn entries<V: Copy>(map: &HashMap<String, V>, sorted: bool) -> Vec<(&str, V)> {
    let it = map.iter().map(|(k, v)| (&k[..], *v));
    if sorted {
        it.sorted_by(|a, b| a.0.cmp(b.0)).collect()
    } else {
        it.collect()
    }
}

/// Write one finished game to `out`.
pub fn write_summary<W: Write>(
    out: &mut W,
    game: &GameSummary,
    format: OutputFormat,
    sorted: bool,
) -> Result<(), QlogError> {
    let scores = entries(&game.scores, sorted);
    let means = entries(&game.kills_by_cause, sorted);
    match format {
        OutputFormat::Yaml => {
            writeln!(out, "game_{}:", game.sequence_number)?;
            writeln!(out, "  total_kills: {}", game.total_kills)?;
            writeln!(out, "  players:")?;
            for (player, _) in scores.iter() {
                writeln!(out, "    - {}", player)?;
            }
            writeln!(out, "  kills:")?;
            for (player, score) in scores.iter() {
                writeln!(out, "    {}: {}", player, score)?;
            }
            writeln!(out, "  kills_by_means:")?;
            for (cause, n) in means.iter() {
                writeln!(out, "    {}: {}", cause, n)?;
            }
            writeln!(out)?;
        }
        OutputFormat::Kvc => {
            let mut tokens = vec![
                std::format!("game:{}", game.sequence_number),
                std::format!("total_kills:{}", game.total_kills),
            ];
            tokens.extend(
                scores
                    .iter()
                    .map(|(p, s)| std::format!("kills.{}:{}", kvc_key(p), s)),
            );
            tokens.extend(
                means
                    .iter()
                    .map(|(c, n)| std::format!("means.{}:{}", kvc_key(c), n)),
            );
            writeln!(out, "{}", tokens.iter().join(" "))?;
        }
    }
    Ok(())
}

// kvc tokens are split on whitespace and ':'. Nothing is trimmed: "A" and "A " are
// different keys and kvc readers sum repeated keys.
fn kvc_key(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_whitespace() || c == ':' { '_' } else { c })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    fn game() -> GameSummary {
        let mut g = GameSummary::default();
        g.sequence_number = 3;
        g.total_kills = 4;
        g.scores.insert("Zeh".to_string(), 2);
        g.scores.insert("Isgalamido".to_string(), -1);
        g.kills_by_cause.insert("MOD_SHOTGUN".to_string(), 1);
        g.kills_by_cause.insert("MOD_FALLING".to_string(), 3);
        g
    }

    fn render(g: &GameSummary, format: OutputFormat, sorted: bool) -> String {
        let mut buf = Vec::new();
        write_summary(&mut buf, g, format, sorted).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_yaml_sorted() {
        let expected = "game_3:\n\
                        \x20 total_kills: 4\n\
                        \x20 players:\n\
                        \x20   - Isgalamido\n\
                        \x20   - Zeh\n\
                        \x20 kills:\n\
                        \x20   Isgalamido: -1\n\
                        \x20   Zeh: 2\n\
                        \x20 kills_by_means:\n\
                        \x20   MOD_FALLING: 3\n\
                        \x20   MOD_SHOTGUN: 1\n\
                        \n";
        assert_eq!(render(&game(), OutputFormat::Yaml, true), expected);
    }

    #[test]
    fn test_yaml_unsorted_has_every_entry() {
        let out = render(&game(), OutputFormat::Yaml, false);
        assert!(out.starts_with("game_3:\n  total_kills: 4\n  players:\n"));
        for line in &[
            "    - Zeh\n",
            "    - Isgalamido\n",
            "    Zeh: 2\n",
            "    Isgalamido: -1\n",
            "    MOD_SHOTGUN: 1\n",
            "    MOD_FALLING: 3\n",
        ] {
            assert!(out.contains(line), "missing {:?} in {}", line, out);
        }
        assert!(out.ends_with("\n\n"));
    }

    #[test]
    fn test_yaml_empty_game() {
        let g = GameSummary {
            sequence_number: 1,
            ..GameSummary::default()
        };
        assert_eq!(
            render(&g, OutputFormat::Yaml, false),
            "game_1:\n  total_kills: 0\n  players:\n  kills:\n  kills_by_means:\n\n"
        );
    }

    #[test]
    fn test_kvc_line() {
        let mut g = game();
        g.scores.insert("Dono da Bola ".to_string(), 0);
        assert_eq!(
            render(&g, OutputFormat::Kvc, true),
            "game:3 total_kills:4 kills.Dono_da_Bola_:0 kills.Isgalamido:-1 kills.Zeh:2 means.MOD_FALLING:3 means.MOD_SHOTGUN:1\n"
        );
    }

    #[test]
    fn test_kvc_keeps_world_victim_apart_from_killer() {
        let mut g = GameSummary::default();
        g.sequence_number = 2;
        g.total_kills = 2;
        g.scores.insert("Dono da Bola".to_string(), 1);
        g.scores.insert("Dono da Bola ".to_string(), -1);
        g.kills_by_cause.insert("MOD_FALLING".to_string(), 1);
        g.kills_by_cause.insert("MOD_ROCKET".to_string(), 1);
        assert_eq!(
            render(&g, OutputFormat::Kvc, true),
            "game:2 total_kills:2 kills.Dono_da_Bola:1 kills.Dono_da_Bola_:-1 means.MOD_FALLING:1 means.MOD_ROCKET:1\n"
        );
    }

    #[test]
    fn test_format_names() {
        for name in OutputFormat::NAMES {
            assert!(name.parse::<OutputFormat>().is_ok());
        }
        assert_eq!("kvc".parse::<OutputFormat>().unwrap(), OutputFormat::Kvc);
        let err = "xml".parse::<OutputFormat>().unwrap_err();
        assert_eq!(err.to_string(), "unknown output format 'xml'");
    }
}
