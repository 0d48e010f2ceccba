use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use thirtyone_game::{ScoreSummary, TournamentResult, TurnOrder, win_share};

const BAR_WIDTH: u64 = 40;

/// Settings echoed back in every report.
#[derive(Debug, Clone, Serialize)]
pub struct RunSettings {
    pub games: usize,
    pub players: usize,
    pub seed: u64,
    pub order: TurnOrder,
    pub parallel: bool,
}

/// One strategy seated at every chair of its own table.
#[derive(Debug, Clone, Serialize)]
pub struct SingleTrial {
    pub strategy: String,
    pub summary: ScoreSummary,
    pub scores: Vec<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum SimulationReport {
    Tournament {
        settings: RunSettings,
        summary: ScoreSummary,
        result: TournamentResult,
    },
    Single {
        settings: RunSettings,
        trials: Vec<SingleTrial>,
    },
}

impl SimulationReport {
    pub fn tournament(settings: RunSettings, result: TournamentResult) -> Self {
        Self::Tournament {
            settings,
            summary: ScoreSummary::from_scores(result.scores()),
            result,
        }
    }
}

/// Win counts ordered for display: fewest wins first, then by name.
fn standings(result: &TournamentResult) -> Vec<(&str, u64)> {
    let mut rows: Vec<(&str, u64)> = result
        .wins()
        .iter()
        .map(|(name, &wins)| (name.as_str(), wins))
        .collect();
    rows.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
    rows
}

fn bar(count: u64, peak: u64) -> String {
    let len = if peak == 0 { 0 } else { count * BAR_WIDTH / peak };
    "#".repeat(usize::try_from(len).unwrap_or(0))
}

fn fmt_score(score: Option<u32>) -> String {
    score.map_or_else(|| "-".to_string(), |s| s.to_string())
}

fn write_summary_lines(out: &mut dyn Write, summary: &ScoreSummary) -> Result<()> {
    writeln!(
        out,
        "   Mean {:.2} ± {:.2}  (min {}, max {})",
        summary.mean,
        summary.std_dev,
        fmt_score(summary.min),
        fmt_score(summary.max)
    )?;
    let peak = summary.histogram.values().copied().max().unwrap_or(0);
    for (score, &count) in &summary.histogram {
        writeln!(
            out,
            "   {score:>2} | {:<width$} {count}",
            bar(count, peak),
            width = usize::try_from(BAR_WIDTH).unwrap_or(0)
        )?;
    }
    Ok(())
}

pub fn generate_console_report(
    out: &mut dyn Write,
    report: &SimulationReport,
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    match report {
        SimulationReport::Tournament {
            settings,
            summary,
            result,
        } => {
            writeln!(out, "{}", "📊 Tournament Results".bright_cyan().bold())?;
            writeln!(out, "{}", "=====================".cyan())?;
            writeln!(
                out,
                "Games: {}  Seed: {}  Seating: {}",
                result.games(),
                settings.seed,
                settings.order
            )?;
            if result.no_winner_games() > 0 {
                writeln!(
                    out,
                    "Games without a winner: {}",
                    result.no_winner_games().to_string().yellow()
                )?;
            }
            writeln!(out)?;
            writeln!(out, "{}", "Wins by strategy".bold())?;
            for (name, wins) in standings(result) {
                writeln!(
                    out,
                    "   {name:24} {:>8} {:>6.2}%",
                    wins.to_string().green(),
                    win_share(wins, result.games())
                )?;
            }
            writeln!(out)?;
            writeln!(out, "{}", "Winning score distribution".bold())?;
            write_summary_lines(out, summary)?;
        }
        SimulationReport::Single { settings, trials } => {
            writeln!(out, "{}", "📊 Single-Strategy Trials".bright_cyan().bold())?;
            writeln!(out, "{}", "=========================".cyan())?;
            writeln!(
                out,
                "Games: {}  Players: {}  Seed: {}",
                settings.games, settings.players, settings.seed
            )?;
            for trial in trials {
                writeln!(out)?;
                writeln!(out, "{}", trial.strategy.bold())?;
                write_summary_lines(out, &trial.summary)?;
            }
        }
    }
    writeln!(out)?;
    writeln!(out, "🏁 Total time: {total_duration:?}")?;
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, report: &SimulationReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, report: &SimulationReport) -> Result<()> {
    match report {
        SimulationReport::Tournament {
            settings,
            summary,
            result,
        } => {
            writeln!(out, "# Thirty-One Tournament Results\n")?;
            writeln!(out, "## Summary\n")?;
            writeln!(out, "- **Games**: {}", result.games())?;
            writeln!(out, "- **Seed**: {}", settings.seed)?;
            writeln!(out, "- **Seating**: {}", settings.order)?;
            writeln!(out, "- **Games without a winner**: {}", result.no_winner_games())?;
            writeln!(
                out,
                "- **Mean winning score**: {:.2} (std {:.2})\n",
                summary.mean, summary.std_dev
            )?;
            writeln!(out, "## Wins\n")?;
            writeln!(out, "| Strategy | Wins | Share |")?;
            writeln!(out, "|---|---:|---:|")?;
            for (name, wins) in standings(result) {
                writeln!(
                    out,
                    "| {name} | {wins} | {:.2}% |",
                    win_share(wins, result.games())
                )?;
            }
            writeln!(out)?;
            write_markdown_histogram(out, summary)?;
        }
        SimulationReport::Single { settings, trials } => {
            writeln!(out, "# Thirty-One Single-Strategy Results\n")?;
            writeln!(out, "## Summary\n")?;
            writeln!(out, "- **Games**: {}", settings.games)?;
            writeln!(out, "- **Players**: {}", settings.players)?;
            writeln!(out, "- **Seed**: {}\n", settings.seed)?;
            writeln!(out, "| Strategy | Mean | Std | Min | Max |")?;
            writeln!(out, "|---|---:|---:|---:|---:|")?;
            for trial in trials {
                let s = &trial.summary;
                writeln!(
                    out,
                    "| {} | {:.2} | {:.2} | {} | {} |",
                    trial.strategy,
                    s.mean,
                    s.std_dev,
                    fmt_score(s.min),
                    fmt_score(s.max)
                )?;
            }
            for trial in trials {
                writeln!(out, "\n### {}\n", trial.strategy)?;
                write_markdown_histogram(out, &trial.summary)?;
            }
        }
    }
    Ok(())
}

fn write_markdown_histogram(out: &mut dyn Write, summary: &ScoreSummary) -> Result<()> {
    writeln!(out, "| Winning score | Games |")?;
    writeln!(out, "|---:|---:|")?;
    for (score, count) in &summary.histogram {
        writeln!(out, "| {score} | {count} |")?;
    }
    Ok(())
}

pub fn generate_csv_report(out: &mut dyn Write, report: &SimulationReport) -> Result<()> {
    match report {
        SimulationReport::Tournament { result, .. } => {
            writeln!(out, "strategy,wins,win_share")?;
            for (name, wins) in standings(result) {
                writeln!(
                    out,
                    "{name},{wins},{:.4}",
                    win_share(wins, result.games())
                )?;
            }
        }
        SimulationReport::Single { settings, trials } => {
            writeln!(out, "strategy,players,games,mean,std_dev,min,max")?;
            for trial in trials {
                let s = &trial.summary;
                writeln!(
                    out,
                    "{},{},{},{:.4},{:.4},{},{}",
                    trial.strategy,
                    settings.players,
                    s.count,
                    s.mean,
                    s.std_dev,
                    fmt_score(s.min),
                    fmt_score(s.max)
                )?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use thirtyone_game::GameOutcome;

    fn settings() -> RunSettings {
        RunSettings {
            games: 3,
            players: 2,
            seed: 7,
            order: TurnOrder::Shuffled,
            parallel: false,
        }
    }

    fn won(score: u32, name: &str) -> GameOutcome {
        GameOutcome::Won {
            score,
            seat: 0,
            name: name.to_string(),
        }
    }

    fn sample_tournament() -> SimulationReport {
        let mut result = TournamentResult::new(["Alpha", "Beta", "Gamma"]);
        result.record(&won(4, "Beta"));
        result.record(&won(6, "Beta"));
        result.record(&won(5, "Alpha"));
        SimulationReport::tournament(settings(), result)
    }

    fn sample_single() -> SimulationReport {
        let scores = vec![4, 9, 4];
        SimulationReport::Single {
            settings: settings(),
            trials: vec![SingleTrial {
                strategy: "Only3OrLowest".to_string(),
                summary: ScoreSummary::from_scores(&scores),
                scores,
            }],
        }
    }

    fn render(
        write: impl Fn(&mut dyn Write, &SimulationReport) -> Result<()>,
        report: &SimulationReport,
    ) -> String {
        let mut buf: Vec<u8> = Vec::new();
        write(&mut buf, report).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn standings_sort_by_wins_ascending() {
        let SimulationReport::Tournament { result, .. } = sample_tournament() else {
            panic!("expected tournament");
        };
        let rows = standings(&result);
        assert_eq!(rows, vec![("Gamma", 0), ("Alpha", 1), ("Beta", 2)]);
    }

    #[test]
    fn bar_scales_to_peak() {
        assert_eq!(bar(10, 10).len(), 40);
        assert_eq!(bar(5, 10).len(), 20);
        assert!(bar(0, 0).is_empty());
    }

    #[test]
    fn console_report_lists_every_strategy() {
        let content = render(
            |out, report| generate_console_report(out, report, Duration::from_millis(5)),
            &sample_tournament(),
        );
        assert!(content.contains("Tournament Results"));
        for name in ["Alpha", "Beta", "Gamma"] {
            assert!(content.contains(name));
        }
        assert!(content.contains("Total time"));
    }

    #[test]
    fn json_report_is_tagged_by_mode() {
        let content = render(generate_json_report, &sample_tournament());
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["mode"], "tournament");
        assert_eq!(value["result"]["wins"]["Beta"], 2);
        assert_eq!(value["result"]["scores"], serde_json::json!([4, 6, 5]));
        assert_eq!(value["settings"]["order"], "shuffled");

        let content = render(generate_json_report, &sample_single());
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["mode"], "single");
        assert_eq!(value["trials"][0]["summary"]["max"], 9);
    }

    #[test]
    fn markdown_report_has_tables() {
        let content = render(generate_markdown_report, &sample_tournament());
        assert!(content.starts_with("# Thirty-One Tournament Results"));
        assert!(content.contains("| Beta | 2 | 66.67% |"));
        let content = render(generate_markdown_report, &sample_single());
        assert!(content.contains("| Only3OrLowest | 5.67 |"));
        assert!(content.contains("| 4 | 2 |"));
    }

    #[test]
    fn csv_report_rows_per_strategy() {
        let content = render(generate_csv_report, &sample_tournament());
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "strategy,wins,win_share");
        assert_eq!(lines[1], "Gamma,0,0.0000");
        assert_eq!(lines.len(), 4);

        let content = render(generate_csv_report, &sample_single());
        assert!(content.contains("Only3OrLowest,2,3,5.6667,"));
    }
}
