//! Result formatting for console and JSON output.

use std::fmt::Write as _;

use anyhow::Result;
use circlesim_core::{Beatmap, Judgement, Mods, Replay};
use owo_colors::OwoColorize;
use serde::Serialize;

#[derive(Serialize)]
struct Report<'a> {
    beatmap: BeatmapSummary<'a>,
    replay: ReplaySummary<'a>,
    judgement: Judgement,
    accuracy: f64,
}

#[derive(Serialize)]
struct BeatmapSummary<'a> {
    title: &'a str,
    artist: &'a str,
    creator: &'a str,
    version: &'a str,
    hash: &'a str,
    object_count: usize,
}

#[derive(Serialize)]
struct ReplaySummary<'a> {
    player: Option<&'a str>,
    mods: Mods,
    timestamp: Option<String>,
}

const MOD_NAMES: [(Mods, &str); 14] = [
    (Mods::NO_FAIL, "NoFail"),
    (Mods::EASY, "Easy"),
    (Mods::HIDDEN, "Hidden"),
    (Mods::HARD_ROCK, "HardRock"),
    (Mods::SUDDEN_DEATH, "SuddenDeath"),
    (Mods::DOUBLE_TIME, "DoubleTime"),
    (Mods::RELAX, "Relax"),
    (Mods::HALF_TIME, "HalfTime"),
    (Mods::NIGHTCORE, "Nightcore"),
    (Mods::FLASHLIGHT, "Flashlight"),
    (Mods::AUTOPLAY, "Autoplay"),
    (Mods::SPUN_OUT, "SpunOut"),
    (Mods::AUTOPILOT, "Autopilot"),
    (Mods::PERFECT, "Perfect"),
];

fn mods_label(mods: Mods) -> String {
    if mods == Mods::NONE {
        return "None".to_string();
    }
    MOD_NAMES
        .iter()
        .filter(|(candidate, _)| mods.contains(*candidate))
        .map(|(_, name)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Weighted hit accuracy over judged objects; 1.0 when nothing judged.
fn accuracy(judgement: Judgement) -> f64 {
    let total = judgement.total();
    if total == 0 {
        return 1.0;
    }
    let weighted = 300 * judgement.count_300 + 100 * judgement.count_100 + 50 * judgement.count_50;
    f64::from(weighted) / f64::from(300 * total)
}

/// Format the simulation result for console display with colored output.
///
/// Returns a multi-line string with a boxed format.
pub fn format_console(beatmap: &Beatmap, replay: &Replay, judgement: Judgement) -> String {
    let mut output = String::new();

    let title_content = format!(
        "  {} - {} [{}]",
        beatmap.artist,
        beatmap.title.bold(),
        beatmap.version
    );
    let content_width =
        beatmap.artist.len() + beatmap.title.len() + beatmap.version.len() + 8;
    let border: String = "━".repeat(content_width.max(50));
    let border_dim = border.dimmed();

    let timestamp = replay
        .timestamp()
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "<unknown>".to_string());

    let _ = writeln!(output, "{}", border_dim);
    let _ = writeln!(output, "{}", title_content);
    let _ = writeln!(output, "{}", border_dim);
    let _ = writeln!(
        output,
        "  PLAYER : {}",
        replay.player_name.as_deref().unwrap_or("<unknown>")
    );
    let _ = writeln!(output, "  DATE   : {}", timestamp);
    let _ = writeln!(output, "  MODS   : {}", mods_label(replay.mods));
    let _ = writeln!(output, "  300    : {}", judgement.count_300.to_string().cyan());
    let _ = writeln!(output, "  100    : {}", judgement.count_100.to_string().green());
    let _ = writeln!(output, "  50     : {}", judgement.count_50.to_string().yellow());
    let _ = writeln!(output, "  MISS   : {}", judgement.count_miss.to_string().red());
    let _ = writeln!(
        output,
        "  ACC    : {}",
        format!("{:.2}%", accuracy(judgement) * 100.0).bold()
    );
    let _ = writeln!(output, "{}", border_dim);

    output
}

/// Format the simulation result as pretty-printed JSON.
pub fn format_json(beatmap: &Beatmap, replay: &Replay, judgement: Judgement) -> Result<String> {
    let report = Report {
        beatmap: BeatmapSummary {
            title: &beatmap.title,
            artist: &beatmap.artist,
            creator: &beatmap.creator,
            version: &beatmap.version,
            hash: &beatmap.hash,
            object_count: beatmap.hit_objects.len(),
        },
        replay: ReplaySummary {
            player: replay.player_name.as_deref(),
            mods: replay.mods,
            timestamp: replay.timestamp().map(|t| t.to_rfc3339()),
        },
        judgement,
        accuracy: accuracy(judgement),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mods_label_none() {
        assert_eq!(mods_label(Mods::NONE), "None");
    }

    #[test]
    fn test_mods_label_combination() {
        let mods = Mods::HIDDEN | Mods::DOUBLE_TIME;
        assert_eq!(mods_label(mods), "Hidden, DoubleTime");
    }

    #[test]
    fn test_accuracy_weighting() {
        let judgement = Judgement {
            count_300: 9,
            count_100: 1,
            count_50: 0,
            count_miss: 0,
        };
        let expected = (9.0 * 300.0 + 100.0) / (10.0 * 300.0);
        assert!((accuracy(judgement) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_accuracy_of_empty_run_is_full() {
        assert_eq!(accuracy(Judgement::default()), 1.0);
    }
}
